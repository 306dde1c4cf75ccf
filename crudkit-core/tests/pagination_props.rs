use crudkit_core::models::MAX_LIMIT;
use crudkit_core::{PageParams, PageRequest};
use proptest::prelude::*;

proptest! {
    /// Property: any input clamps into the valid range instead of failing
    #[test]
    fn prop_request_is_always_in_range(page in any::<i64>(), limit in any::<i64>()) {
        let request = PageRequest::new(page, limit);
        prop_assert!(request.page() >= 0);
        prop_assert!((1..=MAX_LIMIT).contains(&request.limit()));
        prop_assert!(request.offset() >= 0);
    }

    /// Property: in-range input passes through unchanged
    #[test]
    fn prop_valid_input_is_untouched(page in 0i64..1_000_000, limit in 1i64..=MAX_LIMIT) {
        let request = PageRequest::new(page, limit);
        prop_assert_eq!(request.page(), page);
        prop_assert_eq!(request.limit(), limit);
        prop_assert_eq!(request.offset(), page * limit);
    }

    /// Property: query params and the constructor agree
    #[test]
    fn prop_params_match_constructor(page in any::<i64>(), limit in any::<i64>()) {
        let from_params = PageRequest::from(PageParams { page: Some(page), limit: Some(limit) });
        prop_assert_eq!(from_params, PageRequest::new(page, limit));
    }
}
