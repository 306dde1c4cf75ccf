//! Pagination types

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Maximum items per page
pub const MAX_LIMIT: i64 = 50;

/// Default items per page
pub const DEFAULT_LIMIT: i64 = 20;

/// Clamped pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Create a page request, clamping rather than rejecting.
    ///
    /// - Page is clamped to a minimum of 0 (zero-indexed)
    /// - Limit is clamped to 1..=50
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(0),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Zero-based page index.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of rows plus the unpaginated row count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total count across all pages
    pub total: i64,
    /// Items for the requested page
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Convert every item, stopping at the first failure.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Page {
            total: self.total,
            data: self.data.into_iter().map(f).collect::<Result<_, _>>()?,
        })
    }
}

/// Query parameters for pagination, as a controller receives them
///
/// Integers outside the `i64` range saturate instead of failing, so an
/// oversized `limit` still ends up clamped by [`PageRequest::new`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "saturating_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "saturating_i64")]
    pub limit: Option<i64>,
}

fn saturating_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(SaturatingI64).map(Some)
}

struct SaturatingI64;

impl<'de> Visitor<'de> for SaturatingI64 {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        Ok(i64::try_from(v).unwrap_or(i64::MAX))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        if v.is_nan() || v.fract() != 0.0 {
            return Err(E::invalid_value(de::Unexpected::Float(v), &self));
        }
        // `as` saturates at the i64 bounds
        Ok(v as i64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        let digits = v.strip_prefix('-').unwrap_or(v);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(E::invalid_value(de::Unexpected::Str(v), &self));
        }
        Ok(v.parse().unwrap_or(if v.starts_with('-') { i64::MIN } else { i64::MAX }))
    }
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        Self::new(
            params.page.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
