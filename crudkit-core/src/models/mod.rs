//! Value types exchanged between controllers, the engine and the pool

pub mod identifier;
pub mod pagination;
pub mod table;
pub mod validation;
pub mod value;

pub use identifier::Identifier;
pub use pagination::{Page, PageParams, PageRequest, DEFAULT_LIMIT, MAX_LIMIT};
pub use table::{Table, TableDescriptor};
pub use validation::ValidationError;
pub use value::{Created, Id, Payload, Row, Scalar};
