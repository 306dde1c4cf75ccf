//! crudkit-core: table-agnostic list and insert over a managed connection pool
//!
//! Resource controllers describe a table (name, readable columns, primary key)
//! and hand it to [`Crud`] together with a [`PageRequest`] or a payload. The
//! engine takes care of pagination, column projection and the translation of
//! database failures into a [`StructuredError`].
//!
//! ```ignore
//! let db = Database::connect(DbConfig::from_env()?).await?;
//! let crud = Crud::new(db.clone());
//!
//! let page: Page<Sport> = crud.index(PageRequest::default(), &SportTable::descriptor()).await?;
//! let created = crud.create(&SportCreate { category: "Rugby".into() }, &SportTable::descriptor()).await?;
//!
//! db.close().await;
//! ```

pub mod crud;
pub mod db;
pub mod error;
pub mod models;

pub use crud::Crud;
pub use db::{classify, Classification, Database, DbConfig, PoolStatus};
pub use error::{CrudError, DbError, StructuredError};
pub use models::{
    Created, Id, Identifier, Page, PageParams, PageRequest, Payload, Row, Scalar, Table,
    TableDescriptor, ValidationError,
};
