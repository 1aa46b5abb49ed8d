//! User-defined dashboard records
//!
//! One in-memory ordered collection per entity type (charts, metrics,
//! priorities, recommendations), each described by an [`EntitySchema`] and
//! served through a shared CRUD router.

pub mod entities;
pub mod handler;
pub mod schema;
pub mod store;

pub use entities::RecordStores;
pub use handler::{records_router, RecordsState};
pub use schema::{DefaultValue, EntitySchema, FieldSpec};
pub use store::{ListResult, Pagination, RecordStore, StoreError};
