//! Database module: models and schema for the catalog store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool construction and the `CatalogStorage` operations

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Product, ProductForm};
pub use schema::{DEFAULT_COVER_PHOTO, SQLITE_INIT};
pub use sqlite::{CatalogStorage, SqlitePool, connect};
