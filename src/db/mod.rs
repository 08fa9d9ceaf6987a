//! Database module: models and schema for the calculation history.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and the shared insert shape
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the pool-owning storage type

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Calculation, NewCalculation};
pub use schema::SQLITE_INIT;
pub use sqlite::{CalculationsStorage, HISTORY_LIMIT, SqlitePool, connect};
