//! Relational storage for the orders API.
//!
//! Provides the [`StoreGateway`] that owns a bounded pool of SQLite
//! connections, the [`Entity`] descriptors for the three backed relations,
//! and the parameterized [`Statement`] builders used to address them.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`entity`]: Entity trait and field descriptors
//! - [`types`]: Agent, Customer, Order row types
//! - [`statement`]: parameterized SQL builders
//! - [`schema`]: migrations and connection setup
//! - [`gateway`]: pooled, timeout-bounded statement execution

pub mod entity;
pub mod error;
pub mod gateway;
pub mod schema;
pub mod statement;
pub mod types;

// Re-export key types for ergonomic use.
pub use entity::{Entity, Field, FieldKind};
pub use error::StorageError;
pub use gateway::{PoolConfig, StoreGateway};
pub use rusqlite::types::Value;
pub use statement::Statement;
pub use types::{Agent, Customer, Order};
