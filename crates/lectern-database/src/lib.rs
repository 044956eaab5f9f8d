//! # lectern-database
//!
//! PostgreSQL connection pool management, the migration runner, and
//! repository implementations for every Lectern entity.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
