//! # lsd-database
//!
//! PostgreSQL connection management and concrete store implementations
//! for the LSD entities, plus an in-memory variant for single-node and
//! test use.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
