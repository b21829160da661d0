//! Request middleware.

pub mod compliance;
