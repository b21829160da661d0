//! # lsd-core
//!
//! Core crate for the LSD server. Contains configuration schemas, the
//! unified error system, content-type constants, and listing/paging types.
//!
//! This crate has **no** internal dependencies on other LSD crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
