//! Incoming LCP license model.

pub mod model;

pub use model::{LcpLicense, LicenseRights};
