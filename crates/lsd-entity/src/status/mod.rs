//! License Status Document model and state machine.

pub mod link;
pub mod model;
pub mod state;

pub use link::Link;
pub use model::{LicenseStatus, PotentialRights, Updated};
pub use state::Status;
