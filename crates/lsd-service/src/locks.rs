//! Striped per-license locking.
//!
//! The store is the ordering authority between processes; within one
//! process these stripes serialize racing mutations of the same license
//! so read-modify-write action handlers do not lose updates.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Number of lock stripes. Collisions only cost unnecessary
/// serialization, never correctness.
const STRIPES: usize = 64;

/// A fixed set of mutexes indexed by license-reference hash.
#[derive(Debug, Clone)]
pub struct LicenseLocks {
    stripes: Vec<Arc<Mutex<()>>>,
}

impl LicenseLocks {
    /// Create the stripe set.
    pub fn new() -> Self {
        Self {
            stripes: (0..STRIPES).map(|_| Arc::new(Mutex::new(()))).collect(),
        }
    }

    /// Acquire the stripe guarding `license_ref`, waiting if another
    /// mutation of the same license is in flight.
    pub async fn acquire(&self, license_ref: &str) -> OwnedMutexGuard<()> {
        let mut hasher = DefaultHasher::new();
        license_ref.hash(&mut hasher);
        let idx = (hasher.finish() as usize) % self.stripes.len();
        self.stripes[idx].clone().lock_owned().await
    }
}

impl Default for LicenseLocks {
    fn default() -> Self {
        Self::new()
    }
}
