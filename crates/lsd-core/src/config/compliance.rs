//! Compliance-test audit configuration.

use serde::{Deserialize, Serialize};

/// Settings for the conformance audit sink. When disabled no file is
/// opened and recording is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Whether compliance-test mode is active.
    #[serde(default)]
    pub enabled: bool,
    /// Append-only file receiving `<test>|<action>|<status>` lines.
    #[serde(default = "default_file")]
    pub file: String,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: default_file(),
        }
    }
}

fn default_file() -> String {
    "data/compliance.log".to_string()
}
