//! License-status behavior configuration.

use serde::{Deserialize, Serialize};

/// License-status section: which loan actions are offered, loan horizons,
/// and localization catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseStatusConfig {
    /// Whether device registration is offered. Also selects the initial
    /// status of a fresh document: READY when true, ACTIVE when false.
    #[serde(rename = "register", default = "default_true")]
    pub register_available: bool,
    /// Whether the return action link is offered for loans.
    #[serde(rename = "return", default)]
    pub return_available: bool,
    /// Whether the renew action link is offered for loans.
    #[serde(rename = "renew", default)]
    pub renew_available: bool,
    /// Baseline loan horizon in days; participates in the potential-rights
    /// end computed at creation. Zero disables the config horizon.
    #[serde(default)]
    pub renting_days: i64,
    /// Default renewal extension in days when the caller supplies no `end`.
    #[serde(default)]
    pub renew_days: i64,
    /// Message catalog settings.
    #[serde(default)]
    pub localization: LocalizationConfig,
}

/// Message localization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Directory holding one `<lang>.json` catalog per language.
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Languages to load at startup. Every listed catalog must exist.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Fallback language when negotiation finds no match.
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            languages: default_languages(),
            default_language: default_language(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_folder() -> String {
    "locales".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_language() -> String {
    "en".to_string()
}
