//! Status-message localization.
//!
//! Catalogs are flat `{status value: message}` JSON files, one per
//! language, loaded once at startup and read-only thereafter. Language
//! negotiation follows RFC 4647 lookup: each Accept-Language range is
//! tried in quality order, progressively chopping subtags, before
//! falling back to the configured default language.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lsd_core::config::LocalizationConfig;
use lsd_core::{AppError, AppResult};
use lsd_entity::status::Status;

/// Read-only message catalog keyed by (language tag, status value).
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    catalogs: HashMap<String, HashMap<String, String>>,
    default_language: String,
}

impl MessageCatalog {
    /// Load every configured language file. A missing or malformed
    /// catalog fails startup.
    pub fn load(config: &LocalizationConfig) -> AppResult<Self> {
        let mut catalogs = HashMap::new();

        for language in &config.languages {
            let path = Path::new(&config.folder).join(format!("{language}.json"));
            let raw = fs::read_to_string(&path).map_err(|e| {
                AppError::configuration(format!(
                    "Failed to read message catalog {}: {e}",
                    path.display()
                ))
            })?;
            let messages: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
                AppError::configuration(format!(
                    "Failed to parse message catalog {}: {e}",
                    path.display()
                ))
            })?;
            catalogs.insert(language.to_lowercase(), messages);
        }

        Ok(Self {
            catalogs,
            default_language: config.default_language.to_lowercase(),
        })
    }

    /// Build a catalog from in-memory maps. Used by tests.
    pub fn from_catalogs(
        catalogs: HashMap<String, HashMap<String, String>>,
        default_language: &str,
    ) -> Self {
        Self {
            catalogs: catalogs
                .into_iter()
                .map(|(lang, map)| (lang.to_lowercase(), map))
                .collect(),
            default_language: default_language.to_lowercase(),
        }
    }

    /// The message for `status` in the best-matching language of the
    /// Accept-Language header. Falls back to the default language, then
    /// to the raw status value.
    pub fn localize(&self, accept_language: Option<&str>, status: Status) -> String {
        for range in parse_accept_language(accept_language.unwrap_or("")) {
            let mut tag = range.as_str();
            loop {
                if let Some(message) = self
                    .catalogs
                    .get(tag)
                    .and_then(|messages| messages.get(status.as_str()))
                {
                    return message.clone();
                }
                match tag.rfind('-') {
                    Some(pos) => tag = &tag[..pos],
                    None => break,
                }
            }
        }

        self.catalogs
            .get(&self.default_language)
            .and_then(|messages| messages.get(status.as_str()))
            .cloned()
            .unwrap_or_else(|| status.as_str().to_string())
    }
}

/// Language ranges of an Accept-Language header, lowercased and ordered
/// by descending quality (ties keep header order). `*` is dropped; the
/// catalog fallback covers it.
fn parse_accept_language(header: &str) -> Vec<String> {
    let mut ranges: Vec<(String, f32)> = Vec::new();

    for part in header.split(',') {
        let mut pieces = part.split(';');
        let tag = pieces.next().unwrap_or("").trim().to_lowercase();
        if tag.is_empty() || tag == "*" {
            continue;
        }

        let mut quality = 1.0f32;
        for param in pieces {
            if let Some(value) = param.trim().strip_prefix("q=") {
                quality = value.parse().unwrap_or(0.0);
            }
        }
        if quality > 0.0 {
            ranges.push((tag, quality));
        }
    }

    ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranges.into_iter().map(|(tag, _)| tag).collect()
}
