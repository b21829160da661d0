//! Builds the action links embedded in each Status Document.

use lsd_core::config::AppConfig;
use lsd_core::types::content_type;
use lsd_entity::status::{LicenseStatus, Link};

/// Produces the link set for a document from server configuration and
/// the document's current state.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    lsd_base: String,
    lcp_base: String,
    license_link_url: Option<String>,
    register_available: bool,
    return_available: bool,
    renew_available: bool,
}

impl LinkBuilder {
    /// Capture the link-relevant configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            lsd_base: config.lsd_server.public_base_url.trim_end_matches('/').to_string(),
            lcp_base: config.lcp_server.public_base_url.trim_end_matches('/').to_string(),
            license_link_url: config.lsd_server.license_link_url.clone(),
            register_available: config.license_status.register_available,
            return_available: config.license_status.return_available,
            renew_available: config.license_status.renew_available,
        }
    }

    /// The link set for `status`: always a `license` link; templated
    /// action links when the action is enabled, with return/renew further
    /// requiring an end-of-loan date.
    pub fn build(&self, status: &LicenseStatus) -> Vec<Link> {
        let mut links = Vec::new();
        let license_ref = &status.license_ref;

        let license_href = match &self.license_link_url {
            Some(template) if !template.is_empty() => {
                template.replace("{license_id}", license_ref)
            }
            _ => format!("{}/licenses/{}", self.lcp_base, license_ref),
        };
        links.push(Link::new(license_href, "license", content_type::LCP_JSON));

        let has_rights_end = status.has_rights_end();

        if self.register_available {
            links.push(Link::templated(
                format!("{}/licenses/{}/register{{?id,name}}", self.lsd_base, license_ref),
                "register",
                content_type::LSD_JSON,
            ));
        }

        if self.return_available && has_rights_end {
            links.push(Link::templated(
                format!("{}/licenses/{}/return{{?id,name}}", self.lsd_base, license_ref),
                "return",
                content_type::LSD_JSON,
            ));
        }

        if self.renew_available && has_rights_end {
            links.push(Link::templated(
                format!("{}/licenses/{}/renew{{?end,id,name}}", self.lsd_base, license_ref),
                "renew",
                content_type::LSD_JSON,
            ));
        }

        links
    }
}
