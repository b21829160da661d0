//! Media types used on the LSD wire surface.

/// Status Document media type.
pub const LSD_JSON: &str = "application/vnd.readium.license.status.v1.0+json";

/// LCP license media type, used on the outbound PATCH.
pub const LCP_JSON: &str = "application/vnd.readium.lcp.license.v1.0+json";

/// RFC 7807 problem document media type.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Plain JSON, used by the listing endpoints.
pub const JSON: &str = "application/json";
