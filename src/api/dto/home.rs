//! DTOs for the service description endpoint.

use serde::Serialize;

/// Service name and example endpoint URLs.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
    pub api_base: String,
    pub endpoints: EndpointExamples,
}

/// One ready-to-use example per endpoint.
#[derive(Debug, Serialize)]
pub struct EndpointExamples {
    pub shorten: String,
    pub check: String,
    pub delete: String,
    pub redirect: String,
}

impl EndpointExamples {
    /// Builds the examples for a base URL without trailing slash.
    pub fn for_base(base: &str) -> Self {
        Self {
            shorten: format!("{base}/api/short?url=https://example.com&slug=custom"),
            check: format!("{base}/api/chk?url={base}/ABC123"),
            delete: format!("{base}/api/del?url={base}/ABC123"),
            redirect: format!("{base}/ABC123"),
        }
    }
}
