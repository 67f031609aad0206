use serde::Deserialize;

/// Identity asserted by the upstream identity gateway.
#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub token: String,
    pub subject: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
}
