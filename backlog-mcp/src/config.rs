//! Environment-sourced configuration
//!
//! Two values drive every outbound call: the space identifier (the
//! subdomain the tracker lives under) and the API key. Absence is not
//! validated up front; a missing value is logged and surfaces as an
//! authentication failure on the first backend call.

/// Environment variable holding the tracker space identifier
pub const SPACE_ID_VAR: &str = "BACKLOG_SPACE_ID";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "BACKLOG_API_KEY";

/// Environment variable overriding the tracker domain
pub const DOMAIN_VAR: &str = "BACKLOG_DOMAIN";

const DEFAULT_DOMAIN: &str = "backlog.jp";

/// Connection settings for the issue-tracker API
#[derive(Debug, Clone)]
pub struct Config {
    /// Space identifier, used as the API host subdomain
    pub space_id: String,
    /// API key, attached as a query credential to every call
    pub api_key: String,
    /// Tracker domain (defaults to `backlog.jp`)
    pub domain: String,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// Missing values are warned about but tolerated; the tracker will
    /// reject the first call instead.
    pub fn from_env() -> Self {
        let space_id = std::env::var(SPACE_ID_VAR).unwrap_or_else(|_| {
            tracing::warn!("{} is not set; backend calls will fail", SPACE_ID_VAR);
            String::new()
        });
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_else(|_| {
            tracing::warn!("{} is not set; backend calls will fail", API_KEY_VAR);
            String::new()
        });
        let domain = std::env::var(DOMAIN_VAR).unwrap_or_else(|_| DEFAULT_DOMAIN.to_string());

        Self {
            space_id,
            api_key,
            domain,
        }
    }

    /// Base URL of the tracker's REST API for this space
    pub fn base_url(&self) -> String {
        format!("https://{}.{}/api/v2", self.space_id, self.domain)
    }
}
