//! Engine configuration.
//!
//! All configuration is held in explicit objects injected at
//! construction time — never global state — so tests can substitute
//! fake partner endpoints and dispatcher targets.

use std::collections::HashMap;
use std::time::Duration;

/// Default HTTP timeout for one dispatch request.
const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// PartnerTable
// ---------------------------------------------------------------------------

/// Static mapping from named partner channel to destination URL.
///
/// The legacy single-partner mode is simply a one-entry table.
#[derive(Debug, Clone, Default)]
pub struct PartnerTable {
    endpoints: HashMap<String, String>,
}

impl PartnerTable {
    /// An empty table. API resolution over an empty table fails closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a partner endpoint (builder style, for construction and tests).
    pub fn with_endpoint(
        mut self,
        partner: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.endpoints.insert(partner.into(), url.into());
        self
    }

    /// Destination URL for a named partner channel.
    pub fn endpoint(&self, partner: &str) -> Option<&str> {
        self.endpoints.get(partner).map(String::as_str)
    }

    /// Load the table from the environment.
    ///
    /// | Variable                | Format                                      |
    /// |-------------------------|---------------------------------------------|
    /// | `PARTNER_API_ENDPOINTS` | comma-separated `partner=url` pairs         |
    ///
    /// Malformed pairs (no `=`, empty name or url) are skipped with a
    /// warning; an unset variable yields an empty table.
    pub fn from_env() -> Self {
        let raw = std::env::var("PARTNER_API_ENDPOINTS").unwrap_or_default();
        let mut table = Self::new();
        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((partner, url)) if !partner.is_empty() && !url.is_empty() => {
                    table.endpoints.insert(partner.to_string(), url.to_string());
                }
                _ => {
                    tracing::warn!(pair, "Malformed partner endpoint entry, skipping");
                }
            }
        }
        table
    }
}

// ---------------------------------------------------------------------------
// DispatcherConfig
// ---------------------------------------------------------------------------

/// Configuration for the HTTP dispatcher talking to the publication
/// service.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Base URL of the publication service.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl DispatcherConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `PUBLICATION_SERVICE_URL` is not set,
    /// signalling that dispatch is not configured.
    ///
    /// | Variable                  | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `PUBLICATION_SERVICE_URL` | yes      | —       |
    /// | `DISPATCH_TIMEOUT_SECS`   | no       | `10`    |
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("PUBLICATION_SERVICE_URL").ok()?;
        let timeout_secs = std::env::var("DISPATCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DISPATCH_TIMEOUT_SECS);
        Some(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// ---------------------------------------------------------------------------
// ThirdPartyMode
// ---------------------------------------------------------------------------

/// Which third-party notification flow the API branch uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThirdPartyMode {
    /// Push to statically configured partner endpoints.
    Legacy,
    /// Per-subscriber OAuth descriptors resolved from the account
    /// directory; the publication service performs the authenticated
    /// push.
    Oauth,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let table = PartnerTable::new()
            .with_endpoint("courtel", "https://courtel.example.com/api")
            .with_endpoint("lexport", "https://lexport.example.com/push");
        assert_eq!(
            table.endpoint("courtel"),
            Some("https://courtel.example.com/api")
        );
        assert_eq!(table.endpoint("unknown"), None);
    }

    #[test]
    fn empty_table_resolves_nothing() {
        assert_eq!(PartnerTable::new().endpoint("courtel"), None);
    }

    // Single test for the env path: parallel tests must not race on the
    // shared process environment.
    #[test]
    fn from_env_parses_pairs_and_skips_malformed() {
        std::env::set_var(
            "PARTNER_API_ENDPOINTS",
            "courtel=https://courtel.example.com/api, malformed, =nourl, noval=, \
             lexport=https://lexport.example.com/push",
        );
        let table = PartnerTable::from_env();
        assert_eq!(
            table.endpoint("courtel"),
            Some("https://courtel.example.com/api")
        );
        assert_eq!(
            table.endpoint("lexport"),
            Some("https://lexport.example.com/push")
        );
        assert_eq!(table.endpoint("malformed"), None);
        assert_eq!(table.endpoint("noval"), None);
        assert_eq!(table.endpoint(""), None);

        std::env::remove_var("PARTNER_API_ENDPOINTS");
        assert_eq!(PartnerTable::from_env().endpoint("courtel"), None);
    }

    #[test]
    fn dispatcher_config_absent_without_url() {
        std::env::remove_var("PUBLICATION_SERVICE_URL");
        assert!(DispatcherConfig::from_env().is_none());
    }
}
