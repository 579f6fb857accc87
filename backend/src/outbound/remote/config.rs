//! Remote data service configuration.
//!
//! The hosted service is reached through two environment values. When either
//! is absent the application still starts; remote-backed operations report
//! which values are missing instead of failing obscurely.

use tracing::warn;
use url::Url;

use crate::domain::ServiceAvailability;

/// Environment variable naming the service endpoint.
pub const URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the public API key.
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Parsed remote service configuration.
#[derive(Debug, Clone, Default)]
pub struct RemoteConfig {
    url: Option<Url>,
    anon_key: Option<String>,
}

impl RemoteConfig {
    pub fn new(url: Option<Url>, anon_key: Option<String>) -> Self {
        Self { anon_key, url }
    }

    /// Read the configuration from the environment.
    ///
    /// An unparsable endpoint counts as missing; a warning names the value.
    pub fn from_env() -> Self {
        let url = std::env::var(URL_VAR).ok().and_then(|raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            match Url::parse(trimmed) {
                Ok(url) => Some(url),
                Err(error) => {
                    warn!(%error, value = URL_VAR, "ignoring unparsable endpoint");
                    None
                }
            }
        });
        let anon_key = std::env::var(ANON_KEY_VAR)
            .ok()
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty());
        Self { url, anon_key }
    }

    /// Whether both values are present.
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.anon_key.is_some()
    }

    /// Names of the missing values, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.is_none() {
            missing.push(URL_VAR);
        }
        if self.anon_key.is_none() {
            missing.push(ANON_KEY_VAR);
        }
        missing
    }

    /// Availability handed to domain services.
    pub fn availability(&self) -> ServiceAvailability {
        if self.is_configured() {
            ServiceAvailability::configured()
        } else {
            ServiceAvailability::missing(self.missing())
        }
    }

    /// Endpoint and key, when fully configured.
    pub fn credentials(&self) -> Option<(Url, String)> {
        match (&self.url, &self.anon_key) {
            (Some(url), Some(key)) => Some((url.clone(), key.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_are_named_in_order() {
        let config = RemoteConfig::new(None, None);
        assert!(!config.is_configured());
        assert_eq!(config.missing(), vec![URL_VAR, ANON_KEY_VAR]);
    }

    #[test]
    fn full_configuration_yields_credentials() {
        let url = Url::parse("https://example.supabase.co").expect("valid url");
        let config = RemoteConfig::new(Some(url.clone()), Some("anon".into()));
        assert!(config.is_configured());
        assert!(config.missing().is_empty());
        assert_eq!(config.credentials(), Some((url, "anon".into())));
    }

    #[test]
    fn partial_configuration_is_not_configured() {
        let url = Url::parse("https://example.supabase.co").expect("valid url");
        let config = RemoteConfig::new(Some(url), None);
        assert!(!config.is_configured());
        assert_eq!(config.missing(), vec![ANON_KEY_VAR]);
        assert!(config.credentials().is_none());
    }
}
