//! Backend connection configuration.

use karmandia_domain::resource::ResourceKind;
use serde::Deserialize;

/// Where the REST API lives and how to talk to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Absolute `http(s)` URL every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub auth: AuthPolicy,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: None,
            auth: AuthPolicy::default(),
        }
    }
}

/// Which collection reads send the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthPolicy {
    pub experience_list: bool,
    pub contact_list: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            experience_list: false,
            contact_list: true,
        }
    }
}

impl AuthPolicy {
    /// Whether listing `kind` should be authenticated.
    #[must_use]
    pub const fn for_list(self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Experience => self.experience_list,
            ResourceKind::Contact => self.contact_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_authenticate_contacts_only_by_default() {
        let policy = AuthPolicy::default();
        assert!(!policy.for_list(ResourceKind::Experience));
        assert!(policy.for_list(ResourceKind::Contact));
    }

    #[test]
    fn should_deserialize_partial_config() {
        let config: BackendConfig = toml::from_str(
            r#"
base_url = "https://api.example.com/v1"

[auth]
experience_list = true
"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.request_timeout_secs, None);
        assert!(config.auth.experience_list);
        assert!(config.auth.contact_list);
    }

    #[test]
    fn should_deserialize_empty_config_as_default() {
        let config: BackendConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, BackendConfig::default().base_url);
        assert_eq!(config.auth, AuthPolicy::default());
    }
}
