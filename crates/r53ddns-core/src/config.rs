//! Configuration types for the updater
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default IP-echo endpoint
pub const DEFAULT_IP_URL: &str = "http://checkip.amazonaws.com/";

/// Default TTL of the upserted A record (seconds)
pub const DEFAULT_TTL: i64 = 300;

/// Largest TTL Route 53 accepts
const MAX_TTL: i64 = 2_147_483_647;

/// Main updater configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DdnsConfig {
    /// Public IP source configuration
    #[serde(default)]
    pub ip_source: IpSourceConfig,

    /// DNS provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Optional engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl DdnsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.ip_source.validate()?;
        self.provider.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

/// HTTP IP-echo source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpSourceConfig {
    /// URL returning the caller's address as plain text
    pub url: String,
    /// Request timeout in seconds (`None` = no deadline)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl IpSourceConfig {
    /// Validate the IP source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.url.is_empty() {
            return Err(crate::Error::config("IP source URL cannot be empty"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(crate::Error::config(format!(
                "IP source URL must use HTTP or HTTPS scheme. Got: {}",
                self.url
            )));
        }
        validate_timeout(self.timeout_secs)
    }
}

impl Default for IpSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_IP_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// DNS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// AWS Route 53
    Route53(Route53Config),
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Route53(config) => config.validate(),
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Route53(_) => "route53",
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Route53(Route53Config::default())
    }
}

/// Route 53 client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Route53Config {
    /// How credentials are obtained
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Explicit region (falls back to the SDK region chain, then us-east-1)
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override, e.g. a local emulator
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Per-operation timeout in seconds (`None` = SDK default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Route53Config {
    /// Validate the Route 53 configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.credentials.validate()?;

        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Err(crate::Error::config("Region cannot be empty"));
            }
        }

        if let Some(url) = &self.endpoint_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(crate::Error::config(format!(
                    "Endpoint URL must use HTTP or HTTPS scheme. Got: {}",
                    url
                )));
            }
        }

        validate_timeout(self.timeout_secs)
    }
}

/// Credential strategy for the DNS provider client
///
/// The strategy is always chosen explicitly. `DefaultChain` reproduces the
/// SDK's implicit resolution (environment, shared config, SSO, web identity,
/// container and instance metadata) as one option among several.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum CredentialsConfig {
    /// The SDK's standard provider chain
    #[default]
    DefaultChain,
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_SESSION_TOKEN` only
    Environment,
    /// A named profile from the shared config/credentials files
    Profile {
        /// Profile name
        name: String,
    },
    /// Keys supplied directly
    Static {
        /// Access key ID
        access_key_id: String,
        /// Secret access key
        /// ⚠️ NEVER log this value
        secret_access_key: String,
        /// Optional session token
        #[serde(default)]
        session_token: Option<String>,
    },
}

// Custom Debug implementation that hides secrets
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DefaultChain => f.write_str("DefaultChain"),
            Self::Environment => f.write_str("Environment"),
            Self::Profile { name } => f.debug_struct("Profile").field("name", name).finish(),
            Self::Static {
                access_key_id,
                session_token,
                ..
            } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<REDACTED>")
                .field(
                    "session_token",
                    &session_token.as_ref().map(|_| "<REDACTED>"),
                )
                .finish(),
        }
    }
}

impl CredentialsConfig {
    /// Build a credential strategy from its textual form
    ///
    /// Accepted forms: `default-chain`, `environment`, `profile:<name>`, `static`.
    /// The key arguments are only consulted (and then required) for `static`.
    pub fn parse(
        strategy: &str,
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
        session_token: Option<String>,
    ) -> Result<Self, crate::Error> {
        let strategy = strategy.trim();

        if let Some(name) = strategy.strip_prefix("profile:") {
            return Ok(Self::Profile {
                name: name.to_string(),
            });
        }

        match strategy {
            "default-chain" | "default" => Ok(Self::DefaultChain),
            "environment" | "env" => Ok(Self::Environment),
            "static" => {
                let access_key_id = access_key_id.ok_or_else(|| {
                    crate::Error::config("Static credentials require an access key ID")
                })?;
                let secret_access_key = secret_access_key.ok_or_else(|| {
                    crate::Error::config("Static credentials require a secret access key")
                })?;
                Ok(Self::Static {
                    access_key_id,
                    secret_access_key,
                    session_token,
                })
            }
            other => Err(crate::Error::config(format!(
                "Unknown credential strategy '{}'. \
                Supported: default-chain, environment, profile:<name>, static",
                other
            ))),
        }
    }

    /// Validate the credential strategy
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            Self::DefaultChain | Self::Environment => Ok(()),
            Self::Profile { name } => {
                if name.trim().is_empty() {
                    return Err(crate::Error::config("Profile name cannot be empty"));
                }
                Ok(())
            }
            Self::Static {
                access_key_id,
                secret_access_key,
                ..
            } => {
                if access_key_id.is_empty() || secret_access_key.is_empty() {
                    return Err(crate::Error::config(
                        "Static credentials require a non-empty access key ID and secret access key",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Strategy name (for logging/debugging)
    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::DefaultChain => "default-chain",
            Self::Environment => "environment",
            Self::Profile { .. } => "profile",
            Self::Static { .. } => "static",
        }
    }
}

/// What to do when several hosted zones share the requested name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneSelection {
    /// Exactly one zone must match
    #[default]
    Unique,
    /// Take the first match in listing order
    First,
    /// Take the last match in listing order
    Last,
}

impl FromStr for ZoneSelection {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unique" => Ok(Self::Unique),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            other => Err(crate::Error::config(format!(
                "Unknown zone selection '{}'. Supported: unique, first, last",
                other
            ))),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// TTL of the upserted record (seconds)
    #[serde(default = "default_ttl")]
    pub ttl: i64,

    /// Pinned hosted zone ID; skips zone listing when set
    #[serde(default)]
    pub zone_id: Option<String>,

    /// Duplicate zone policy
    #[serde(default)]
    pub zone_selection: ZoneSelection,

    /// Perform all reads but never submit a change
    #[serde(default)]
    pub dry_run: bool,

    /// Comment attached to the change batch (a default is generated when unset)
    #[serde(default)]
    pub comment: Option<String>,
}

impl EngineConfig {
    /// Validate the engine configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(1..=MAX_TTL).contains(&self.ttl) {
            return Err(crate::Error::config(format!(
                "TTL must be between 1 and {} seconds. Got: {}",
                MAX_TTL, self.ttl
            )));
        }

        if let Some(zone_id) = &self.zone_id {
            if zone_id.trim().is_empty() {
                return Err(crate::Error::config("Pinned zone ID cannot be empty"));
            }
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ttl: default_ttl(),
            zone_id: None,
            zone_selection: ZoneSelection::default(),
            dry_run: false,
            comment: None,
        }
    }
}

fn default_ttl() -> i64 {
    DEFAULT_TTL
}

fn validate_timeout(timeout_secs: Option<u64>) -> Result<(), crate::Error> {
    if timeout_secs == Some(0) {
        return Err(crate::Error::config("Timeout must be at least 1 second"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DdnsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.ttl, 300);
        assert_eq!(config.ip_source.url, DEFAULT_IP_URL);
        assert_eq!(config.provider.type_name(), "route53");
    }

    #[test]
    fn test_ttl_bounds() {
        let mut engine = EngineConfig::default();
        engine.ttl = 0;
        assert!(engine.validate().is_err());
        engine.ttl = 60;
        assert!(engine.validate().is_ok());
    }

    #[test]
    fn test_ip_source_rejects_non_http_scheme() {
        let config = IpSourceConfig {
            url: "ftp://checkip.example".to_string(),
            timeout_secs: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = IpSourceConfig {
            url: DEFAULT_IP_URL.to_string(),
            timeout_secs: Some(0),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_credential_strategies() {
        assert_eq!(
            CredentialsConfig::parse("default-chain", None, None, None).unwrap(),
            CredentialsConfig::DefaultChain
        );
        assert_eq!(
            CredentialsConfig::parse("environment", None, None, None).unwrap(),
            CredentialsConfig::Environment
        );
        assert_eq!(
            CredentialsConfig::parse("profile:dns-admin", None, None, None).unwrap(),
            CredentialsConfig::Profile {
                name: "dns-admin".to_string()
            }
        );
        assert!(CredentialsConfig::parse("instance-role", None, None, None).is_err());
    }

    #[test]
    fn test_static_credentials_require_keys() {
        assert!(CredentialsConfig::parse("static", Some("AKID".into()), None, None).is_err());

        let creds =
            CredentialsConfig::parse("static", Some("AKID".into()), Some("secret".into()), None)
                .unwrap();
        assert_eq!(creds.strategy_name(), "static");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_empty_profile_rejected() {
        let creds = CredentialsConfig::parse("profile:", None, None, None).unwrap();
        assert!(creds.validate().is_err());
    }

    #[test]
    fn test_secret_not_exposed_in_debug() {
        let creds = CredentialsConfig::Static {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG".to_string(),
            session_token: Some("FwoGZXIvYXdzEJr".to_string()),
        };

        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("AKIDEXAMPLE"));
        assert!(!debug_str.contains("wJalrXUtnFEMI"));
        assert!(!debug_str.contains("FwoGZXIvYXdzEJr"));
    }

    #[test]
    fn test_zone_selection_from_str() {
        assert_eq!("unique".parse::<ZoneSelection>().unwrap(), ZoneSelection::Unique);
        assert_eq!("First".parse::<ZoneSelection>().unwrap(), ZoneSelection::First);
        assert_eq!("last".parse::<ZoneSelection>().unwrap(), ZoneSelection::Last);
        assert!("any".parse::<ZoneSelection>().is_err());
    }

    #[test]
    fn test_provider_config_deserializes_from_json() {
        let json = serde_json::json!({
            "type": "route53",
            "credentials": { "strategy": "profile", "name": "dns" },
            "region": "eu-west-1"
        });

        let config: ProviderConfig = serde_json::from_value(json).unwrap();
        let ProviderConfig::Route53(route53) = config;
        assert_eq!(route53.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            route53.credentials,
            CredentialsConfig::Profile {
                name: "dns".to_string()
            }
        );
    }
}
