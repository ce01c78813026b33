//! Explicit AWS client configuration
//!
//! Turns a [`Route53Config`] into an `SdkConfig`. The credential strategy is
//! chosen by the caller; the SDK's implicit provider chain is only used when
//! `CredentialsConfig::DefaultChain` is selected.

use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_route53::config::{Credentials, Region};
use aws_sdk_route53::error::DisplayErrorContext;
use r53ddns_core::config::{CredentialsConfig, Route53Config};
use r53ddns_core::{Error, Result};
use std::time::Duration;

/// Route 53 is served from us-east-1 regardless of the caller's region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Provider name reported for static credentials
const STATIC_PROVIDER_NAME: &str = "r53ddns-static";

/// Build the SDK configuration for `config`
///
/// Credentials are resolved once here, so that a missing or broken strategy
/// fails with `Error::AuthConfiguration` before any API call is attempted.
pub async fn load_sdk_config(config: &Route53Config) -> Result<SdkConfig> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    loader = match &config.region {
        Some(region) => loader.region(Region::new(region.clone())),
        None => loader.region(
            RegionProviderChain::default_provider().or_else(Region::new(DEFAULT_REGION)),
        ),
    };

    loader = match &config.credentials {
        CredentialsConfig::DefaultChain => loader,
        CredentialsConfig::Environment => {
            loader.credentials_provider(EnvironmentVariableCredentialsProvider::new())
        }
        CredentialsConfig::Profile { name } => loader.credentials_provider(
            ProfileFileCredentialsProvider::builder()
                .profile_name(name)
                .build(),
        ),
        CredentialsConfig::Static {
            access_key_id,
            secret_access_key,
            session_token,
        } => loader.credentials_provider(Credentials::new(
            access_key_id.clone(),
            secret_access_key.clone(),
            session_token.clone(),
            None,
            STATIC_PROVIDER_NAME,
        )),
    };

    if let Some(endpoint_url) = &config.endpoint_url {
        tracing::debug!("Using Route 53 endpoint override: {}", endpoint_url);
        loader = loader.endpoint_url(endpoint_url);
    }

    if let Some(secs) = config.timeout_secs {
        loader = loader.timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(Duration::from_secs(secs))
                .build(),
        );
    }

    let sdk_config = loader.load().await;
    verify_credentials(&sdk_config, &config.credentials).await?;

    Ok(sdk_config)
}

/// Resolve credentials once to surface configuration problems early
async fn verify_credentials(sdk_config: &SdkConfig, strategy: &CredentialsConfig) -> Result<()> {
    let region = sdk_config
        .region()
        .ok_or_else(|| Error::auth("No AWS region could be resolved"))?;

    let provider = sdk_config.credentials_provider().ok_or_else(|| {
        Error::auth(format!(
            "No credentials provider available for the {} strategy",
            strategy.strategy_name()
        ))
    })?;

    let credentials = provider.provide_credentials().await.map_err(|e| {
        Error::auth(format!(
            "Failed to resolve AWS credentials ({} strategy): {}",
            strategy.strategy_name(),
            DisplayErrorContext(&e)
        ))
    })?;

    // Never log the key ID or secret
    tracing::debug!(
        "Resolved AWS credentials (strategy: {}, region: {}, temporary: {})",
        strategy.strategy_name(),
        region,
        credentials.session_token().is_some()
    );

    Ok(())
}
