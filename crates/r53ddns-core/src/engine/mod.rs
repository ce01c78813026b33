//! Core update engine
//!
//! The DdnsUpdater is responsible for one complete update run:
//! - Resolving the current public IP via IpSource
//! - Connecting to the DNS provider via DnsProviderFactory
//! - Resolving the hosted zone and checking the host's A record
//! - Upserting the record when it does not hold the current IP
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐    ┌────────────────────┐    ┌───────────────┐
//! │  IpSource   │───▶│ DnsProviderFactory │───▶│ zone resolver │
//! │ (current)   │    │ (connect)          │    │ (list zones)  │
//! └─────────────┘    └────────────────────┘    └───────────────┘
//!                                                      │
//!                       ┌──────────────────────────────┘
//!                       ▼
//!              ┌────────────────┐  not current  ┌────────────────┐
//!              │ record checker │──────────────▶│ record updater │
//!              │ (list records) │               │ (UPSERT)       │
//!              └────────────────┘               └────────────────┘
//! ```
//!
//! Every stage short-circuits the run on error. The only mutating call is the
//! last one, so a failed run never leaves partial changes behind.

pub mod records;
pub mod zone;

use crate::config::DdnsConfig;
use crate::error::Result;
use crate::names::{fqdn, normalize_zone_name, validate_host_name, validate_zone_name};
use crate::traits::{ChangeInfo, DnsProviderFactory, IpSource};
use std::net::Ipv4Addr;
use tracing::{debug, info};

pub use records::{existing_a_values, ip_address_current, list_all_record_sets, upsert_change};
pub use zone::{list_all_zones, resolve_zone_id, select_zone};

/// Outcome of an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// Record already had the current IP (no-op)
    Unchanged {
        /// The current IP address
        current_ip: Ipv4Addr,
    },
    /// Record was created (no A record existed before)
    Created {
        /// The new IP address
        new_ip: Ipv4Addr,
        /// Provider acknowledgement
        change: ChangeInfo,
    },
    /// Record was replaced
    Updated {
        /// Values the A record held before
        previous_values: Vec<String>,
        /// The new IP address
        new_ip: Ipv4Addr,
        /// Provider acknowledgement
        change: ChangeInfo,
    },
    /// Dry-run: a change was needed but not submitted
    DryRun {
        /// Values the A record holds
        previous_values: Vec<String>,
        /// The IP address that would have been written
        new_ip: Ipv4Addr,
    },
}

impl UpdateResult {
    /// Whether DNS was modified by this run
    pub fn changed(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Updated { .. })
    }
}

/// Single-shot dynamic DNS updater
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsUpdater::new()`]
/// 2. Call [`DdnsUpdater::update()`] once per scheduled run
///
/// Nothing is remembered between calls to `update()`: every run asks the
/// provider for the current record state.
pub struct DdnsUpdater {
    /// Source of the public IP
    ip_source: Box<dyn IpSource>,

    /// Builds the authenticated provider client
    connector: Box<dyn DnsProviderFactory>,

    /// Validated configuration
    config: DdnsConfig,
}

impl DdnsUpdater {
    /// Create a new updater
    ///
    /// # Parameters
    ///
    /// - `ip_source`: Public IP source implementation
    /// - `connector`: Factory for the DNS provider client
    /// - `config`: Updater configuration (validated here)
    pub fn new(
        ip_source: Box<dyn IpSource>,
        connector: Box<dyn DnsProviderFactory>,
        config: DdnsConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            connector,
            config,
        })
    }

    /// Run one update for `host_name` in `zone_name`
    ///
    /// # Parameters
    ///
    /// - `zone_name`: Zone name, with or without trailing dot
    /// - `host_name`: Host label(s) relative to the zone
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: What happened
    /// - `Err(Error)`: The first stage that failed
    pub async fn update(&self, zone_name: &str, host_name: &str) -> Result<UpdateResult> {
        validate_zone_name(zone_name)?;
        validate_host_name(host_name)?;

        // Route 53 reports names in lowercase
        let zone_name = normalize_zone_name(&zone_name.to_ascii_lowercase());
        let host_name = &host_name.to_ascii_lowercase();
        let engine = &self.config.engine;

        // Step 1: public IP
        let current_ip = self.ip_source.current().await?;
        info!(
            "Current public IP: {} (source: {})",
            current_ip,
            self.ip_source.source_name()
        );

        // Step 2: provider client
        let provider = self.connector.connect(&self.config.provider).await?;
        debug!("Connected to DNS provider: {}", provider.provider_name());

        // Step 3: zone ID
        let zone_id = match &engine.zone_id {
            Some(zone_id) => {
                debug!("Using pre-configured zone ID");
                zone_id.clone()
            }
            None => {
                zone::resolve_zone_id(provider.as_ref(), &zone_name, engine.zone_selection).await?
            }
        };

        // Step 4: is the record already current?
        let record_name = fqdn(&zone_name, host_name);
        let record_sets = records::list_all_record_sets(provider.as_ref(), &zone_id).await?;
        let ip_text = current_ip.to_string();

        if records::ip_address_current(&record_sets, &zone_name, host_name, &ip_text) {
            info!("IP address not changed: {} -> {}", record_name, current_ip);
            return Ok(UpdateResult::Unchanged { current_ip });
        }

        let previous_values = records::existing_a_values(&record_sets, &record_name);

        // Step 5: upsert
        let comment = engine
            .comment
            .clone()
            .unwrap_or_else(|| format!("r53ddns: {} -> {}", record_name, current_ip));
        let change = records::upsert_change(&record_name, current_ip, engine.ttl, Some(comment));

        info!(
            "{} DNS record: {} -> {} (was: {:?})",
            if engine.dry_run { "Would update" } else { "Updating" },
            record_name,
            current_ip,
            previous_values
        );

        if engine.dry_run {
            info!(
                "[DRY-RUN] Would submit change to zone {} with payload: {}",
                zone_id,
                serde_json::to_string(&change).unwrap_or_else(|_| format!("{:?}", change))
            );
            return Ok(UpdateResult::DryRun {
                previous_values,
                new_ip: current_ip,
            });
        }

        let change_info = provider
            .change_resource_record_sets(&zone_id, &change)
            .await?;

        info!(
            "DNS record updated: {} -> {} (change {}, status {})",
            record_name, current_ip, change_info.id, change_info.status
        );

        if previous_values.is_empty() {
            Ok(UpdateResult::Created {
                new_ip: current_ip,
                change: change_info,
            })
        } else {
            Ok(UpdateResult::Updated {
                previous_values,
                new_ip: current_ip,
                change: change_info,
            })
        }
    }
}
