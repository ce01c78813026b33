// # DNS Provider Trait
//
// Defines the interface to a hosted-zone DNS API.
//
// ## Implementations
//
// - AWS Route 53: `r53ddns-provider-route53` crate
//
// ## Operations
//
// The updater consumes exactly three API calls, each exposed one page at a
// time. Page accumulation is owned by the engine so that every provider gets
// the same pagination behavior.
//
// - `list_hosted_zones(marker)`
// - `list_resource_record_sets(zone_id, cursor)`
// - `change_resource_record_sets(zone_id, change)`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Record type string for IPv4 address records
pub const RECORD_TYPE_A: &str = "A";

/// A hosted zone as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Provider-assigned zone ID (e.g. "/hostedzone/Z123")
    pub id: String,
    /// Fully qualified zone name with trailing dot
    pub name: String,
    /// Whether the zone is private (VPC-scoped)
    pub private_zone: bool,
    /// Number of record sets in the zone, if reported
    pub record_count: Option<i64>,
}

impl HostedZone {
    /// Create a public hosted zone description
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            private_zone: false,
            record_count: None,
        }
    }

    /// Mark the zone as private or public
    pub fn with_private_zone(mut self, private_zone: bool) -> Self {
        self.private_zone = private_zone;
        self
    }

    /// Set the record count
    pub fn with_record_count(mut self, record_count: i64) -> Self {
        self.record_count = Some(record_count);
        self
    }
}

/// A resource record set (name + type + values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    /// Fully qualified record name with trailing dot
    pub name: String,
    /// Record type ("A", "AAAA", "CNAME", ...)
    pub record_type: String,
    /// Time-to-live in seconds (absent for alias records)
    pub ttl: Option<i64>,
    /// Record values
    pub values: Vec<String>,
}

impl ResourceRecordSet {
    /// Create an A record set
    pub fn a(name: impl Into<String>, ttl: i64, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            record_type: RECORD_TYPE_A.to_string(),
            ttl: Some(ttl),
            values,
        }
    }

    /// Whether this is an A record set
    pub fn is_a(&self) -> bool {
        self.record_type == RECORD_TYPE_A
    }
}

/// Action of a record change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record set, or replace it if it already exists
    Upsert,
}

/// A single record change inside a change batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// What to do
    pub action: ChangeAction,
    /// Target record set (replaces the existing one on upsert)
    pub record_set: ResourceRecordSet,
    /// Optional comment attached to the batch
    pub comment: Option<String>,
}

/// Provider acknowledgement of an accepted change batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeInfo {
    /// Provider-assigned change ID
    pub id: String,
    /// Propagation status (e.g. "PENDING", "INSYNC")
    pub status: String,
    /// When the provider accepted the batch
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// One page of hosted zones
#[derive(Debug, Clone, Default)]
pub struct ZonePage {
    /// Zones on this page
    pub zones: Vec<HostedZone>,
    /// Marker for the next page, `None` when this is the last page
    pub next_marker: Option<String>,
}

/// Position from which the next page of record sets starts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordSetCursor {
    /// First record name of the next page
    pub name: String,
    /// First record type of the next page
    pub record_type: String,
    /// Set identifier for weighted/latency/failover records
    pub identifier: Option<String>,
}

/// One page of resource record sets
#[derive(Debug, Clone, Default)]
pub struct RecordSetPage {
    /// Record sets on this page
    pub record_sets: Vec<ResourceRecordSet>,
    /// Cursor for the next page, `None` when this is the last page
    pub next: Option<RecordSetCursor>,
}

/// Trait for DNS provider implementations
///
/// Implementations wrap an authenticated API client. They perform exactly
/// one API request per method call and never retry.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List one page of hosted zones
    ///
    /// # Parameters
    ///
    /// - `marker`: `None` for the first page, otherwise the `next_marker` of the previous page
    async fn list_hosted_zones(&self, marker: Option<&str>) -> Result<ZonePage, crate::Error>;

    /// List one page of resource record sets in a zone
    ///
    /// # Parameters
    ///
    /// - `zone_id`: Provider-assigned zone ID
    /// - `start`: `None` for the first page, otherwise the `next` cursor of the previous page
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<&RecordSetCursor>,
    ) -> Result<RecordSetPage, crate::Error>;

    /// Submit a change batch containing a single change
    ///
    /// The batch is applied atomically by the provider: on error, DNS state
    /// is left exactly as it was.
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change: &Change,
    ) -> Result<ChangeInfo, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Builds an authenticated [`DnsProvider`] from configuration
///
/// Connecting is its own pipeline stage: the engine only connects after the
/// public IP has been resolved.
#[async_trait]
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn DnsProvider>)`: Ready-to-use provider
    /// - `Err(Error::AuthConfiguration)`: If credentials or region cannot be resolved
    async fn connect(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn DnsProvider>, crate::Error>;
}
