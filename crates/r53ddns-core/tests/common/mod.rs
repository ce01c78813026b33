//! Test doubles and common utilities for update flow contract tests
//!
//! The doubles record every call so tests can assert which pipeline stages
//! ran, and in which order, without any network access.

#![allow(dead_code)]

use r53ddns_core::config::{DdnsConfig, ProviderConfig};
use r53ddns_core::error::{Error, Result};
use r53ddns_core::traits::{
    Change, ChangeInfo, DnsProvider, DnsProviderFactory, HostedZone, IpSource, RecordSetCursor,
    RecordSetPage, ResourceRecordSet, ZonePage,
};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const ZONE_MARKER_PREFIX: &str = "zones-";
const RECORD_CURSOR_PREFIX: &str = "records-";

/// An IpSource that always returns the same address
pub struct StaticIpSource {
    ip: Ipv4Addr,
    call_count: Arc<AtomicUsize>,
}

impl StaticIpSource {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of current() calls
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// An IpSource whose endpoint always answers with a fixed HTTP status
pub struct StatusIpSource {
    status: u16,
}

impl StatusIpSource {
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

#[async_trait::async_trait]
impl IpSource for StatusIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        Err(Error::unexpected_status(
            self.status,
            "http://checkip.amazonaws.com/",
        ))
    }

    fn source_name(&self) -> &'static str {
        "status"
    }
}

/// Remote state and call log shared by the mock provider and its factory
#[derive(Default)]
pub struct MockBackend {
    zone_pages: Vec<Vec<HostedZone>>,
    record_pages: Vec<Vec<ResourceRecordSet>>,
    reject_changes: bool,
    connect_calls: AtomicUsize,
    list_zones_calls: AtomicUsize,
    list_records_calls: AtomicUsize,
    listed_zone_ids: Mutex<Vec<String>>,
    changes: Mutex<Vec<(String, Change)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page of hosted zones
    pub fn with_zone_page(mut self, zones: Vec<HostedZone>) -> Self {
        self.zone_pages.push(zones);
        self
    }

    /// Append a page of record sets (shared by every zone)
    pub fn with_record_page(mut self, record_sets: Vec<ResourceRecordSet>) -> Self {
        self.record_pages.push(record_sets);
        self
    }

    /// Make every change request fail
    pub fn rejecting_changes(mut self) -> Self {
        self.reject_changes = true;
        self
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn list_zones_calls(&self) -> usize {
        self.list_zones_calls.load(Ordering::SeqCst)
    }

    pub fn list_records_calls(&self) -> usize {
        self.list_records_calls.load(Ordering::SeqCst)
    }

    pub fn listed_zone_ids(&self) -> Vec<String> {
        self.listed_zone_ids.lock().unwrap().clone()
    }

    /// Submitted changes as (zone ID, change)
    pub fn changes(&self) -> Vec<(String, Change)> {
        self.changes.lock().unwrap().clone()
    }
}

fn page_index(token: Option<&str>, prefix: &str) -> usize {
    token
        .and_then(|t| t.strip_prefix(prefix))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// A DnsProvider serving pages out of a MockBackend
pub struct MockDnsProvider {
    backend: Arc<MockBackend>,
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_hosted_zones(&self, marker: Option<&str>) -> Result<ZonePage> {
        self.backend.list_zones_calls.fetch_add(1, Ordering::SeqCst);

        let index = page_index(marker, ZONE_MARKER_PREFIX);
        let zones = self
            .backend
            .zone_pages
            .get(index)
            .cloned()
            .unwrap_or_default();
        let next_marker = (index + 1 < self.backend.zone_pages.len())
            .then(|| format!("{}{}", ZONE_MARKER_PREFIX, index + 1));

        Ok(ZonePage { zones, next_marker })
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<&RecordSetCursor>,
    ) -> Result<RecordSetPage> {
        self.backend.list_records_calls.fetch_add(1, Ordering::SeqCst);
        self.backend
            .listed_zone_ids
            .lock()
            .unwrap()
            .push(zone_id.to_string());

        let index = page_index(start.map(|c| c.name.as_str()), RECORD_CURSOR_PREFIX);
        let record_sets = self
            .backend
            .record_pages
            .get(index)
            .cloned()
            .unwrap_or_default();
        let next = (index + 1 < self.backend.record_pages.len()).then(|| RecordSetCursor {
            name: format!("{}{}", RECORD_CURSOR_PREFIX, index + 1),
            record_type: "A".to_string(),
            identifier: None,
        });

        Ok(RecordSetPage { record_sets, next })
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change: &Change,
    ) -> Result<ChangeInfo> {
        if self.backend.reject_changes {
            return Err(Error::provider_api(
                "mock",
                "ChangeResourceRecordSets",
                "InvalidChangeBatch: rejected by test",
            ));
        }

        let mut changes = self.backend.changes.lock().unwrap();
        changes.push((zone_id.to_string(), change.clone()));

        Ok(ChangeInfo {
            id: format!("/change/C{}", changes.len()),
            status: "PENDING".to_string(),
            submitted_at: chrono::Utc::now(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A DnsProviderFactory handing out MockDnsProviders over one backend
pub struct MockProviderFactory {
    backend: Arc<MockBackend>,
}

impl MockProviderFactory {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait::async_trait]
impl DnsProviderFactory for MockProviderFactory {
    async fn connect(&self, _config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        self.backend.connect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockDnsProvider {
            backend: Arc::clone(&self.backend),
        }))
    }
}

/// The apex records every Route 53 zone starts with
pub fn apex_records(zone_name: &str) -> Vec<ResourceRecordSet> {
    vec![
        ResourceRecordSet {
            name: zone_name.to_string(),
            record_type: "NS".to_string(),
            ttl: Some(172800),
            values: vec!["ns-1.awsdns-00.com.".to_string()],
        },
        ResourceRecordSet {
            name: zone_name.to_string(),
            record_type: "SOA".to_string(),
            ttl: Some(900),
            values: vec![
                "ns-1.awsdns-00.com. awsdns-hostmaster.amazon.com. 1 7200 900 1209600 86400"
                    .to_string(),
            ],
        },
    ]
}

/// Default configuration for tests
pub fn test_config() -> DdnsConfig {
    DdnsConfig::default()
}
