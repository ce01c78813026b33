//! Record set lookup and the upsert change

use crate::error::{Error, Result};
use crate::names::fqdn;
use crate::traits::{Change, ChangeAction, DnsProvider, RecordSetCursor, ResourceRecordSet};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use tracing::debug;

/// List every record set in a zone, following pagination
///
/// Fails if the provider hands out a cursor it already returned.
pub async fn list_all_record_sets(
    provider: &dyn DnsProvider,
    zone_id: &str,
) -> Result<Vec<ResourceRecordSet>> {
    let mut record_sets = Vec::new();
    let mut cursor: Option<RecordSetCursor> = None;
    let mut seen = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = provider
            .list_resource_record_sets(zone_id, cursor.as_ref())
            .await?;
        pages += 1;
        record_sets.extend(page.record_sets);

        match page.next {
            None => break,
            Some(next) if !seen.insert(next.clone()) => {
                return Err(Error::provider_api(
                    provider.provider_name(),
                    "ListResourceRecordSets",
                    format!(
                        "pagination cursor repeated after {} page(s): {} {}",
                        pages, next.name, next.record_type
                    ),
                ));
            }
            Some(next) => cursor = Some(next),
        }
    }

    debug!(
        "Listed {} record set(s) in zone {} in {} page(s)",
        record_sets.len(),
        zone_id,
        pages
    );
    Ok(record_sets)
}

/// A record sets named `name` (ASCII case-insensitive)
fn a_record_sets<'a>(
    record_sets: &'a [ResourceRecordSet],
    name: &'a str,
) -> impl Iterator<Item = &'a ResourceRecordSet> {
    record_sets
        .iter()
        .filter(move |set| set.name.eq_ignore_ascii_case(name) && set.is_a())
}

/// Whether the host's A record already contains `current_ip`
///
/// `zone_name` must already be normalized. Every A set named
/// `host_name.zone_name` is scanned, ignoring ASCII case; values are
/// compared exactly.
pub fn ip_address_current(
    record_sets: &[ResourceRecordSet],
    zone_name: &str,
    host_name: &str,
    current_ip: &str,
) -> bool {
    let name = fqdn(zone_name, host_name);
    a_record_sets(record_sets, &name).any(|set| set.values.iter().any(|v| v == current_ip))
}

/// Values currently held by the A record(s) named `name`
pub fn existing_a_values(record_sets: &[ResourceRecordSet], name: &str) -> Vec<String> {
    a_record_sets(record_sets, name)
        .flat_map(|set| set.values.iter().cloned())
        .collect()
}

/// Build the single UPSERT change that points `name` at `ip`
///
/// The change replaces the whole value list of the A record.
pub fn upsert_change(name: &str, ip: Ipv4Addr, ttl: i64, comment: Option<String>) -> Change {
    Change {
        action: ChangeAction::Upsert,
        record_set: ResourceRecordSet::a(name, ttl, vec![ip.to_string()]),
        comment,
    }
}
