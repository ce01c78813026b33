//! Hosted zone resolution

use crate::config::ZoneSelection;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, HostedZone};
use std::collections::HashSet;
use tracing::{debug, warn};

/// List every hosted zone visible to the provider, following pagination
///
/// Fails if the provider hands out a marker it already returned.
pub async fn list_all_zones(provider: &dyn DnsProvider) -> Result<Vec<HostedZone>> {
    let mut zones = Vec::new();
    let mut marker: Option<String> = None;
    let mut seen = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = provider.list_hosted_zones(marker.as_deref()).await?;
        pages += 1;
        zones.extend(page.zones);

        match page.next_marker {
            None => break,
            Some(next) if !seen.insert(next.clone()) => {
                return Err(Error::provider_api(
                    provider.provider_name(),
                    "ListHostedZones",
                    format!("pagination marker repeated after {} page(s): {}", pages, next),
                ));
            }
            Some(next) => marker = Some(next),
        }
    }

    debug!("Listed {} hosted zone(s) in {} page(s)", zones.len(), pages);
    Ok(zones)
}

/// Pick the zone named `zone_name` out of a zone listing
///
/// `zone_name` must already be normalized. Names are compared ignoring ASCII case.
pub fn select_zone(
    zones: Vec<HostedZone>,
    zone_name: &str,
    selection: ZoneSelection,
) -> Result<HostedZone> {
    let (matching, others): (Vec<_>, Vec<_>) =
        zones.into_iter().partition(|zone| zone.name.eq_ignore_ascii_case(zone_name));

    if matching.is_empty() {
        return Err(Error::ZoneNotFound {
            name: zone_name.to_string(),
            available: others,
        });
    }

    if matching.len() > 1 {
        match selection {
            ZoneSelection::Unique => {
                return Err(Error::AmbiguousZone {
                    name: zone_name.to_string(),
                    candidates: matching,
                });
            }
            ZoneSelection::First | ZoneSelection::Last => {
                warn!(
                    "{} hosted zones are named {}, taking the {} one",
                    matching.len(),
                    zone_name,
                    if selection == ZoneSelection::First { "first" } else { "last" }
                );
            }
        }
    }

    let selected = match selection {
        ZoneSelection::Last => matching.into_iter().last(),
        ZoneSelection::Unique | ZoneSelection::First => matching.into_iter().next(),
    };

    selected.ok_or_else(|| Error::ZoneNotFound {
        name: zone_name.to_string(),
        available: Vec::new(),
    })
}

/// Resolve the provider ID of the hosted zone named `zone_name`
pub async fn resolve_zone_id(
    provider: &dyn DnsProvider,
    zone_name: &str,
    selection: ZoneSelection,
) -> Result<String> {
    let zones = list_all_zones(provider).await?;
    let zone = select_zone(zones, zone_name, selection)?;
    debug!("Found zone ID: {} ({})", zone.id, zone.name);
    Ok(zone.id)
}
