// # Route 53 DNS Provider
//
// This crate provides the AWS Route 53 implementation of `DnsProvider` for r53ddns.
//
// ## Behavior
//
// - One API request per trait method call; pagination is driven by the engine
// - Full error propagation (no retry, no backoff)
// - Credentials are never logged
// - Credential strategy, region, endpoint and timeout come from `Route53Config`
//
// ## API Reference
//
// - ListHostedZones: GET `/2013-04-01/hostedzone?marker=...`
// - ListResourceRecordSets: GET `/2013-04-01/hostedzone/:id/rrset?name=...&type=...`
// - ChangeResourceRecordSets: POST `/2013-04-01/hostedzone/:id/rrset`

pub mod credentials;

use async_trait::async_trait;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types;
use r53ddns_core::config::ProviderConfig;
use r53ddns_core::traits::{
    Change, ChangeAction, ChangeInfo, DnsProvider, DnsProviderFactory, HostedZone,
    RecordSetCursor, RecordSetPage, ResourceRecordSet, ZonePage,
};
use r53ddns_core::{Error, Result};

/// Provider name used in logs and errors
const PROVIDER_NAME: &str = "route53";

/// Route 53 DNS provider
///
/// Wraps an authenticated `aws_sdk_route53::Client`. Build it with
/// [`Route53Factory`] or directly from a client with [`Route53Provider::new`].
#[derive(Debug, Clone)]
pub struct Route53Provider {
    client: aws_sdk_route53::Client,
}

impl Route53Provider {
    /// Wrap an existing Route 53 client
    pub fn new(client: aws_sdk_route53::Client) -> Self {
        Self { client }
    }
}

fn api_error(operation: &str, err: impl std::error::Error) -> Error {
    Error::provider_api(
        PROVIDER_NAME,
        operation,
        DisplayErrorContext(&err).to_string(),
    )
}

#[async_trait]
impl DnsProvider for Route53Provider {
    async fn list_hosted_zones(&self, marker: Option<&str>) -> Result<ZonePage> {
        tracing::debug!("Listing hosted zones (marker: {:?})", marker);

        let output = self
            .client
            .list_hosted_zones()
            .set_marker(marker.map(str::to_string))
            .send()
            .await
            .map_err(|e| api_error("ListHostedZones", e))?;

        let zones = output.hosted_zones().iter().map(zone_from_sdk).collect();

        let next_marker = if output.is_truncated() {
            let next = output.next_marker().ok_or_else(|| {
                Error::provider_api(
                    PROVIDER_NAME,
                    "ListHostedZones",
                    "truncated response without NextMarker",
                )
            })?;
            Some(next.to_string())
        } else {
            None
        };

        Ok(ZonePage { zones, next_marker })
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<&RecordSetCursor>,
    ) -> Result<RecordSetPage> {
        tracing::debug!(
            "Listing record sets in zone {} (start: {:?})",
            zone_id,
            start.map(|c| (&c.name, &c.record_type))
        );

        let output = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .set_start_record_name(start.map(|c| c.name.clone()))
            .set_start_record_type(start.map(|c| types::RrType::from(c.record_type.as_str())))
            .set_start_record_identifier(start.and_then(|c| c.identifier.clone()))
            .send()
            .await
            .map_err(|e| api_error("ListResourceRecordSets", e))?;

        let record_sets = output
            .resource_record_sets()
            .iter()
            .map(record_set_from_sdk)
            .collect();

        let next = if output.is_truncated() {
            let (Some(name), Some(record_type)) =
                (output.next_record_name(), output.next_record_type())
            else {
                return Err(Error::provider_api(
                    PROVIDER_NAME,
                    "ListResourceRecordSets",
                    "truncated response without NextRecordName/NextRecordType",
                ));
            };
            Some(RecordSetCursor {
                name: name.to_string(),
                record_type: record_type.as_str().to_string(),
                identifier: output.next_record_identifier().map(str::to_string),
            })
        } else {
            None
        };

        Ok(RecordSetPage { record_sets, next })
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        change: &Change,
    ) -> Result<ChangeInfo> {
        let batch = change_batch_to_sdk(change)?;

        tracing::debug!(
            "Submitting {:?} of {} {} in zone {}",
            change.action,
            change.record_set.name,
            change.record_set.record_type,
            zone_id
        );

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| api_error("ChangeResourceRecordSets", e))?;

        let info = output.change_info().ok_or_else(|| {
            Error::provider_api(
                PROVIDER_NAME,
                "ChangeResourceRecordSets",
                "response without ChangeInfo",
            )
        })?;

        change_info_from_sdk(info)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Convert an SDK hosted zone
pub fn zone_from_sdk(zone: &types::HostedZone) -> HostedZone {
    HostedZone {
        id: zone.id().to_string(),
        name: zone.name().to_string(),
        private_zone: zone.config().is_some_and(|c| c.private_zone()),
        record_count: zone.resource_record_set_count(),
    }
}

/// Convert an SDK record set
///
/// Alias record sets carry no values and no TTL.
pub fn record_set_from_sdk(set: &types::ResourceRecordSet) -> ResourceRecordSet {
    ResourceRecordSet {
        name: set.name().to_string(),
        record_type: set.r#type().as_str().to_string(),
        ttl: set.ttl(),
        values: set
            .resource_records()
            .iter()
            .map(|record| record.value().to_string())
            .collect(),
    }
}

/// Build the SDK change batch for a single change
pub fn change_batch_to_sdk(change: &Change) -> Result<types::ChangeBatch> {
    let build_error =
        |e: aws_sdk_route53::error::BuildError| api_error("ChangeResourceRecordSets", e);

    let records = change
        .record_set
        .values
        .iter()
        .map(|value| types::ResourceRecord::builder().value(value).build())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(build_error)?;

    let record_set = types::ResourceRecordSet::builder()
        .name(&change.record_set.name)
        .r#type(types::RrType::from(change.record_set.record_type.as_str()))
        .set_ttl(change.record_set.ttl)
        .set_resource_records(Some(records))
        .build()
        .map_err(build_error)?;

    let action = match change.action {
        ChangeAction::Upsert => types::ChangeAction::Upsert,
    };

    let sdk_change = types::Change::builder()
        .action(action)
        .resource_record_set(record_set)
        .build()
        .map_err(build_error)?;

    types::ChangeBatch::builder()
        .set_comment(change.comment.clone())
        .changes(sdk_change)
        .build()
        .map_err(build_error)
}

/// Convert an SDK change acknowledgement
pub fn change_info_from_sdk(info: &types::ChangeInfo) -> Result<ChangeInfo> {
    let submitted = info.submitted_at();
    let submitted_at =
        chrono::DateTime::from_timestamp(submitted.secs(), submitted.subsec_nanos()).ok_or_else(
            || {
                Error::provider_api(
                    PROVIDER_NAME,
                    "ChangeResourceRecordSets",
                    format!("SubmittedAt out of range: {:?}", submitted),
                )
            },
        )?;

    Ok(ChangeInfo {
        id: info.id().to_string(),
        status: info.status().as_str().to_string(),
        submitted_at,
    })
}

/// Factory for creating Route 53 providers
///
/// Connecting loads the AWS configuration and resolves credentials up front.
#[derive(Debug, Default)]
pub struct Route53Factory;

#[async_trait]
impl DnsProviderFactory for Route53Factory {
    async fn connect(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        let ProviderConfig::Route53(route53) = config;

        tracing::debug!(
            "Connecting to Route 53 (credentials: {}, region: {})",
            route53.credentials.strategy_name(),
            route53.region.as_deref().unwrap_or("<auto>")
        );

        let sdk_config = credentials::load_sdk_config(route53).await?;
        let client = aws_sdk_route53::Client::new(&sdk_config);

        Ok(Box::new(Route53Provider::new(client)))
    }
}
