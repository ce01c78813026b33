//! Core traits for the updater
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Discover the current public IPv4 address
//! - [`DnsProvider`]: Read and change hosted-zone records via a provider API
//! - [`DnsProviderFactory`]: Build an authenticated provider from configuration

pub mod dns_provider;
pub mod ip_source;

pub use dns_provider::{
    Change, ChangeAction, ChangeInfo, DnsProvider, DnsProviderFactory, HostedZone,
    RECORD_TYPE_A, RecordSetCursor, RecordSetPage, ResourceRecordSet, ZonePage,
};
pub use ip_source::IpSource;
