// # r53ddns-core
//
// Core library for the Route 53 dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the core functionality for one-shot dynamic DNS updates:
// - **IpSource**: Trait for discovering the current public IPv4 address
// - **DnsProvider**: Trait for the hosted-zone API (list zones, list records, change records)
// - **DnsProviderFactory**: Trait for building an authenticated provider from configuration
// - **DdnsUpdater**: Engine that runs the IP check → zone lookup → record check → upsert flow
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from provider and IP source implementations
// 2. **Single-shot**: One run, no background tasks, no persisted state
// 3. **Library-First**: The whole flow is usable without the CLI
// 4. **Fail fast**: The first failing stage aborts the run; nothing is retried

pub mod config;
pub mod engine;
pub mod error;
pub mod names;
pub mod traits;

// Re-export core types for convenience
pub use config::{
    CredentialsConfig, DdnsConfig, EngineConfig, IpSourceConfig, ProviderConfig, Route53Config,
    ZoneSelection,
};
pub use engine::{DdnsUpdater, UpdateResult};
pub use error::{Error, Result};
pub use traits::{DnsProvider, DnsProviderFactory, IpSource};
