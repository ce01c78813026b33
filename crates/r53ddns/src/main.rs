// # r53ddns - Route 53 Dynamic DNS Updater
//
// One-shot command that points `<hostName>.<zoneName>` at the machine's
// current public IPv4 address.
//
// This binary is a THIN integration layer:
// 1. Parse arguments and environment into a `DdnsConfig`
// 2. Initialize logging and the tokio runtime
// 3. Wire the HTTP IP source and the Route 53 provider into `DdnsUpdater`
// 4. Run a single update and map the outcome to an exit code
//
// All DNS logic lives in r53ddns-core.
//
// ## Usage
//
// ```bash
// r53ddns example.com home
//
// # pin credentials and zone explicitly
// export R53DDNS_CREDENTIALS=profile:dns-admin
// export R53DDNS_ZONE_ID=/hostedzone/Z0123456789
// r53ddns --ttl 60 example.com home
// ```

use anyhow::Result;
use clap::Parser;
use r53ddns_core::config::{
    CredentialsConfig, DEFAULT_IP_URL, DEFAULT_TTL, DdnsConfig, EngineConfig, IpSourceConfig,
    ProviderConfig, Route53Config, ZoneSelection,
};
use r53ddns_core::names::{validate_host_name, validate_zone_name};
use r53ddns_core::{DdnsUpdater, UpdateResult};
use r53ddns_ip_http::HttpIpSource;
use r53ddns_provider_route53::Route53Factory;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Record is current (created, updated or already up to date)
/// - 1: Usage or configuration error
/// - 2: Runtime error (IP check, AWS call)
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Update completed
    Success = 0,
    /// Configuration error or bad arguments
    ConfigError = 1,
    /// Runtime error during the update
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Update a Route 53 A record with the current public IPv4 address
///
/// No `Debug` derive: the struct may hold a secret access key.
#[derive(Parser)]
#[command(name = "r53ddns", version, about)]
struct Args {
    /// Hosted zone name, e.g. `example.com`
    zone_name: String,

    /// Host label inside the zone, e.g. `home`
    host_name: String,

    /// IP-echo endpoint returning the public address as plain text
    #[arg(long, env = "R53DDNS_IP_URL", default_value = DEFAULT_IP_URL)]
    ip_url: String,

    /// Per-request timeout in seconds for the IP check and Route 53 calls
    #[arg(long, env = "R53DDNS_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Credential strategy: default-chain, environment, profile:<name>, static
    #[arg(long, env = "R53DDNS_CREDENTIALS", default_value = "default-chain")]
    credentials: String,

    /// Access key ID (static strategy)
    #[arg(long, env = "R53DDNS_ACCESS_KEY_ID")]
    access_key_id: Option<String>,

    /// Secret access key (static strategy)
    #[arg(long, env = "R53DDNS_SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_access_key: Option<String>,

    /// Session token (static strategy)
    #[arg(long, env = "R53DDNS_SESSION_TOKEN", hide_env_values = true)]
    session_token: Option<String>,

    /// AWS region (defaults to the SDK region chain, then us-east-1)
    #[arg(long, env = "R53DDNS_REGION")]
    region: Option<String>,

    /// Route 53 endpoint override
    #[arg(long, env = "R53DDNS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Hosted zone ID; skips the zone lookup when set
    #[arg(long, env = "R53DDNS_ZONE_ID")]
    zone_id: Option<String>,

    /// Policy for duplicate zone names: unique, first, last
    #[arg(long, env = "R53DDNS_ZONE_SELECTION", default_value = "unique")]
    zone_selection: String,

    /// TTL of the A record in seconds
    #[arg(long, env = "R53DDNS_TTL", default_value_t = DEFAULT_TTL)]
    ttl: i64,

    /// Comment attached to the change batch
    #[arg(long, env = "R53DDNS_COMMENT")]
    comment: Option<String>,

    /// Look everything up but do not submit the change
    #[arg(long, env = "R53DDNS_DRY_RUN")]
    dry_run: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "R53DDNS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    /// Build and validate the updater configuration
    fn to_config(&self) -> Result<DdnsConfig> {
        validate_zone_name(&self.zone_name)?;
        validate_host_name(&self.host_name)?;

        let credentials = CredentialsConfig::parse(
            &self.credentials,
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            self.session_token.clone(),
        )?;

        let config = DdnsConfig {
            ip_source: IpSourceConfig {
                url: self.ip_url.clone(),
                timeout_secs: self.timeout_secs,
            },
            provider: ProviderConfig::Route53(Route53Config {
                credentials,
                region: self.region.clone(),
                endpoint_url: self.endpoint_url.clone(),
                timeout_secs: self.timeout_secs,
            }),
            engine: EngineConfig {
                ttl: self.ttl,
                zone_id: self.zone_id.clone(),
                zone_selection: self.zone_selection.parse::<ZoneSelection>()?,
                dry_run: self.dry_run,
                comment: self.comment.clone(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Print a clap error (or the --help/--version output) and pick the exit code
fn report_parse_error(e: &clap::Error) -> DdnsExitCode {
    if let Err(io_err) = e.print() {
        eprintln!("Failed to print usage: {}", io_err);
    }

    if e.use_stderr() {
        DdnsExitCode::ConfigError
    } else {
        DdnsExitCode::Success
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return report_parse_error(&e).into(),
    };

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(&args.zone_name, &args.host_name, config)) {
        Ok(()) => DdnsExitCode::Success.into(),
        Err(e) => {
            error!("Update failed: {:#}", e);
            DdnsExitCode::RuntimeError.into()
        }
    }
}

/// Run a single update
async fn run(zone_name: &str, host_name: &str, config: DdnsConfig) -> Result<()> {
    info!(
        "Updating {}.{} (provider: {}, dry run: {})",
        host_name,
        zone_name,
        config.provider.type_name(),
        config.engine.dry_run
    );

    let ip_source = HttpIpSource::new(&config.ip_source)?;
    let updater = DdnsUpdater::new(Box::new(ip_source), Box::new(Route53Factory), config)?;

    match updater.update(zone_name, host_name).await? {
        UpdateResult::Unchanged { current_ip } => {
            info!("Record already points at {}, nothing to do", current_ip);
        }
        UpdateResult::Created { new_ip, change } => {
            info!(
                "Created record -> {} (change {}, status {})",
                new_ip, change.id, change.status
            );
        }
        UpdateResult::Updated {
            previous_values,
            new_ip,
            change,
        } => {
            info!(
                "Updated record {:?} -> {} (change {}, status {})",
                previous_values, new_ip, change.id, change.status
            );
        }
        UpdateResult::DryRun {
            previous_values,
            new_ip,
        } => {
            info!(
                "Dry run: would replace {:?} with {}",
                previous_values, new_ip
            );
        }
    }

    Ok(())
}
