//! # Property Registry Runtime
//!
//! Entry point for the registry host.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (stderr; `RUST_LOG` overrides the `info` default)
//! 2. Load configuration from `PR_*` environment variables
//! 3. Open the fee ledger and reopen persisted state
//! 4. Answer commands from stdin until EOF
//! 5. Flush state if per-commit flushing is disabled

use anyhow::{Context, Result};
use registry_engine::adapters::FileRegistryStore;
use registry_engine::ports::inbound::PropertyRegistryApi;
use registry_engine::service::PropertyRegistryService;
use registry_runtime::adapters::JsonlFeeLedger;
use registry_runtime::{run, RuntimeConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = RuntimeConfig::from_env().context("failed to load configuration")?;

    info!("===========================================");
    info!("  Property Registry Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("Data Dir: {:?}", config.storage.data_dir);
    info!(
        "Fee settlement: {:?}, flush on commit: {}",
        config.service.fee_settlement, config.service.flush_on_commit
    );

    let ledger = JsonlFeeLedger::open(config.storage.ledger_path())
        .with_context(|| format!("failed to open fee ledger {:?}", config.storage.ledger_path()))?;
    let store = FileRegistryStore::new(config.storage.state_path());
    let service = PropertyRegistryService::open(config.service.clone(), ledger, store)
        .context("failed to open registry state")?;

    info!(
        properties = service.get_property_count(),
        registration_fee = service.get_registration_fee(),
        "Registry ready"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let answered = run(&service, stdin.lock(), stdout.lock())?;

    if !config.service.flush_on_commit {
        service.flush().context("failed to flush registry state")?;
    }

    let stats = service.stats();
    info!(
        answered,
        registrations = stats.registrations,
        updates = stats.updates,
        rejected = stats.rejected_operations,
        "Shutdown complete"
    );
    Ok(())
}
