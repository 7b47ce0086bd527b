//! # Register Validator
//!
//! Registers one validator on a subnet: fetches the node's BLS credentials,
//! builds and signs the `RegisterSubnetValidator` Warp message, and hands it
//! to the transaction issuer. Configuration comes from `WARP_*` environment
//! variables (see `register_validator::config`).
//!
//! The bundled issuer is a dry run: it records the transaction and derives a
//! deterministic ID without contacting any chain.

use anyhow::{Context, Result};
use qc_15_warp_messaging::{DryRunIssuer, HexKeyProvider, KeyProvider, LocalNodeInfoProvider};
use register_validator::{RegistrationConfig, RegistrationPipeline};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RegistrationConfig::from_env().context("Failed to load configuration")?;

    // Initialize logging; RUST_LOG wins over WARP_LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    config.validate().context("Invalid configuration")?;
    info!(
        network_id = config.network_id,
        subnet_id = %config.subnet_id,
        node_id = %config.node_id,
        "Starting validator registration"
    );

    let signer = HexKeyProvider::new(config.signer_key_hex.clone());
    let node_key = match &config.node_bls_key_hex {
        Some(hex) => HexKeyProvider::new(hex.clone()).signing_key(),
        None => signer.signing_key(),
    }
    .context("Failed to load node BLS key")?;
    let node_info = LocalNodeInfoProvider::new(config.node_id, node_key);

    let pipeline = RegistrationPipeline::new(config, &signer, node_info, DryRunIssuer::new())
        .context("Failed to set up registration")?;

    match pipeline.run().await {
        Ok(receipt) => {
            info!(
                validation_id = %receipt.validation_id,
                tx_id = %receipt.tx_id,
                "Registration submitted"
            );
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Registration failed");
            Err(e.into())
        }
    }
}
