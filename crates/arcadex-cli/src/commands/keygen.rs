use anyhow::{Context, Result};
use arcadex_auth::ProvisionedSecrets;
use arcadex_etl::{config, Config};
use std::path::Path;

pub fn run_keygen(config_path: &Path, force: bool) -> Result<()> {
    let config = Config::load_from(config_path)?;

    log::info!("Generating credentials");
    let secrets = ProvisionedSecrets::generate().context("Failed to generate credentials")?;

    config::ensure_config_file_at(config_path)?;
    config::store_secrets(&config, config_path, &secrets, force)?;

    println!("✓ Credentials provisioned");
    println!("  Config file: {}", config_path.display());
    println!("  Private key: {}", config.private_key_path.display());
    println!("\nShare totp_secret with the code generator of each client.");
    println!("Keep the private key off the API server.");

    Ok(())
}
