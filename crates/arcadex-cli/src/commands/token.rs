use anyhow::{Context, Result};
use arcadex_auth::{current_totp, material::decode_private_key, sign_challenge};
use arcadex_etl::{config, Config};
use std::path::Path;

/// Print the code for the current time step.
pub fn print_totp(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let secret = config
        .totp_secret()
        .context("Stored TOTP secret cannot be decoded")?
        .ok_or_else(|| anyhow::anyhow!("No totp_secret configured; run 'arcadex keygen'"))?;

    println!("{}", current_totp(&secret));
    Ok(())
}

/// Print a signed challenge token for `data`.
pub fn print_signed(config_path: &Path, data: &str) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let stored = config::load_private_key(&config.private_key_path)?;
    let private_key =
        decode_private_key(&stored).context("Stored private key cannot be decoded")?;

    println!("{}", sign_challenge(&private_key, data.as_bytes()));
    Ok(())
}
