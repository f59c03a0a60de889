use anyhow::{Context, Result};
use arcadex_auth::Verification;
use arcadex_etl::Config;
use std::path::Path;

pub fn run_verify(config_path: &Path, token: &str) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let verifier = config
        .verifier()
        .context("Stored credentials cannot be decoded")?;

    match verifier.authorize(Some(token)) {
        Verification::Accepted => {
            println!("✓ Accepted");
            Ok(())
        }
        Verification::Rejected(reason) => anyhow::bail!("Rejected: {reason}"),
    }
}
