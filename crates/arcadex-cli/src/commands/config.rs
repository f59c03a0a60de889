use anyhow::Result;
use arcadex_etl::{config, Config};
use std::path::Path;

/// Show the current effective configuration.
///
/// Secrets are never printed, only whether they are set.
pub fn show_config(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());

    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    let set = |v: Option<&str>| match v {
        Some(s) if !s.trim().is_empty() => "<set>",
        _ => "<not set>",
    };

    println!("Settings:");
    println!("  api_base_url: {}", config.api_base_url);
    println!("  totp_secret: {}", set(config.totp_secret.as_deref()));
    println!("  rsa_public_key: {}", set(config.rsa_public_key.as_deref()));
    println!("  private_key_path: {}", config.private_key_path.display());
    println!("  request_delay_ms: {}", config.request_delay_ms);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);

    println!("\nPriority: CLI args > ENV vars (ARCADEX_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path(config_path: &Path) {
    println!("{}", config_path.display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config(config_path: &Path) -> Result<()> {
    let created = config::ensure_config_file_at(config_path)?;

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nRun 'arcadex keygen' to provision API credentials.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
