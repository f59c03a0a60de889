use anyhow::Result;
use arcadex_core::Platform;
use clap::Parser;
use commands::ImportSource;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "arcadex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file (default: ~/.config/arcadex/config.toml)
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Provision API credentials
    ///
    /// Generates a 20-byte TOTP shared secret and a 2048-bit RSA key pair.
    /// The secret and the public key are written to the config file; the
    /// private key goes to `private_key_path` with owner-only permissions.
    ///
    /// Credentials are written once. Existing credentials are kept unless
    /// --force is given.
    Keygen {
        /// Replace credentials that are already provisioned
        #[arg(long)]
        force: bool,
    },
    /// Check a token against the configured credentials
    ///
    /// Six-digit tokens are checked as time-based codes (current or previous
    /// 30 second step). Anything else is checked as a signed challenge of the
    /// form base64(data).base64(signature). A leading "Bearer " is ignored.
    Verify {
        /// The token or full Authorization header value
        token: String,
    },
    /// Mint a token for manual API calls
    #[command(subcommand)]
    Token(TokenCommand),
    /// Join the three platform exports into one title-keyed catalog
    ///
    /// Each export is a JSON array of song objects, or an object with a
    /// "songs" array. Records without a title are skipped and reported.
    /// Prints overlap statistics; with --output also writes the unified
    /// entries as JSON.
    Reconcile {
        /// Chunithm export
        #[arg(long)]
        chunithm: PathBuf,
        /// maimai export
        #[arg(long)]
        maimai: PathBuf,
        /// Ongeki export
        #[arg(long)]
        ongeki: PathBuf,
        /// Write the unified catalog here
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Import songs into the catalog API
    ///
    /// Reads a song list, one song per line as "title","artist" or
    /// title,artist, or a platform export with --platform. Requests are
    /// sent one at a time with `request_delay_ms` between them. Songs the
    /// catalog already holds are counted, not treated as failures.
    Import {
        /// Path to the song list, or to a platform export with --platform
        input: PathBuf,
        /// Read INPUT as this platform's JSON export (chunithm, maimai, ongeki)
        #[arg(long, conflicts_with = "category_id")]
        platform: Option<Platform>,
        /// Category for every song of a list (default: 1)
        #[arg(long)]
        category_id: Option<i64>,
        /// Catalog API root (overrides api_base_url)
        #[arg(long)]
        api_url: Option<String>,
        /// Parse and print the list without sending anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, clap::Subcommand)]
enum TokenCommand {
    /// Print the current time-based code
    Totp,
    /// Sign DATA with the stored private key
    Sign {
        /// Challenge text to sign
        data: String,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config_file
        .unwrap_or_else(arcadex_etl::config::config_file_path);

    match cli.command {
        Commands::Keygen { force } => {
            commands::run_keygen(&config_path, force)?;
        }
        Commands::Verify { token } => {
            commands::run_verify(&config_path, &token)?;
        }
        Commands::Token(TokenCommand::Totp) => {
            commands::print_totp(&config_path)?;
        }
        Commands::Token(TokenCommand::Sign { data }) => {
            commands::print_signed(&config_path, &data)?;
        }
        Commands::Reconcile {
            chunithm,
            maimai,
            ongeki,
            output,
        } => {
            commands::run_reconcile(&chunithm, &maimai, &ongeki, output.as_deref())?;
        }
        Commands::Import {
            input,
            platform,
            category_id,
            api_url,
            dry_run,
        } => {
            let source = match platform {
                Some(platform) => ImportSource::Export(platform),
                None => ImportSource::List { category_id },
            };
            commands::run_import(&config_path, &input, source, api_url, dry_run).await?;
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommand::Show => commands::config::show_config(&config_path)?,
            ConfigCommand::Path => commands::config::show_path(&config_path),
            ConfigCommand::Init => commands::config::init_config(&config_path)?,
            ConfigCommand::Example => commands::config::show_example(),
        },
    }

    Ok(())
}
