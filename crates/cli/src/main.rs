mod commands;
mod prompt;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movielookup_core::{
    current_screen, load_config, sign_in, sign_out, validate_config, Config, CredentialProvider,
    FileCredentialStore, HttpSearchClient, SanitizedConfig, Screen,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "movielookup", version, about = "Search movie titles from the terminal")]
struct Cli {
    /// Configuration file
    #[arg(long, env = "MOVIELOOKUP_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store the credentials used for every search request
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored credentials
    Logout,
    /// Interactive title search (default)
    Search,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging; stdout belongs to the search prompt
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,movielookup_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!("movielookup {}", VERSION);

    let config = read_config(&cli.config)?;
    validate_config(&config).context("Configuration validation failed")?;

    let store = Arc::new(FileCredentialStore::new(&config.storage.credentials_path));

    match cli.command.unwrap_or(Command::Search) {
        Command::Login { username, password } => {
            sign_in(store.as_ref(), &username, &password)
                .await
                .context("Sign in failed")?;
            println!("Signed in as {}", username);
        }
        Command::Logout => {
            sign_out(store.as_ref())
                .await
                .context("Failed to clear stored credentials")?;
            println!("Signed out");
        }
        Command::Config => {
            let sanitized = SanitizedConfig::from(&config);
            println!("{}", serde_json::to_string_pretty(&sanitized)?);
        }
        Command::Search => {
            if current_screen(store.as_ref()).await == Screen::SignIn {
                println!("Not signed in. Run `movielookup login --username <U> --password <P>` first.");
                return Ok(());
            }

            let credentials: Arc<dyn CredentialProvider> = store;
            let client = HttpSearchClient::new(&config.api, credentials)
                .context("Failed to create search client")?;
            info!("Searching {}", config.api.base_url);

            prompt::run(Arc::new(client)).await?;
        }
    }

    Ok(())
}

/// Load the config file, falling back to defaults when there is none.
fn read_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!("No configuration at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    info!("Loading configuration from {:?}", path);
    load_config(path).with_context(|| format!("Failed to load config from {:?}", path))
}
