//! srs-mgmt - Administrative CLI for the SRS Stack management configuration
//!
//! Run with `srs-mgmt --help` for usage. Every command prints one JSON
//! envelope on stdout; failures exit with status 1.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use srs_mgmt::{
    APP_NAME, ErrorEnvelope, MGMT_PASSWORD, MgmtConfig, Reply, Settings, VERSION, as_error,
    as_response,
};

const MASK: &str = "******";

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Manage the SRS Stack management configuration file")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Path to the managed dotenv file (default: .env)
    #[arg(short, long)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of a key
    Get {
        key: String,
    },

    /// Set a key and save the file
    Set {
        key: String,
        value: String,
    },

    /// Remove a key and save the file
    Unset {
        key: String,
    },

    /// List all entries
    List {
        /// Show secrets instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Set the management password and save the file
    Passwd {
        password: String,
    },

    /// Show tool settings
    Settings {
        /// Initialize the settings file with defaults
        #[arg(long)]
        init: bool,
    },
}

fn setup_logging(debug: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_target(false))
            .with(filter)
            .init();
    } else {
        // Logs go to stderr so stdout carries only the envelope
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(filter)
            .init();
    }

    Ok(())
}

fn not_found(key: &str) -> ErrorEnvelope {
    as_error(404, "not_found", format!("Key not found: {}", key))
}

fn show_settings(init: bool, settings: &Settings) -> Reply<Value> {
    let path = Settings::settings_file_path()?;
    if init {
        settings.save()?;
        info!("Settings initialized at {}", path.display());
    }
    Ok(as_response(
        200,
        Some(json!({ "path": path, "settings": settings })),
    ))
}

fn open_config(settings: &Settings) -> srs_mgmt::Result<MgmtConfig> {
    let config = MgmtConfig::open(settings.store())?;
    debug!(
        path = %config.store().path().display(),
        entries = config.entries().len(),
        "Opened management config"
    );
    Ok(config)
}

fn run(command: Commands, settings: &Settings) -> Reply<Value> {
    match command {
        Commands::Get { key } => {
            let config = open_config(settings)?;
            let value = config.get(&key).ok_or_else(|| not_found(&key))?;
            Ok(as_response(200, Some(json!({ "key": key, "value": value }))))
        }

        Commands::Set { key, value } => {
            let mut config = open_config(settings)?;
            config.set(key.as_str(), value);
            config.persist()?;
            info!("Set {}", key);
            Ok(as_response(200, None))
        }

        Commands::Unset { key } => {
            let mut config = open_config(settings)?;
            if config.is_default_only(&key) {
                return Err(as_error(
                    409,
                    "env_default",
                    format!("{} comes from the process environment, not the file", key),
                ));
            }
            config.remove(&key).ok_or_else(|| not_found(&key))?;
            config.persist()?;
            info!("Removed {}", key);

            // A process default may still resolve after the file entry is gone
            let fallback = config
                .get(&key)
                .map(|value| json!({ "key": key, "fallback": value }));
            Ok(as_response(200, fallback))
        }

        Commands::List { reveal } => {
            let mut entries = open_config(settings)?.effective();
            if settings.mask_secrets && !reveal {
                if let Some(password) = entries.get_mut(MGMT_PASSWORD) {
                    *password = MASK.to_string();
                }
            }
            Ok(as_response(200, Some(json!(entries))))
        }

        Commands::Passwd { password } => {
            let mut config = open_config(settings)?;
            config.set_mgmt_password(password);
            config.persist()?;
            info!("Management password updated");
            Ok(as_response(200, None))
        }

        Commands::Settings { init } => show_settings(init, settings),
    }
}

fn main() -> Result<()> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let cli = Cli::parse();

    // Load settings
    let mut settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load settings, using defaults: {}", e);
        Settings::default()
    });
    if let Some(env_file) = cli.env_file {
        settings.env_file = env_file;
    }
    settings.debug |= cli.debug;

    setup_logging(settings.debug, settings.log_file.as_ref())?;

    match run(cli.command, &settings) {
        Ok(envelope) => {
            println!("{}", serde_json::to_string(&envelope)?);
        }
        Err(envelope) => {
            warn!("{}", envelope);
            println!("{}", serde_json::to_string(&envelope)?);
            std::process::exit(1);
        }
    }

    Ok(())
}
