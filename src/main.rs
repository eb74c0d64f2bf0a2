use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use tinylink::config::{DEFAULT_CONFIG_PATH, StaticConfig};
use tinylink::errors::TinylinkError;
use tinylink::services::ShortenerService;
use tinylink::system::{logging, signal};

/// Tinylink - in-memory URL shortening engine
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(version)]
#[command(about = "In-memory URL shortening engine", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a sample configuration file
    GenerateConfig {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Load and validate the configuration, then print the engine settings
    CheckConfig,

    /// Start the engine and its reclamation process until Ctrl+C
    Run,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = dispatch(cli).await {
        match e.downcast_ref::<TinylinkError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::GenerateConfig { output } => {
            match output {
                Some(path) => {
                    StaticConfig::default().save_to_file(&path)?;
                    println!("Sample configuration written to {}", path.display());
                }
                None => print!("{}", StaticConfig::generate_sample_config()),
            }
            Ok(())
        }
        Commands::CheckConfig => {
            let config = StaticConfig::load_from(&cli.config)?;
            let rendered = toml::to_string_pretty(&config.engine)
                .context("failed to render engine settings")?;
            println!("Configuration OK\n\n[engine]\n{}", rendered);
            Ok(())
        }
        Commands::Run => run(&cli.config).await,
    }
}

async fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = StaticConfig::load_from(config_path)?;
    let _guard = logging::init_logging(&config.logging)?;

    let service = ShortenerService::from_config(&config.engine)?;
    info!(
        "Tinylink engine running (code length {}, TTL {}h, sweep every {}m, base URL {})",
        config.engine.short_code_length,
        config.engine.default_ttl_hours,
        config.engine.cleanup_interval_minutes,
        config.engine.base_url
    );

    signal::wait_for_shutdown_signal().await;

    service.shutdown().await;
    let stats = service.stats();
    info!(
        "Engine stopped: {} links ({} active), {} users, {} total accesses",
        stats.total_links, stats.active_links, stats.total_users, stats.total_accesses
    );
    Ok(())
}
