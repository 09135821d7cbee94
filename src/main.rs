use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use saush::config::{Config, ReindexMode};

mod commands;

#[derive(Parser)]
#[command(
    name = "saush",
    version,
    about = "Word index for crawled web pages with a re-crawl freshness policy",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the index schema if it does not exist
    Init,

    /// Drop all index data and recreate the schema
    Reset {
        /// Confirm the reset
        #[arg(long, default_value = "false")]
        yes: bool,
    },

    /// Index the text of one page
    Index {
        /// Page URL
        #[arg(short, long)]
        url: String,

        /// Page title
        #[arg(short, long)]
        title: Option<String>,

        /// File holding the page text (stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Re-index mode (append, replace)
        #[arg(long)]
        reindex: Option<ReindexMode>,
    },

    /// Index every .txt file of a directory
    IndexDir {
        /// Directory of text files
        dir: PathBuf,

        /// URL prefix; each page URL is the prefix joined with the file name
        #[arg(long)]
        base_url: String,

        /// Files indexed at the same time
        #[arg(short = 'j', long, default_value = "4")]
        concurrency: usize,

        /// Skip pages that are still fresh
        #[arg(long, default_value = "false")]
        skip_fresh: bool,
    },

    /// Show the age and freshness of a page
    Fresh {
        /// Page URL
        url: String,
    },

    /// Show row counts of the index
    Stats {
        /// Print as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the stems the normalizer produces for a text
    Normalize {
        /// Text to normalize
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;

    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::debug!(sqlite_path = %config.database.sqlite_path.display(), "configuration loaded");

    match cli.command {
        Commands::Init => commands::init(&config)?,

        Commands::Reset { yes } => commands::reset(&config, yes)?,

        Commands::Index {
            url,
            title,
            file,
            reindex,
        } => {
            let mut config = config;
            if let Some(mode) = reindex {
                config.index.reindex = mode;
            }
            tracing::info!(url = %url, file = ?file, "Starting index command");
            commands::index(&config, &url, title.as_deref(), file)?;
        }

        Commands::IndexDir {
            dir,
            base_url,
            concurrency,
            skip_fresh,
        } => {
            tracing::info!(
                dir = %dir.display(),
                base_url = %base_url,
                concurrency = %concurrency,
                "Starting index-dir command"
            );
            commands::index_dir(&config, dir, base_url, concurrency, skip_fresh).await?;
        }

        Commands::Fresh { url } => commands::fresh(&config, &url)?,

        Commands::Stats { json } => commands::stats(&config, json)?,

        Commands::Normalize { text } => commands::normalize(&text),
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    config.apply_env().context("Invalid environment configuration")?;

    if let Some(path) = &cli.database {
        config.database.sqlite_path = path.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        String::from("saush=debug,info")
    } else {
        format!("saush={level},warn")
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&default_filter))
        .context("Invalid log filter")?;

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
