//! Fragment Runtime (v1)
//!
//! Command-line front end for the load queue resolver.
//!
//! # Architecture Overview
//!
//! ```text
//!   page config (JSON) ──▶ ConfigStore ──▶ LoadQueueBuilder ──▶ PageLifecycle ──▶ ResourceLoader
//!                              │                                     │
//!                              ▼                                     ▼
//!                         audit warnings                      lifecycle listeners
//!
//!   VariableBroadcaster ──▶ GlobalScope        FragmentInjector ──▶ Document
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use fragment_runtime::config::loader::load_page_config;
use fragment_runtime::config::settings::{load_settings, RuntimeSettings};
use fragment_runtime::config::validation::audit;
use fragment_runtime::config::watcher::PageConfigWatcher;
use fragment_runtime::config::ConfigStore;
use fragment_runtime::lifecycle::{FlagConditions, PageLifecycle, TracingLoader};
use fragment_runtime::observability::logging::init_logging;
use fragment_runtime::queue::build_queue;

#[derive(Parser)]
#[command(name = "fragment-runtime")]
#[command(about = "Resolve fragment asset load queues for a page", long_about = None)]
struct Cli {
    /// Runtime settings file (TOML)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the eager load queue as JSON
    Queue { config: PathBuf },
    /// Run the page-ready pass through the tracing loader
    PageReady {
        config: PathBuf,
        /// Condition expression to treat as true (repeatable)
        #[arg(long = "flag")]
        flags: Vec<String>,
    },
    /// Print configuration warnings
    Audit { config: PathBuf },
    /// Reprint the eager load queue whenever the configuration changes
    Watch { config: PathBuf },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => RuntimeSettings::default(),
    };
    init_logging(&settings.observability);

    tracing::debug!(settings = ?cli.settings, "fragment-runtime v0.1.0 starting");

    match cli.command {
        Commands::Queue { config } => {
            let store = load_store(&config)?;
            print_queue(&store)?;
        }
        Commands::PageReady { config, flags } => {
            let store = load_store(&config)?;
            let loader = TracingLoader::new(settings.loader.base_url()?);
            let mut conditions = FlagConditions::new(settings.conditions.flags.iter().cloned());
            for flag in flags {
                conditions.set(flag);
            }

            let mut lifecycle = PageLifecycle::new(store, loader, conditions);
            let report = lifecycle.page_ready().await?;
            println!(
                "{}: {} eager, {} conditional",
                report.page, report.eager, report.conditional
            );
        }
        Commands::Audit { config } => {
            let store = load_store(&config)?;
            let warnings = store.get().map(|c| audit(&c)).unwrap_or_default();
            if warnings.is_empty() {
                println!("No warnings");
            }
            for warning in warnings {
                println!("warning: {}", warning);
            }
        }
        Commands::Watch { config } => {
            let store = load_store(&config)?;
            print_queue(&store)?;

            let (watcher, mut updates) = PageConfigWatcher::new(&config);
            let _guard = watcher.run()?;

            loop {
                tokio::select! {
                    Some(raw) = updates.recv() => {
                        if store.set(&raw).is_ok() {
                            print_queue(&store)?;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted, stopping watcher");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_store(path: &Path) -> Result<ConfigStore, Box<dyn std::error::Error>> {
    let config = load_page_config(path)?;
    let store = ConfigStore::new();
    store.replace(config);
    Ok(store)
}

fn print_queue(store: &ConfigStore) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(config) = store.get() {
        let queue = build_queue(&config, &config.assets);
        println!("{}", serde_json::to_string_pretty(&queue)?);
    }
    Ok(())
}
