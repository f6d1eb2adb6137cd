use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod app;
mod config;
mod engine;
mod error;
mod model;
mod services;
mod store;
mod utils;

use app::{App, RestoreOutcome};
use config::Config;
use services::{create_display_manager, create_window_manager, Notifier};
use store::{DryRunRepository, JsonFileRepository, LayoutRepository};

/// Exit status when some windows could not be placed
const EXIT_PARTIAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "windowlayouts", version)]
#[command(about = "Store and restore window layouts per screen configuration")]
struct Args {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the layout store file
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Read windows and screens but change nothing
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store the current window layout for the current screen layout
    Store {
        /// Forget stored windows that are no longer open
        #[arg(long)]
        prune: bool,
    },
    /// Restore the window layout stored for the current screen layout
    Restore,
    /// Store, switch to a configured screen layout, then restore
    Switch {
        /// Name of a screen layout in the [screenlayouts] config section
        name: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            // tracing may not be initialised yet
            eprintln!("windowlayouts: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;

    init_tracing(args.verbose, &config.logging.level)?;
    debug!("Configuration loaded from {:?}", config_path);

    if args.dry_run {
        warn!("Dry-run mode: no window, screen or store changes will be made");
    }

    let store_path = args
        .store
        .clone()
        .or_else(|| config.paths.store.clone())
        .unwrap_or_else(JsonFileRepository::default_path);
    let file = JsonFileRepository::new(store_path);
    debug!("Layout store at {:?}", file.path());
    let repository: Box<dyn LayoutRepository> = if args.dry_run {
        Box::new(DryRunRepository::new(file))
    } else {
        Box::new(file)
    };

    let notifier = Notifier::new(config.switch.notify, args.dry_run);
    let app = App::new(
        Arc::new(config),
        create_window_manager(args.dry_run),
        create_display_manager(args.dry_run),
        repository,
        notifier,
    );

    let outcome = match args.command {
        Command::Store { prune } => {
            let summary = app.store(prune).await?;
            info!(
                "Stored {} window(s) for {}",
                summary.merge.updated + summary.merge.added,
                summary.fingerprint
            );
            return Ok(ExitCode::SUCCESS);
        }
        Command::Restore => app.restore().await?,
        Command::Switch { name } => app.switch(&name).await?,
    };

    Ok(report(&outcome))
}

fn report(outcome: &RestoreOutcome) -> ExitCode {
    match outcome {
        RestoreOutcome::NoStoredLayout(fingerprint) => {
            eprintln!("windowlayouts: no stored layout for screens {}", fingerprint);
        }
        RestoreOutcome::Applied {
            fingerprint,
            report,
            skipped,
        } => {
            info!(
                "Restored {} window(s) for {}, {} left in place",
                report.applied.len(),
                fingerprint,
                skipped
            );
            if !report.is_complete() {
                eprintln!(
                    "windowlayouts: {} of {} window(s) could not be restored",
                    report.failed.len(),
                    report.failed.len() + report.applied.len()
                );
                for (window_id, e) in &report.failed {
                    eprintln!("  {}: {}", window_id, e);
                }
            }
        }
    }

    if outcome.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_PARTIAL)
    }
}

fn init_tracing(verbose: u8, configured: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = match verbose {
        0 => configured,
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(())
}
