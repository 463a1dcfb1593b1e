//! focus-stats - Statistics for focus timer work sessions

use clap::Parser;
use focus_stats::{
    cli::{Cli, Command},
    error::Result,
    period::resolve_range,
    stats::Stats,
    timezone::TimezoneConfig,
};
use focus_store::JsonlStore;
use focus_terminal::get_formatter;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins when set; otherwise quiet unless --verbose
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            tracing_subscriber::EnvFilter::new("focus_stats=info,focus_core=info,focus_store=info")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if cli.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());

    let now = tz_config.now();
    let range = resolve_range(&cli.period, cli.start.as_deref(), cli.end.as_deref(), now)?;

    let store = JsonlStore::new()?;
    info!("Reading sessions from {}", store.path().display());

    let mut stats = Stats::new(store, range, now, get_formatter(cli.json));
    let mut stdout = io::stdout().lock();

    match cli.command() {
        Command::Show => {
            info!("Running statistics report");
            stats.show(&mut stdout)?;
        }
        Command::List => {
            info!("Listing sessions");
            stats.list(&mut stdout)?;
        }
        Command::Delete => {
            info!("Deleting sessions");
            stats.delete(&mut stdout, io::stdin().lock())?;
        }
    }

    Ok(())
}
