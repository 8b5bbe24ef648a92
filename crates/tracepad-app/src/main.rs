//! Main application entry point.

use clap::Parser;
use std::path::PathBuf;
use tracepad_app::{App, AppConfig, AppError, ShortcutRegistry};

/// Replay a scripted input session against the Tracepad canvas.
#[derive(Debug, Parser)]
#[command(name = "tracepad", version, about)]
struct Cli {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print keyboard shortcuts.
    #[arg(long)]
    shortcuts: bool,

    /// JSON script of host commands.
    script: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    log::info!("Starting Tracepad");

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if cli.shortcuts {
        ShortcutRegistry::print_all();
    }

    let Some(script) = cli.script else {
        if cli.shortcuts {
            return Ok(());
        }
        return Err(AppError::Script("no script given".to_string()));
    };

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let mut app = App::new(config);
    let summary = app.run_file(&script)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
