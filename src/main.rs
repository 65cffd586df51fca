//! Callpane - a terminal console for calling services
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;

use callpane::{build_service, exit_code, run_headless, run_tui, ServiceOptions};
use callpane_app::config::load_settings;
use callpane_core::prelude::*;

/// Callpane - build call forms from a service interface
#[derive(Parser, Debug)]
#[command(name = "callpane")]
#[command(about = "A terminal console that builds call forms from a service interface", long_about = None)]
struct Args {
    /// Interface description file (overrides the service's own method list)
    #[arg(value_name = "INTERFACE")]
    interface: Option<PathBuf>,

    /// Spawn the service: program and its arguments (must come last)
    #[arg(long, value_name = "CMD", num_args = 1.., allow_hyphen_values = true)]
    exec: Vec<String>,

    /// Use the built-in demo service
    #[arg(long, conflicts_with = "exec")]
    demo: bool,

    /// Call without the TUI, e.g. --call 'add(2, 3)' (repeatable)
    #[arg(long = "call", value_name = "EXPR")]
    calls: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    callpane_core::logging::init()?;

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let settings = load_settings(&cwd);

    let options = ServiceOptions {
        interface: args.interface,
        command: args.exec,
        demo: args.demo,
    }
    .merge(&settings.service);

    let service = match build_service(&options) {
        Ok(service) => service,
        Err(e) => {
            error!("Could not start service: {}", e);
            eprintln!("❌ {}", e);
            if let Ok(dir) = callpane_core::logging::log_directory() {
                eprintln!("   Logs: {}", dir.display());
            }
            if matches!(e, Error::NoService) {
                eprintln!();
                eprintln!("Examples:");
                eprintln!("  callpane --demo");
                eprintln!("  callpane service.did --exec python3 server.py");
            }
            std::process::exit(exit_code(&e));
        }
    };

    if args.calls.is_empty() {
        if let Err(e) = run_tui(service, settings).await {
            eprintln!("❌ {}", e);
            std::process::exit(exit_code(&e));
        }
        return Ok(());
    }

    match run_headless(service, settings, &args.calls).await {
        Ok(summary) if summary.all_succeeded() => Ok(()),
        Ok(_) => std::process::exit(1),
        Err(e) => std::process::exit(exit_code(&e)),
    }
}
