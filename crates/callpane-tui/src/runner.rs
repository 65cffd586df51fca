//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use callpane_app::config::Settings;
use callpane_app::Engine;
use callpane_core::prelude::*;
use callpane_service::ServiceProxy;

use super::{event, render, terminal};

/// Run the interactive console against a service
///
/// Returns when the user quits or a signal arrives. Calls still in flight
/// are abandoned.
pub async fn run(service: Arc<dyn ServiceProxy>, settings: Settings) -> Result<()> {
    terminal::install_panic_hook();

    let mut term = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;
    if let Err(e) = terminal::enable_mouse() {
        warn!("Mouse capture unavailable: {}", e);
    }

    let mut engine = Engine::new(service, settings);
    engine.start();

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    if let Err(e) = terminal::disable_mouse() {
        debug!("Failed to disable mouse capture: {}", e);
    }
    ratatui::restore();

    info!("Callpane exiting");
    result
}

/// Main event loop
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Interface loads, finished calls and signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
