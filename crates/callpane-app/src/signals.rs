//! OS signals become a quit message
//!
//! The listener stops on its own once the engine shuts down, so a headless
//! run that finishes normally leaves no task behind.

use tokio::sync::{mpsc, watch};

use super::message::Message;
use callpane_core::prelude::*;

/// Listen for SIGINT/SIGTERM (Ctrl+C on Windows) until `shutdown` fires
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>, mut shutdown: watch::Receiver<bool>) {
    tokio::spawn(async move {
        let signal = tokio::select! {
            received = next_signal() => received,
            _ = shutdown.changed() => {
                debug!("Signal listener stopped");
                return;
            }
        };

        match signal {
            Ok(name) => {
                info!("Received {}, quitting", name);
                let _ = tx.send(Message::Quit).await;
            }
            Err(e) => error!("Signal handler error: {}", e),
        }
    });
}

/// Resolve with the name of the first termination signal
async fn next_signal() -> Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let listen = |kind: SignalKind, name: &str| {
            signal(kind).map_err(|e| Error::terminal(format!("cannot listen for {}: {}", name, e)))
        };
        let mut sigint = listen(SignalKind::interrupt(), "SIGINT")?;
        let mut sigterm = listen(SignalKind::terminate(), "SIGTERM")?;

        Ok(tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        })
    }

    #[cfg(windows)]
    {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::terminal(format!("cannot listen for Ctrl+C: {}", e)))?;
        Ok("Ctrl+C")
    }
}
