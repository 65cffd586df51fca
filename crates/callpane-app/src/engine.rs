//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the application state, the message channel, the shutdown
//! signal and the invoker wrapping the service. Both runners feed it messages
//! and read the state back.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::info;

use callpane_service::ServiceProxy;

use crate::config::Settings;
use crate::handler::UpdateAction;
use crate::invoker::Invoker;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Orchestration engine for Callpane.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, call tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    invoker: Invoker,

    /// Loaded settings
    pub settings: Settings,
}

impl Engine {
    /// Create a new Engine for a service.
    ///
    /// Must be called inside a tokio runtime: it spawns the signal handler.
    pub fn new(service: Arc<dyn ServiceProxy>, settings: Settings) -> Self {
        let mut state = AppState::with_settings(settings.clone());
        state.service_label = service.describe();

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone(), shutdown_rx.clone());

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            invoker: Invoker::new(service),
            settings,
        }
    }

    /// Start fetching the method list; the result arrives as a message
    pub fn start(&mut self) {
        info!("Starting engine for {}", self.state.service_label);
        crate::actions::handle_action(
            UpdateAction::LoadInterface,
            self.msg_tx.clone(),
            self.invoker.clone(),
            self.shutdown_rx.clone(),
        );
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.invoker,
            &self.shutdown_rx,
        );
    }

    /// Process every message waiting in the channel without blocking.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from background tasks
    pub async fn next_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    /// Get a clone of the message sender
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop background tasks. In-flight calls are abandoned.
    pub fn shutdown(&mut self) {
        if self.state.in_flight > 0 {
            info!("Abandoning {} in-flight call(s)", self.state.in_flight);
        }
        let _ = self.shutdown_tx.send(true);
    }
}
