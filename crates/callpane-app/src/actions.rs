//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use callpane_core::prelude::*;
use callpane_core::{IdlValue, MethodSignature};

use crate::handler::UpdateAction;
use crate::invoker::Invoker;
use crate::message::Message;

/// Execute an action by spawning a background task
///
/// Every call runs in its own task, so several may be in flight at once,
/// even for the same method. Each reports back with a
/// [`Message::CallFinished`] in completion order.
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    invoker: Invoker,
    shutdown_rx: watch::Receiver<bool>,
) {
    match action {
        UpdateAction::LoadInterface => {
            tokio::spawn(load_interface(invoker, msg_tx));
        }

        UpdateAction::Invoke {
            method,
            signature,
            args,
        } => {
            tokio::spawn(invoke_method(
                invoker,
                method,
                signature,
                args,
                msg_tx,
                shutdown_rx,
            ));
        }
    }
}

async fn load_interface(invoker: Invoker, msg_tx: mpsc::Sender<Message>) {
    info!("Fetching interface from {}", invoker.describe());
    let msg = match invoker.interface().await {
        Ok(interface) => Message::InterfaceLoaded(interface),
        Err(e) => Message::InterfaceFailed(e.to_string()),
    };
    let _ = msg_tx.send(msg).await;
}

async fn invoke_method(
    invoker: Invoker,
    method: usize,
    signature: Arc<MethodSignature>,
    args: Vec<IdlValue>,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let outcome = tokio::select! {
        result = invoker.invoke(&signature, &args) => result.map_err(|e| {
            if !e.is_recoverable() {
                warn!("Service {} is unavailable: {}", invoker.describe(), e);
            }
            e.to_string()
        }),
        _ = shutdown_rx.wait_for(|stop| *stop) => {
            debug!("Dropping in-flight call to {} on shutdown", signature.name);
            return;
        }
    };

    if msg_tx
        .send(Message::CallFinished {
            method,
            args,
            outcome,
        })
        .await
        .is_err()
    {
        warn!("Call to {} finished after the event loop closed", signature.name);
    }
}
