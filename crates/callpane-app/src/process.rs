//! Message processing
//!
//! Runs messages through the TEA update function and dispatches the actions
//! it returns.

use tokio::sync::{mpsc, watch};

use crate::actions::handle_action;
use crate::handler;
use crate::invoker::Invoker;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
///
/// Follow-up messages are processed in the same call, so the state is
/// settled when this returns.
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    invoker: &Invoker,
    shutdown_rx: &watch::Receiver<bool>,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), invoker.clone(), shutdown_rx.clone());
        }

        msg = result.message;
    }
}
