//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per application phase
//! - `scroll`: Console scroll handlers

pub(crate) mod keys;
pub(crate) mod scroll;
pub(crate) mod update;


use std::sync::Arc;

use callpane_core::{IdlValue, MethodSignature};

use crate::message::Message;

// Re-export main entry point
pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Fetch the method list from the service
    LoadInterface,

    /// Call a method with already validated arguments
    Invoke {
        method: usize,
        signature: Arc<MethodSignature>,
        args: Vec<IdlValue>,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
