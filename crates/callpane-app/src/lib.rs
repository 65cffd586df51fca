//! callpane-app - Application state and orchestration for Callpane
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: call forms, the invoker, result panes, the bounded console,
//! configuration loading and the Engine that ties them to a service.

pub mod actions;
pub mod config;
pub mod console;
pub mod engine;
pub mod form;
pub mod handler;
pub mod hit_map;
pub mod input_key;
pub mod invoker;
pub mod message;
pub mod process;
pub mod result_view;
pub mod signals;
pub mod state;

// Re-export primary types
pub use console::{Console, ConsoleEntry, ConsoleKind, ConsoleViewState};
pub use engine::Engine;
pub use form::{FormFocus, MethodForm};
pub use handler::{UpdateAction, UpdateResult};
pub use hit_map::{HitMap, HitRegion, HitTarget};
pub use input_key::InputKey;
pub use invoker::{normalize_reply, CallResult, Invoker};
pub use message::{EditOp, Message};
pub use result_view::{RenderedResult, ResultPane, ResultView};
pub use state::{AppPhase, AppState, MethodEntry};
