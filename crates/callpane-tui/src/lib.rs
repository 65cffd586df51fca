//! # callpane-tui - Terminal UI for Callpane
//!
//! Ratatui rendering of the application state owned by `callpane-app`.
//! Method cards, the result views and the console are drawn here; every
//! state change goes through the app crate's update function.
//!
//! ## Public API
//!
//! - [`run()`] - Run the interactive console against a service
//! - [`render::view()`] - Draw one frame of the application state

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
