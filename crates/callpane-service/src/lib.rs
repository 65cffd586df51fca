//! # callpane-service - Service Proxies
//!
//! Everything that answers calls made from the console.
//!
//! Depends on [`callpane_core`] for the interface description language and
//! error handling.
//!
//! ## Public API
//!
//! ### The Proxy Seam
//! - [`ServiceProxy`] - Fetch the method list and issue calls
//! - [`Reply`] - A reply as received, bare value or sequence
//!
//! ### Stdio Transport
//! - [`ServiceProcess`] - Child process speaking JSON lines over stdio
//! - [`RequestTracker`] - Matches responses to pending calls by id
//! - [`build_request()`], [`parse_response()`] - Wire format
//!
//! ### Other Sources
//! - [`DemoService`] - Built-in in-process service
//! - [`load_interface()`] - Read an interface description file
//! - [`WithInterface`] - Use a file's method list with any proxy

pub mod commands;
pub mod demo;
pub mod interface;
pub mod process;
pub mod protocol;
pub mod proxy;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use commands::{next_request_id, Outcome, RequestTracker};
pub use demo::{DemoService, DEMO_INTERFACE};
pub use interface::{load_interface, WithInterface};
pub use process::ServiceProcess;
pub use protocol::{build_request, parse_response, Response, INTERFACE_METHOD};
pub use proxy::{Reply, ServiceProxy};
