//! # callpane-core - Core Domain Types
//!
//! Foundation crate for Callpane. Provides error handling, logging setup,
//! display preparation for untrusted text and the interface description
//! language the rest of the workspace is built on.
//!
//! ## Public API
//!
//! ### Interface Description Language (`idl`)
//! - [`IdlType`], [`IdlValue`] - Type descriptors and values
//! - [`MethodSignature`], [`ServiceInterface`] - Methods of a service
//! - [`parse_interface()`], [`parse_value()`], [`parse_call()`] - Parsers
//! - [`format_args()`], [`format_returns()`] - Canonical text form
//! - [`to_json()`], [`from_json()`] - Wire mapping
//! - [`InputWidget`], [`DisplayWidget`] - Widgets generated from types
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Text (`text`)
//! - [`display_lines()`] - Split reply text into safe display rows
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use callpane_core::prelude::*;
//! ```

pub mod error;
pub mod idl;
pub mod logging;
pub mod text;

/// Prelude for common imports used throughout all Callpane crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use idl::{
    args_to_json, format_args, format_returns, from_json, parse_args, parse_call,
    parse_interface, parse_type_expr, parse_value, random_value, render_input, render_output,
    render_value, to_json, Annotation, DisplayRow, DisplayWidget, Field, IdlType, IdlValue,
    InputKind, InputWidget, MethodSignature, ParseMode, RandomConfig, ServiceInterface,
    DEFAULT_TEXT_WIDTH,
};
pub use text::{display_lines, sanitize_line, strip_ansi_codes};
