//! Interface description language
//!
//! Type descriptors, values and method signatures, plus everything the UI
//! needs to work with them: interface-file and value parsing, canonical
//! text formatting, the JSON wire mapping, random values, and the input and
//! display widgets generated from types.

pub mod display;
pub mod input;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod random;
pub mod signature;
pub mod types;
pub mod value;

pub use display::{render_output, render_value, DisplayRow, DisplayWidget};
pub use input::{render_input, InputKind, InputWidget, ParseMode};
pub use json::{args_to_json, from_json, to_json};
pub use parser::{parse_args, parse_call, parse_interface, parse_type_expr, parse_value};
pub use random::{random_value, RandomConfig};
pub use signature::{Annotation, MethodSignature, ServiceInterface};
pub use types::{Field, IdlType};
pub use value::{format_args, format_returns, IdlValue, DEFAULT_TEXT_WIDTH};
