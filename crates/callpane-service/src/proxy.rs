//! The seam between the UI and whatever answers the calls

use async_trait::async_trait;
use serde_json::Value;

use callpane_core::prelude::*;
use callpane_core::ServiceInterface;

/// A reply as received from the transport
///
/// Transports disagree on how a single return value arrives: some send the
/// bare value, others a one-element sequence. Both shapes are kept here
/// untouched; the invoker normalizes them against the declared return types.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A bare value
    Single(Value),
    /// A sequence of values
    Many(Vec<Value>),
}

impl Reply {
    /// The reply as plain JSON, for the raw result view
    pub fn to_json(&self) -> Value {
        match self {
            Reply::Single(value) => value.clone(),
            Reply::Many(values) => Value::Array(values.clone()),
        }
    }

    /// Reply carrying nothing
    pub fn empty() -> Self {
        Reply::Many(Vec::new())
    }
}

/// A callable remote service
#[async_trait]
pub trait ServiceProxy: Send + Sync {
    /// Fetch the method list
    async fn interface(&self) -> Result<ServiceInterface>;

    /// Call `method` with positional JSON arguments
    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Reply>;

    /// Short label for the header
    fn describe(&self) -> String;
}
