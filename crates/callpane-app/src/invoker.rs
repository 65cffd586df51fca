//! Invoker - issues calls, times them and normalizes the reply
//!
//! Replies are normalized against the declared return types exactly once,
//! here, so everything downstream sees a positional list of values.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use callpane_core::prelude::*;
use callpane_core::{
    args_to_json, from_json, IdlType, IdlValue, MethodSignature, ServiceInterface,
};
use callpane_service::{Reply, ServiceProxy};

/// The outcome of a successful call
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    /// Decoded return values, one per declared return type
    pub values: Vec<IdlValue>,
    /// The reply exactly as the transport delivered it
    pub raw: Reply,
    /// Wall-clock time from issuing the call to receiving the reply
    pub elapsed: Duration,
}

impl CallResult {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Issues calls against a service
#[derive(Clone)]
pub struct Invoker {
    service: Arc<dyn ServiceProxy>,
}

impl Invoker {
    pub fn new(service: Arc<dyn ServiceProxy>) -> Self {
        Self { service }
    }

    /// Fetch the service's method list
    pub async fn interface(&self) -> Result<ServiceInterface> {
        self.service.interface().await
    }

    pub fn describe(&self) -> String {
        self.service.describe()
    }

    /// Call `signature` with positional `args`
    ///
    /// Failures are returned as they are; nothing is retried.
    pub async fn invoke(&self, signature: &MethodSignature, args: &[IdlValue]) -> Result<CallResult> {
        debug!("Invoking {} with {} argument(s)", signature.name, args.len());

        let start = Instant::now();
        let raw = self.service.call(&signature.name, args_to_json(args)).await?;
        let elapsed = start.elapsed();

        let values = normalize_reply(&signature.rets, &raw)?;
        debug!("{} returned {} value(s) in {:?}", signature.name, values.len(), elapsed);

        Ok(CallResult {
            values,
            raw,
            elapsed,
        })
    }
}

/// Align a reply with the declared return types and decode it
///
/// - no declared returns: always the empty list
/// - one declared return: a bare value and a one-element sequence give the
///   same one-element list
/// - several: the sequence is taken positionally and must match in length
pub fn normalize_reply(rets: &[IdlType], reply: &Reply) -> Result<Vec<IdlValue>> {
    let positional: Vec<&Value> = match (rets.len(), reply) {
        (0, _) => return Ok(Vec::new()),
        (1, Reply::Single(value)) => vec![value],
        (1, Reply::Many(values)) => match values.as_slice() {
            [value] => vec![value],
            _ => {
                return Err(Error::decode(format!(
                    "expected 1 return value, got {}",
                    values.len()
                )))
            }
        },
        (_, Reply::Many(values)) => values.iter().collect(),
        (_, Reply::Single(Value::Array(values))) => values.iter().collect(),
        (n, Reply::Single(_)) => {
            return Err(Error::decode(format!(
                "expected {} return values, got a single value",
                n
            )))
        }
    };

    if positional.len() != rets.len() {
        return Err(Error::decode(format!(
            "expected {} return values, got {}",
            rets.len(),
            positional.len()
        )));
    }

    rets.iter()
        .zip(positional)
        .map(|(ty, json)| from_json(ty, json))
        .collect()
}
