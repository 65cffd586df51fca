//! Built-in demo service
//!
//! Runs in-process and covers every reply shape the console handles:
//! a bare value, no values, several values, a single value delivered as a
//! one-element sequence, a rejection and a slow reply.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::proxy::{Reply, ServiceProxy};
use callpane_core::prelude::*;
use callpane_core::{from_json, parse_interface, to_json, IdlValue, ServiceInterface};

/// Interface description of the demo service
pub const DEMO_INTERFACE: &str = r#"
type Person = record { name : text; age : nat8; nick : opt text };
type Mood = variant { happy; sad; other : text };

service demo : {
  add : (nat, nat) -> (nat) query;
  greet : (who : Person) -> (text);
  noop : () -> ();
  fail : () -> ();
  swap : (text, int) -> (int, text) query;
  profile : (name : text) -> (Person) query;
  counter : (delta : int) -> (int);
  sleep : (millis : nat32) -> (text);
  describe : (Mood, flag : bool) -> (vec text) query;
  banner : () -> (text) query;
}
"#;

/// In-process service used by `--demo`
#[derive(Debug, Default)]
pub struct DemoService {
    counter: AtomicI64,
}

impl DemoService {
    pub fn new() -> Self {
        Self::default()
    }

    fn dispatch(&self, method: &str, args: &[IdlValue]) -> Result<Reply> {
        let single = |value: IdlValue| -> Result<Reply> { Ok(Reply::Single(to_json(&value))) };

        match (method, args) {
            ("add", [IdlValue::Nat(a), IdlValue::Nat(b)]) => {
                let sum = a
                    .checked_add(*b)
                    .ok_or_else(|| Error::remote("overflow"))?;
                single(IdlValue::Nat(sum))
            }
            ("greet", [IdlValue::Record(fields)]) => {
                let name = fields
                    .iter()
                    .find_map(|(label, value)| match (label.as_str(), value) {
                        ("name", IdlValue::Text(name)) => Some(name.as_str()),
                        _ => None,
                    })
                    .unwrap_or("stranger");
                single(IdlValue::Text(format!("Hello, {}!", name)))
            }
            ("noop", []) => Ok(Reply::empty()),
            ("fail", []) => Err(Error::remote("boom")),
            ("swap", [text, int]) => Ok(Reply::Many(vec![to_json(int), to_json(text)])),
            ("profile", [IdlValue::Text(name)]) => {
                let person = IdlValue::Record(vec![
                    ("name".into(), IdlValue::Text(name.clone())),
                    ("age".into(), IdlValue::Nat((name.len() as u128 * 7) % 100)),
                    (
                        "nick".into(),
                        match name.chars().next() {
                            Some(c) => IdlValue::some(IdlValue::Text(c.to_string())),
                            None => IdlValue::none(),
                        },
                    ),
                ]);
                // One return, delivered as a one-element sequence
                Ok(Reply::Many(vec![to_json(&person)]))
            }
            ("counter", [IdlValue::Int(delta)]) => {
                let delta = i64::try_from(*delta).map_err(|_| Error::remote("delta too large"))?;
                let now = self.counter.fetch_add(delta, Ordering::SeqCst) + delta;
                single(IdlValue::Int(now as i128))
            }
            ("describe", [IdlValue::Variant(label, payload), IdlValue::Bool(flag)]) => {
                let mut lines = vec![format!("mood: {}", label)];
                if let IdlValue::Text(other) = payload.as_ref() {
                    lines.push(format!("note: {}", other));
                }
                lines.push(format!("flag: {}", flag));
                single(IdlValue::Vec(lines.into_iter().map(IdlValue::Text).collect()))
            }
            ("banner", []) => single(IdlValue::text(
                "callpane demo\n  indented line\n\x1b[31mcolored\x1b[0m <tag>",
            )),
            _ => Err(Error::unknown_method(method)),
        }
    }
}

#[async_trait]
impl ServiceProxy for DemoService {
    async fn interface(&self) -> Result<ServiceInterface> {
        parse_interface(DEMO_INTERFACE)
    }

    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Reply> {
        debug!("demo call {}({} args)", method, args.len());
        let interface = parse_interface(DEMO_INTERFACE)?;
        let signature = interface
            .get(method)
            .ok_or_else(|| Error::unknown_method(method))?;

        if args.len() != signature.args.len() {
            return Err(Error::remote(format!(
                "{} expects {} argument(s), got {}",
                method,
                signature.args.len(),
                args.len()
            )));
        }
        let values = signature
            .args
            .iter()
            .zip(&args)
            .map(|(ty, json)| from_json(ty, json))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| Error::remote(e.to_string()))?;

        if let ("sleep", [IdlValue::Nat(millis)]) = (method, values.as_slice()) {
            let millis = u64::try_from(*millis).unwrap_or(u64::MAX);
            tokio::time::sleep(Duration::from_millis(millis)).await;
            return Ok(Reply::Single(Value::String(format!("slept {}ms", millis))));
        }

        self.dispatch(method, &values)
    }

    fn describe(&self) -> String {
        "demo".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_demo_interface_parses() {
        let interface = DemoService::new().interface().await.unwrap();
        assert_eq!(interface.name.as_deref(), Some("demo"));
        assert!(interface.get("add").unwrap().is_query());
        assert!(!interface.get("greet").unwrap().is_query());
        assert_eq!(interface.get("swap").unwrap().rets.len(), 2);
    }

    #[tokio::test]
    async fn test_add() {
        let demo = DemoService::new();
        let reply = demo.call("add", vec![json!(2), json!(3)]).await.unwrap();
        assert_eq!(reply, Reply::Single(json!(5)));
    }

    #[tokio::test]
    async fn test_noop_returns_nothing() {
        let reply = DemoService::new().call("noop", vec![]).await.unwrap();
        assert_eq!(reply, Reply::empty());
    }

    #[tokio::test]
    async fn test_fail_rejects_with_boom() {
        let err = DemoService::new().call("fail", vec![]).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[tokio::test]
    async fn test_swap_returns_two_values() {
        let reply = DemoService::new()
            .call("swap", vec![json!("a"), json!(-1)])
            .await
            .unwrap();
        assert_eq!(reply, Reply::Many(vec![json!(-1), json!("a")]));
    }

    #[tokio::test]
    async fn test_profile_is_one_element_sequence() {
        let reply = DemoService::new()
            .call("profile", vec![json!("Ada")])
            .await
            .unwrap();
        assert_eq!(
            reply,
            Reply::Many(vec![json!({"name": "Ada", "age": 21, "nick": ["A"]})])
        );
    }

    #[tokio::test]
    async fn test_counter_accumulates() {
        let demo = DemoService::new();
        demo.call("counter", vec![json!(2)]).await.unwrap();
        let reply = demo.call("counter", vec![json!(-5)]).await.unwrap();
        assert_eq!(reply, Reply::Single(json!(-3)));
    }

    #[tokio::test]
    async fn test_sleep_replies_after_delay() {
        let reply = DemoService::new()
            .call("sleep", vec![json!(1)])
            .await
            .unwrap();
        assert_eq!(reply, Reply::Single(json!("slept 1ms")));
    }

    #[tokio::test]
    async fn test_bad_arguments_are_rejected() {
        let demo = DemoService::new();
        assert!(demo.call("add", vec![json!(1)]).await.is_err());
        assert!(demo.call("add", vec![json!("x"), json!(1)]).await.is_err());
        assert!(matches!(
            demo.call("missing", vec![]).await,
            Err(Error::UnknownMethod { .. })
        ));
    }
}
