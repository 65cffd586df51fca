//! Test utilities for service proxies
//!
//! [`StubService`] answers calls from a script and counts them, so tests can
//! check both what the UI shows and whether a call was issued at all.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::proxy::{Reply, ServiceProxy};
use callpane_core::prelude::*;
use callpane_core::{parse_interface, ServiceInterface};

/// Scripted, call-counting service
pub struct StubService {
    interface: ServiceInterface,
    replies: Mutex<HashMap<String, std::result::Result<Reply, String>>>,
    calls: AtomicUsize,
    log: Mutex<Vec<(String, Vec<Value>)>>,
}

impl StubService {
    pub fn new(interface: ServiceInterface) -> Self {
        Self {
            interface,
            replies: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Build a stub from interface description text
    ///
    /// # Panics
    /// If the text does not parse.
    pub fn from_did(src: &str) -> Self {
        Self::new(parse_interface(src).expect("stub interface parses"))
    }

    /// Answer `method` with `reply`
    pub fn with_reply(self, method: &str, reply: Reply) -> Self {
        self.set_reply(method, Ok(reply));
        self
    }

    /// Reject calls to `method` with `message`
    pub fn with_error(self, method: &str, message: &str) -> Self {
        self.set_reply(method, Err(message.to_string()));
        self
    }

    pub fn set_reply(&self, method: &str, reply: std::result::Result<Reply, String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(method.to_string(), reply);
        }
    }

    /// Number of calls issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every call issued so far, in order
    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ServiceProxy for StubService {
    async fn interface(&self) -> Result<ServiceInterface> {
        Ok(self.interface.clone())
    }

    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Reply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut log) = self.log.lock() {
            log.push((method.to_string(), args));
        }
        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|replies| replies.get(method).cloned());
        match reply {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(Error::remote(message)),
            None => Ok(Reply::empty()),
        }
    }

    fn describe(&self) -> String {
        "stub".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_stub_counts_and_replies() {
        let stub = StubService::from_did("service : { add : (nat, nat) -> (nat); fail : () -> () }")
            .with_reply("add", Reply::Single(json!(5)))
            .with_error("fail", "boom");

        assert_eq!(stub.call_count(), 0);
        assert_eq!(
            stub.call("add", vec![json!(2), json!(3)]).await.unwrap(),
            Reply::Single(json!(5))
        );
        assert_eq!(stub.call("fail", vec![]).await.unwrap_err().to_string(), "boom");
        assert_eq!(stub.call_count(), 2);
        assert_eq!(stub.calls()[0], ("add".to_string(), vec![json!(2), json!(3)]));
    }
}
