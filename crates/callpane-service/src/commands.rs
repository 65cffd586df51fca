//! Request tracking for the stdio transport
//!
//! Every call gets a unique id. The stdout reader hands each response to the
//! tracker, which completes the matching pending call. There are no
//! timeouts: a call the service never answers stays pending until the
//! process exits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{oneshot, RwLock};

use super::proxy::Reply;
use callpane_core::prelude::*;

/// Global request ID counter
static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique request ID
pub fn next_request_id() -> u64 {
    REQUEST_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// How a request finished, as reported by the service
pub type Outcome = std::result::Result<Reply, String>;

/// A call awaiting its response
struct PendingRequest {
    response_tx: oneshot::Sender<Result<Reply>>,
    created_at: Instant,
    method: String,
}

/// Tracks pending requests and matches responses
#[derive(Default)]
pub struct RequestTracker {
    pending: Arc<RwLock<HashMap<u64, PendingRequest>>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending request
    /// Returns (request_id, receiver for response)
    pub async fn register(&self, method: &str) -> (u64, oneshot::Receiver<Result<Reply>>) {
        let id = next_request_id();
        let (tx, rx) = oneshot::channel();

        let pending = PendingRequest {
            response_tx: tx,
            created_at: Instant::now(),
            method: method.to_string(),
        };
        self.pending.write().await.insert(id, pending);

        (id, rx)
    }

    /// Complete the request with this id
    /// Returns true if the response was matched to a pending request
    pub async fn handle_response(&self, id: u64, outcome: Outcome) -> bool {
        let Some(pending) = self.pending.write().await.remove(&id) else {
            return false;
        };
        debug!(
            "Response #{} for {} after {:?}",
            id,
            pending.method,
            pending.created_at.elapsed()
        );
        let _ = pending.response_tx.send(outcome.map_err(Error::remote));
        true
    }

    /// Forget a request without completing it
    pub async fn remove(&self, id: u64) {
        self.pending.write().await.remove(&id);
    }

    /// Fail every pending request because the service went away
    pub async fn cancel_all(&self) {
        let mut pending = self.pending.write().await;
        for (id, req) in pending.drain() {
            debug!("Cancelling request #{} ({})", id, req.method);
            let _ = req.response_tx.send(Err(Error::ServiceExited));
        }
    }

    /// Get the number of pending requests
    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }
}
