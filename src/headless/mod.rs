//! Headless mode - NDJSON event output for scripted calls
//!
//! `callpane --demo --call 'add(2, 3)'` runs each expression without the
//! TUI and writes one JSON object per line to stdout.
//!
//! # Example Output
//!
//! ```json
//! {"event":"interface_loaded","service":"demo","methods":10,"timestamp":1704700001000}
//! {"event":"call_completed","expression":"add(2, 3)","method":"add","call":"› add(2, 3)","result":"5","elapsed_secs":0.000112,"timestamp":1704700001002}
//! {"event":"call_rejected","expression":"nope()","error":"Unknown method: nope","timestamp":1704700001003}
//! ```

pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The method list arrived
    InterfaceLoaded {
        service: String,
        methods: usize,
        timestamp: i64,
    },

    /// The method list could not be obtained
    InterfaceFailed {
        service: String,
        error: String,
        timestamp: i64,
    },

    /// A call returned; `call` and `result` are the two console lines
    CallCompleted {
        expression: String,
        method: String,
        call: Option<String>,
        result: Option<String>,
        elapsed_secs: f64,
        timestamp: i64,
    },

    /// The service rejected the call or the transport failed
    CallFailed {
        expression: String,
        method: String,
        error: String,
        timestamp: i64,
    },

    /// The expression did not parse against the interface; nothing was sent
    CallRejected {
        expression: String,
        error: String,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // NDJSON: one object per line, flushed immediately
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn interface_loaded(service: impl Into<String>, methods: usize) -> Self {
        Self::InterfaceLoaded {
            service: service.into(),
            methods,
            timestamp: Self::now(),
        }
    }

    pub fn interface_failed(service: impl Into<String>, error: impl Into<String>) -> Self {
        Self::InterfaceFailed {
            service: service.into(),
            error: error.into(),
            timestamp: Self::now(),
        }
    }

    pub fn call_completed(
        expression: impl Into<String>,
        method: impl Into<String>,
        call: Option<String>,
        result: Option<String>,
        elapsed_secs: f64,
    ) -> Self {
        Self::CallCompleted {
            expression: expression.into(),
            method: method.into(),
            call,
            result,
            elapsed_secs,
            timestamp: Self::now(),
        }
    }

    pub fn call_failed(
        expression: impl Into<String>,
        method: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self::CallFailed {
            expression: expression.into(),
            method: method.into(),
            error: error.into(),
            timestamp: Self::now(),
        }
    }

    pub fn call_rejected(expression: impl Into<String>, error: impl Into<String>) -> Self {
        Self::CallRejected {
            expression: expression.into(),
            error: error.into(),
            timestamp: Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn to_value(event: &HeadlessEvent) -> Value {
        serde_json::to_value(event).unwrap()
    }

    #[test]
    fn test_event_tag_is_snake_case() {
        let json = to_value(&HeadlessEvent::interface_loaded("demo", 9));
        assert_eq!(json["event"], "interface_loaded");
        assert_eq!(json["service"], "demo");
        assert_eq!(json["methods"], 9);
        assert!(json["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_call_completed_carries_console_lines() {
        let event = HeadlessEvent::call_completed(
            "add(2, 3)",
            "add",
            Some("› add(2, 3)".to_string()),
            Some("5".to_string()),
            0.25,
        );
        let json = to_value(&event);

        assert_eq!(json["event"], "call_completed");
        assert_eq!(json["call"], "› add(2, 3)");
        assert_eq!(json["result"], "5");
        assert_eq!(json["elapsed_secs"], 0.25);
    }

    #[test]
    fn test_failure_events() {
        let failed = to_value(&HeadlessEvent::call_failed("fail()", "fail", "boom"));
        assert_eq!(failed["event"], "call_failed");
        assert_eq!(failed["error"], "boom");

        let rejected = to_value(&HeadlessEvent::call_rejected("nope()", "Unknown method: nope"));
        assert_eq!(rejected["event"], "call_rejected");
        assert!(rejected.get("method").is_none());
    }

    #[test]
    fn test_serializes_to_single_line() {
        let event = HeadlessEvent::call_completed(
            "echo(\"a\\nb\")",
            "echo",
            None,
            Some("\"a\nb\"".to_string()),
            0.0,
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains('\n'));
    }
}
