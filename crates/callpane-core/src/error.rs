//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Interface Description Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid interface: {message}")]
    Interface { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Unknown method: {name}")]
    UnknownMethod { name: String },

    // ─────────────────────────────────────────────────────────────
    // Service/Transport Errors
    // ─────────────────────────────────────────────────────────────
    /// The remote side rejected the call. Displayed verbatim.
    #[error("{message}")]
    Remote { message: String },

    #[error("Service transport error: {message}")]
    Transport { message: String },

    #[error("Failed to spawn service process: {reason}")]
    ProcessSpawn { reason: String },

    #[error("Service process exited")]
    ServiceExited,

    #[error("Interface file not found: {path}")]
    InterfaceNotFound { path: PathBuf },

    #[error("No service to call. Pass --exec CMD or --demo.")]
    NoService,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn interface(message: impl Into<String>) -> Self {
        Self::Interface {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod { name: name.into() }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors are confined to a single call; the service stays
    /// usable and the next invocation may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Remote { .. }
                | Error::Decode { .. }
                | Error::Transport { .. }
                | Error::UnknownMethod { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::TerminalInit(_)
                | Error::NoService
                | Error::InterfaceNotFound { .. }
                | Error::ProcessSpawn { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_message_verbatim() {
        let err = Error::remote("boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_parse_error_includes_position() {
        let err = Error::parse(3, 14, "expected `;`");
        assert_eq!(err.to_string(), "Parse error at 3:14: expected `;`");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::NoService.is_fatal());
        assert!(Error::InterfaceNotFound {
            path: PathBuf::from("/missing.did")
        }
        .is_fatal());
        assert!(Error::TerminalInit("not a terminal".into()).is_fatal());
        assert!(!Error::remote("boom").is_fatal());
        assert!(!Error::parse(1, 1, "expected `service`").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::remote("boom").is_recoverable());
        assert!(Error::decode("expected nat").is_recoverable());
        assert!(!Error::ServiceExited.is_recoverable());
        assert!(!Error::ChannelClosed.is_recoverable());
    }

    #[test]
    fn test_result_ext_context_keeps_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("reading interface").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
