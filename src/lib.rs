//! Callpane Library
//!
//! A terminal console that turns a service interface into call forms.
//! This crate wires the workspace together: it picks the service the
//! flags and config describe and runs either the TUI or headless mode.

pub mod headless;

use std::path::PathBuf;
use std::sync::Arc;

use callpane_app::config::{ServiceSettings, Settings};
use callpane_core::prelude::*;
use callpane_service::{load_interface, DemoService, ServiceProcess, ServiceProxy, WithInterface};

pub use headless::runner::{run_headless, HeadlessSummary};

/// Where calls go, after merging flags with the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceOptions {
    /// Interface description file overriding the service's own list
    pub interface: Option<PathBuf>,
    /// Command to spawn, program first
    pub command: Vec<String>,
    /// Use the built-in demo service
    pub demo: bool,
}

impl ServiceOptions {
    /// Fill what the flags left unset from `[service]` in the config
    pub fn merge(mut self, settings: &ServiceSettings) -> Self {
        if self.interface.is_none() {
            self.interface = settings.interface.clone();
        }
        if self.command.is_empty() && !self.demo {
            self.command = settings.command.clone();
        }
        self
    }
}

/// Build the proxy the options describe
///
/// Must be called inside a tokio runtime when a command is spawned.
pub fn build_service(options: &ServiceOptions) -> Result<Arc<dyn ServiceProxy>> {
    let service: Arc<dyn ServiceProxy> = if options.demo {
        info!("Using the built-in demo service");
        Arc::new(DemoService::new())
    } else if !options.command.is_empty() {
        Arc::new(ServiceProcess::spawn(&options.command)?)
    } else {
        return Err(Error::NoService);
    };

    match &options.interface {
        Some(path) => {
            let interface = load_interface(path)?;
            Ok(Arc::new(WithInterface::new(interface, service)))
        }
        None => Ok(service),
    }
}

/// Process exit status for an error that ends the program
///
/// Fatal startup errors exit with 2, everything else with 1.
pub fn exit_code(err: &Error) -> i32 {
    if err.is_fatal() {
        2
    } else {
        1
    }
}

/// Run the interactive console
pub async fn run_tui(service: Arc<dyn ServiceProxy>, settings: Settings) -> Result<()> {
    let result = callpane_tui::run(service, settings).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    result
}
