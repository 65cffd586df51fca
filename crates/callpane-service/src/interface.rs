//! Interface files

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::proxy::{Reply, ServiceProxy};
use callpane_core::prelude::*;
use callpane_core::{parse_interface, ServiceInterface};

/// Read and parse an interface description file
pub fn load_interface(path: &Path) -> Result<ServiceInterface> {
    if !path.exists() {
        return Err(Error::InterfaceNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let interface = parse_interface(&text).context("Invalid interface file")?;
    info!(
        "Loaded interface from {} ({} methods)",
        path.display(),
        interface.len()
    );
    Ok(interface)
}

/// A proxy whose method list comes from a file instead of the service
pub struct WithInterface {
    interface: ServiceInterface,
    inner: Arc<dyn ServiceProxy>,
}

impl WithInterface {
    pub fn new(interface: ServiceInterface, inner: Arc<dyn ServiceProxy>) -> Self {
        Self { interface, inner }
    }
}

#[async_trait]
impl ServiceProxy for WithInterface {
    async fn interface(&self) -> Result<ServiceInterface> {
        Ok(self.interface.clone())
    }

    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Reply> {
        self.inner.call(method, args).await
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}
