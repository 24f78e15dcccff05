use std::future::Future;
use std::time::Duration;

use anyhow::Context;

use crate::config::HaierConfig;
use crate::discovery::NodeStatus;
use hwres::accelerator::{AcceleratorInventory, AcceleratorSource, AcceleratorToken, InventorySource};

/// Asks the local node manager which accelerators the node offers.
#[derive(Debug, Clone)]
pub struct NodeManagerSource {
    client: reqwest::Client,
    url: String,
}

impl NodeManagerSource {
    pub fn new(url: String, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(NodeManagerSource { client, url })
    }

    pub fn from_config(config: &HaierConfig) -> crate::Result<Self> {
        Self::new(config.node_manager_url(), config.rest_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn query(&self) -> anyhow::Result<NodeStatus> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Could not send request to {}", self.url))?
            .error_for_status()?;
        response
            .json::<NodeStatus>()
            .await
            .context("Could not parse node status")
    }
}

impl AcceleratorSource for NodeManagerSource {
    fn discover(&self) -> impl Future<Output = hwres::Result<Vec<AcceleratorToken>>> + Send {
        async move {
            let status = self
                .query()
                .await
                .map_err(|e| hwres::Error::DiscoveryError(format!("{e:#}")))?;
            log::debug!(
                "Node manager {} reports resource types '{}'",
                self.url,
                status.node_info.resource_types
            );
            Ok(status.node_info.accelerator_tokens())
        }
    }
}

/// Builds the accelerator inventory of this node, honoring the configured override list.
pub async fn discover_inventory(config: &HaierConfig) -> crate::Result<AcceleratorInventory> {
    let source = InventorySource::new(
        config.accelerator_override(),
        NodeManagerSource::from_config(config)?,
    );
    Ok(AcceleratorInventory::discover(&source).await)
}
