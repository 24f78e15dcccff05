use serde::Deserialize;

use hwres::accelerator::{AcceleratorToken, extract_accelerator_tokens};

/// Response of the node manager `GET /node` query. Fields not listed here are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub node_info: NodeInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    #[serde(default)]
    pub resource_types: String,
    #[serde(default)]
    pub node_host_name: Option<String>,
    #[serde(default)]
    pub node_healthy: Option<bool>,
}

impl NodeInfo {
    pub fn accelerator_tokens(&self) -> Vec<AcceleratorToken> {
        extract_accelerator_tokens(&self.resource_types)
    }
}
