use serde::{Deserialize, Serialize};

use hwres::VertexId;

/// One entry of the scheduler response: the resource assigned to a vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledVertex {
    pub id: VertexId,
    pub assigned_resource: AssignedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedResource {
    pub name: String,
    #[serde(default)]
    pub value: i64,
    /// Machine where the resource lives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Unit of memory amounts, e.g. `Mi`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_allocation: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_allocation: Option<i64>,
}

impl AssignedResource {
    pub fn new(name: &str, value: i64) -> Self {
        AssignedResource {
            name: name.to_string(),
            value,
            host: None,
            units: None,
            minimum_allocation: None,
            maximum_allocation: None,
        }
    }
}

pub fn parse_schedule(data: &[u8]) -> crate::Result<Vec<ScheduledVertex>> {
    Ok(serde_json::from_slice(data)?)
}
