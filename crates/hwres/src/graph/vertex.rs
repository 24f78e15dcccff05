use serde::{Deserialize, Serialize};

use crate::common::error::DsError;
use crate::resources::ResourceSpec;
use crate::{SlotSharingGroupId, VertexId};

/// One operator (or chain of operators) of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobVertex {
    id: VertexId,
    name: String,
    parallelism: u32,
    min_resources: ResourceSpec,
    preferred_resources: ResourceSpec,
    slot_sharing_group: Option<SlotSharingGroupId>,
}

impl JobVertex {
    pub fn new(name: &str) -> Self {
        Self::with_id(VertexId::generate(), name)
    }

    pub fn with_id(id: VertexId, name: &str) -> Self {
        JobVertex {
            id,
            name: name.to_string(),
            parallelism: 1,
            min_resources: ResourceSpec::default(),
            preferred_resources: ResourceSpec::default(),
            slot_sharing_group: None,
        }
    }

    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn set_parallelism(&mut self, parallelism: u32) -> crate::Result<()> {
        if parallelism == 0 {
            return Err(DsError::GraphError(format!(
                "Parallelism of vertex {} must be at least 1",
                self.id
            )));
        }
        self.parallelism = parallelism;
        Ok(())
    }

    #[inline]
    pub fn min_resources(&self) -> &ResourceSpec {
        &self.min_resources
    }

    #[inline]
    pub fn preferred_resources(&self) -> &ResourceSpec {
        &self.preferred_resources
    }

    /// Replaces both resource requirements. `min` has to fit into `preferred`.
    pub fn set_resources(
        &mut self,
        min: ResourceSpec,
        preferred: ResourceSpec,
    ) -> crate::Result<()> {
        if !min.less_than_or_equal(&preferred)? {
            return Err(DsError::GraphError(format!(
                "Minimal resources {min} of vertex {} exceed preferred resources {preferred}",
                self.id
            )));
        }
        self.min_resources = min;
        self.preferred_resources = preferred;
        Ok(())
    }

    #[inline]
    pub fn slot_sharing_group_id(&self) -> Option<SlotSharingGroupId> {
        self.slot_sharing_group
    }

    pub(crate) fn set_slot_sharing_group_id(&mut self, group_id: Option<SlotSharingGroupId>) {
        self.slot_sharing_group = group_id;
    }
}

impl std::fmt::Display for JobVertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
