use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resources::{AlgebraResult, ResourceSpec};
use crate::{SlotSharingGroupId, VertexId};

/// Vertices that run in one slot. The group requirement is the fold of the specs its
/// members were added with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSharingGroup {
    id: SlotSharingGroupId,
    /// Every spec folded in for a member, in the order it was added.
    members: BTreeMap<VertexId, Vec<ResourceSpec>>,
    resources: ResourceSpec,
}

impl SlotSharingGroup {
    pub fn new(id: SlotSharingGroupId) -> Self {
        SlotSharingGroup {
            id,
            members: BTreeMap::new(),
            resources: ResourceSpec::zero(),
        }
    }

    #[inline]
    pub fn id(&self) -> SlotSharingGroupId {
        self.id
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.members.keys().copied()
    }

    pub fn contains(&self, vertex_id: VertexId) -> bool {
        self.members.contains_key(&vertex_id)
    }

    #[inline]
    pub fn resources(&self) -> &ResourceSpec {
        &self.resources
    }

    /// Adds the vertex and merges `spec` into the group requirement.
    /// The group is left untouched when the merge fails.
    pub fn add_vertex_to_group(
        &mut self,
        vertex_id: VertexId,
        spec: &ResourceSpec,
    ) -> AlgebraResult<()> {
        self.resources = self.resources.merge(spec)?;
        self.members
            .entry(vertex_id)
            .or_default()
            .push(spec.clone());
        Ok(())
    }

    /// Removes the vertex together with everything it contributed. The requirement is
    /// folded again from the remaining members, so the processing unit type falls back
    /// to what they need.
    pub fn remove_vertex_from_group(&mut self, vertex_id: VertexId) -> AlgebraResult<()> {
        if !self.members.contains_key(&vertex_id) {
            return Ok(());
        }
        let resources = self
            .members
            .iter()
            .filter(|(id, _)| **id != vertex_id)
            .flat_map(|(_, specs)| specs)
            .try_fold(ResourceSpec::zero(), |acc, spec| acc.merge(spec))?;
        self.members.remove(&vertex_id);
        self.resources = resources;
        Ok(())
    }
}
