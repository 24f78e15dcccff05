use serde::{Deserialize, Serialize};

use crate::common::error::DsError;
use crate::graph::{JobVertex, SlotSharingGroup};
use crate::resources::ResourceSpec;
use crate::{JobId, Map, SlotSharingGroupId, VertexId};

/// Vertices of a job in insertion order together with their slot sharing groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobGraph {
    job_id: JobId,
    name: String,
    vertices: Vec<JobVertex>,
    groups: Map<SlotSharingGroupId, SlotSharingGroup>,
}

impl JobGraph {
    pub fn new(name: &str) -> Self {
        Self::with_id(JobId::generate(), name)
    }

    pub fn with_id(job_id: JobId, name: &str) -> Self {
        JobGraph {
            job_id,
            name: name.to_string(),
            vertices: Vec::new(),
            groups: Map::default(),
        }
    }

    #[inline]
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_slot_sharing_group(&mut self) -> SlotSharingGroupId {
        let group = SlotSharingGroup::new(SlotSharingGroupId::generate());
        let id = group.id();
        self.groups.insert(id, group);
        id
    }

    /// Adds a vertex. If the vertex names a sharing group, its preferred resources are
    /// folded into that group.
    pub fn add_vertex(&mut self, vertex: JobVertex) -> crate::Result<()> {
        if self.vertex(vertex.id()).is_some() {
            return Err(DsError::GraphError(format!(
                "Vertex {} is already part of job {}",
                vertex.id(),
                self.job_id
            )));
        }
        if let Some(group_id) = vertex.slot_sharing_group_id() {
            self.group_mut(group_id)?
                .add_vertex_to_group(vertex.id(), vertex.preferred_resources())?;
        }
        self.vertices.push(vertex);
        Ok(())
    }

    /// Moves a vertex into a sharing group, leaving its previous group first.
    pub fn set_slot_sharing_group(
        &mut self,
        vertex_id: VertexId,
        group_id: SlotSharingGroupId,
    ) -> crate::Result<()> {
        let index = self.vertex_index(vertex_id)?;
        let spec = self.vertices[index].preferred_resources().clone();
        if !self.groups.contains_key(&group_id) {
            return Err(unknown_group(group_id));
        }
        if let Some(old_group_id) = self.vertices[index].slot_sharing_group_id() {
            self.group_mut(old_group_id)?
                .remove_vertex_from_group(vertex_id)?;
        }
        self.group_mut(group_id)?
            .add_vertex_to_group(vertex_id, &spec)?;
        self.vertices[index].set_slot_sharing_group_id(Some(group_id));
        Ok(())
    }

    pub fn vertices(&self) -> &[JobVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, vertex_id: VertexId) -> Option<&JobVertex> {
        self.vertices.iter().find(|v| v.id() == vertex_id)
    }

    pub fn slot_sharing_group(&self, group_id: SlotSharingGroupId) -> Option<&SlotSharingGroup> {
        self.groups.get(&group_id)
    }

    pub fn slot_sharing_groups(&self) -> impl Iterator<Item = &SlotSharingGroup> {
        self.groups.values()
    }

    /// Sets `spec` as both the minimal and preferred requirement of a vertex and folds it
    /// into the vertex's sharing group.
    ///
    /// The group keeps its previous accumulation, so assigning twice counts the vertex twice.
    pub fn assign_resources(&mut self, vertex_id: VertexId, spec: &ResourceSpec) -> crate::Result<()> {
        let index = self.vertex_index(vertex_id)?;
        if let Some(group_id) = self.vertices[index].slot_sharing_group_id() {
            self.group_mut(group_id)?
                .add_vertex_to_group(vertex_id, spec)?;
        }
        self.vertices[index].set_resources(spec.clone(), spec.clone())
    }

    fn vertex_index(&self, vertex_id: VertexId) -> crate::Result<usize> {
        self.vertices
            .iter()
            .position(|v| v.id() == vertex_id)
            .ok_or_else(|| DsError::GraphError(format!("Vertex {vertex_id} not found")))
    }

    fn group_mut(&mut self, group_id: SlotSharingGroupId) -> crate::Result<&mut SlotSharingGroup> {
        self.groups
            .get_mut(&group_id)
            .ok_or_else(|| unknown_group(group_id))
    }
}

fn unknown_group(group_id: SlotSharingGroupId) -> DsError {
    DsError::GraphError(format!("Slot sharing group {group_id} not found"))
}
