use crate::graph::{JobGraph, JobVertex};
use crate::{JobId, SlotSharingGroupId, VertexId};

/// Builds a job with vertices numbered from 1.
#[derive(Default)]
pub struct GraphBuilder {
    vertices: u32,
    shared: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(mut self, count: u32) -> Self {
        self.vertices = count;
        self
    }

    /// Put all vertices into one slot sharing group.
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    pub fn build(self) -> (JobGraph, Vec<VertexId>, Option<SlotSharingGroupId>) {
        let mut graph = JobGraph::with_id(JobId::new(1), "test-job");
        let group_id = self.shared.then(|| graph.add_slot_sharing_group());
        let ids: Vec<VertexId> = (1..=self.vertices).map(|i| VertexId::new(i as u128)).collect();
        for (i, id) in ids.iter().enumerate() {
            let mut vertex = JobVertex::with_id(*id, &format!("vertex-{}", i + 1));
            vertex.set_slot_sharing_group_id(group_id);
            graph.add_vertex(vertex).unwrap();
        }
        (graph, ids, group_id)
    }
}
