use std::path::Path;
use std::time::Duration;

use hwres::graph::{JobGraph, JobVertex};
use hwres::{SlotSharingGroupId, VertexId};

use crate::client::{AssignedResource, HaierClient, ScheduledVertex};
use crate::config::{HaierConfig, HaierConfigBuilder};

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `source` and `sink`, each in its own sharing group.
pub fn two_vertex_graph() -> (JobGraph, Vec<VertexId>) {
    let mut graph = JobGraph::new("two-vertices");
    let mut ids = Vec::new();
    for (i, name) in ["source", "sink"].into_iter().enumerate() {
        let vertex = JobVertex::with_id(VertexId::new(i as u128 + 1), name);
        let id = vertex.id();
        graph.add_vertex(vertex).unwrap();
        let group_id = graph.add_slot_sharing_group();
        graph.set_slot_sharing_group(id, group_id).unwrap();
        ids.push(id);
    }
    (graph, ids)
}

/// `n` vertices sharing one group.
pub fn shared_graph(n: usize) -> (JobGraph, Vec<VertexId>, SlotSharingGroupId) {
    let mut graph = JobGraph::new("shared");
    let group_id = graph.add_slot_sharing_group();
    let ids = (1..=n)
        .map(|i| {
            let vertex = JobVertex::with_id(VertexId::new(i as u128), &format!("vertex-{i}"));
            let id = vertex.id();
            graph.add_vertex(vertex).unwrap();
            graph.set_slot_sharing_group(id, group_id).unwrap();
            id
        })
        .collect();
    (graph, ids, group_id)
}

pub fn scheduled(id: VertexId, name: &str, value: i64) -> ScheduledVertex {
    ScheduledVertex {
        id,
        assigned_resource: AssignedResource::new(name, value),
    }
}

pub fn schedule_json(schedule: &[ScheduledVertex]) -> String {
    serde_json::to_string(schedule).unwrap()
}

pub fn dir_entries(path: &Path) -> usize {
    std::fs::read_dir(path).unwrap().count()
}

pub fn config(endpoint: Option<&str>, artifact_dir: &Path) -> HaierConfig {
    let mut builder = HaierConfigBuilder::default()
        .artifact_dir(artifact_dir)
        .rest_timeout(Duration::from_secs(5));
    if let Some(endpoint) = endpoint {
        builder = builder.enrich_job_graph(true).rest_url(endpoint);
    }
    builder.build().unwrap()
}

pub fn client(endpoint: Option<&str>, artifact_dir: &Path) -> HaierClient {
    HaierClient::new(&config(endpoint, artifact_dir)).unwrap()
}
