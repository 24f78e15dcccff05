use hwres::graph::JobGraph;
use hwres::{ResourceAmount, ResourceSpec, Set, VertexId};

use crate::client::schedule::{AssignedResource, ScheduledVertex};

/// Assigned resource names containing this marker request CPU cores.
pub const CPU_MARKER: &str = "vcores";
/// Assigned resource names containing this marker name a GPU.
pub const GPU_MARKER: &str = "gpu";

/// Translates an assignment into a resource requirement.
/// Returns `None` for resource kinds the client does not understand.
pub fn assignment_spec(resource: &AssignedResource) -> Option<ResourceSpec> {
    if resource.name.contains(CPU_MARKER) {
        match u32::try_from(resource.value) {
            Ok(cores) => Some(ResourceSpec::cpu(ResourceAmount::new_units(cores))),
            Err(_) => {
                log::warn!(
                    "HAIER assigned an invalid number of cores: {}",
                    resource.value
                );
                None
            }
        }
    } else if resource.name.contains(GPU_MARKER) {
        Some(ResourceSpec::accelerator(&resource.name))
    } else {
        None
    }
}

/// Applies the schedule to a copy of `graph`.
///
/// When any assignment cannot be folded into its sharing group, nothing is applied and
/// the original graph is returned.
pub fn merge_schedule(graph: JobGraph, schedule: &[ScheduledVertex]) -> JobGraph {
    let mut enriched = graph.clone();
    match apply_schedule(&mut enriched, schedule) {
        Ok(assigned) => {
            log::info!(
                "HAIER assigned resources to {assigned} of {} vertices of job {}",
                enriched.vertex_count(),
                enriched.job_id()
            );
            enriched
        }
        Err(e) => {
            log::error!(
                "Failed to merge HAIER schedule into job {}, using the job graph as built: {e}",
                graph.job_id()
            );
            graph
        }
    }
}

fn apply_schedule(graph: &mut JobGraph, schedule: &[ScheduledVertex]) -> crate::Result<usize> {
    let mut seen: Set<VertexId> = Set::default();
    let mut assigned = 0;
    for entry in schedule {
        if !seen.insert(entry.id) {
            log::warn!(
                "HAIER assigned vertex {} more than once, ignoring {}",
                entry.id,
                entry.assigned_resource.name
            );
            continue;
        }
        let Some(vertex) = graph.vertex(entry.id) else {
            log::debug!("Vertex {} is not part of the job graph", entry.id);
            continue;
        };
        let vertex_name = vertex.to_string();
        let resource = &entry.assigned_resource;
        if let Some(host) = &resource.host {
            log::debug!("Resource {} of vertex {vertex_name} lives on {host}", resource.name);
        }
        let Some(spec) = assignment_spec(resource) else {
            log::info!(
                "HAIER is requesting an unknown resource: {} for the vertex {vertex_name}",
                resource.name
            );
            continue;
        };
        graph.assign_resources(entry.id, &spec)?;
        log::info!("HAIER is requesting the resource: {spec} for the vertex {vertex_name}");
        assigned += 1;
    }
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{scheduled, shared_graph};
    use hwres::{ACCELERATOR_RESOURCE_KEY, ProcessingUnitType, Resource};

    #[test]
    fn test_assignment_spec() {
        let cpu = assignment_spec(&AssignedResource::new("vcores", 4)).unwrap();
        assert_eq!(cpu.processing_unit_type(), ProcessingUnitType::Cpu);
        assert_eq!(cpu.cpu_cores().unwrap().value(), ResourceAmount::new_units(4));

        let gpu = assignment_spec(&AssignedResource::new("yarn.io/gpu-geforcegtx1080", 1)).unwrap();
        assert_eq!(gpu.processing_unit_type(), ProcessingUnitType::Gpu);
        assert_eq!(gpu.cpu_cores().unwrap().value(), ResourceAmount::ZERO);
        assert_eq!(
            gpu.extended_resources().unwrap()[ACCELERATOR_RESOURCE_KEY],
            Resource::accelerator("yarn.io/gpu-geforcegtx1080")
        );

        assert!(assignment_spec(&AssignedResource::new("memory-mb", 1024)).is_none());
        assert!(assignment_spec(&AssignedResource::new("vcores", -1)).is_none());
    }

    #[test]
    fn test_merge_cpu_assignment() {
        let (graph, ids, group_id) = shared_graph(3);
        let enriched = merge_schedule(graph, &[scheduled(ids[1], "vcores", 4)]);

        assert_eq!(
            enriched.vertex(ids[1]).unwrap().preferred_resources(),
            &ResourceSpec::cpu(ResourceAmount::new_units(4))
        );
        assert_eq!(
            enriched.vertex(ids[0]).unwrap().preferred_resources(),
            &ResourceSpec::zero()
        );
        let group = enriched.slot_sharing_group(group_id).unwrap();
        assert_eq!(
            group.resources().cpu_cores().unwrap().value(),
            ResourceAmount::new_units(4)
        );
    }

    #[test]
    fn test_merge_unknown_kind_and_vertex() {
        let (graph, ids, group_id) = shared_graph(2);
        let enriched = merge_schedule(
            graph,
            &[
                scheduled(ids[0], "memory-mb", 2048),
                scheduled(VertexId::new(999), "vcores", 2),
            ],
        );
        assert!(enriched
            .vertices()
            .iter()
            .all(|v| v.preferred_resources() == &ResourceSpec::zero()));
        assert_eq!(
            enriched.slot_sharing_group(group_id).unwrap().resources(),
            &ResourceSpec::zero()
        );
    }

    #[test]
    fn test_merge_first_assignment_wins() {
        let (graph, ids, group_id) = shared_graph(1);
        let enriched = merge_schedule(
            graph,
            &[scheduled(ids[0], "vcores", 2), scheduled(ids[0], "vcores", 8)],
        );
        assert_eq!(
            enriched.vertex(ids[0]).unwrap().preferred_resources(),
            &ResourceSpec::cpu(ResourceAmount::new_units(2))
        );
        assert_eq!(
            enriched
                .slot_sharing_group(group_id)
                .unwrap()
                .resources()
                .cpu_cores()
                .unwrap()
                .value(),
            ResourceAmount::new_units(2)
        );
    }

    #[test]
    fn test_conflicting_assignments_keep_original() {
        let (graph, ids, group_id) = shared_graph(2);
        let enriched = merge_schedule(
            graph,
            &[
                scheduled(ids[0], "vcores", 2),
                scheduled(ids[1], "yarn.io/gpu-geforcegtx1080", 1),
            ],
        );
        assert_eq!(
            enriched.vertex(ids[0]).unwrap().preferred_resources(),
            &ResourceSpec::zero()
        );
        assert_eq!(
            enriched.slot_sharing_group(group_id).unwrap().resources(),
            &ResourceSpec::zero()
        );
    }

    #[test]
    fn test_gpu_assignments_in_separate_groups() {
        let (graph, ids) = crate::tests::utils::two_vertex_graph();
        let enriched = merge_schedule(
            graph,
            &[
                scheduled(ids[0], "yarn.io/gpu-a", 1),
                scheduled(ids[1], "yarn.io/gpu-b", 1),
            ],
        );
        for (id, name) in [(ids[0], "yarn.io/gpu-a"), (ids[1], "yarn.io/gpu-b")] {
            let vertex = enriched.vertex(id).unwrap();
            assert_eq!(vertex.preferred_resources(), &ResourceSpec::accelerator(name));
            let group = enriched
                .slot_sharing_group(vertex.slot_sharing_group_id().unwrap())
                .unwrap();
            assert_eq!(group.resources(), &ResourceSpec::accelerator(name));
        }
    }
}
