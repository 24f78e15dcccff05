use hwres::accelerator::{AcceleratorInventory, AcceleratorToken};
use hwres::{ProcessingUnitType, Resource, ResourceAmount, ResourceProfile, ResourceSpec};

/// Deterministic mix of plain and accelerator slots.
pub fn create_profiles(count: u32) -> Vec<ResourceProfile> {
    let tokens = (0..count / 4)
        .map(|i| AcceleratorToken::new(&format!("yarn.io/gpu-{i}")))
        .collect();
    let mut profiles: Vec<ResourceProfile> = (0..count - count / 4)
        .map(|i| {
            ResourceProfile::builder()
                .cpu_cores(ResourceAmount::new_units(1 + i % 16))
                .heap_memory_mb(256 * (1 + i % 8))
                .direct_memory_mb(64 * (i % 3))
                .network_memory_mb(64)
                .extended_resource("GPU", Resource::gpu(ResourceAmount::new_units(i % 3)))
                .build()
        })
        .collect();
    AcceleratorInventory::new(tokens).extend_profiles(&mut profiles);
    profiles
}

pub fn create_cpu_specs(count: u32) -> Vec<ResourceSpec> {
    (0..count)
        .map(|i| {
            ResourceSpec::builder(ResourceAmount::new(i % 4, 2500), 64)
                .processing_unit_type(ProcessingUnitType::Cpu)
                .managed_memory_mb(16)
                .gpus(ResourceAmount::new_units(i % 2))
                .build()
        })
        .collect()
}
