use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resources::{AlgebraResult, MemorySize, Resource, ResourceAmount, ResourceProfile};

/// Memory and CPU footprint of a task executor process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskExecutorProcessSpec {
    pub cpu_cores: ResourceAmount,
    pub framework_heap_size: MemorySize,
    pub framework_off_heap_size: MemorySize,
    pub task_heap_size: MemorySize,
    pub task_off_heap_size: MemorySize,
    pub network_mem_size: MemorySize,
    pub managed_memory_size: MemorySize,
}

impl TaskExecutorProcessSpec {
    /// Memory managed by the process itself, framework parts included.
    pub fn total_process_memory_size(&self) -> MemorySize {
        [
            self.framework_off_heap_size,
            self.task_heap_size,
            self.task_off_heap_size,
            self.network_mem_size,
            self.managed_memory_size,
        ]
        .into_iter()
        .fold(self.framework_heap_size, MemorySize::saturating_add)
    }
}

/// Resources requested for one worker container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerResourceSpec {
    cpu_cores: ResourceAmount,
    task_heap_size: MemorySize,
    task_off_heap_size: MemorySize,
    network_mem_size: MemorySize,
    managed_mem_size: MemorySize,
    extended_resources: BTreeMap<String, Resource>,
}

impl Default for WorkerResourceSpec {
    fn default() -> Self {
        WorkerResourceSpec::zero()
    }
}

impl WorkerResourceSpec {
    pub fn zero() -> Self {
        WorkerResourceSpecBuilder::default().build()
    }

    pub fn builder() -> WorkerResourceSpecBuilder {
        WorkerResourceSpecBuilder::default()
    }

    /// Framework memory is not part of the request, the worker process adds it on its own.
    pub fn from_process_spec(spec: &TaskExecutorProcessSpec) -> Self {
        WorkerResourceSpec {
            cpu_cores: spec.cpu_cores,
            task_heap_size: spec.task_heap_size,
            task_off_heap_size: spec.task_off_heap_size,
            network_mem_size: spec.network_mem_size,
            managed_mem_size: spec.managed_memory_size,
            extended_resources: BTreeMap::new(),
        }
    }

    /// Fails for an unknown profile.
    pub fn from_resource_profile(profile: &ResourceProfile) -> AlgebraResult<Self> {
        Ok(WorkerResourceSpec {
            cpu_cores: profile.cpu_cores()?,
            task_heap_size: MemorySize::of_mebi_bytes(profile.heap_memory_mb()? as u64),
            task_off_heap_size: MemorySize::of_mebi_bytes(profile.direct_memory_mb()? as u64),
            network_mem_size: MemorySize::of_mebi_bytes(profile.network_memory_mb()? as u64),
            managed_mem_size: MemorySize::of_mebi_bytes(profile.native_memory_mb()? as u64),
            extended_resources: profile.extended_resources()?.clone(),
        })
    }

    #[inline]
    pub fn cpu_cores(&self) -> ResourceAmount {
        self.cpu_cores
    }

    #[inline]
    pub fn task_heap_size(&self) -> MemorySize {
        self.task_heap_size
    }

    #[inline]
    pub fn task_off_heap_size(&self) -> MemorySize {
        self.task_off_heap_size
    }

    #[inline]
    pub fn network_mem_size(&self) -> MemorySize {
        self.network_mem_size
    }

    #[inline]
    pub fn managed_mem_size(&self) -> MemorySize {
        self.managed_mem_size
    }

    pub fn extended_resources(&self) -> &BTreeMap<String, Resource> {
        &self.extended_resources
    }
}

impl std::fmt::Display for WorkerResourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorkerResourceSpec {{cpuCores={}, taskHeapSize={}, taskOffHeapSize={}, networkMemSize={}, managedMemSize={}",
            self.cpu_cores,
            self.task_heap_size,
            self.task_off_heap_size,
            self.network_mem_size,
            self.managed_mem_size
        )?;
        for (key, resource) in &self.extended_resources {
            write!(f, ", {key}={}", resource.name())?;
        }
        write!(f, "}}")
    }
}

#[derive(Default)]
pub struct WorkerResourceSpecBuilder {
    cpu_cores: ResourceAmount,
    task_heap_size: MemorySize,
    task_off_heap_size: MemorySize,
    network_mem_size: MemorySize,
    managed_mem_size: MemorySize,
}

impl WorkerResourceSpecBuilder {
    pub fn cpu_cores(mut self, cpu_cores: ResourceAmount) -> Self {
        self.cpu_cores = cpu_cores;
        self
    }

    pub fn task_heap_memory_mb(mut self, mb: u64) -> Self {
        self.task_heap_size = MemorySize::of_mebi_bytes(mb);
        self
    }

    pub fn task_off_heap_memory_mb(mut self, mb: u64) -> Self {
        self.task_off_heap_size = MemorySize::of_mebi_bytes(mb);
        self
    }

    pub fn network_memory_mb(mut self, mb: u64) -> Self {
        self.network_mem_size = MemorySize::of_mebi_bytes(mb);
        self
    }

    pub fn managed_memory_mb(mut self, mb: u64) -> Self {
        self.managed_mem_size = MemorySize::of_mebi_bytes(mb);
        self
    }

    pub fn build(self) -> WorkerResourceSpec {
        WorkerResourceSpec {
            cpu_cores: self.cpu_cores,
            task_heap_size: self.task_heap_size,
            task_off_heap_size: self.task_off_heap_size,
            network_mem_size: self.network_mem_size,
            managed_mem_size: self.managed_mem_size,
            extended_resources: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{ACCELERATOR_RESOURCE_KEY, AlgebraError, ProcessingUnitType};
    use crate::tests::utils::resources::ProfileBuilder;

    #[test]
    fn test_zero() {
        let zero = WorkerResourceSpec::zero();
        assert_eq!(zero.cpu_cores(), ResourceAmount::ZERO);
        assert_eq!(zero.task_heap_size(), MemorySize::ZERO);
        assert!(zero.extended_resources().is_empty());
        assert_eq!(zero, WorkerResourceSpec::default());
    }

    #[test]
    fn test_from_process_spec() {
        let process = TaskExecutorProcessSpec {
            cpu_cores: 2.into(),
            framework_heap_size: MemorySize::of_mebi_bytes(128),
            framework_off_heap_size: MemorySize::of_mebi_bytes(128),
            task_heap_size: MemorySize::of_mebi_bytes(512),
            task_off_heap_size: MemorySize::of_mebi_bytes(64),
            network_mem_size: MemorySize::of_mebi_bytes(32),
            managed_memory_size: MemorySize::of_mebi_bytes(256),
        };
        let spec = WorkerResourceSpec::from_process_spec(&process);
        let expected = WorkerResourceSpec::builder()
            .cpu_cores(2.into())
            .task_heap_memory_mb(512)
            .task_off_heap_memory_mb(64)
            .network_memory_mb(32)
            .managed_memory_mb(256)
            .build();
        assert_eq!(spec, expected);
        assert_eq!(
            process.total_process_memory_size(),
            MemorySize::of_mebi_bytes(1120)
        );
    }

    #[test]
    fn test_from_resource_profile() {
        let profile = ProfileBuilder::new(2048, 100)
            .direct(10)
            .native(8192)
            .network(20)
            .unit_type(ProcessingUnitType::Gpu)
            .accelerator("yarn.io/gpu-a")
            .build();
        let spec = WorkerResourceSpec::from_resource_profile(&profile).unwrap();
        assert_eq!(spec.cpu_cores(), ResourceAmount::new_units(2048));
        assert_eq!(spec.task_heap_size(), MemorySize::of_mebi_bytes(100));
        assert_eq!(spec.task_off_heap_size(), MemorySize::of_mebi_bytes(10));
        assert_eq!(spec.managed_mem_size(), MemorySize::of_mebi_bytes(8192));
        assert_eq!(spec.network_mem_size(), MemorySize::of_mebi_bytes(20));
        assert_eq!(
            spec.extended_resources()[ACCELERATOR_RESOURCE_KEY].name(),
            "yarn.io/gpu-a"
        );
        assert!(spec.to_string().ends_with("accelerator.name=yarn.io/gpu-a}"));
    }

    #[test]
    fn test_equality_includes_extended_resources() {
        let plain = ProfileBuilder::new(1, 100).build();
        let with_gpu = ProfileBuilder::new(1, 100)
            .accelerator("yarn.io/gpu-a")
            .build();
        assert_ne!(
            WorkerResourceSpec::from_resource_profile(&plain).unwrap(),
            WorkerResourceSpec::from_resource_profile(&with_gpu).unwrap()
        );
    }

    #[test]
    fn test_from_unknown_profile() {
        assert_eq!(
            WorkerResourceSpec::from_resource_profile(&ResourceProfile::UNKNOWN),
            Err(AlgebraError::UnknownResources)
        );
    }
}
