use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resources::{
    ACCELERATOR_RESOURCE_KEY, AlgebraError, AlgebraResult, GPU_RESOURCE_NAME, MemorySize,
    ProcessingUnitType, Resource, ResourceAmount, ResourceKind,
};

/// Requested resources of a job vertex (or of a whole slot sharing group).
///
/// Resource specs are merged when vertices are chained or folded into a sharing group
/// and compared field-wise in this order:
/// 1. CPU cores
/// 2. Task heap memory
/// 3. Task off-heap memory
/// 4. Managed memory
/// 5. Extended resources
///
/// `Unknown` is not a zero: it is absorbed by [`ResourceSpec::merge`] and makes
/// [`ResourceSpec::subtract`] unknown as well.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ResourceSpec {
    Unknown,
    Specified(SpecifiedResources),
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpecifiedResources {
    processing_unit_type: ProcessingUnitType,
    cpu_cores: Resource,
    task_heap_memory: MemorySize,
    task_off_heap_memory: MemorySize,
    managed_memory: MemorySize,
    extended_resources: BTreeMap<String, Resource>,
}

impl Default for ResourceSpec {
    fn default() -> Self {
        ResourceSpec::zero()
    }
}

impl ResourceSpec {
    pub const UNKNOWN: ResourceSpec = ResourceSpec::Unknown;

    /// Zero amount of every resource and the `Any` processing unit type.
    pub fn zero() -> Self {
        ResourceSpec::builder(ResourceAmount::ZERO, 0).build()
    }

    pub fn builder(cpu_cores: ResourceAmount, task_heap_memory_mb: u64) -> ResourceSpecBuilder {
        ResourceSpecBuilder {
            processing_unit_type: ProcessingUnitType::Any,
            cpu_cores,
            task_heap_memory: MemorySize::of_mebi_bytes(task_heap_memory_mb),
            task_off_heap_memory: MemorySize::ZERO,
            managed_memory: MemorySize::ZERO,
            gpus: None,
            extended_resources: BTreeMap::new(),
        }
    }

    /// CPU-typed requirement of `cores` cores and no memory.
    pub fn cpu(cores: ResourceAmount) -> Self {
        ResourceSpec::builder(cores, 0)
            .processing_unit_type(ProcessingUnitType::Cpu)
            .build()
    }

    /// GPU-typed requirement of one identified accelerator.
    pub fn accelerator(identifier: &str) -> Self {
        ResourceSpec::builder(ResourceAmount::ZERO, 0)
            .processing_unit_type(ProcessingUnitType::Gpu)
            .extended_resource(ACCELERATOR_RESOURCE_KEY, Resource::accelerator(identifier))
            .build()
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, ResourceSpec::Unknown)
    }

    fn specified(&self) -> AlgebraResult<&SpecifiedResources> {
        match self {
            ResourceSpec::Unknown => Err(AlgebraError::UnknownResources),
            ResourceSpec::Specified(resources) => Ok(resources),
        }
    }

    /// `Any` for unknown specs.
    pub fn processing_unit_type(&self) -> ProcessingUnitType {
        match self {
            ResourceSpec::Unknown => ProcessingUnitType::Any,
            ResourceSpec::Specified(resources) => resources.processing_unit_type,
        }
    }

    pub fn cpu_cores(&self) -> AlgebraResult<&Resource> {
        Ok(&self.specified()?.cpu_cores)
    }

    pub fn task_heap_memory(&self) -> AlgebraResult<MemorySize> {
        Ok(self.specified()?.task_heap_memory)
    }

    pub fn task_off_heap_memory(&self) -> AlgebraResult<MemorySize> {
        Ok(self.specified()?.task_off_heap_memory)
    }

    pub fn managed_memory(&self) -> AlgebraResult<MemorySize> {
        Ok(self.specified()?.managed_memory)
    }

    pub fn gpu_resource(&self) -> AlgebraResult<Option<&Resource>> {
        Ok(self.specified()?.extended_resources.get(GPU_RESOURCE_NAME))
    }

    pub fn extended_resources(&self) -> AlgebraResult<&BTreeMap<String, Resource>> {
        Ok(&self.specified()?.extended_resources)
    }

    pub fn merge(&self, other: &ResourceSpec) -> AlgebraResult<ResourceSpec> {
        let (this, that) = match (self, other) {
            (ResourceSpec::Unknown, _) => return Ok(other.clone()),
            (_, ResourceSpec::Unknown) => return Ok(self.clone()),
            (ResourceSpec::Specified(this), ResourceSpec::Specified(that)) => (this, that),
        };

        let processing_unit_type = this
            .processing_unit_type
            .unify(that.processing_unit_type)
            .ok_or_else(|| AlgebraError::ConflictingProcessingUnitTypes {
                left: self.to_string(),
                right: other.to_string(),
            })?;

        let mut extended_resources = this.extended_resources.clone();
        for (key, resource) in &that.extended_resources {
            let merged = match extended_resources.get(key) {
                Some(existing) => existing.merge(resource)?,
                None => resource.clone(),
            };
            extended_resources.insert(key.clone(), merged);
        }

        Ok(ResourceSpec::Specified(SpecifiedResources {
            processing_unit_type,
            cpu_cores: this.cpu_cores.merge(&that.cpu_cores)?,
            task_heap_memory: this.task_heap_memory.saturating_add(that.task_heap_memory),
            task_off_heap_memory: this
                .task_off_heap_memory
                .saturating_add(that.task_off_heap_memory),
            managed_memory: this.managed_memory.saturating_add(that.managed_memory),
            extended_resources,
        }))
    }

    /// Subtracts a requirement from a capacity of the same processing unit type.
    pub fn subtract(&self, other: &ResourceSpec) -> AlgebraResult<ResourceSpec> {
        let (this, that) = match (self, other) {
            (ResourceSpec::Specified(this), ResourceSpec::Specified(that)) => (this, that),
            _ => return Ok(ResourceSpec::Unknown),
        };

        if this.processing_unit_type != that.processing_unit_type {
            return Err(AlgebraError::ProcessingUnitTypeMismatch {
                left: this.processing_unit_type,
                right: that.processing_unit_type,
            });
        }
        if !other.less_than_or_equal(self)? {
            return Err(AlgebraError::NegativeResult("resource spec".to_string()));
        }

        let mut extended_resources = this.extended_resources.clone();
        for (key, resource) in &that.extended_resources {
            let existing = extended_resources
                .get(key)
                .ok_or_else(|| AlgebraError::NegativeResult(format!("resource '{key}'")))?;
            match existing.subtract(resource)? {
                Some(remaining) => {
                    extended_resources.insert(key.clone(), remaining);
                }
                None => {
                    extended_resources.remove(key);
                }
            }
        }

        let memory_error = || AlgebraError::NegativeResult("memory size".to_string());
        Ok(ResourceSpec::Specified(SpecifiedResources {
            processing_unit_type: this.processing_unit_type,
            cpu_cores: this
                .cpu_cores
                .subtract(&that.cpu_cores)?
                .unwrap_or_else(|| Resource::cpu(ResourceAmount::ZERO)),
            task_heap_memory: this
                .task_heap_memory
                .checked_sub(that.task_heap_memory)
                .ok_or_else(memory_error)?,
            task_off_heap_memory: this
                .task_off_heap_memory
                .checked_sub(that.task_off_heap_memory)
                .ok_or_else(memory_error)?,
            managed_memory: this
                .managed_memory
                .checked_sub(that.managed_memory)
                .ok_or_else(memory_error)?,
            extended_resources,
        }))
    }

    /// Checks that every field of `self` fits into `other`.
    ///
    /// Two unknown specs are equal; an unknown and a specified spec are incomparable.
    pub fn less_than_or_equal(&self, other: &ResourceSpec) -> AlgebraResult<bool> {
        let (this, that) = match (self, other) {
            (ResourceSpec::Unknown, ResourceSpec::Unknown) => return Ok(true),
            (ResourceSpec::Specified(this), ResourceSpec::Specified(that)) => (this, that),
            _ => return Err(AlgebraError::IncomparableUnknown),
        };

        if this.cpu_cores.value() <= that.cpu_cores.value()
            && this.task_heap_memory <= that.task_heap_memory
            && this.task_off_heap_memory <= that.task_off_heap_memory
            && this.managed_memory <= that.managed_memory
        {
            Ok(this.extended_resources.iter().all(|(key, resource)| {
                that.extended_resources
                    .get(key)
                    .is_some_and(|available| available.covers(resource))
            }))
        } else {
            Ok(false)
        }
    }
}

impl std::fmt::Display for ResourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let resources = match self {
            ResourceSpec::Unknown => return write!(f, "ResourceSpec{{UNKNOWN}}"),
            ResourceSpec::Specified(resources) => resources,
        };
        write!(
            f,
            "ResourceSpec{{processingUnitType={}, cpuCores={}, taskHeapMemory={}, taskOffHeapMemory={}, managedMemory={}",
            resources.processing_unit_type,
            resources.cpu_cores.value(),
            resources.task_heap_memory,
            resources.task_off_heap_memory,
            resources.managed_memory
        )?;
        for (key, resource) in &resources.extended_resources {
            match resource.kind() {
                ResourceKind::Numeric => {
                    write!(f, ", {key}={}", resource.value())?
                }
                ResourceKind::Accelerator => {
                    write!(f, ", {key}={}", resource.name())?
                }
            }
        }
        write!(f, "}}")
    }
}

pub struct ResourceSpecBuilder {
    processing_unit_type: ProcessingUnitType,
    cpu_cores: ResourceAmount,
    task_heap_memory: MemorySize,
    task_off_heap_memory: MemorySize,
    managed_memory: MemorySize,
    gpus: Option<ResourceAmount>,
    extended_resources: BTreeMap<String, Resource>,
}

impl ResourceSpecBuilder {
    pub fn processing_unit_type(mut self, processing_unit_type: ProcessingUnitType) -> Self {
        self.processing_unit_type = processing_unit_type;
        self
    }

    pub fn cpu_cores(mut self, cpu_cores: ResourceAmount) -> Self {
        self.cpu_cores = cpu_cores;
        self
    }

    pub fn task_heap_memory(mut self, size: MemorySize) -> Self {
        self.task_heap_memory = size;
        self
    }

    pub fn task_off_heap_memory(mut self, size: MemorySize) -> Self {
        self.task_off_heap_memory = size;
        self
    }

    pub fn task_off_heap_memory_mb(self, mebi_bytes: u64) -> Self {
        self.task_off_heap_memory(MemorySize::of_mebi_bytes(mebi_bytes))
    }

    pub fn managed_memory(mut self, size: MemorySize) -> Self {
        self.managed_memory = size;
        self
    }

    pub fn managed_memory_mb(self, mebi_bytes: u64) -> Self {
        self.managed_memory(MemorySize::of_mebi_bytes(mebi_bytes))
    }

    pub fn gpus(mut self, count: ResourceAmount) -> Self {
        self.gpus = Some(count);
        self
    }

    pub fn extended_resource(mut self, key: &str, resource: Resource) -> Self {
        self.extended_resources.insert(key.to_string(), resource);
        self
    }

    pub fn build(mut self) -> ResourceSpec {
        if let Some(gpus) = self.gpus {
            self.extended_resources
                .insert(GPU_RESOURCE_NAME.to_string(), Resource::gpu(gpus));
        }
        ResourceSpec::Specified(SpecifiedResources {
            processing_unit_type: self.processing_unit_type,
            cpu_cores: Resource::cpu(self.cpu_cores),
            task_heap_memory: self.task_heap_memory,
            task_off_heap_memory: self.task_off_heap_memory,
            managed_memory: self.managed_memory,
            extended_resources: self.extended_resources,
        })
    }
}
