use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resources::{
    AlgebraError, AlgebraResult, MemorySize, ProcessingUnitType, Resource, ResourceAmount,
    ResourceSpec,
};

/// Resources offered by a slot.
///
/// Profiles are totally ordered so that slots can be ranked deterministically; the order
/// looks at total memory first, then cores and then extended resources.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ResourceProfile {
    Unknown,
    Specified(ProfileResources),
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProfileResources {
    processing_unit_type: ProcessingUnitType,
    cpu_cores: ResourceAmount,
    heap_memory_mb: u32,
    direct_memory_mb: u32,
    native_memory_mb: u32,
    network_memory_mb: u32,
    extended_resources: BTreeMap<String, Resource>,
}

impl ProfileResources {
    fn any_of_type(processing_unit_type: ProcessingUnitType) -> Self {
        ProfileResources {
            processing_unit_type,
            cpu_cores: ResourceAmount::MAX,
            heap_memory_mb: u32::MAX,
            direct_memory_mb: u32::MAX,
            native_memory_mb: u32::MAX,
            network_memory_mb: u32::MAX,
            extended_resources: BTreeMap::new(),
        }
    }

    fn total_memory_mb(&self) -> u64 {
        self.operators_memory_mb() + self.network_memory_mb as u64
    }

    fn operators_memory_mb(&self) -> u64 {
        self.heap_memory_mb as u64 + self.direct_memory_mb as u64 + self.native_memory_mb as u64
    }

    fn is_matching(&self, required: &ProfileResources) -> bool {
        self.cpu_cores >= required.cpu_cores
            && self.heap_memory_mb >= required.heap_memory_mb
            && self.direct_memory_mb >= required.direct_memory_mb
            && self.native_memory_mb >= required.native_memory_mb
            && self.network_memory_mb >= required.network_memory_mb
            && self
                .processing_unit_type
                .is_compatible(required.processing_unit_type)
            && required
                .extended_resources
                .iter()
                .all(|(key, resource)| {
                    self.extended_resources
                        .get(key)
                        .is_some_and(|offered| offered.covers(resource))
                })
    }
}

/// Walks both maps in key order. Keys are compared in descending order and the side
/// with more entries left is the greater one.
fn compare_extended_resources(
    this: &BTreeMap<String, Resource>,
    other: &BTreeMap<String, Resource>,
) -> Ordering {
    let mut this_iter = this.iter();
    let mut other_iter = other.iter();
    loop {
        match (this_iter.next(), other_iter.next()) {
            (Some((this_key, this_resource)), Some((other_key, other_resource))) => {
                let ord = other_key
                    .cmp(this_key)
                    .then_with(|| {
                        this_resource
                            .aggregate_type()
                            .cmp(&other_resource.aggregate_type())
                    })
                    .then_with(|| this_resource.value().cmp(&other_resource.value()))
                    .then_with(|| this_resource.cmp(other_resource));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

impl Ord for ProfileResources {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_memory_mb()
            .cmp(&other.total_memory_mb())
            .then_with(|| self.cpu_cores.cmp(&other.cpu_cores))
            .then_with(|| {
                compare_extended_resources(&self.extended_resources, &other.extended_resources)
            })
            .then_with(|| self.processing_unit_type.cmp(&other.processing_unit_type))
            .then_with(|| self.heap_memory_mb.cmp(&other.heap_memory_mb))
            .then_with(|| self.direct_memory_mb.cmp(&other.direct_memory_mb))
            .then_with(|| self.native_memory_mb.cmp(&other.native_memory_mb))
            .then_with(|| self.network_memory_mb.cmp(&other.network_memory_mb))
    }
}

impl PartialOrd for ProfileResources {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResourceProfile {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ResourceProfile::Unknown, ResourceProfile::Unknown) => Ordering::Equal,
            (ResourceProfile::Unknown, ResourceProfile::Specified(_)) => Ordering::Less,
            (ResourceProfile::Specified(_), ResourceProfile::Unknown) => Ordering::Greater,
            (ResourceProfile::Specified(this), ResourceProfile::Specified(that)) => this.cmp(that),
        }
    }
}

impl PartialOrd for ResourceProfile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ResourceProfile {
    pub const UNKNOWN: ResourceProfile = ResourceProfile::Unknown;

    /// Profile that matches every specified requirement.
    pub fn any() -> Self {
        ResourceProfile::Specified(ProfileResources::any_of_type(ProcessingUnitType::Any))
    }

    pub fn any_cpu() -> Self {
        ResourceProfile::Specified(ProfileResources::any_of_type(ProcessingUnitType::Cpu))
    }

    pub fn any_gpu() -> Self {
        ResourceProfile::Specified(ProfileResources::any_of_type(ProcessingUnitType::Gpu))
    }

    pub fn builder() -> ResourceProfileBuilder {
        ResourceProfileBuilder::default()
    }

    /// Projects a requested spec onto a slot profile. Task heap becomes heap memory,
    /// off-heap becomes direct memory and managed memory becomes native memory.
    pub fn from_resource_spec(spec: &ResourceSpec, network_memory_mb: u32) -> ResourceProfile {
        if spec.is_unknown() {
            return ResourceProfile::Unknown;
        }
        let to_mb = |size: AlgebraResult<MemorySize>| {
            size.map(|s| u32::try_from(s.mebi_bytes()).unwrap_or(u32::MAX))
                .unwrap_or_default()
        };
        ResourceProfile::Specified(ProfileResources {
            processing_unit_type: spec.processing_unit_type(),
            cpu_cores: spec
                .cpu_cores()
                .map(|r| r.value())
                .unwrap_or_default(),
            heap_memory_mb: to_mb(spec.task_heap_memory()),
            direct_memory_mb: to_mb(spec.task_off_heap_memory()),
            native_memory_mb: to_mb(spec.managed_memory()),
            network_memory_mb,
            extended_resources: spec.extended_resources().cloned().unwrap_or_default(),
        })
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, ResourceProfile::Unknown)
    }

    fn specified(&self) -> AlgebraResult<&ProfileResources> {
        match self {
            ResourceProfile::Unknown => Err(AlgebraError::UnknownResources),
            ResourceProfile::Specified(resources) => Ok(resources),
        }
    }

    pub fn processing_unit_type(&self) -> ProcessingUnitType {
        match self {
            ResourceProfile::Unknown => ProcessingUnitType::Any,
            ResourceProfile::Specified(resources) => resources.processing_unit_type,
        }
    }

    pub fn cpu_cores(&self) -> AlgebraResult<ResourceAmount> {
        Ok(self.specified()?.cpu_cores)
    }

    pub fn heap_memory_mb(&self) -> AlgebraResult<u32> {
        Ok(self.specified()?.heap_memory_mb)
    }

    pub fn direct_memory_mb(&self) -> AlgebraResult<u32> {
        Ok(self.specified()?.direct_memory_mb)
    }

    pub fn native_memory_mb(&self) -> AlgebraResult<u32> {
        Ok(self.specified()?.native_memory_mb)
    }

    pub fn network_memory_mb(&self) -> AlgebraResult<u32> {
        Ok(self.specified()?.network_memory_mb)
    }

    /// Heap, direct, native and network memory together.
    pub fn total_memory_mb(&self) -> AlgebraResult<u64> {
        Ok(self.specified()?.total_memory_mb())
    }

    /// Memory usable by operators (total memory without network buffers).
    pub fn operators_memory_mb(&self) -> AlgebraResult<u64> {
        Ok(self.specified()?.operators_memory_mb())
    }

    pub fn extended_resources(&self) -> AlgebraResult<&BTreeMap<String, Resource>> {
        Ok(&self.specified()?.extended_resources)
    }

    /// Checks whether this offered profile can host the `required` one.
    ///
    /// An unknown requirement is satisfied by anything; an unknown offer satisfies only
    /// an unknown requirement.
    pub fn is_matching(&self, required: &ResourceProfile) -> bool {
        match (self, required) {
            (_, ResourceProfile::Unknown) => true,
            (ResourceProfile::Unknown, ResourceProfile::Specified(_)) => false,
            (ResourceProfile::Specified(offered), ResourceProfile::Specified(required)) => {
                offered.is_matching(required)
            }
        }
    }
}

impl std::fmt::Display for ResourceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = match self {
            ResourceProfile::Unknown => return write!(f, "ResourceProfile{{UNKNOWN}}"),
            ResourceProfile::Specified(resources) => resources,
        };
        write!(
            f,
            "ResourceProfile{{processingUnitType={}, cpuCores={}, heapMemoryInMB={}, directMemoryInMB={}, nativeMemoryInMB={}, networkMemoryInMB={}",
            r.processing_unit_type,
            r.cpu_cores,
            r.heap_memory_mb,
            r.direct_memory_mb,
            r.native_memory_mb,
            r.network_memory_mb
        )?;
        for (key, resource) in &r.extended_resources {
            write!(f, ", {key}={resource}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Default)]
pub struct ResourceProfileBuilder {
    processing_unit_type: ProcessingUnitType,
    cpu_cores: ResourceAmount,
    heap_memory_mb: u32,
    direct_memory_mb: u32,
    native_memory_mb: u32,
    network_memory_mb: u32,
    extended_resources: BTreeMap<String, Resource>,
}

impl ResourceProfileBuilder {
    pub fn processing_unit_type(mut self, processing_unit_type: ProcessingUnitType) -> Self {
        self.processing_unit_type = processing_unit_type;
        self
    }

    pub fn cpu_cores(mut self, cpu_cores: ResourceAmount) -> Self {
        self.cpu_cores = cpu_cores;
        self
    }

    pub fn heap_memory_mb(mut self, mb: u32) -> Self {
        self.heap_memory_mb = mb;
        self
    }

    pub fn direct_memory_mb(mut self, mb: u32) -> Self {
        self.direct_memory_mb = mb;
        self
    }

    pub fn native_memory_mb(mut self, mb: u32) -> Self {
        self.native_memory_mb = mb;
        self
    }

    pub fn network_memory_mb(mut self, mb: u32) -> Self {
        self.network_memory_mb = mb;
        self
    }

    pub fn extended_resource(mut self, key: &str, resource: Resource) -> Self {
        self.extended_resources.insert(key.to_string(), resource);
        self
    }

    pub fn extended_resources<'a>(
        mut self,
        resources: impl IntoIterator<Item = (&'a String, &'a Resource)>,
    ) -> Self {
        self.extended_resources.extend(
            resources
                .into_iter()
                .map(|(key, resource)| (key.clone(), resource.clone())),
        );
        self
    }

    pub fn build(self) -> ResourceProfile {
        ResourceProfile::Specified(ProfileResources {
            processing_unit_type: self.processing_unit_type,
            cpu_cores: self.cpu_cores,
            heap_memory_mb: self.heap_memory_mb,
            direct_memory_mb: self.direct_memory_mb,
            native_memory_mb: self.native_memory_mb,
            network_memory_mb: self.network_memory_mb,
            extended_resources: self.extended_resources,
        })
    }
}
