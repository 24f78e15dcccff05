use crate::resources::{
    ACCELERATOR_RESOURCE_KEY, ProcessingUnitType, Resource, ResourceAmount, ResourceProfile,
    ResourceProfileBuilder, ResourceSpec, ResourceUnits,
};

pub fn spec(cores: ResourceUnits, heap_mb: u64) -> ResourceSpec {
    ResourceSpec::builder(ResourceAmount::new_units(cores), heap_mb).build()
}

pub fn cpu_spec(cores: ResourceUnits) -> ResourceSpec {
    ResourceSpec::cpu(ResourceAmount::new_units(cores))
}

pub fn gpu_spec(identifier: &str) -> ResourceSpec {
    ResourceSpec::accelerator(identifier)
}

pub struct ProfileBuilder {
    inner: ResourceProfileBuilder,
}

impl ProfileBuilder {
    pub fn new(cores: ResourceUnits, heap_mb: u32) -> Self {
        ProfileBuilder {
            inner: ResourceProfile::builder()
                .cpu_cores(ResourceAmount::new_units(cores))
                .heap_memory_mb(heap_mb),
        }
    }

    pub fn direct(mut self, mb: u32) -> Self {
        self.inner = self.inner.direct_memory_mb(mb);
        self
    }

    pub fn native(mut self, mb: u32) -> Self {
        self.inner = self.inner.native_memory_mb(mb);
        self
    }

    pub fn network(mut self, mb: u32) -> Self {
        self.inner = self.inner.network_memory_mb(mb);
        self
    }

    pub fn unit_type(mut self, processing_unit_type: ProcessingUnitType) -> Self {
        self.inner = self.inner.processing_unit_type(processing_unit_type);
        self
    }

    pub fn extended(mut self, key: &str, resource: Resource) -> Self {
        self.inner = self.inner.extended_resource(key, resource);
        self
    }

    pub fn accelerator(self, identifier: &str) -> Self {
        self.extended(ACCELERATOR_RESOURCE_KEY, Resource::accelerator(identifier))
    }

    pub fn build(self) -> ResourceProfile {
        self.inner.build()
    }
}
