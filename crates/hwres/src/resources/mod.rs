mod amount;
mod error;
mod memory;
mod processing;
mod profile;
mod resource;
mod spec;
mod worker;

pub use amount::{
    FRACTIONS_MAX_DIGITS, FRACTIONS_PER_UNIT, ResourceAmount, ResourceFractions, ResourceUnits,
};
pub use error::{AlgebraError, AlgebraResult};
pub use memory::MemorySize;
pub use processing::ProcessingUnitType;
pub use profile::{ResourceProfile, ResourceProfileBuilder};
pub use resource::{
    ACCELERATOR_RESOURCE_KEY, AggregateType, CPU_RESOURCE_NAME, GPU_RESOURCE_NAME, Resource,
    ResourceKind,
};
pub use spec::{ResourceSpec, ResourceSpecBuilder};
pub use worker::{TaskExecutorProcessSpec, WorkerResourceSpec, WorkerResourceSpecBuilder};
