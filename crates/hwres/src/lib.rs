pub mod accelerator;
pub mod cluster;
pub mod common;
pub mod graph;
pub mod resources;

#[cfg(test)]
pub(crate) mod tests;

pub use crate::common::{Map, Set};
pub use crate::common::ids::{JobId, SlotSharingGroupId, VertexId};

pub type Error = common::error::DsError;
pub type Result<T> = std::result::Result<T, Error>;

pub use crate::resources::{
    ACCELERATOR_RESOURCE_KEY, AggregateType, AlgebraError, MemorySize, ProcessingUnitType,
    Resource, ResourceAmount, ResourceKind, ResourceProfile, ResourceSpec, WorkerResourceSpec,
};
