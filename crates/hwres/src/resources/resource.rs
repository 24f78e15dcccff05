use serde::{Deserialize, Serialize};

use crate::resources::{AlgebraError, AlgebraResult, ResourceAmount};

pub const CPU_RESOURCE_NAME: &str = "CPU";
pub const GPU_RESOURCE_NAME: &str = "GPU";

/// Map key under which an accelerator identifier is stored in extended resources.
pub const ACCELERATOR_RESOURCE_KEY: &str = "accelerator.name";

/// How two amounts of the same resource are combined.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AggregateType {
    Sum,
    Max,
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Fungible quantity, e.g. CPU cores.
    Numeric,
    /// A single identified device. Never merged, only matched.
    Accelerator,
}

/// Named, typed quantity. Immutable; combined only through [`Resource::merge`] and
/// [`Resource::subtract`].
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Resource {
    name: String,
    value: ResourceAmount,
    aggregate_type: AggregateType,
    kind: ResourceKind,
}

impl Resource {
    pub fn numeric(name: &str, value: ResourceAmount, aggregate_type: AggregateType) -> Self {
        Resource {
            name: name.to_string(),
            value,
            aggregate_type,
            kind: ResourceKind::Numeric,
        }
    }

    pub fn cpu(cores: ResourceAmount) -> Self {
        Self::numeric(CPU_RESOURCE_NAME, cores, AggregateType::Sum)
    }

    pub fn gpu(count: ResourceAmount) -> Self {
        Self::numeric(GPU_RESOURCE_NAME, count, AggregateType::Sum)
    }

    /// Accelerator identified by e.g. `yarn.io/gpu-geforcegtx1080`.
    pub fn accelerator(identifier: &str) -> Self {
        Resource {
            name: identifier.to_string(),
            value: ResourceAmount::ONE,
            aggregate_type: AggregateType::Max,
            kind: ResourceKind::Accelerator,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> ResourceAmount {
        self.value
    }

    #[inline]
    pub fn aggregate_type(&self) -> AggregateType {
        self.aggregate_type
    }

    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[inline]
    pub fn is_accelerator(&self) -> bool {
        self.kind == ResourceKind::Accelerator
    }

    pub fn merge(&self, other: &Resource) -> AlgebraResult<Resource> {
        if self.is_accelerator() || other.is_accelerator() {
            return Err(AlgebraError::CannotMergeAccelerators {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }
        self.check_compatible(other)?;
        let value = match self.aggregate_type {
            AggregateType::Sum => self.value.saturating_add(other.value),
            AggregateType::Max => self.value.max(other.value),
        };
        self.create(value)
    }

    /// Returns `Ok(None)` when the result is zero and the resource should be dropped.
    pub fn subtract(&self, other: &Resource) -> AlgebraResult<Option<Resource>> {
        self.check_compatible(other)?;
        let value = self
            .value
            .checked_sub(other.value)
            .ok_or_else(|| AlgebraError::NegativeResult(format!("resource '{}'", self.name)))?;
        if value.is_zero() {
            Ok(None)
        } else {
            self.create(value).map(Some)
        }
    }

    /// Whether this offered resource satisfies the `required` one.
    pub fn covers(&self, required: &Resource) -> bool {
        self.aggregate_type == required.aggregate_type
            && self.kind == required.kind
            && (self.kind == ResourceKind::Numeric || self.name == required.name)
            && self.value >= required.value
    }

    /// Creates a resource of the same kind with a different value.
    fn create(&self, value: ResourceAmount) -> AlgebraResult<Resource> {
        match self.kind {
            ResourceKind::Numeric => Ok(Resource {
                name: self.name.clone(),
                value,
                aggregate_type: self.aggregate_type,
                kind: self.kind,
            }),
            ResourceKind::Accelerator => {
                Err(AlgebraError::AcceleratorFromValue(self.name.clone()))
            }
        }
    }

    fn check_compatible(&self, other: &Resource) -> AlgebraResult<()> {
        if self.name != other.name {
            return Err(AlgebraError::NameMismatch {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }
        if self.aggregate_type != other.aggregate_type || self.kind != other.kind {
            return Err(AlgebraError::AggregateTypeMismatch(self.name.clone()));
        }
        Ok(())
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ResourceKind::Numeric => write!(f, "{}={}", self.name, self.value),
            ResourceKind::Accelerator => write!(f, "{}", self.name),
        }
    }
}
