use thiserror::Error;

use crate::resources::ProcessingUnitType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    #[error(
        "Failed to merge resource specs due to conflicting requirements. Found resource specs: {left} and {right}"
    )]
    ConflictingProcessingUnitTypes { left: String, right: String },
    #[error(
        "Resource specs must have the same processing unit type to be subtracted ({left} != {right})"
    )]
    ProcessingUnitTypeMismatch {
        left: ProcessingUnitType,
        right: ProcessingUnitType,
    },
    #[error("Cannot merge accelerator resources '{left}' and '{right}'")]
    CannotMergeAccelerators { left: String, right: String },
    #[error("Accelerator resource '{0}' cannot be created from a numeric value")]
    AcceleratorFromValue(String),
    #[error("Cannot combine resources with different names ('{left}' and '{right}')")]
    NameMismatch { left: String, right: String },
    #[error("Resource '{0}' is combined with a resource of a different aggregate type or kind")]
    AggregateTypeMismatch(String),
    #[error("Cannot subtract a larger {0} from a smaller one")]
    NegativeResult(String),
    #[error("Operation is not supported on UNKNOWN resources")]
    UnknownResources,
    #[error("Cannot compare specified resources with UNKNOWN resources")]
    IncomparableUnknown,
    #[error("Unknown processing unit type '{0}'")]
    UnknownProcessingUnitType(String),
}

pub type AlgebraResult<T> = Result<T, AlgebraError>;
