use serde::{Deserialize, Serialize};

use crate::resources::AlgebraError;

/// Class of compute hardware requested by a task or offered by a slot.
///
/// `Any` is a wildcard that unifies with every concrete type.
#[derive(
    Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum ProcessingUnitType {
    #[default]
    Any,
    Cpu,
    Gpu,
    Fpga,
    Asic,
}

impl ProcessingUnitType {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, ProcessingUnitType::Any)
    }

    /// Unifies two types for merging.
    ///
    /// Returns `None` when both types are concrete and differ.
    pub fn unify(self, other: ProcessingUnitType) -> Option<ProcessingUnitType> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (ProcessingUnitType::Any, b) => Some(b),
            (a, ProcessingUnitType::Any) => Some(a),
            _ => None,
        }
    }

    /// Whether an offer of type `self` can host a requirement of type `required`.
    pub fn is_compatible(self, required: ProcessingUnitType) -> bool {
        self == required || self.is_any() || required.is_any()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingUnitType::Any => "ANY",
            ProcessingUnitType::Cpu => "CPU",
            ProcessingUnitType::Gpu => "GPU",
            ProcessingUnitType::Fpga => "FPGA",
            ProcessingUnitType::Asic => "ASIC",
        }
    }
}

impl std::fmt::Display for ProcessingUnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProcessingUnitType {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ANY" => Ok(ProcessingUnitType::Any),
            "CPU" => Ok(ProcessingUnitType::Cpu),
            "GPU" => Ok(ProcessingUnitType::Gpu),
            "FPGA" => Ok(ProcessingUnitType::Fpga),
            "ASIC" => Ok(ProcessingUnitType::Asic),
            _ => Err(AlgebraError::UnknownProcessingUnitType(s.to_string())),
        }
    }
}
