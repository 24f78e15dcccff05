use serde::{Deserialize, Serialize};

use crate::resources::{ProcessingUnitType, Resource};

/// Namespace of resource types that name an accelerator.
pub const ACCELERATOR_NAMESPACE: &str = "yarn.io/";
const GPU_PREFIX: &str = "yarn.io/gpu-";
const FPGA_PREFIX: &str = "yarn.io/fpga-";

/// Accelerator identifier reported by a node, e.g. `yarn.io/gpu-geforcegtx1080`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AcceleratorToken {
    identifier: String,
    processing_unit_type: ProcessingUnitType,
}

impl AcceleratorToken {
    pub fn new(identifier: &str) -> Self {
        let processing_unit_type = if identifier.starts_with(GPU_PREFIX) {
            ProcessingUnitType::Gpu
        } else if identifier.starts_with(FPGA_PREFIX) {
            ProcessingUnitType::Fpga
        } else {
            ProcessingUnitType::Any
        };
        AcceleratorToken {
            identifier: identifier.to_string(),
            processing_unit_type,
        }
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn processing_unit_type(&self) -> ProcessingUnitType {
        self.processing_unit_type
    }

    pub fn to_resource(&self) -> Resource {
        Resource::accelerator(&self.identifier)
    }
}

impl std::fmt::Display for AcceleratorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Extracts accelerator tokens from a resource type listing such as
/// `"yarn.io/gpu-geforcegtx1080, memory-mb (unit=Mi), vcores"`.
pub fn extract_accelerator_tokens(resource_types: &str) -> Vec<AcceleratorToken> {
    resource_types
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| token.starts_with(ACCELERATOR_NAMESPACE))
        .map(AcceleratorToken::new)
        .collect()
}
