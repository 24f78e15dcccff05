use std::collections::BTreeMap;

use crate::accelerator::{AcceleratorSource, AcceleratorToken};
use crate::common::format::format_comma_delimited;
use crate::resources::{ACCELERATOR_RESOURCE_KEY, Resource, ResourceAmount, ResourceProfile};

/// CPU ceiling of a slot that carries an accelerator.
pub const ACCELERATOR_SLOT_CORES: u32 = 2048;
/// Managed (native) memory ceiling of a slot that carries an accelerator.
pub const ACCELERATOR_SLOT_MANAGED_MEMORY_MB: u32 = 8192;

/// Accelerators available on a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceleratorInventory {
    tokens: Vec<AcceleratorToken>,
}

impl AcceleratorInventory {
    pub fn new(tokens: Vec<AcceleratorToken>) -> Self {
        AcceleratorInventory { tokens }
    }

    /// Queries `source`. A failed query is logged and gives an empty inventory.
    pub async fn discover<S: AcceleratorSource>(source: &S) -> Self {
        match source.discover().await {
            Ok(tokens) => {
                log::debug!(
                    "Discovered accelerators: [{}]",
                    format_comma_delimited(tokens.iter().map(AcceleratorToken::identifier))
                );
                AcceleratorInventory { tokens }
            }
            Err(e) => {
                log::error!("Could not retrieve accelerator resources: {e}");
                AcceleratorInventory::default()
            }
        }
    }

    pub fn tokens(&self) -> &[AcceleratorToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Accelerator resources keyed by their identifiers.
    pub fn extended_resources(&self) -> BTreeMap<String, Resource> {
        self.tokens
            .iter()
            .map(|token| (token.identifier().to_string(), token.to_resource()))
            .collect()
    }

    /// One slot profile per accelerator.
    pub fn profiles(&self) -> Vec<ResourceProfile> {
        self.tokens
            .iter()
            .map(|token| {
                log::info!(
                    "Added resource profile: processing unit type = {}, {ACCELERATOR_RESOURCE_KEY} = {}",
                    token.processing_unit_type(),
                    token.identifier()
                );
                ResourceProfile::builder()
                    .processing_unit_type(token.processing_unit_type())
                    .cpu_cores(ResourceAmount::new_units(ACCELERATOR_SLOT_CORES))
                    .native_memory_mb(ACCELERATOR_SLOT_MANAGED_MEMORY_MB)
                    .extended_resource(ACCELERATOR_RESOURCE_KEY, token.to_resource())
                    .build()
            })
            .collect()
    }

    pub fn extend_profiles(&self, profiles: &mut Vec<ResourceProfile>) {
        profiles.extend(self.profiles());
    }
}
