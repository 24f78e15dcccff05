mod inventory;
mod source;
mod token;

pub use inventory::{
    ACCELERATOR_SLOT_CORES, ACCELERATOR_SLOT_MANAGED_MEMORY_MB, AcceleratorInventory,
};
pub use source::{AcceleratorSource, InventorySource, StaticSource};
pub use token::{ACCELERATOR_NAMESPACE, AcceleratorToken, extract_accelerator_tokens};
