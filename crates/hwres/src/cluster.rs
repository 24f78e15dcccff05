use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::accelerator::AcceleratorInventory;
use crate::resources::ResourceProfile;

/// Size of the cluster requested for a job.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(pattern = "owned")]
pub struct ClusterSpecification {
    #[builder(default = "768")]
    master_memory_mb: u32,
    #[builder(default = "1024")]
    task_manager_memory_mb: u32,
    #[builder(default = "1")]
    slots_per_task_manager: u32,
    #[builder(default)]
    use_accelerators: bool,
}

impl Default for ClusterSpecification {
    fn default() -> Self {
        ClusterSpecification {
            master_memory_mb: 768,
            task_manager_memory_mb: 1024,
            slots_per_task_manager: 1,
            use_accelerators: false,
        }
    }
}

impl ClusterSpecification {
    pub fn master_memory_mb(&self) -> u32 {
        self.master_memory_mb
    }

    pub fn task_manager_memory_mb(&self) -> u32 {
        self.task_manager_memory_mb
    }

    pub fn slots_per_task_manager(&self) -> u32 {
        self.slots_per_task_manager
    }

    pub fn use_accelerators(&self) -> bool {
        self.use_accelerators
    }

    /// Slots offered by one task manager. Every plain slot accepts any requirement;
    /// accelerator slots from `inventory` are appended only when accelerators are enabled.
    pub fn slot_profiles(&self, inventory: &AcceleratorInventory) -> Vec<ResourceProfile> {
        let mut profiles = vec![ResourceProfile::any(); self.slots_per_task_manager as usize];
        if self.use_accelerators {
            inventory.extend_profiles(&mut profiles);
        }
        profiles
    }
}

impl std::fmt::Display for ClusterSpecification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ClusterSpecification{{masterMemoryMB={}, taskManagerMemoryMB={}, slotsPerTaskManager={}, useAccelerators={}}}",
            self.master_memory_mb,
            self.task_manager_memory_mb,
            self.slots_per_task_manager,
            self.use_accelerators
        )
    }
}
