mod node_status;
mod source;

pub use node_status::{NodeInfo, NodeStatus};
pub use source::{NodeManagerSource, discover_inventory};
