mod job;
mod sharing;
mod vertex;

pub use job::JobGraph;
pub use sharing::SlotSharingGroup;
pub use vertex::JobVertex;
