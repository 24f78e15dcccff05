pub mod error;
pub mod serialization;
pub mod setup;
