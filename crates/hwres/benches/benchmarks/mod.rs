pub mod profile;
pub mod spec;
