pub mod client;
pub mod common;
pub mod config;
pub mod discovery;

#[cfg(test)]
mod tests;

pub use crate::client::HaierClient;
pub use crate::config::{Configuration, HaierConfig};

pub type Error = common::error::HaierError;
pub type Result<T> = std::result::Result<T, Error>;
