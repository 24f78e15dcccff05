#[cfg(test)]
mod test_pipeline;

pub mod utils;
