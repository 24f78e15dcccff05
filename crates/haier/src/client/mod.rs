use std::path::{Path, PathBuf};

use crate::config::HaierConfig;

mod artifact;
mod enrich;
mod merge;
mod pipeline;
mod schedule;

pub use artifact::JobGraphArtifact;
pub use enrich::{EnrichmentFailure, request_schedule};
pub use merge::{CPU_MARKER, GPU_MARKER, assignment_spec, merge_schedule};
pub use pipeline::{PipelineOutcome, SubmissionStatus};
pub use schedule::{AssignedResource, ScheduledVertex, parse_schedule};

/// Client of the HAIER scheduler.
///
/// Without a configured endpoint every operation is a passthrough.
#[derive(Debug, Clone)]
pub struct HaierClient {
    endpoint: Option<String>,
    http: reqwest::Client,
    artifact_dir: Option<PathBuf>,
}

impl HaierClient {
    pub fn new(config: &HaierConfig) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.rest_timeout())
            .build()?;
        let endpoint = config.enrichment_endpoint().map(str::to_string);
        match &endpoint {
            Some(url) => log::debug!("HAIER enrichment enabled, endpoint {url}"),
            None => log::debug!("HAIER enrichment is not configured"),
        }
        Ok(HaierClient {
            endpoint,
            http,
            artifact_dir: config.artifact_dir().map(Path::to_path_buf),
        })
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn artifact_dir(&self) -> Option<&Path> {
        self.artifact_dir.as_deref()
    }
}
