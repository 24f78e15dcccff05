use std::fmt;
use std::path::Path;

use hwres::graph::JobGraph;

use crate::client::artifact::JobGraphArtifact;
use crate::client::merge::merge_schedule;
use crate::client::schedule::{ScheduledVertex, parse_schedule};
use crate::client::HaierClient;
use crate::common::error::HaierError;

const FILE_PART: &str = "file";
const ARTIFACT_MIME: &str = "application/octet-stream";

/// A failed submission together with the artifact that still has to be removed.
#[derive(Debug)]
pub struct EnrichmentFailure {
    pub error: HaierError,
    pub artifact: JobGraphArtifact,
}

impl EnrichmentFailure {
    /// Removes the artifact and hands back the error.
    pub fn cleanup(self) -> HaierError {
        self.artifact.cleanup();
        self.error
    }
}

impl fmt::Display for EnrichmentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enrichment of {} failed: {}",
            self.artifact.path().display(),
            self.error
        )
    }
}

/// Uploads the artifact at `path` and parses the assignments from the response.
pub async fn request_schedule(
    http: &reqwest::Client,
    endpoint: &str,
    path: &Path,
) -> crate::Result<Vec<ScheduledVertex>> {
    let data = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let part = reqwest::multipart::Part::bytes(data)
        .file_name(file_name)
        .mime_str(ARTIFACT_MIME)?;
    let form = reqwest::multipart::Form::new().part(FILE_PART, part);

    let response = http.post(endpoint).multipart(form).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(HaierError::StatusError {
            status: status.as_u16(),
            body,
        });
    }
    let body = response.bytes().await?;
    parse_schedule(&body)
}

impl HaierClient {
    /// Submits `graph` to the scheduler and merges the returned assignments into it.
    ///
    /// Never fails: when enrichment is not configured or anything goes wrong on the way,
    /// the graph is returned as it was passed in.
    pub async fn enrich_job_graph(&self, graph: JobGraph) -> JobGraph {
        let Some(endpoint) = self.endpoint() else {
            log::debug!(
                "No HAIER endpoint configured, job {} is submitted as built",
                graph.job_id()
            );
            return graph;
        };
        let artifact = match JobGraphArtifact::write(&graph, self.artifact_dir()) {
            Ok(artifact) => artifact,
            Err(e) => {
                log::error!("Could not write job graph {}: {e}", graph.job_id());
                return graph;
            }
        };
        match self.submit(endpoint, artifact).await {
            Ok((schedule, artifact)) => {
                artifact.cleanup();
                merge_schedule(graph, &schedule)
            }
            Err(failure) => {
                log::error!("{failure}, job {} is submitted as built", graph.job_id());
                failure.cleanup();
                graph
            }
        }
    }

    /// Same as [`HaierClient::enrich_job_graph`], for callers outside of an async runtime.
    pub fn enrich_job_graph_blocking(&self, graph: JobGraph) -> JobGraph {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.enrich_job_graph(graph)),
            Err(e) => {
                log::error!("Could not start runtime for HAIER enrichment: {e}");
                graph
            }
        }
    }

    async fn submit(
        &self,
        endpoint: &str,
        artifact: JobGraphArtifact,
    ) -> Result<(Vec<ScheduledVertex>, JobGraphArtifact), EnrichmentFailure> {
        log::debug!(
            "Submitting {} to HAIER at {endpoint}",
            artifact.path().display()
        );
        match request_schedule(&self.http, endpoint, artifact.path()).await {
            Ok(schedule) => Ok((schedule, artifact)),
            Err(error) => Err(EnrichmentFailure { error, artifact }),
        }
    }
}
