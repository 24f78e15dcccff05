use std::future::Future;
use std::path::PathBuf;

use tokio::sync::oneshot;

use crate::client::HaierClient;
use crate::client::enrich::request_schedule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// The scheduler answered with this many assignments.
    Accepted { assignments: usize },
    /// Enrichment is not configured.
    Skipped,
    Failed(String),
}

/// Result of the pipeline stage. The artifact path is always handed on, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub artifact: PathBuf,
    pub status: SubmissionStatus,
}

impl PipelineOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self.status, SubmissionStatus::Accepted { .. })
    }
}

impl HaierClient {
    /// Waits for the artifact and submits it to the scheduler.
    ///
    /// Only the success of the submission is recorded; the artifact is neither merged nor
    /// removed, it belongs to the downstream stages.
    pub async fn stage<F: Future<Output = PathBuf>>(&self, artifact: F) -> PipelineOutcome {
        let artifact = artifact.await;
        let Some(endpoint) = self.endpoint() else {
            log::debug!(
                "No HAIER endpoint configured, passing {} on",
                artifact.display()
            );
            return PipelineOutcome {
                artifact,
                status: SubmissionStatus::Skipped,
            };
        };
        let status = match request_schedule(&self.http, endpoint, &artifact).await {
            Ok(schedule) => {
                log::info!(
                    "HAIER accepted {} with {} assignments",
                    artifact.display(),
                    schedule.len()
                );
                SubmissionStatus::Accepted {
                    assignments: schedule.len(),
                }
            }
            Err(e) => {
                log::error!(
                    "HAIER submission of {} failed, continuing without enrichment: {e}",
                    artifact.display()
                );
                SubmissionStatus::Failed(e.to_string())
            }
        };
        PipelineOutcome { artifact, status }
    }

    /// Runs [`HaierClient::stage`] as a tokio task. The outcome is delivered exactly once.
    pub fn spawn_stage<F>(&self, artifact: F) -> oneshot::Receiver<PipelineOutcome>
    where
        F: Future<Output = PathBuf> + Send + 'static,
    {
        let client = self.clone();
        let (sender, receiver) = oneshot::channel();
        tokio::spawn(async move {
            let outcome = client.stage(artifact).await;
            if sender.send(outcome).is_err() {
                log::debug!("Receiver of the HAIER stage outcome was dropped");
            }
        });
        receiver
    }
}
