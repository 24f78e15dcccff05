use std::path::PathBuf;

use tempfile::TempDir;

use crate::client::{JobGraphArtifact, SubmissionStatus};
use crate::tests::utils::{client, init_test_logging, schedule_json, scheduled, two_vertex_graph};

#[tokio::test]
async fn test_stage_accepted() {
    init_test_logging();
    let dir = TempDir::with_prefix("haier").unwrap();
    let (graph, ids) = two_vertex_graph();
    let artifact = JobGraphArtifact::write(&graph, Some(dir.path())).unwrap();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(schedule_json(&[
            scheduled(ids[0], "vcores", 1),
            scheduled(ids[1], "yarn.io/gpu-a", 1),
        ]))
        .create_async()
        .await;

    let path = artifact.path().to_path_buf();
    let outcome = client(Some(&server.url()), dir.path())
        .stage(async move { path })
        .await;
    mock.assert_async().await;
    assert!(outcome.is_accepted());
    assert_eq!(outcome.status, SubmissionStatus::Accepted { assignments: 2 });
    assert_eq!(outcome.artifact, artifact.path());
    assert!(artifact.path().exists());
}

#[tokio::test]
async fn test_stage_failure_passes_artifact_on() {
    let dir = TempDir::with_prefix("haier").unwrap();
    let (graph, _) = two_vertex_graph();
    let artifact = JobGraphArtifact::write(&graph, Some(dir.path())).unwrap();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(503)
        .create_async()
        .await;

    let path = artifact.path().to_path_buf();
    let outcome = client(Some(&server.url()), dir.path())
        .stage(async move { path })
        .await;
    assert!(matches!(outcome.status, SubmissionStatus::Failed(_)));
    assert_eq!(outcome.artifact, artifact.path());
    assert!(artifact.path().exists());
}

#[tokio::test]
async fn test_stage_missing_artifact() {
    let dir = TempDir::with_prefix("haier").unwrap();
    let path = dir.path().join("jobgraph-missing.bin");
    let expected = path.clone();
    let outcome = client(Some("http://127.0.0.1:1/"), dir.path())
        .stage(async move { path })
        .await;
    assert!(matches!(outcome.status, SubmissionStatus::Failed(_)));
    assert_eq!(outcome.artifact, expected);
}

#[tokio::test]
async fn test_stage_skipped_without_endpoint() {
    let dir = TempDir::with_prefix("haier").unwrap();
    let outcome = client(None, dir.path())
        .stage(async { PathBuf::from("/tmp/jobgraph.bin") })
        .await;
    assert_eq!(outcome.status, SubmissionStatus::Skipped);
    assert_eq!(outcome.artifact, PathBuf::from("/tmp/jobgraph.bin"));
}

#[tokio::test]
async fn test_spawned_stage_completes_once() {
    let dir = TempDir::with_prefix("haier").unwrap();
    let (graph, ids) = two_vertex_graph();
    let artifact = JobGraphArtifact::write(&graph, Some(dir.path())).unwrap();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(schedule_json(&[scheduled(ids[0], "vcores", 2)]))
        .expect(1)
        .create_async()
        .await;

    let (sender, receiver) = tokio::sync::oneshot::channel::<PathBuf>();
    let client = client(Some(&server.url()), dir.path());
    let outcome = client.spawn_stage(async move { receiver.await.unwrap_or_default() });
    sender.send(artifact.path().to_path_buf()).unwrap();

    let outcome = outcome.await.unwrap();
    mock.assert_async().await;
    assert_eq!(outcome.status, SubmissionStatus::Accepted { assignments: 1 });
    assert_eq!(outcome.artifact, artifact.path());
}
