use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use hwres::graph::JobGraph;

use crate::common::serialization::{read_bincode, write_bincode};

const ARTIFACT_PREFIX: &str = "jobgraph";
const ARTIFACT_SUFFIX: &str = ".bin";

/// Temporary file with a serialized job graph.
///
/// The file is removed by the first call of [`JobGraphArtifact::cleanup`] or on drop,
/// whichever comes first.
#[derive(Debug)]
pub struct JobGraphArtifact {
    path: PathBuf,
    removed: AtomicBool,
}

impl JobGraphArtifact {
    /// Serializes `graph` into a new file in `dir` (the system temp directory by default).
    pub fn write(graph: &JobGraph, dir: Option<&Path>) -> crate::Result<Self> {
        let dir = dir.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
        let file = tempfile::Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .suffix(ARTIFACT_SUFFIX)
            .tempfile_in(dir)?;
        {
            let mut writer = BufWriter::new(file.as_file());
            write_bincode(&mut writer, graph)?;
            writer.flush()?;
        }
        let (_, path) = file.keep().map_err(|e| e.error)?;
        log::debug!(
            "Job graph {} written to {}",
            graph.job_id(),
            path.display()
        );
        Ok(JobGraphArtifact {
            path,
            removed: AtomicBool::new(false),
        })
    }

    pub fn load(path: &Path) -> crate::Result<JobGraph> {
        read_bincode(BufReader::new(File::open(path)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the file. Returns true only for the call that actually deleted it; a file
    /// that is already gone is just logged.
    pub fn cleanup(&self) -> bool {
        if self.removed.swap(true, Ordering::SeqCst) {
            return false;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Removed job graph artifact {}", self.path.display());
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "Job graph artifact {} was already removed",
                    self.path.display()
                );
                false
            }
            Err(e) => {
                log::warn!(
                    "Failed to clean up job graph artifact {}: {e}",
                    self.path.display()
                );
                false
            }
        }
    }
}

impl Drop for JobGraphArtifact {
    fn drop(&mut self) {
        self.cleanup();
    }
}
