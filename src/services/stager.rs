use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::warn;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("could not create staging file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("copy to staging file {} failed: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes incoming upload streams to a local staging directory before they
/// are relayed to object storage.
pub struct LocalStager {
    dir: PathBuf,
}

/// A file staged on local disk, owned by the request that created it.
#[derive(Debug)]
pub struct StagedFile {
    pub path: PathBuf,
    pub bytes_written: u64,
}

impl LocalStager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the staging directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Copy `reader` byte-for-byte into `<dir>/<name>` and report the length.
    /// No retry; a failed copy leaves whatever bytes were already flushed.
    pub async fn stage<R>(&self, name: &str, mut reader: R) -> Result<StagedFile, StageError>
    where
        R: AsyncRead + Unpin,
    {
        let path = self.dir.join(name);
        let mut file = File::create(&path)
            .await
            .map_err(|source| StageError::Create {
                path: path.clone(),
                source,
            })?;

        let bytes_written = tokio::io::copy(&mut reader, &mut file)
            .await
            .map_err(|source| StageError::Copy {
                path: path.clone(),
                source,
            })?;
        file.flush().await.map_err(|source| StageError::Copy {
            path: path.clone(),
            source,
        })?;

        Ok(StagedFile {
            path,
            bytes_written,
        })
    }
}

impl StagedFile {
    /// Best-effort removal. Failure is logged and never changes the outcome
    /// already determined for the request.
    pub async fn remove(self) {
        if let Err(err) = tokio::fs::remove_file(&self.path).await {
            warn!(
                "could not remove staged file {}: {}",
                self.path.display(),
                err
            );
        }
    }
}
