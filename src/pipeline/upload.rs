//! Sequence upload handling: gates on the declared name before any bytes
//! land, then a post-write format check that deletes rejects.

use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::bio::fasta;
use crate::store::{Artifact, ArtifactKind, ArtifactOrigin, ArtifactStore};
use crate::{CaduceusError, Result};

/// One accepted upload with its destination resolved before bytes arrive.
///
/// Created per file. The caller streams the body in chunks and then calls
/// [`PendingUpload::finish`], which checks the FASTA marker and deletes the
/// file when the check fails. Files stored earlier in a batch are unaffected
/// by a later failure.
#[derive(Debug)]
pub struct PendingUpload {
    rel: String,
    abs: PathBuf,
    file: File,
}

impl PendingUpload {
    /// Gate on the declared name and open the destination file.
    pub async fn create(store: &ArtifactStore, declared_name: &str) -> Result<Self> {
        if !fasta::has_sequence_extension(declared_name) {
            return Err(CaduceusError::UnsupportedExtension(
                declared_name.to_string(),
            ));
        }
        let (rel, abs) = store.resolve_unique(declared_name)?;
        let file = File::create(&abs).await?;
        Ok(Self { rel, abs, file })
    }

    /// Name the upload was stored under, after collision handling.
    pub fn rel_path(&self) -> &str {
        &self.rel
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.file.write_all(chunk).await?;
        Ok(())
    }

    /// Close the file and verify it starts with a FASTA header.
    ///
    /// A file that fails the check is removed before the error returns, so
    /// no invalid sequence artifact persists in the store.
    pub async fn finish(self, store: &ArtifactStore) -> Result<Artifact> {
        let PendingUpload { rel, abs, mut file } = self;
        file.flush().await?;
        drop(file);
        if let Err(err) = store.validate_sequence(&rel) {
            if let Err(rm_err) = tokio::fs::remove_file(&abs).await {
                tracing::warn!(path = %rel, error = %rm_err, "failed to remove rejected upload");
            }
            return Err(err);
        }
        Ok(store.track(rel, ArtifactKind::Sequence, ArtifactOrigin::Uploaded))
    }
}
