//! Genome acquisition from NCBI via the datasets CLI.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::bio::fasta;
use crate::config::ToolsConfig;
use crate::store::{Artifact, ArtifactKind, ArtifactOrigin, ArtifactStore};
use crate::tools::{self, invoker, OutputMode};
use crate::{CaduceusError, Result};

/// Download a genome by accession, unpack it, and locate the sequence file.
///
/// The archive lands at `<accession>.zip` and unpacks under `<accession>/`,
/// overwriting whatever a previous fetch of the same accession left behind.
/// Accessions are passed to the datasets CLI as-is; an unknown accession
/// surfaces as the tool's own failure.
pub async fn fetch_genome(
    store: &ArtifactStore,
    cfg: &ToolsConfig,
    accession: &str,
) -> Result<Artifact> {
    let accession = accession.trim();
    if accession.is_empty() {
        return Err(CaduceusError::InvalidInput(
            "no NCBI accession provided".to_string(),
        ));
    }

    let zip_rel = format!("{accession}.zip");
    let zip_abs = store.resolve(&zip_rel)?;
    let unpack_abs = store.resolve(accession)?;

    invoker::run(
        tools::datasets_download(cfg, accession, &zip_abs),
        OutputMode::Discard,
    )
    .await
    .map_err(CaduceusError::DownloadFailed)?;
    store.track(zip_rel, ArtifactKind::Archive, ArtifactOrigin::Downloaded);

    invoker::run(tools::unzip(cfg, &zip_abs, &unpack_abs), OutputMode::Discard)
        .await
        .map_err(CaduceusError::DownloadFailed)?;

    let sequence = find_sequence(&unpack_abs)
        .ok_or_else(|| CaduceusError::SequenceNotFound(accession.to_string()))?;
    let rel = store.relativize(&sequence)?;
    tracing::info!(accession, path = %rel, "genome downloaded");
    Ok(store.track(rel, ArtifactKind::Sequence, ArtifactOrigin::Downloaded))
}

/// First `.fna` file under the unpacked archive, in path order.
fn find_sequence(dir: &Path) -> Option<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str())
                    == Some(fasta::GENOME_EXTENSION)
        })
        .map(|entry| entry.into_path())
}
