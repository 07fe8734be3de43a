//! Pairwise genome alignment pipelines.
//!
//! Two flavors: the MUMmer chain (nucmer, delta-filter, show-coords) for
//! precision comparison, and minimap2 for fast whole-genome alignment with
//! a CSV projection of the PAF output.

use std::path::PathBuf;

use crate::bio::paf;
use crate::config::ToolsConfig;
use crate::store::{ArtifactKind, ArtifactOrigin, ArtifactStore};
use crate::tools::{self, invoker, OutputMode};
use crate::{CaduceusError, Result};

/// Prefix nucmer writes its delta file under.
const NUCMER_PREFIX: &str = "nucmer_result";
/// Raw minimap2 output kept alongside the export.
pub const PAF_PATH: &str = "alignment.paf";
/// CSV projection served by the export endpoint.
pub const CSV_PATH: &str = "alignment.csv";

/// Both alignments take a reference and a query, in that order.
fn alignment_pair(store: &ArtifactStore, files: &[String]) -> Result<(PathBuf, PathBuf)> {
    if files.len() != 2 {
        return Err(CaduceusError::InvalidInput(format!(
            "alignment requires exactly 2 files, got {}",
            files.len()
        )));
    }
    let reference = store.require_exists(&files[0])?;
    let query = store.require_exists(&files[1])?;
    Ok((reference, query))
}

/// Run the MUMmer chain and return the human-readable coordinates.
///
/// Intermediates live at fixed store paths (`nucmer_result.delta`,
/// `nucmer_result.filtered.delta`, `nucmer_result.coords`); each run
/// overwrites the previous one. A failing stage stops the chain and
/// surfaces that stage's stderr.
pub async fn nucmer_coords(
    store: &ArtifactStore,
    cfg: &ToolsConfig,
    files: &[String],
) -> Result<String> {
    let (reference, query) = alignment_pair(store, files)?;
    let prefix = store.resolve(NUCMER_PREFIX)?;
    let delta = store.resolve(&format!("{NUCMER_PREFIX}.delta"))?;
    let filtered = store.resolve(&format!("{NUCMER_PREFIX}.filtered.delta"))?;
    let coords = store.resolve(&format!("{NUCMER_PREFIX}.coords"))?;

    invoker::run(
        tools::nucmer(cfg, &reference, &query, &prefix),
        OutputMode::Discard,
    )
    .await
    .map_err(CaduceusError::AlignmentFailed)?;
    store.track(
        format!("{NUCMER_PREFIX}.delta"),
        ArtifactKind::Delta,
        ArtifactOrigin::Derived,
    );

    invoker::run(
        tools::delta_filter(cfg, &delta),
        OutputMode::ToFile(filtered.clone()),
    )
    .await
    .map_err(CaduceusError::AlignmentFailed)?;
    store.track(
        format!("{NUCMER_PREFIX}.filtered.delta"),
        ArtifactKind::Delta,
        ArtifactOrigin::Derived,
    );

    invoker::run(
        tools::show_coords(cfg, &filtered),
        OutputMode::ToFile(coords.clone()),
    )
    .await
    .map_err(CaduceusError::AlignmentFailed)?;
    store.track(
        format!("{NUCMER_PREFIX}.coords"),
        ArtifactKind::Coords,
        ArtifactOrigin::Derived,
    );

    let report = tokio::fs::read_to_string(&coords).await?;
    tracing::info!(
        reference = files[0].as_str(),
        query = files[1].as_str(),
        "nucmer comparison finished"
    );
    Ok(report)
}

/// Align two genomes with minimap2 and refresh the CSV export.
///
/// Writes the raw PAF to `alignment.paf` and its projection to
/// `alignment.csv`, replacing earlier results. Returns the PAF text.
pub async fn whole_genome(
    store: &ArtifactStore,
    cfg: &ToolsConfig,
    files: &[String],
) -> Result<String> {
    let (reference, query) = alignment_pair(store, files)?;
    let paf_text = invoker::run(
        tools::minimap2(cfg, &reference, &query),
        OutputMode::Capture,
    )
    .await
    .map_err(CaduceusError::AlignmentFailed)?;

    let paf_abs = store.resolve(PAF_PATH)?;
    tokio::fs::write(&paf_abs, &paf_text).await?;
    store.track(PAF_PATH, ArtifactKind::PairwiseMap, ArtifactOrigin::Derived);

    let records = paf::project(&paf_text);
    let csv_abs = store.resolve(CSV_PATH)?;
    paf::write_export(&csv_abs, &records)?;
    store.track(CSV_PATH, ArtifactKind::TabularExport, ArtifactOrigin::Derived);
    tracing::info!(mappings = records.len(), "whole-genome alignment refreshed");

    Ok(paf_text)
}
