//! Sequence screening against virulence and resistance databases.

use std::fmt;

use crate::config::ToolsConfig;
use crate::store::ArtifactStore;
use crate::tools::{self, invoker, OutputMode};
use crate::Result;

/// Which screen to run against a stored sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// Virulence factors, abricate against the configured database.
    Virulence,
    /// Antimicrobial resistance genes, amrfinder in nucleotide mode.
    Resistance,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenKind::Virulence => write!(f, "virulence"),
            ScreenKind::Resistance => write!(f, "resistance"),
        }
    }
}

/// Run one screen and return the tool's report verbatim.
///
/// The report is whatever the tool printed on stdout; nothing is parsed or
/// reformatted on the way through.
pub async fn run_screen(
    store: &ArtifactStore,
    cfg: &ToolsConfig,
    kind: ScreenKind,
    rel: &str,
) -> Result<String> {
    store.require_exists(rel)?;
    let command = match kind {
        ScreenKind::Virulence => tools::abricate(cfg, store.root(), rel, &cfg.virulence_db),
        ScreenKind::Resistance => tools::amrfinder(cfg, store.root(), rel),
    };
    let report = invoker::run(command, OutputMode::Capture).await?;
    tracing::info!(%kind, file = rel, "screen completed");
    Ok(report)
}
