//! Filesystem-backed artifact store.
//!
//! Every file the service touches lives under a single root directory.
//! Artifacts are addressed by paths relative to that root; absolute paths
//! and parent-directory traversal are rejected before any filesystem access.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::bio::fasta;
use crate::{CaduceusError, Result};

/// What an artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Sequence,
    Archive,
    Delta,
    Coords,
    PairwiseMap,
    TabularExport,
}

/// How an artifact came to exist in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactOrigin {
    Uploaded,
    Downloaded,
    Derived,
}

/// A tracked file under the store root.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub rel_path: String,
    pub kind: ArtifactKind,
    pub origin: ArtifactOrigin,
}

impl Artifact {
    pub fn new(rel_path: impl Into<String>, kind: ArtifactKind, origin: ArtifactOrigin) -> Self {
        Self {
            rel_path: rel_path.into(),
            kind,
            origin,
        }
    }
}

/// Store rooted at an explicit directory. All addressing is relative to the
/// root; nothing in here consults globals or the process working directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// The root is canonicalized so that docker bind mounts and tool
    /// invocations always see absolute paths.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        fs::create_dir_all(root.as_ref())?;
        let root = fs::canonicalize(root.as_ref())?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a store-relative path to an absolute one without touching the
    /// filesystem.
    pub fn resolve(&self, rel: &str) -> Result<PathBuf> {
        validate_rel(rel)?;
        Ok(self.root.join(rel))
    }

    /// Resolve a path and require that the artifact already exists.
    pub fn require_exists(&self, rel: &str) -> Result<PathBuf> {
        let abs = self.resolve(rel)?;
        if !abs.exists() {
            return Err(CaduceusError::NotFound(rel.to_string()));
        }
        Ok(abs)
    }

    /// Express an absolute path under the root as a store-relative path.
    pub fn relativize(&self, abs: &Path) -> Result<String> {
        let rel = abs.strip_prefix(&self.root).map_err(|_| {
            CaduceusError::InvalidInput(format!("path {} is outside the store", abs.display()))
        })?;
        Ok(rel.to_string_lossy().into_owned())
    }

    /// Pick a name for a new artifact that does not collide with an existing
    /// file, appending `_1`, `_2`, ... before the extension as needed.
    ///
    /// Returns the chosen store-relative name and its absolute path.
    pub fn resolve_unique(&self, name: &str) -> Result<(String, PathBuf)> {
        validate_name(name)?;
        let chosen = unique_name(name, |candidate| self.root.join(candidate).exists());
        let abs = self.root.join(&chosen);
        Ok((chosen, abs))
    }

    /// Check that the artifact starts with a FASTA header line.
    ///
    /// Only the first line is inspected; the rest of the file is taken on
    /// faith since the downstream aligners do their own parsing. Callers that
    /// create artifacts are expected to remove them when this fails.
    pub fn validate_sequence(&self, rel: &str) -> Result<()> {
        let abs = self.require_exists(rel)?;
        let file = fs::File::open(&abs)?;
        let mut reader = BufReader::new(file);
        let mut first_line = Vec::new();
        reader.read_until(b'\n', &mut first_line)?;
        if !fasta::is_fasta_header(&first_line) {
            return Err(CaduceusError::InvalidFormat(format!(
                "{rel} does not start with a FASTA header"
            )));
        }
        Ok(())
    }

    /// Record a new artifact. The store keeps no index; this is the one
    /// place artifact provenance reaches the logs.
    pub fn track(
        &self,
        rel: impl Into<String>,
        kind: ArtifactKind,
        origin: ArtifactOrigin,
    ) -> Artifact {
        let artifact = Artifact::new(rel, kind, origin);
        tracing::debug!(
            path = %artifact.rel_path,
            kind = ?artifact.kind,
            origin = ?artifact.origin,
            "artifact recorded"
        );
        artifact
    }

    /// Remove an artifact. A file that is already gone is not an error.
    pub fn remove(&self, rel: &str) -> Result<()> {
        let abs = self.resolve(rel)?;
        match fs::remove_file(&abs) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Append `_1`, `_2`, ... before the extension until `taken` stops matching.
///
/// Pure with respect to the filesystem: the caller supplies the occupancy
/// check.
pub fn unique_name(name: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(name) {
        return name.to_string();
    }
    let (stem, ext) = split_extension(name);
    let mut counter: usize = 1;
    loop {
        let candidate = format!("{stem}_{counter}{ext}");
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Split `name.ext` into (`name`, `.ext`). Files without an extension and
/// dotfiles like `.gitignore` keep the whole name as the stem.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

fn validate_rel(rel: &str) -> Result<()> {
    if rel.trim().is_empty() {
        return Err(CaduceusError::InvalidInput(
            "empty artifact path".to_string(),
        ));
    }
    let path = Path::new(rel);
    if path.is_absolute() {
        return Err(CaduceusError::InvalidInput(format!(
            "artifact path must be relative: {rel}"
        )));
    }
    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(CaduceusError::InvalidInput(format!(
                    "artifact path must stay inside the store: {rel}"
                )));
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(CaduceusError::InvalidInput(format!(
                    "artifact path must be relative: {rel}"
                )));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CaduceusError::InvalidInput("empty file name".to_string()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CaduceusError::InvalidInput(format!(
            "file name must not contain path separators: {name}"
        )));
    }
    if name == "." || name == ".." {
        return Err(CaduceusError::InvalidInput(format!(
            "invalid file name: {name}"
        )));
    }
    Ok(())
}
