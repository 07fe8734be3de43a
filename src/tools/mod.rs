//! Command lines for the external bioinformatics tools.
//!
//! Builders return a [`ToolCommand`] that the invoker executes; nothing in
//! this module touches the filesystem or spawns processes. The screening
//! tools can run either through docker, bind-mounting the store at `/data`,
//! or as native binaries, controlled by `ToolsConfig::docker_screening`.

pub mod invoker;

use std::ffi::OsString;
use std::path::Path;

use crate::config::ToolsConfig;

pub use invoker::{run, OutputMode, ToolError};

/// Mount point for the artifact store inside screening containers.
const DATA_MOUNT: &str = "/data";

/// A fully assembled external command, ready to execute.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    /// Stable display name used in error messages.
    pub tool: &'static str,
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    fn new(tool: &'static str, program: impl Into<OsString>) -> Self {
        Self {
            tool,
            program: program.into(),
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// `datasets download genome accession <acc> --filename <zip>`
pub fn datasets_download(cfg: &ToolsConfig, accession: &str, zip: &Path) -> ToolCommand {
    ToolCommand::new("datasets", &cfg.bin.datasets)
        .arg("download")
        .arg("genome")
        .arg("accession")
        .arg(accession)
        .arg("--filename")
        .arg(zip)
}

/// `unzip -o <zip> -d <dest>`
pub fn unzip(cfg: &ToolsConfig, zip: &Path, dest: &Path) -> ToolCommand {
    ToolCommand::new("unzip", &cfg.bin.unzip)
        .arg("-o")
        .arg(zip)
        .arg("-d")
        .arg(dest)
}

/// Virulence screen of one stored sequence via abricate.
pub fn abricate(cfg: &ToolsConfig, store_root: &Path, rel: &str, db: &str) -> ToolCommand {
    if cfg.docker_screening {
        docker_run(cfg, "abricate", &cfg.abricate_image, store_root)
            .arg("abricate")
            .arg("--db")
            .arg(db)
            .arg(data_path(rel))
    } else {
        ToolCommand::new("abricate", &cfg.bin.abricate)
            .arg("--db")
            .arg(db)
            .arg(store_root.join(rel))
    }
}

/// Resistance screen of one stored sequence via amrfinder (`-n` nucleotide).
pub fn amrfinder(cfg: &ToolsConfig, store_root: &Path, rel: &str) -> ToolCommand {
    if cfg.docker_screening {
        docker_run(cfg, "amrfinder", &cfg.amrfinder_image, store_root)
            .arg("amrfinder")
            .arg("-n")
            .arg(data_path(rel))
    } else {
        ToolCommand::new("amrfinder", &cfg.bin.amrfinder)
            .arg("-n")
            .arg(store_root.join(rel))
    }
}

/// `nucmer --maxmatch <ref> <query> -p <prefix>`
pub fn nucmer(cfg: &ToolsConfig, reference: &Path, query: &Path, prefix: &Path) -> ToolCommand {
    ToolCommand::new("nucmer", &cfg.bin.nucmer)
        .arg("--maxmatch")
        .arg(reference)
        .arg(query)
        .arg("-p")
        .arg(prefix)
}

/// `delta-filter -1 <delta>`, best one-to-one mappings on stdout.
pub fn delta_filter(cfg: &ToolsConfig, delta: &Path) -> ToolCommand {
    ToolCommand::new("delta-filter", &cfg.bin.delta_filter)
        .arg("-1")
        .arg(delta)
}

/// `show-coords -rcl <delta>`, human-readable coordinates on stdout.
pub fn show_coords(cfg: &ToolsConfig, delta: &Path) -> ToolCommand {
    ToolCommand::new("show-coords", &cfg.bin.show_coords)
        .arg("-rcl")
        .arg(delta)
}

/// `minimap2 -x asm5 <ref> <query>`, PAF mappings on stdout.
pub fn minimap2(cfg: &ToolsConfig, reference: &Path, query: &Path) -> ToolCommand {
    ToolCommand::new("minimap2", &cfg.bin.minimap2)
        .arg("-x")
        .arg("asm5")
        .arg(reference)
        .arg(query)
}

fn docker_run(
    cfg: &ToolsConfig,
    tool: &'static str,
    image: &str,
    store_root: &Path,
) -> ToolCommand {
    let mut mount = OsString::from(store_root);
    mount.push(":");
    mount.push(DATA_MOUNT);
    ToolCommand::new(tool, &cfg.bin.docker)
        .arg("run")
        .arg("--rm")
        .arg("-v")
        .arg(mount)
        .arg(image)
}

fn data_path(rel: &str) -> String {
    format!("{DATA_MOUNT}/{rel}")
}
