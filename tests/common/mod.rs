//! Common test utilities: temporary stores and stubbed external tools.
//!
//! The external tools are replaced by small shell scripts written into a
//! per-test bin directory, so the pipelines run end to end without NCBI
//! access, docker, or any aligner installed.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

use caduceus::api::AppState;
use caduceus::config::Config;
use caduceus::ArtifactStore;

/// Test environment that manages a store root, a stub tool directory, and
/// the configuration tying them together.
pub struct TestEnvironment {
    temp_dir: TempDir,
    pub store: ArtifactStore,
    pub config: Config,
}

impl TestEnvironment {
    /// Create a new environment with docker screening switched off, so the
    /// screening stubs run as plain binaries.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store_root = temp_dir.path().join("store");
        let store = ArtifactStore::open(&store_root).expect("Failed to open store");

        let mut config = Config::default();
        config.store.root = store.root().to_path_buf();
        config.tools.docker_screening = false;
        TestEnvironment {
            temp_dir,
            store,
            config,
        }
    }

    /// Install a stub tool: a shell script running `body` with the original
    /// arguments. Returns the program path to put into the configuration.
    pub fn stub_tool(&self, name: &str, body: &str) -> String {
        let dir = self.temp_dir.path().join("bin");
        fs::create_dir_all(&dir).expect("Failed to create bin dir");
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write stub tool");
        let mut perms = fs::metadata(&path)
            .expect("Failed to stat stub tool")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to chmod stub tool");
        path.to_string_lossy().into_owned()
    }

    /// Write a file with the given content directly into the store root.
    pub fn seed_file(&self, name: &str, content: &str) -> String {
        let path = self.store.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to seed file");
        name.to_string()
    }

    /// Write a minimal valid FASTA file into the store root.
    pub fn seed_fasta(&self, name: &str) -> String {
        self.seed_file(name, ">chr1 seeded\nACGTACGTACGT\n")
    }

    pub fn store_path(&self, rel: &str) -> PathBuf {
        self.store.root().join(rel)
    }

    /// Build the application state from the current configuration. Call
    /// after all stub tools are wired in.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.store.clone(), self.config.clone())
    }
}

/// What the stubbed minimap2 prints: two well-formed PAF lines around one
/// line of garbage.
pub const PAF_STDOUT: &str = "ctg1\t1000\t0\t900\t+\tchr1\t5000\t100\t1000\t850\t900\t60\ttp:A:P\ngarbage line\nctg2\t800\t10\t790\t-\tchr1\t5000\t2000\t2780\t700\t780\t55\n";

/// Stub `datasets` (creates the requested archive) and `unzip` (unpacks a
/// dataset layout with one `.fna` inside).
pub fn wire_acquisition(env: &mut TestEnvironment) {
    env.config.tools.bin.datasets = env.stub_tool(
        "datasets",
        r#"for last; do :; done
: > "$last""#,
    );
    env.config.tools.bin.unzip = env.stub_tool(
        "unzip",
        r#"for last; do :; done
mkdir -p "$last/ncbi_dataset/data"
printf '>chr1 stub genome\nACGTACGT\n' > "$last/ncbi_dataset/data/genomic.fna""#,
    );
}

/// Stub the MUMmer chain: nucmer writes a delta next to its prefix, the two
/// filters prepend a marker and echo their input.
pub fn wire_nucmer_chain(env: &mut TestEnvironment) {
    env.config.tools.bin.nucmer = env.stub_tool(
        "nucmer",
        r#"for last; do :; done
printf 'NUCMER\ndelta payload\n' > "$last.delta""#,
    );
    env.config.tools.bin.delta_filter = env.stub_tool(
        "delta-filter",
        r#"echo 'FILTERED'
cat "$2""#,
    );
    env.config.tools.bin.show_coords = env.stub_tool(
        "show-coords",
        r#"echo 'COORDS HEADER'
cat "$2""#,
    );
}

/// Fixed screening report for pass-through checks: embedded tabs, a blank
/// line, and trailing whitespace that must all survive untouched.
pub const SCREEN_REPORT: &str =
    "#FILE\tSEQUENCE\tSTART\tEND\tGENE\nsample.fasta\tcontig_1\t610\t1824\tfimA \n\nreport complete\t\n";

/// Stub both screening tools to print [`SCREEN_REPORT`].
pub fn wire_screen_report(env: &mut TestEnvironment) {
    let body = r#"printf '#FILE\tSEQUENCE\tSTART\tEND\tGENE\n'
printf 'sample.fasta\tcontig_1\t610\t1824\tfimA \n'
printf '\n'
printf 'report complete\t\n'"#;
    env.config.tools.bin.abricate = env.stub_tool("abricate", body);
    env.config.tools.bin.amrfinder = env.stub_tool("amrfinder", body);
}

/// Stub minimap2 to print [`PAF_STDOUT`].
pub fn wire_minimap2(env: &mut TestEnvironment) {
    env.config.tools.bin.minimap2 = env.stub_tool(
        "minimap2",
        r#"printf 'ctg1\t1000\t0\t900\t+\tchr1\t5000\t100\t1000\t850\t900\t60\ttp:A:P\n'
printf 'garbage line\n'
printf 'ctg2\t800\t10\t790\t-\tchr1\t5000\t2000\t2780\t700\t780\t55\n'"#,
    );
}

/// Assemble a multipart/form-data body with one part per (filename, content)
/// pair, the way a browser submits a file picker.
pub fn multipart_body(boundary: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, content) in files {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
