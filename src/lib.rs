pub mod api;
pub mod bio;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod store;
pub mod tools;

pub use crate::store::ArtifactStore;
pub use crate::tools::invoker::ToolError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaduceusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported file type: {0} (only .fasta and .fna are accepted)")]
    UnsupportedExtension(String),

    #[error("File does not exist: {0}")]
    NotFound(String),

    #[error("Invalid FASTA content: {0}")]
    InvalidFormat(String),

    #[error("No genome sequence found for accession {0}")]
    SequenceNotFound(String),

    #[error("Genome download failed: {0}")]
    DownloadFailed(ToolError),

    #[error("Alignment failed: {0}")]
    AlignmentFailed(ToolError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<csv::Error> for CaduceusError {
    fn from(err: csv::Error) -> Self {
        CaduceusError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CaduceusError>;
