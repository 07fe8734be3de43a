use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "caduceus",
    version,
    about = "Genome analysis service over NCBI datasets, MUMmer, and minimap2",
    long_about = "Caduceus serves a small HTTP API for fetching genomes from NCBI, uploading \
                  FASTA sequences, screening them for virulence and resistance genes, and \
                  aligning genome pairs with nucmer or minimap2."
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "CADUCEUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on (overrides the configuration file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Artifact store directory (overrides the configuration file)
    #[arg(short = 'd', long)]
    pub store_dir: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
