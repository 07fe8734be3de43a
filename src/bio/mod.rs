pub mod fasta;
pub mod paf;

pub use paf::PafRecord;
