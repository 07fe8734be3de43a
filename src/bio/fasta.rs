//! FASTA file conventions shared by the upload and acquisition paths.

/// Extensions accepted for uploaded sequence files.
pub const SEQUENCE_EXTENSIONS: &[&str] = &["fasta", "fna"];

/// Extension the NCBI datasets archive uses for genomic sequences.
pub const GENOME_EXTENSION: &str = "fna";

/// Whether a file name carries one of the accepted sequence extensions.
pub fn has_sequence_extension(name: &str) -> bool {
    SEQUENCE_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!(".{ext}")))
}

/// Whether a line looks like a FASTA header record.
pub fn is_fasta_header(line: &[u8]) -> bool {
    line.trim_ascii().starts_with(b">")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_fasta_and_fna() {
        assert!(has_sequence_extension("genome.fasta"));
        assert!(has_sequence_extension("genome.fna"));
        assert!(!has_sequence_extension("genome.txt"));
        assert!(!has_sequence_extension("genome.fa"));
        assert!(!has_sequence_extension("fasta"));
    }

    #[test]
    fn header_check_tolerates_leading_whitespace() {
        assert!(is_fasta_header(b">chr1 assembly\n"));
        assert!(is_fasta_header(b"  >chr1\r\n"));
        assert!(!is_fasta_header(b"ACGT\n"));
        assert!(!is_fasta_header(b""));
    }
}
