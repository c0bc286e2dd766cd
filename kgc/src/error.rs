use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while reading, transforming or writing k-mer and coverage tables
pub enum Error {
    #[error("Could not read/write table data")]
    /// I/O failure on an input or output stream
    Io(#[from] std::io::Error),
    #[error("Could not parse delimited table")]
    /// Delimited table could not be read or written
    Csv(#[from] csv::Error),
    #[error("Malformed position record on line {0}: {1}")]
    /// Position table line without a read count and GC label
    MalformedPosition(usize, String),
    #[error("Malformed bias table row on line {0}: {1}")]
    /// Bias table row with a non-numeric field
    MalformedBiasRow(usize, String),
    #[error("Missing column `{0}` in {1}")]
    /// Required column absent from a table header
    MissingColumn(String, String),
    #[error("Count `{2}` for sample `{0}` and k-mer `{1}` is not a non-negative integer")]
    /// Count matrix cell that is not an integer
    MalformedCount(String, String, String),
    #[error("Row for sample `{0}` has {1} fields but the header has {2}")]
    /// Count matrix row of the wrong width
    RowLength(String, usize, usize),
    #[error("{0} sample names but {1} rows of counts")]
    /// Sample names and count rows differ in number
    RowCount(usize, usize),
    #[error("Samples {0:?} in the count matrix have no bias table")]
    /// Count matrix samples without a bias table
    MissingBiasTable(Vec<String>),
    #[error("Bias tables {0:?} have no matching sample in the count matrix")]
    /// Bias tables without a count matrix sample
    UnmatchedBiasTable(Vec<String>),
    #[error("More than one bias table for sample `{0}`")]
    /// Two bias tables resolve to the same sample name
    DuplicateBiasTable(String),
    #[error("Sample `{0}` has no covered positions, cannot compute its average coverage")]
    /// Division by zero sites when averaging coverage
    ZeroCoverage(String),
    #[error("Sample `{0}` has a zero correction factor for GC fraction {1}")]
    /// Division by a zero correction factor
    ZeroFactor(String, f64),
    #[error("GC fraction {0} does not fall in any GC bin")]
    /// GC fraction outside every bin
    NoMatchingBin(f64),
    #[error("Truncated .rep block starting on line {0}")]
    /// `.rep` report ending in the middle of a block
    TruncatedBlock(usize),
    #[error("K-mer must not be empty")]
    /// Empty k-mer where a sequence was required
    EmptyKmer,
}
