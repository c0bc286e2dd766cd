use thiserror::Error;

#[derive(Debug, Error)]
/// Errors of which majority are related to I/O issues or incorrect file format errors
pub enum Error {
    #[error(transparent)]
    /// Parsing or correction error
    TableError(#[from] kgc::Error),
    #[error("Could not read/write file")]
    /// I/O failure
    IoError(#[from] std::io::Error),
    #[error("Could not open input file")]
    /// Could not detect compression or open the input
    InputError(#[from] niffler::Error),
    #[error("Could not list bias table folder")]
    /// Directory traversal error
    WalkError(#[from] walkdir::Error),
    #[error("FileNotFound: {0}")]
    /// Input path does not exist
    FileNotFound(String),
    #[error("Bias table folder {0} is not a directory")]
    /// Bias folder argument is not a directory
    NotADirectory(String),
    #[error("No bias tables found in {0}")]
    /// Bias folder without any table
    NoBiasTables(String),
    #[error("Could not read bias table {0}: {1}")]
    /// Error in a specific bias table
    BiasTableError(String, #[source] kgc::Error),
    #[error("Could not spawn threads")]
    /// Create thread pools erorr
    ThreadError,
}
