use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open the export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed {file} file: {reason}")]
    MalformedInput { file: &'static str, reason: String },
}
