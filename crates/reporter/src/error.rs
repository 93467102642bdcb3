use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to encode the zone heatmap: {0}")]
    Png(#[from] png::EncodingError),
}
