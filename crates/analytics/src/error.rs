use core_types::Section;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Unknown level '{level}' for {}: no benchmarks are defined for it", .section.title())]
    InvalidLevel { section: Section, level: String },

    #[error("No valid data: {0}")]
    NoValidData(String),
}
