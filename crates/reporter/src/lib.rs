//! # Report Rendering
//!
//! Turns computed bundles and zone aggregates into the artifacts a coach sees:
//! a markdown summary for the terminal, a PNG strike-zone heatmap and the HTML
//! body of the emailed report.
//!
//! Every function here is a pure formatter over values it is handed; nothing
//! is computed from raw records.

pub mod error;
pub mod heatmap;
pub mod html;
pub mod summary;

pub use error::ReportError;
pub use heatmap::{ZoneChart, render_zone_grid};
pub use html::{EmailContext, ImageSource, escape_html, render_email_html};
pub use summary::{SubReport, format_benchmark, format_grade, format_value, render_markdown};
