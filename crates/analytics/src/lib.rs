//! # Swing Metrics Engine
//!
//! This crate computes the descriptive statistics of a player's swing data and
//! grades them against per-level benchmarks. It is the "judge" of the report.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of files, rendering or email.
//!   It depends only on `core-types`.
//! - **Stateless Calculation:** The `MetricsEngine` only owns the benchmark table.
//!   It takes parsed records as input and returns a `MetricsBundle` or a
//!   `ZoneAggregate`. Nothing is stashed between calls.
//!
//! ## Public API
//!
//! - `MetricsEngine`: computes the bat-speed and exit-velocity bundles and the zone aggregate.
//! - `GradingRule`: the three grading policies.
//! - `stats`: mean and linearly interpolated quantile helpers.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod grading;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{BAT_SPEED_TOP_QUANTILE, EXIT_VELOCITY_TOP_QUANTILE, MetricsEngine};
pub use error::AnalyticsError;
pub use grading::GradingRule;
