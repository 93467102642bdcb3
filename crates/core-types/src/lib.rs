pub mod benchmarks;
pub mod enums;
pub mod error;
pub mod metrics;
pub mod records;
pub mod zone;

// Re-export the core types to provide a clean public API.
pub use benchmarks::{
    BAT_SPEED_LEVELS, BatSpeedBenchmarks, BatSpeedOverride, BenchmarkTable, EXIT_VELOCITY_LEVELS,
    ExitVelocityBenchmarks, ExitVelocityOverride,
};
pub use enums::{Grade, MetricKind, Section, Unit, ZoneMetric, ZonePopulation};
pub use error::CoreError;
pub use metrics::{MetricEntry, MetricsBundle};
pub use records::{BattedBallRecord, SwingRecord};
pub use zone::{GRID_LAYOUT, ZoneAggregate, ZoneCode};
