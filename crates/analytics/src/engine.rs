use crate::error::AnalyticsError;
use crate::grading::GradingRule;
use crate::stats::{mean, quantile};
use core_types::{
    BattedBallRecord, BatSpeedBenchmarks, BenchmarkTable, ExitVelocityBenchmarks, MetricEntry,
    MetricKind, MetricsBundle, Section, SwingRecord, ZoneAggregate, ZoneCode, ZoneMetric,
    ZonePopulation,
};
use std::collections::BTreeMap;

/// Quantile marking the fastest 10% of swings.
pub const BAT_SPEED_TOP_QUANTILE: f64 = 0.90;

/// Quantile marking the hardest-hit 8% of balls.
pub const EXIT_VELOCITY_TOP_QUANTILE: f64 = 0.92;

/// A stateless calculator for deriving graded swing metrics from sensor records.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    benchmarks: BenchmarkTable,
}

impl MetricsEngine {
    pub fn new(benchmarks: BenchmarkTable) -> Self {
        Self { benchmarks }
    }

    /// Computes the bat-speed bundle.
    ///
    /// # Arguments
    ///
    /// * `rows` - Swings that follow the export's metadata header.
    /// * `level` - A bat-speed level key of the benchmark table.
    ///
    /// # Returns
    ///
    /// A bundle with four graded entries. An empty population yields NaN
    /// values without grades rather than an error.
    pub fn compute_bat_speed_metrics(
        &self,
        rows: &[SwingRecord],
        level: &str,
    ) -> Result<MetricsBundle, AnalyticsError> {
        let benchmarks = self.bat_speed_benchmarks(level)?;

        let bat_speeds: Vec<f64> = rows.iter().filter_map(|r| r.bat_speed).collect();
        let avg_bat_speed = mean(&bat_speeds);
        let top10_bat_speed = quantile(&bat_speeds, BAT_SPEED_TOP_QUANTILE);

        // Only the fastest swings contribute to the attack angle average.
        let top_attack_angles: Vec<f64> = rows
            .iter()
            .filter(|r| r.bat_speed.is_some_and(|speed| speed >= top10_bat_speed))
            .filter_map(|r| r.attack_angle)
            .collect();
        let attack_angle_top10 = mean(&top_attack_angles);

        let times: Vec<f64> = rows.iter().filter_map(|r| r.time_to_contact).collect();
        let avg_time_to_contact = mean(&times);

        tracing::debug!(
            level,
            swings = bat_speeds.len(),
            top10_bat_speed,
            "Computed bat-speed statistics."
        );

        let mut bundle = MetricsBundle::new(Section::BatSpeed, level, bat_speeds.len());
        bundle.push(graded(
            MetricKind::AvgBatSpeed,
            avg_bat_speed,
            benchmarks.avg_bat_speed,
            GradingRule::HigherIsBetter,
        ));
        bundle.push(graded(
            MetricKind::Top10BatSpeed,
            top10_bat_speed,
            benchmarks.top10_bat_speed,
            GradingRule::HigherIsBetter,
        ));
        bundle.push(graded(
            MetricKind::AttackAngleTop10,
            attack_angle_top10,
            benchmarks.avg_attack_angle,
            GradingRule::HigherIsBetter,
        ));
        bundle.push(graded(
            MetricKind::AvgTimeToContact,
            avg_time_to_contact,
            benchmarks.avg_time_to_contact,
            GradingRule::LowerIsBetter,
        ));

        Ok(bundle)
    }

    /// Computes the exit-velocity bundle.
    ///
    /// Fails with `NoValidData` when no ball has a positive exit velocity.
    /// The average distance of the hardest-hit balls is reported without a
    /// grade since the table holds no distance benchmark.
    pub fn compute_exit_velocity_metrics(
        &self,
        rows: &[BattedBallRecord],
        level: &str,
    ) -> Result<MetricsBundle, AnalyticsError> {
        let benchmarks = self.exit_velocity_benchmarks(level)?;

        // 1. Population: balls with real contact
        let velocities: Vec<f64> = rows.iter().filter_map(|r| r.contact_velocity()).collect();
        if velocities.is_empty() {
            return Err(AnalyticsError::NoValidData(
                "no batted ball has a non-zero exit velocity".to_string(),
            ));
        }

        // 2. Headline velocities
        let avg_exit_velocity = mean(&velocities);
        let top8_exit_velocity = quantile(&velocities, EXIT_VELOCITY_TOP_QUANTILE);

        // 3. Hard-hit subset
        let hard_hit: Vec<&BattedBallRecord> = rows
            .iter()
            .filter(|r| is_hard_hit(r, top8_exit_velocity))
            .collect();
        let launch_angles_top8: Vec<f64> = hard_hit.iter().filter_map(|r| r.launch_angle).collect();
        let distances_top8: Vec<f64> = hard_hit.iter().filter_map(|r| r.distance).collect();

        // 4. Launch angle over every ball with a positive LA, whatever its EV
        let positive_launch_angles: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.launch_angle)
            .filter(|la| *la > 0.0)
            .collect();

        tracing::debug!(
            level,
            balls = velocities.len(),
            hard_hit = hard_hit.len(),
            top8_exit_velocity,
            "Computed exit-velocity statistics."
        );

        let mut bundle = MetricsBundle::new(Section::ExitVelocity, level, velocities.len());
        bundle.push(graded(
            MetricKind::AvgExitVelocity,
            avg_exit_velocity,
            benchmarks.avg_exit_velocity,
            GradingRule::ExitVelocity,
        ));
        bundle.push(graded(
            MetricKind::Top8ExitVelocity,
            top8_exit_velocity,
            benchmarks.top8_exit_velocity,
            GradingRule::ExitVelocity,
        ));
        bundle.push(graded(
            MetricKind::LaunchAngleTop8,
            mean(&launch_angles_top8),
            benchmarks.hard_hit_launch_angle,
            GradingRule::HigherIsBetter,
        ));
        bundle.push(graded(
            MetricKind::TotalAvgLaunchAngle,
            mean(&positive_launch_angles),
            benchmarks.avg_launch_angle,
            GradingRule::HigherIsBetter,
        ));
        bundle.push(MetricEntry::ungraded(
            MetricKind::DistanceTop8,
            mean(&distances_top8),
        ));

        Ok(bundle)
    }

    /// Mean exit velocity per zone over every ball with real contact.
    pub fn compute_zone_aggregate(&self, rows: &[BattedBallRecord]) -> ZoneAggregate {
        self.compute_zone_aggregate_with(rows, ZoneMetric::MeanExitVelocity, ZonePopulation::AllContact)
    }

    /// Per-zone aggregate with an explicit choice of scalar and population.
    ///
    /// Zones without a qualifying ball are absent from the result.
    pub fn compute_zone_aggregate_with(
        &self,
        rows: &[BattedBallRecord],
        metric: ZoneMetric,
        population: ZonePopulation,
    ) -> ZoneAggregate {
        let threshold = match population {
            ZonePopulation::AllContact => None,
            ZonePopulation::HardHit => {
                let velocities: Vec<f64> = rows.iter().filter_map(|r| r.contact_velocity()).collect();
                Some(quantile(&velocities, EXIT_VELOCITY_TOP_QUANTILE))
            }
        };

        let mut groups: BTreeMap<ZoneCode, Vec<f64>> = BTreeMap::new();
        for row in rows {
            let (Some(zone), Some(ev)) = (row.zone, row.contact_velocity()) else {
                continue;
            };
            if threshold.is_some_and(|t| ev < t) {
                continue;
            }
            groups.entry(zone).or_default().push(ev);
        }

        let values = groups
            .into_iter()
            .map(|(zone, velocities)| {
                let value = match metric {
                    ZoneMetric::MeanExitVelocity => mean(&velocities),
                    ZoneMetric::SwingCount => velocities.len() as f64,
                };
                (zone, value)
            })
            .collect();

        ZoneAggregate::new(metric, values)
    }

    fn bat_speed_benchmarks(&self, level: &str) -> Result<&BatSpeedBenchmarks, AnalyticsError> {
        self.benchmarks
            .bat_speed(level)
            .ok_or_else(|| AnalyticsError::InvalidLevel {
                section: Section::BatSpeed,
                level: level.to_string(),
            })
    }

    fn exit_velocity_benchmarks(
        &self,
        level: &str,
    ) -> Result<&ExitVelocityBenchmarks, AnalyticsError> {
        self.benchmarks
            .exit_velocity(level)
            .ok_or_else(|| AnalyticsError::InvalidLevel {
                section: Section::ExitVelocity,
                level: level.to_string(),
            })
    }
}

/// EV at or above the top-8% threshold on a ball with real contact.
/// Zero and missing velocities never pass, whatever the threshold.
fn is_hard_hit(row: &BattedBallRecord, threshold: f64) -> bool {
    row.contact_velocity().is_some_and(|ev| ev >= threshold)
}

fn graded(kind: MetricKind, value: f64, benchmark: f64, rule: GradingRule) -> MetricEntry {
    MetricEntry {
        kind,
        value,
        benchmark: Some(benchmark),
        grade: rule.grade(value, benchmark),
    }
}
