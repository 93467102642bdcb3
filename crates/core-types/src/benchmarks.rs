use serde::{Deserialize, Serialize};

/// Levels selectable for the bat-speed report, in display order.
pub const BAT_SPEED_LEVELS: [&str; 5] = ["Youth", "High School", "College", "Indy", "Affiliate"];

/// Levels selectable for the exit-velocity report, in display order.
pub const EXIT_VELOCITY_LEVELS: [&str; 8] = [
    "10u", "12u", "14u", "JV/16u", "Var/18u", "College", "Indy", "Affiliate",
];

/// Reference values for the bat-speed metrics at one competitive level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatSpeedBenchmarks {
    pub avg_bat_speed: f64,
    /// The 90th percentile bat speed.
    pub top10_bat_speed: f64,
    pub avg_time_to_contact: f64,
    pub avg_attack_angle: f64,
}

/// Reference values for the exit-velocity metrics at one competitive level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitVelocityBenchmarks {
    pub avg_exit_velocity: f64,
    /// The 92nd percentile ("top 8th") exit velocity.
    pub top8_exit_velocity: f64,
    pub avg_launch_angle: f64,
    /// Average launch angle of hard-hit balls.
    pub hard_hit_launch_angle: f64,
}

/// A configured replacement for one bat-speed level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatSpeedOverride {
    pub level: String,
    #[serde(flatten)]
    pub benchmarks: BatSpeedBenchmarks,
}

/// A configured replacement for one exit-velocity level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExitVelocityOverride {
    pub level: String,
    #[serde(flatten)]
    pub benchmarks: ExitVelocityBenchmarks,
}

/// The per-level benchmark lookup used for grading.
///
/// The two level vocabularies are kept apart: "College" in the bat-speed
/// table and "College" in the exit-velocity table are unrelated records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkTable {
    bat_speed: Vec<(String, BatSpeedBenchmarks)>,
    exit_velocity: Vec<(String, ExitVelocityBenchmarks)>,
}

impl BenchmarkTable {
    /// The table shipped with the application.
    pub fn builtin() -> Self {
        let bat = |avg, top10, ttc, attack| BatSpeedBenchmarks {
            avg_bat_speed: avg,
            top10_bat_speed: top10,
            avg_time_to_contact: ttc,
            avg_attack_angle: attack,
        };
        let ev = |avg, top8, la, hhb| ExitVelocityBenchmarks {
            avg_exit_velocity: avg,
            top8_exit_velocity: top8,
            avg_launch_angle: la,
            hard_hit_launch_angle: hhb,
        };

        let bat_speed = vec![
            ("Youth".to_string(), bat(49.21, 52.81, 0.19, 11.78)),
            ("High School".to_string(), bat(62.4, 67.02, 0.163, 9.8)),
            ("College".to_string(), bat(67.53, 72.54, 0.154, 10.52)),
            ("Indy".to_string(), bat(69.2, 74.04, 0.154, 10.62)),
            ("Affiliate".to_string(), bat(70.17, 75.14, 0.147, 11.09)),
        ];

        let exit_velocity = vec![
            ("10u".to_string(), ev(50.0, 61.0, 12.14, 8.78)),
            ("12u".to_string(), ev(59.0, 72.0, 12.14, 8.78)),
            ("14u".to_string(), ev(68.0, 80.0, 12.14, 8.78)),
            ("JV/16u".to_string(), ev(72.65, 85.0, 16.51, 11.47)),
            ("Var/18u".to_string(), ev(78.0, 91.5, 16.51, 11.47)),
            ("College".to_string(), ev(81.57, 94.44, 17.57, 12.86)),
            ("Indy".to_string(), ev(85.99, 98.12, 18.68, 14.74)),
            ("Affiliate".to_string(), ev(85.49, 98.71, 18.77, 15.55)),
        ];

        Self {
            bat_speed,
            exit_velocity,
        }
    }

    pub fn bat_speed(&self, level: &str) -> Option<&BatSpeedBenchmarks> {
        self.bat_speed
            .iter()
            .find(|(name, _)| name == level)
            .map(|(_, benchmarks)| benchmarks)
    }

    pub fn exit_velocity(&self, level: &str) -> Option<&ExitVelocityBenchmarks> {
        self.exit_velocity
            .iter()
            .find(|(name, _)| name == level)
            .map(|(_, benchmarks)| benchmarks)
    }

    pub fn bat_speed_levels(&self) -> impl Iterator<Item = (&str, &BatSpeedBenchmarks)> {
        self.bat_speed.iter().map(|(name, b)| (name.as_str(), b))
    }

    pub fn exit_velocity_levels(&self) -> impl Iterator<Item = (&str, &ExitVelocityBenchmarks)> {
        self.exit_velocity.iter().map(|(name, b)| (name.as_str(), b))
    }

    /// Replaces (or appends) whole level records.
    pub fn with_overrides(
        mut self,
        bat_speed: &[BatSpeedOverride],
        exit_velocity: &[ExitVelocityOverride],
    ) -> Self {
        for entry in bat_speed {
            upsert(&mut self.bat_speed, &entry.level, entry.benchmarks);
        }
        for entry in exit_velocity {
            upsert(&mut self.exit_velocity, &entry.level, entry.benchmarks);
        }
        self
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn upsert<T>(entries: &mut Vec<(String, T)>, level: &str, value: T) {
    match entries.iter_mut().find(|(name, _)| name == level) {
        Some((_, existing)) => *existing = value,
        None => entries.push((level.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_both_vocabularies() {
        let table = BenchmarkTable::builtin();
        for level in BAT_SPEED_LEVELS {
            assert!(table.bat_speed(level).is_some(), "missing bat-speed level {level}");
        }
        for level in EXIT_VELOCITY_LEVELS {
            assert!(table.exit_velocity(level).is_some(), "missing EV level {level}");
        }
    }

    #[test]
    fn vocabularies_are_disjoint_where_expected() {
        let table = BenchmarkTable::builtin();
        assert!(table.bat_speed("10u").is_none());
        assert!(table.exit_velocity("Youth").is_none());
        assert!(table.exit_velocity("High School").is_none());
    }

    #[test]
    fn shared_level_names_hold_independent_values() {
        let table = BenchmarkTable::builtin();
        assert_eq!(table.bat_speed("College").unwrap().avg_bat_speed, 67.53);
        assert_eq!(table.exit_velocity("College").unwrap().avg_exit_velocity, 81.57);
    }

    #[test]
    fn overrides_replace_a_single_level() {
        let replacement = BatSpeedBenchmarks {
            avg_bat_speed: 60.0,
            top10_bat_speed: 65.0,
            avg_time_to_contact: 0.17,
            avg_attack_angle: 10.0,
        };
        let table = BenchmarkTable::builtin().with_overrides(
            &[BatSpeedOverride {
                level: "High School".to_string(),
                benchmarks: replacement,
            }],
            &[],
        );

        assert_eq!(table.bat_speed("High School"), Some(&replacement));
        assert_eq!(table.bat_speed("College").unwrap().avg_bat_speed, 67.53);
        assert_eq!(table.bat_speed_levels().count(), BAT_SPEED_LEVELS.len());
    }

    #[test]
    fn overrides_can_add_a_level() {
        let table = BenchmarkTable::builtin().with_overrides(
            &[],
            &[ExitVelocityOverride {
                level: "8u".to_string(),
                benchmarks: ExitVelocityBenchmarks {
                    avg_exit_velocity: 42.0,
                    top8_exit_velocity: 50.0,
                    avg_launch_angle: 10.0,
                    hard_hit_launch_angle: 7.5,
                },
            }],
        );

        assert_eq!(table.exit_velocity("8u").unwrap().avg_exit_velocity, 42.0);
        assert_eq!(table.exit_velocity_levels().count(), EXIT_VELOCITY_LEVELS.len() + 1);
    }
}
