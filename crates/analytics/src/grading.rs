use core_types::Grade;

/// Lower edge of the "Average" band for higher-is-better metrics, relative to the benchmark.
pub const AVERAGE_FLOOR: f64 = 0.9;

/// Upper edge of the "Average" band for lower-is-better metrics, relative to the benchmark.
pub const AVERAGE_CEILING: f64 = 1.1;

/// Width (mph) of the "Average" band below an exit-velocity benchmark.
pub const EXIT_VELOCITY_BAND: f64 = 3.0;

/// The grading policy applied to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradingRule {
    /// Above the benchmark is good; within 10% below it is average.
    HigherIsBetter,
    /// Below the benchmark is good; within 10% above it is average.
    LowerIsBetter,
    /// Exit velocity: within 3 mph below the benchmark is average.
    ExitVelocity,
}

impl GradingRule {
    /// Grades `value` against `benchmark`. Boundaries are inclusive on the
    /// "Average" side. An undefined (NaN) value is not graded.
    pub fn grade(&self, value: f64, benchmark: f64) -> Option<Grade> {
        if value.is_nan() {
            return None;
        }

        let grade = match self {
            GradingRule::HigherIsBetter => {
                if value > benchmark {
                    Grade::AboveAverage
                } else if value >= benchmark * AVERAGE_FLOOR {
                    Grade::Average
                } else {
                    Grade::BelowAverage
                }
            }
            GradingRule::LowerIsBetter => {
                if value < benchmark {
                    Grade::AboveAverage
                } else if value <= benchmark * AVERAGE_CEILING {
                    Grade::Average
                } else {
                    Grade::BelowAverage
                }
            }
            GradingRule::ExitVelocity => {
                if benchmark - EXIT_VELOCITY_BAND <= value && value <= benchmark {
                    Grade::Average
                } else if value < benchmark - EXIT_VELOCITY_BAND {
                    Grade::BelowAverage
                } else {
                    Grade::AboveAverage
                }
            }
        };

        Some(grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_is_better_boundaries() {
        let rule = GradingRule::HigherIsBetter;
        let benchmark = 62.4;

        assert_eq!(rule.grade(62.5, benchmark), Some(Grade::AboveAverage));
        assert_eq!(rule.grade(benchmark, benchmark), Some(Grade::Average));
        assert_eq!(rule.grade(benchmark * 0.9, benchmark), Some(Grade::Average));
        assert_eq!(rule.grade(benchmark * 0.9 - 0.001, benchmark), Some(Grade::BelowAverage));
    }

    #[test]
    fn lower_is_better_boundaries() {
        let rule = GradingRule::LowerIsBetter;
        let benchmark = 0.163;

        assert_eq!(rule.grade(0.150, benchmark), Some(Grade::AboveAverage));
        assert_eq!(rule.grade(benchmark, benchmark), Some(Grade::Average));
        assert_eq!(rule.grade(benchmark * 1.1, benchmark), Some(Grade::Average));
        assert_eq!(rule.grade(0.2, benchmark), Some(Grade::BelowAverage));
    }

    #[test]
    fn exit_velocity_boundaries() {
        let rule = GradingRule::ExitVelocity;
        let benchmark = 78.0;

        assert_eq!(rule.grade(benchmark, benchmark), Some(Grade::Average));
        assert_eq!(rule.grade(benchmark - 3.0, benchmark), Some(Grade::Average));
        assert_eq!(rule.grade(benchmark - 3.01, benchmark), Some(Grade::BelowAverage));
        assert_eq!(rule.grade(78.01, benchmark), Some(Grade::AboveAverage));
    }

    #[test]
    fn nan_is_never_graded() {
        for rule in [
            GradingRule::HigherIsBetter,
            GradingRule::LowerIsBetter,
            GradingRule::ExitVelocity,
        ] {
            assert_eq!(rule.grade(f64::NAN, 10.0), None);
        }
    }
}
