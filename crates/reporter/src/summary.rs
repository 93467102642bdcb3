use core_types::{MetricEntry, MetricsBundle, Section};
use std::fmt::Write;

/// Outcome of one file's pipeline, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SubReport {
    /// No file was supplied.
    Skipped,
    Ready(MetricsBundle),
    Failed { section: Section, message: String },
}

impl SubReport {
    pub fn bundle(&self) -> Option<&MetricsBundle> {
        match self {
            SubReport::Ready(bundle) => Some(bundle),
            _ => None,
        }
    }
}

/// The computed value with its unit, or `n/a` when undefined.
pub fn format_value(entry: &MetricEntry) -> String {
    if !entry.is_defined() {
        return "n/a".to_string();
    }
    format!(
        "{:.*}{}",
        entry.kind.precision(),
        entry.value,
        entry.kind.unit().suffix()
    )
}

/// The benchmark as configured (no rounding), with its unit.
pub fn format_benchmark(entry: &MetricEntry) -> Option<String> {
    entry
        .benchmark
        .map(|benchmark| format!("{benchmark}{}", entry.kind.unit().suffix()))
}

pub fn format_grade(entry: &MetricEntry) -> &'static str {
    match entry.grade {
        Some(grade) => grade.label(),
        None => "Not available",
    }
}

/// Renders one bundle as a markdown section.
pub fn render_markdown(bundle: &MetricsBundle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### {}", bundle.section.title());

    for entry in &bundle.entries {
        let _ = write!(out, "- **{}:** {}", entry.kind.label(), format_value(entry));
        match format_benchmark(entry) {
            Some(benchmark) => {
                let _ = writeln!(out, " (Benchmark: {benchmark})");
                let _ = writeln!(out, "  - Player Grade: {}", format_grade(entry));
            }
            None => out.push('\n'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Grade, MetricKind};

    fn bat_speed_bundle() -> MetricsBundle {
        let mut bundle = MetricsBundle::new(Section::BatSpeed, "High School", 10);
        bundle.push(MetricEntry {
            kind: MetricKind::AvgBatSpeed,
            value: 64.5,
            benchmark: Some(62.4),
            grade: Some(Grade::AboveAverage),
        });
        bundle.push(MetricEntry {
            kind: MetricKind::AvgTimeToContact,
            value: 0.1534,
            benchmark: Some(0.163),
            grade: Some(Grade::AboveAverage),
        });
        bundle
    }

    #[test]
    fn markdown_lists_value_benchmark_and_grade() {
        let text = render_markdown(&bat_speed_bundle());

        assert!(text.starts_with("### Bat Speed Metrics\n"));
        assert!(text.contains("- **Player Average Bat Speed:** 64.50 mph (Benchmark: 62.4 mph)\n"));
        assert!(text.contains("  - Player Grade: Above Average\n"));
        assert!(text.contains("0.153 sec (Benchmark: 0.163 sec)"));
    }

    #[test]
    fn ungraded_metric_has_no_benchmark_line() {
        let mut bundle = MetricsBundle::new(Section::ExitVelocity, "College", 4);
        bundle.push(MetricEntry::ungraded(MetricKind::DistanceTop8, 312.25));

        let text = render_markdown(&bundle);

        assert!(text.contains("- **Average Distance (8% swings):** 312.25 ft\n"));
        assert!(!text.contains("Benchmark"));
    }

    #[test]
    fn undefined_values_render_as_not_available() {
        let entry = MetricEntry {
            kind: MetricKind::AttackAngleTop10,
            value: f64::NAN,
            benchmark: Some(9.8),
            grade: None,
        };

        assert_eq!(format_value(&entry), "n/a");
        assert_eq!(format_grade(&entry), "Not available");
        assert_eq!(format_benchmark(&entry).as_deref(), Some("9.8°"));
    }

    #[test]
    fn whole_benchmarks_print_without_decimals() {
        let entry = MetricEntry {
            kind: MetricKind::AvgExitVelocity,
            value: 51.0,
            benchmark: Some(50.0),
            grade: Some(Grade::AboveAverage),
        };

        assert_eq!(format_benchmark(&entry).as_deref(), Some("50 mph"));
    }
}
