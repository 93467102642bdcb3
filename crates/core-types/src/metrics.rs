use crate::enums::{Grade, MetricKind, Section};
use serde::{Deserialize, Serialize};

/// A single computed value together with its benchmark and grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub kind: MetricKind,
    /// NaN when the population behind the metric was empty.
    pub value: f64,
    /// `None` for metrics that have no reference value (e.g. distance).
    pub benchmark: Option<f64>,
    /// `None` when the metric is ungraded or its value is undefined.
    pub grade: Option<Grade>,
}

impl MetricEntry {
    pub fn ungraded(kind: MetricKind, value: f64) -> Self {
        Self {
            kind,
            value,
            benchmark: None,
            grade: None,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_finite()
    }
}

/// The result of one sub-report computation.
///
/// This is the only channel between the computation step and the
/// formatting/email steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub section: Section,
    pub level: String,
    /// Size of the population the headline averages were taken over.
    pub sample_size: usize,
    pub entries: Vec<MetricEntry>,
}

impl MetricsBundle {
    pub fn new(section: Section, level: impl Into<String>, sample_size: usize) -> Self {
        Self {
            section,
            level: level.into(),
            sample_size,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: MetricEntry) {
        self.entries.push(entry);
    }

    pub fn get(&self, kind: MetricKind) -> Option<&MetricEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    /// Shorthand for the raw value of a metric.
    pub fn value(&self, kind: MetricKind) -> Option<f64> {
        self.get(kind).map(|entry| entry.value)
    }

    pub fn grade(&self, kind: MetricKind) -> Option<Grade> {
        self.get(kind).and_then(|entry| entry.grade)
    }
}
