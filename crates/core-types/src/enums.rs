use serde::{Deserialize, Serialize};
use std::fmt;

/// The grade assigned to a metric after comparing it with its level benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "Above Average")]
    AboveAverage,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::AboveAverage => "Above Average",
            Grade::Average => "Average",
            Grade::BelowAverage => "Below Average",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which uploaded file a bundle was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    BatSpeed,
    ExitVelocity,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::BatSpeed => "Bat Speed Metrics",
            Section::ExitVelocity => "Exit Velocity Metrics",
        }
    }

    /// Label used when the selected level is echoed back in a report.
    pub fn level_label(&self) -> &'static str {
        match self {
            Section::BatSpeed => "Bat Speed Level",
            Section::ExitVelocity => "Exit Velocity Level",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Mph,
    Degrees,
    Seconds,
    Feet,
}

impl Unit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Mph => " mph",
            Unit::Degrees => "°",
            Unit::Seconds => " sec",
            Unit::Feet => " ft",
        }
    }
}

/// Every metric the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    AvgBatSpeed,
    Top10BatSpeed,
    AttackAngleTop10,
    AvgTimeToContact,
    AvgExitVelocity,
    Top8ExitVelocity,
    LaunchAngleTop8,
    TotalAvgLaunchAngle,
    DistanceTop8,
}

impl MetricKind {
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::AvgBatSpeed => "Player Average Bat Speed",
            MetricKind::Top10BatSpeed => "Top 10% Bat Speed",
            MetricKind::AttackAngleTop10 => "Average Attack Angle (Top 10% Bat Speed Swings)",
            MetricKind::AvgTimeToContact => "Average Time to Contact",
            MetricKind::AvgExitVelocity => "Average Exit Velocity (Non-zero EV)",
            MetricKind::Top8ExitVelocity => "Top 8% Exit Velocity",
            MetricKind::LaunchAngleTop8 => "Average Launch Angle (On Top 8% EV Swings)",
            MetricKind::TotalAvgLaunchAngle => "Total Average Launch Angle (Avg LA)",
            MetricKind::DistanceTop8 => "Average Distance (8% swings)",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            MetricKind::AvgBatSpeed
            | MetricKind::Top10BatSpeed
            | MetricKind::AvgExitVelocity
            | MetricKind::Top8ExitVelocity => Unit::Mph,
            MetricKind::AttackAngleTop10
            | MetricKind::LaunchAngleTop8
            | MetricKind::TotalAvgLaunchAngle => Unit::Degrees,
            MetricKind::AvgTimeToContact => Unit::Seconds,
            MetricKind::DistanceTop8 => Unit::Feet,
        }
    }

    /// Number of decimals used when the value is displayed.
    pub fn precision(&self) -> usize {
        match self {
            MetricKind::AvgTimeToContact => 3,
            _ => 2,
        }
    }
}

/// The scalar each cell of the zone heatmap encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ZoneMetric {
    /// Mean exit velocity of the qualifying balls in the zone.
    #[default]
    MeanExitVelocity,
    /// Number of qualifying balls in the zone.
    SwingCount,
}

impl ZoneMetric {
    pub fn heading(&self) -> &'static str {
        match self {
            ZoneMetric::MeanExitVelocity => "Average EV (mph)",
            ZoneMetric::SwingCount => "Swings",
        }
    }
}

/// Which batted balls feed the zone heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ZonePopulation {
    /// Every ball with a positive exit velocity.
    #[default]
    AllContact,
    /// Only the balls at or above the top-8% exit velocity threshold.
    HardHit,
}

impl ZonePopulation {
    pub fn description(&self) -> &'static str {
        match self {
            ZonePopulation::AllContact => "Non-zero EV",
            ZonePopulation::HardHit => "Top 8% EV",
        }
    }
}
