use core_types::{BatSpeedOverride, BenchmarkTable, ExitVelocityOverride, ZoneMetric, ZonePopulation};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub smtp: SmtpConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
    pub benchmarks: BenchmarkOverrides,
}

impl Config {
    /// The built-in benchmark table with any configured level records applied.
    pub fn benchmark_table(&self) -> BenchmarkTable {
        BenchmarkTable::builtin()
            .with_overrides(&self.benchmarks.bat_speed, &self.benchmarks.exit_velocity)
    }
}

/// Outgoing mail relay. The password is expected from the environment
/// (`SWING__SMTP__PASSWORD`), never from a checked-in file.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Login name. Falls back to `sender` when empty.
    pub username: String,
    /// The From address of the report email.
    pub sender: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl SmtpConfig {
    pub fn login(&self) -> &str {
        if self.username.trim().is_empty() {
            &self.sender
        } else {
            &self.username
        }
    }

    /// True when host, sender and password are all present.
    pub fn is_complete(&self) -> bool {
        !self.host.trim().is_empty()
            && !self.sender.trim().is_empty()
            && !self.password.is_empty()
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: String::new(),
            sender: String::new(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

// Manual impl keeps the password out of logs.
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("sender", &self.sender)
            .field("password", &if self.password.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Presentation settings for the generated report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub organization: String,
    pub subject: String,
    /// What each heatmap cell shows.
    pub zone_metric: ZoneMetric,
    /// Which batted balls feed the heatmap.
    pub zone_population: ZonePopulation,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            organization: "OTR Baseball".to_string(),
            subject: "OTR Baseball Metrics and Grade Report".to_string(),
            zone_metric: ZoneMetric::default(),
            zone_population: ZonePopulation::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file here.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Whole-record replacements for built-in benchmark levels.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BenchmarkOverrides {
    pub bat_speed: Vec<BatSpeedOverride>,
    pub exit_velocity: Vec<ExitVelocityOverride>,
}
