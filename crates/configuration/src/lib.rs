use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{BenchmarkOverrides, Config, LoggingConfig, ReportConfig, SmtpConfig};

/// File read when no explicit path is given. Missing is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration.
///
/// Sources, lowest priority first: the built-in defaults, the TOML file
/// (`config.toml` unless `path` is given), then `SWING__*` environment
/// variables with `__` separating nested keys. An explicitly given file must
/// exist; the default one is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_with_environment(path, config::Environment::with_prefix("SWING").separator("__"))
}

fn load_with_environment(
    path: Option<&Path>,
    environment: config::Environment,
) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.smtp.port == 0 {
        return Err(ConfigError::ValidationError(
            "smtp.port must be non-zero".to_string(),
        ));
    }

    for o in &config.benchmarks.bat_speed {
        let b = &o.benchmarks;
        check_benchmarks(
            "bat_speed",
            &o.level,
            &[b.avg_bat_speed, b.top10_bat_speed, b.avg_time_to_contact, b.avg_attack_angle],
        )?;
    }
    for o in &config.benchmarks.exit_velocity {
        let b = &o.benchmarks;
        check_benchmarks(
            "exit_velocity",
            &o.level,
            &[b.avg_exit_velocity, b.top8_exit_velocity, b.avg_launch_angle, b.hard_hit_launch_angle],
        )?;
    }
    Ok(())
}

fn check_benchmarks(table: &str, level: &str, values: &[f64]) -> Result<(), ConfigError> {
    if level.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "benchmarks.{table} override has an empty level name"
        )));
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "benchmarks.{table} override for '{level}' must be finite and non-negative"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{ZoneMetric, ZonePopulation};
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_defaults_without_a_file() {
        let config = load_config(None).unwrap();

        assert_eq!(config.report.subject, "OTR Baseball Metrics and Grade Report");
        assert!(config.benchmark_table().exit_velocity("JV/16u").is_some());
    }

    #[test]
    fn defaults_apply_when_file_is_sparse() {
        let (_dir, path) = write_config("[smtp]\nsender = \"reports@example.com\"\n");

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.smtp.login(), "reports@example.com");
        assert_eq!(config.report.organization, "OTR Baseball");
        assert_eq!(config.report.zone_metric, ZoneMetric::MeanExitVelocity);
        assert_eq!(config.report.zone_population, ZonePopulation::AllContact);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn zone_selectors_and_overrides_are_read() {
        let (_dir, path) = write_config(
            r#"
[report]
zone_metric = "swing_count"
zone_population = "hard_hit"

[[benchmarks.exit_velocity]]
level = "Var/18u"
avg_exit_velocity = 80.0
top8_exit_velocity = 90.0
avg_launch_angle = 10.0
hard_hit_launch_angle = 12.0
"#,
        );

        let config = load_config(Some(&path)).unwrap();
        let table = config.benchmark_table();

        assert_eq!(config.report.zone_metric, ZoneMetric::SwingCount);
        assert_eq!(config.report.zone_population, ZonePopulation::HardHit);
        assert_eq!(table.exit_velocity("Var/18u").unwrap().avg_exit_velocity, 80.0);
        assert!(table.bat_speed("High School").is_some());
    }

    #[test]
    fn zero_port_is_rejected() {
        let (_dir, path) = write_config("[smtp]\nport = 0\n");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn negative_benchmark_is_rejected() {
        let (_dir, path) = write_config(
            r#"
[[benchmarks.bat_speed]]
level = "Youth"
avg_bat_speed = -1.0
top10_bat_speed = 50.0
avg_time_to_contact = 0.2
avg_attack_angle = 10.0
"#,
        );

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("Youth")));
    }

    #[test]
    fn unknown_zone_selector_fails_to_load() {
        let (_dir, path) = write_config("[report]\nzone_metric = \"median\"\n");

        assert!(matches!(load_config(Some(&path)), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = load_config(Some(&dir.path().join("absent.toml")));

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("SWING")
            .separator("__")
            .source(Some(map))
    }

    #[test]
    fn numeric_password_from_environment_is_kept_verbatim() {
        let env = environment(&[
            ("SWING__SMTP__PASSWORD", "0123456"),
            ("SWING__SMTP__PORT", "2525"),
        ]);

        let config = load_with_environment(None, env).unwrap();

        assert_eq!(config.smtp.password, "0123456");
        assert_eq!(config.smtp.port, 2525);
    }

    #[test]
    fn environment_overrides_the_file() {
        let (_dir, path) = write_config("[report]\norganization = \"File Org\"\n");
        let env = environment(&[("SWING__REPORT__ORGANIZATION", "Env Org")]);

        let config = load_with_environment(Some(&path), env).unwrap();

        assert_eq!(config.report.organization, "Env Org");
    }

    #[test]
    fn debug_output_redacts_password() {
        let smtp = SmtpConfig {
            password: "hunter2".to_string(),
            ..SmtpConfig::default()
        };

        let rendered = format!("{smtp:?}");

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
