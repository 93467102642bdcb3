use analytics::MetricsEngine;
use anyhow::{Context, Result};
use chrono::Local;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use configuration::{Config, LoggingConfig};
use core_types::{
    BAT_SPEED_LEVELS, BattedBallRecord, BenchmarkTable, EXIT_VELOCITY_LEVELS, MetricsBundle,
    Section, ZoneAggregate, ZoneMetric, ZonePopulation,
};
use mailer::{CHART_CONTENT_ID, MailerError, ReportMailer};
use reporter::{
    EmailContext, ImageSource, SubReport, ZoneChart, format_benchmark, format_grade, format_value,
    render_email_html, render_markdown, render_zone_grid,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// The main entry point for the swing metrics report generator.
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already carry the secrets.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging)?;

    match cli.command {
        Commands::Report(args) => handle_report(args, &config).await,
        Commands::Levels => {
            print_levels(&config.benchmark_table());
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Grades bat-speed and exit-velocity sessions against level benchmarks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (default: ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute, grade and optionally email a player's metrics report.
    Report(ReportArgs),
    /// Print the benchmark tables in effect.
    Levels,
}

#[derive(Parser)]
struct ReportArgs {
    /// Bat-speed sensor export (CSV with 8 metadata lines before the header).
    #[arg(long)]
    bat_speed_file: Option<PathBuf>,

    #[arg(long, default_value = "High School", value_parser = PossibleValuesParser::new(BAT_SPEED_LEVELS))]
    bat_speed_level: String,

    /// Exit-velocity export (CSV with a header row).
    #[arg(long)]
    exit_velocity_file: Option<PathBuf>,

    #[arg(long, default_value = "Var/18u", value_parser = PossibleValuesParser::new(EXIT_VELOCITY_LEVELS))]
    exit_velocity_level: String,

    #[arg(long, default_value = "")]
    player_name: String,

    #[arg(long, default_value = "")]
    date_range: String,

    /// Send the HTML report to this address.
    #[arg(long)]
    email: Option<String>,

    /// Write the standalone HTML report (chart embedded) to this path.
    #[arg(long)]
    html_out: Option<PathBuf>,

    /// Write the zone heatmap PNG to this path.
    #[arg(long)]
    chart_out: Option<PathBuf>,

    /// Print the computed bundles and zone aggregate as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Overrides `report.zone_metric`.
    #[arg(long, value_enum)]
    zone_metric: Option<ZoneMetric>,

    /// Overrides `report.zone_population`.
    #[arg(long, value_enum)]
    zone_population: Option<ZonePopulation>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber. The returned guard flushes the file writer on drop.
fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log filter")?;

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "swing-report.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .context("Failed to install the tracing subscriber")?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .context("Failed to install the tracing subscriber")?;
            Ok(None)
        }
    }
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Everything one `report` run produced.
struct ReportOutcome {
    bat_speed: SubReport,
    exit_velocity: SubReport,
    zones: Option<ZoneAggregate>,
    chart: Option<ZoneChart>,
}

async fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    if args.bat_speed_file.is_none() && args.exit_velocity_file.is_none() {
        anyhow::bail!("Provide --bat-speed-file, --exit-velocity-file or both.");
    }

    let zone_metric = args.zone_metric.unwrap_or(config.report.zone_metric);
    let zone_population = args.zone_population.unwrap_or(config.report.zone_population);
    let engine = MetricsEngine::new(config.benchmark_table());

    tracing::info!(
        player = %args.player_name,
        bat_speed_level = %args.bat_speed_level,
        exit_velocity_level = %args.exit_velocity_level,
        "Generating report."
    );

    // The two pipelines never share state; one failing leaves the other intact.
    let bat_speed = bat_speed_pipeline(&engine, args.bat_speed_file.as_deref(), &args.bat_speed_level);
    let (exit_velocity, zones) = exit_velocity_pipeline(
        &engine,
        args.exit_velocity_file.as_deref(),
        &args.exit_velocity_level,
        zone_metric,
        zone_population,
    );
    let chart = zones.as_ref().and_then(|z| match render_zone_grid(z) {
        Ok(chart) => Some(chart),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render the zone heatmap.");
            None
        }
    });

    let outcome = ReportOutcome {
        bat_speed,
        exit_velocity,
        zones,
        chart,
    };

    if args.json {
        print_json(&outcome)?;
    } else {
        print_terminal(&outcome);
    }

    // Each artifact is independent: a failed write is reported and the rest still run.
    if let Some(path) = &args.chart_out {
        match &outcome.chart {
            Some(chart) => write_artifact(path, &chart.png, "zone heatmap"),
            None => tracing::warn!("No zone data available; chart not written."),
        }
    }

    if let Some(path) = &args.html_out {
        let image = outcome.chart.as_ref().map_or(ImageSource::None, ImageSource::Embedded);
        let html = render_email_html(&email_context(&args, config, &outcome, zone_population, image));
        write_artifact(path, html.as_bytes(), "HTML report");
    }

    if let Some(recipient) = &args.email {
        let image = if outcome.chart.is_some() {
            ImageSource::ContentId(CHART_CONTENT_ID)
        } else {
            ImageSource::None
        };
        let html = render_email_html(&email_context(&args, config, &outcome, zone_population, image));
        let chart_png = outcome.chart.as_ref().map(|c| c.png.clone());

        // Delivery problems are reported, never fatal; the terminal report already stands.
        let sent = match ReportMailer::new(&config.smtp) {
            Some(mailer) => {
                mailer
                    .send_report(recipient, &config.report.subject, html, chart_png)
                    .await
            }
            None => Err(MailerError::NotConfigured),
        };
        match sent {
            Ok(()) => println!("Report emailed to {recipient}."),
            Err(e) => {
                tracing::error!(error = %e, recipient = %recipient, "Failed to send report.");
                eprintln!("Failed to send email: {e}");
            }
        }
    }

    Ok(())
}

fn write_artifact(path: &Path, contents: &[u8], what: &str) {
    match fs::write(path, contents) {
        Ok(()) => tracing::info!(path = %path.display(), "{what} written."),
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "Failed to write {what}.");
            eprintln!("Failed to write {what} to {}: {e}", path.display());
        }
    }
}

fn email_context<'a>(
    args: &'a ReportArgs,
    config: &'a Config,
    outcome: &'a ReportOutcome,
    zone_population: ZonePopulation,
    chart: ImageSource<'a>,
) -> EmailContext<'a> {
    EmailContext {
        organization: &config.report.organization,
        player_name: &args.player_name,
        date_range: &args.date_range,
        bat_speed: &outcome.bat_speed,
        exit_velocity: &outcome.exit_velocity,
        zones: outcome.zones.as_ref(),
        zone_population,
        chart,
    }
}

fn bat_speed_pipeline(engine: &MetricsEngine, path: Option<&Path>, level: &str) -> SubReport {
    let Some(path) = path else {
        return SubReport::Skipped;
    };

    let result = ingest::read_bat_speed_file(path)
        .map_err(|e| e.to_string())
        .and_then(|rows| {
            engine
                .compute_bat_speed_metrics(&rows, level)
                .map_err(|e| e.to_string())
        });
    into_sub_report(Section::BatSpeed, result)
}

fn exit_velocity_pipeline(
    engine: &MetricsEngine,
    path: Option<&Path>,
    level: &str,
    zone_metric: ZoneMetric,
    zone_population: ZonePopulation,
) -> (SubReport, Option<ZoneAggregate>) {
    let Some(path) = path else {
        return (SubReport::Skipped, None);
    };

    let rows: Vec<BattedBallRecord> = match ingest::read_exit_velocity_file(path) {
        Ok(rows) => rows,
        Err(e) => return (into_sub_report(Section::ExitVelocity, Err(e.to_string())), None),
    };

    let report = into_sub_report(
        Section::ExitVelocity,
        engine
            .compute_exit_velocity_metrics(&rows, level)
            .map_err(|e| e.to_string()),
    );
    let zones = engine.compute_zone_aggregate_with(&rows, zone_metric, zone_population);
    if zones.is_empty() {
        tracing::warn!("No zone has qualifying batted balls; heatmap skipped.");
        return (report, None);
    }
    (report, Some(zones))
}

fn into_sub_report(section: Section, result: Result<MetricsBundle, String>) -> SubReport {
    match result {
        Ok(bundle) => {
            tracing::info!(
                section = section.title(),
                level = %bundle.level,
                sample_size = bundle.sample_size,
                "Metrics computed."
            );
            SubReport::Ready(bundle)
        }
        Err(message) => {
            tracing::error!(section = section.title(), error = %message, "Sub-report failed.");
            SubReport::Failed { section, message }
        }
    }
}

// ==============================================================================
// Terminal Output
// ==============================================================================

fn print_terminal(outcome: &ReportOutcome) {
    for sub in [&outcome.bat_speed, &outcome.exit_velocity] {
        match sub {
            SubReport::Ready(bundle) => {
                println!("{}: {}", bundle.section.level_label(), bundle.level);
                println!("{}", metrics_table(bundle));
                println!("{}", render_markdown(bundle));
            }
            SubReport::Failed { section, message } => {
                println!("{}: FAILED - {message}\n", section.title());
            }
            SubReport::Skipped => {}
        }
    }

    if let Some(zones) = &outcome.zones {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Zone", zones.metric.heading()]);
        for (zone, value) in zones.iter() {
            let cell = match zones.metric {
                ZoneMetric::MeanExitVelocity => format!("{value:.1}"),
                ZoneMetric::SwingCount => format!("{value:.0}"),
            };
            table.add_row(vec![Cell::new(zone), Cell::new(cell)]);
        }
        println!("{table}");
    }
}

fn metrics_table(bundle: &MetricsBundle) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value", "Benchmark", "Grade"]);
    for entry in &bundle.entries {
        let benchmark = format_benchmark(entry).unwrap_or_default();
        let grade = if entry.benchmark.is_some() {
            format_grade(entry)
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(entry.kind.label()),
            Cell::new(format_value(entry)),
            Cell::new(benchmark),
            Cell::new(grade),
        ]);
    }
    table
}

fn print_json(outcome: &ReportOutcome) -> Result<()> {
    let sub_json = |sub: &SubReport| match sub {
        SubReport::Skipped => json!({ "status": "skipped" }),
        SubReport::Ready(bundle) => json!({ "status": "ready", "bundle": bundle }),
        SubReport::Failed { message, .. } => json!({ "status": "failed", "error": message }),
    };

    let document = json!({
        "generated_at": Local::now().to_rfc3339(),
        "bat_speed": sub_json(&outcome.bat_speed),
        "exit_velocity": sub_json(&outcome.exit_velocity),
        "zones": outcome.zones,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

// ==============================================================================
// Levels Command
// ==============================================================================

fn print_levels(table: &BenchmarkTable) {
    let mut bat = Table::new();
    bat.load_preset(UTF8_FULL).set_header(vec![
        "Bat Speed Level",
        "Avg Bat Speed",
        "Top 10% Bat Speed",
        "Avg Time to Contact",
        "Avg Attack Angle",
    ]);
    for (level, b) in table.bat_speed_levels() {
        bat.add_row(vec![
            Cell::new(level),
            Cell::new(b.avg_bat_speed),
            Cell::new(b.top10_bat_speed),
            Cell::new(b.avg_time_to_contact),
            Cell::new(b.avg_attack_angle),
        ]);
    }

    let mut ev = Table::new();
    ev.load_preset(UTF8_FULL).set_header(vec![
        "Exit Velocity Level",
        "Avg EV",
        "Top 8% EV",
        "Avg Launch Angle",
        "Hard Hit Launch Angle",
    ]);
    for (level, b) in table.exit_velocity_levels() {
        ev.add_row(vec![
            Cell::new(level),
            Cell::new(b.avg_exit_velocity),
            Cell::new(b.top8_exit_velocity),
            Cell::new(b.avg_launch_angle),
            Cell::new(b.hard_hit_launch_angle),
        ]);
    }

    println!("{bat}\n{ev}");
}
