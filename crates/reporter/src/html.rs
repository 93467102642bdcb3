use crate::heatmap::ZoneChart;
use crate::summary::{SubReport, format_benchmark, format_grade, format_value};
use core_types::{MetricsBundle, ZoneAggregate, ZoneMetric, ZonePopulation};
use std::fmt::Write;

const TEXT_STYLE: &str = "color: black;";

/// How the heatmap is referenced from the HTML body.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    /// Inline data URI, for a standalone HTML file.
    Embedded(&'a ZoneChart),
    /// A `cid:` reference to an inline MIME part, for email.
    ContentId(&'a str),
    None,
}

/// Everything the HTML report is assembled from.
#[derive(Debug, Clone)]
pub struct EmailContext<'a> {
    pub organization: &'a str,
    pub player_name: &'a str,
    pub date_range: &'a str,
    pub bat_speed: &'a SubReport,
    pub exit_velocity: &'a SubReport,
    pub zones: Option<&'a ZoneAggregate>,
    pub zone_population: ZonePopulation,
    pub chart: ImageSource<'a>,
}

/// Renders the full HTML report body.
pub fn render_email_html(ctx: &EmailContext<'_>) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<html>\n<body style=\"{TEXT_STYLE} background-color: white;\">\n\
         <h2 style=\"{TEXT_STYLE}\">{} Metrics Report</h2>\n\
         <p style=\"{TEXT_STYLE}\"><strong>Player Name:</strong> {}</p>\n\
         <p style=\"{TEXT_STYLE}\"><strong>Date Range:</strong> {}</p>\n",
        escape_html(ctx.organization),
        escape_html(ctx.player_name),
        escape_html(ctx.date_range),
    );

    for sub in [ctx.bat_speed, ctx.exit_velocity] {
        if let Some(bundle) = sub.bundle() {
            let _ = writeln!(
                body,
                "<p style=\"{TEXT_STYLE}\"><strong>{}:</strong> {}</p>",
                bundle.section.level_label(),
                escape_html(&bundle.level)
            );
        }
    }

    let _ = writeln!(
        body,
        "<p style=\"{TEXT_STYLE}\">The following data is constructed with benchmarks for each level.</p>"
    );

    for sub in [ctx.bat_speed, ctx.exit_velocity] {
        match sub {
            SubReport::Ready(bundle) => body.push_str(&bundle_html(bundle)),
            SubReport::Failed { section, message } => {
                let _ = writeln!(
                    body,
                    "<h3 style=\"{TEXT_STYLE}\">{}</h3>\n<p style=\"color: #b00020;\">{}</p>",
                    section.title(),
                    escape_html(message)
                );
            }
            SubReport::Skipped => {}
        }
    }

    let image_src = match ctx.chart {
        ImageSource::Embedded(chart) => Some(chart.data_uri()),
        ImageSource::ContentId(cid) => Some(format!("cid:{cid}")),
        ImageSource::None => None,
    };
    if let Some(src) = image_src {
        let _ = writeln!(
            body,
            "<h3 style=\"{TEXT_STYLE}\">Strike Zone {} ({})</h3>\n<img src=\"{src}\" alt=\"Strike zone heatmap\"/>",
            zone_title(ctx.zones.map(|z| z.metric).unwrap_or_default()),
            ctx.zone_population.description()
        );
    }

    if let Some(zones) = ctx.zones.filter(|z| !z.is_empty()) {
        body.push_str(&zone_table_html(zones, ctx.zone_population));
    }

    let _ = write!(
        body,
        "<p style=\"{TEXT_STYLE}\">Best Regards,<br>{}</p>\n</body>\n</html>\n",
        escape_html(ctx.organization)
    );
    body
}

fn bundle_html(bundle: &MetricsBundle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<h3 style=\"{TEXT_STYLE}\">{}</h3>\n<ul style=\"{TEXT_STYLE}\">", bundle.section.title());
    for entry in &bundle.entries {
        let _ = write!(
            out,
            "<li><strong>{}:</strong> {}",
            escape_html(entry.kind.label()),
            escape_html(&format_value(entry))
        );
        if let Some(benchmark) = format_benchmark(entry) {
            let _ = write!(
                out,
                " (Benchmark: {})<br>Player Grade: {}",
                escape_html(&benchmark),
                format_grade(entry)
            );
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
    out
}

fn zone_title(metric: ZoneMetric) -> &'static str {
    match metric {
        ZoneMetric::MeanExitVelocity => "Averages",
        ZoneMetric::SwingCount => "Swing Counts",
    }
}

fn zone_table_html(zones: &ZoneAggregate, population: ZonePopulation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<h3 style=\"{TEXT_STYLE}\">Zone {} ({})</h3>\n\
         <table border=\"1\" style=\"border-collapse: collapse; {TEXT_STYLE}\">\n\
         <tr><th>Zone</th><th>{}</th></tr>",
        match zones.metric {
            ZoneMetric::MeanExitVelocity => "Average EV",
            ZoneMetric::SwingCount => "Swing Count",
        },
        population.description(),
        zones.metric.heading()
    );
    for (zone, value) in zones.iter() {
        let cell = match zones.metric {
            ZoneMetric::MeanExitVelocity => format!("{value:.1}"),
            ZoneMetric::SwingCount => format!("{value:.0}"),
        };
        let _ = writeln!(out, "<tr><td>{zone}</td><td>{cell}</td></tr>");
    }
    out.push_str("</table>\n");
    out
}

/// Escapes the characters with special meaning in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
