use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::Write;

use crate::classification::Zone;
use crate::config::{MetricRegistry, MetricSpec};
use crate::formatting::Styler;
use crate::report::{MetricReport, Report, ReportHeader, ReportSummary};

const BAR_WIDTH: usize = 24;
const GAUGE_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait ReportWriter {
    /// A whole evaluated report.
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
    /// A single evaluated metric.
    fn write_metric(&mut self, metric: &MetricReport) -> anyhow::Result<()>;
    /// The registered metrics and their gauges.
    fn write_registry(&mut self, registry: &MetricRegistry) -> anyhow::Result<()>;
    fn flush(&mut self) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: serde::Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_metric(&mut self, metric: &MetricReport) -> anyhow::Result<()> {
        self.write_json(metric)
    }

    fn write_registry(&mut self, registry: &MetricRegistry) -> anyhow::Result<()> {
        self.write_json(registry.specs())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, header: &ReportHeader) -> anyhow::Result<()> {
        writeln!(self.writer, "# Risk Report: {}", report_title(header))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &ReportSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Zone | Metrics |")?;
        writeln!(self.writer, "|------|---------|")?;
        writeln!(self.writer, "| Critical | {} |", summary.critical)?;
        writeln!(self.writer, "| Adequate | {} |", summary.adequate)?;
        writeln!(self.writer, "| Good | {} |", summary.good)?;
        writeln!(self.writer, "| N/A | {} |", summary.not_available)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_metric_table(&mut self, metrics: &[MetricReport], benchmarks: bool) -> anyhow::Result<()> {
        if benchmarks {
            writeln!(self.writer, "| Metric | Value | Zone | Industry |")?;
            writeln!(self.writer, "|--------|-------|------|----------|")?;
        } else {
            writeln!(self.writer, "| Metric | Value | Zone |")?;
            writeln!(self.writer, "|--------|-------|------|")?;
        }
        for metric in metrics {
            if benchmarks {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} |",
                    metric.title,
                    metric.display_value,
                    metric.gauge.zone_label,
                    metric.benchmark.as_deref().unwrap_or("-")
                )?;
            } else {
                writeln!(
                    self.writer,
                    "| {} | {} | {} |",
                    metric.title, metric.display_value, metric.gauge.zone_label
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_header(&report.header)?;
        if let Some(context) = &report.benchmarks {
            writeln!(
                self.writer,
                "Industry benchmarks: {}, `{}`",
                context.country, context.sector
            )?;
            writeln!(self.writer)?;
        }
        self.write_summary(&report.summary)?;
        writeln!(self.writer, "## Metrics")?;
        writeln!(self.writer)?;
        self.write_metric_table(&report.metrics, report.benchmarks.is_some())
    }

    fn write_metric(&mut self, metric: &MetricReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", metric.title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- Value: {}", metric.display_value)?;
        writeln!(self.writer, "- Zone: {} ({})", metric.gauge.zone_label, metric.gauge.zone)?;
        if let Some(marker) = metric.gauge.marker_pct {
            writeln!(self.writer, "- Position: {marker:.1}%")?;
        }
        let ticks: Vec<String> = metric
            .gauge
            .threshold_ticks
            .iter()
            .map(|tick| tick.value.to_string())
            .collect();
        if !ticks.is_empty() {
            writeln!(self.writer, "- Thresholds: {}", ticks.join(" / "))?;
        }
        if let Some(benchmark) = &metric.benchmark {
            writeln!(self.writer, "- Industry: {benchmark}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_registry(&mut self, registry: &MetricRegistry) -> anyhow::Result<()> {
        writeln!(self.writer, "| Id | Title | Kind | Shape | Scale | Thresholds |")?;
        writeln!(self.writer, "|----|-------|------|-------|-------|------------|")?;
        for spec in registry.iter() {
            let [id, title, kind, shape, scale, thresholds] = registry_row(spec);
            writeln!(
                self.writer,
                "| `{id}` | {title} | {kind} | {shape} | {scale} | {thresholds} |"
            )?;
        }
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Tables and gauge bars for a terminal.
pub struct TerminalWriter<W: Write> {
    writer: W,
    styler: Styler,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, styler: Styler) -> Self {
        Self { writer, styler }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        if self.styler.config().unicode {
            table.load_preset(UTF8_FULL);
        } else {
            table.load_preset(ASCII_MARKDOWN);
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);
        if self.styler.uses_color() {
            table.enforce_styling();
        }
        table
    }

    fn zone_cell(&self, zone: Zone, text: &str) -> Cell {
        let cell = Cell::new(text);
        if !self.styler.uses_color() {
            return cell;
        }
        match zone {
            Zone::Good => cell.fg(Color::Green),
            Zone::Adequate => cell.fg(Color::Yellow),
            Zone::Critical => cell.fg(Color::Red),
            Zone::NotAvailable => cell.fg(Color::DarkGrey),
        }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let title = format!("Risk Report: {}", report_title(&report.header));
        writeln!(self.writer, "{}", self.styler.header(&title))?;
        if let Some(context) = &report.benchmarks {
            let line = format!("Industry benchmarks: {}, {}", context.country, context.sector);
            writeln!(self.writer, "{}", self.styler.dim(&line))?;
        }

        let with_benchmarks = report.benchmarks.is_some();
        let mut table = self.table();
        let mut header = vec!["Metric", "Value", "Zone", "Gauge"];
        if with_benchmarks {
            header.push("Industry");
        }
        table.set_header(header);

        let bars = self.styler.without_color();
        for metric in &report.metrics {
            let mut row = vec![
                Cell::new(&metric.title),
                Cell::new(&metric.display_value),
                self.zone_cell(metric.gauge.zone, &metric.gauge.zone_label),
                Cell::new(bars.gauge_bar(&metric.gauge, BAR_WIDTH)),
            ];
            if with_benchmarks {
                row.push(Cell::new(metric.benchmark.as_deref().unwrap_or("-")));
            }
            table.add_row(row);
        }
        writeln!(self.writer, "{table}")?;

        let summary = &report.summary;
        writeln!(
            self.writer,
            "{} critical, {} adequate, {} good, {} not available",
            self.styler.zone(Zone::Critical, &summary.critical.to_string()),
            self.styler.zone(Zone::Adequate, &summary.adequate.to_string()),
            self.styler.zone(Zone::Good, &summary.good.to_string()),
            summary.not_available
        )?;
        Ok(())
    }

    fn write_metric(&mut self, metric: &MetricReport) -> anyhow::Result<()> {
        let gauge = &metric.gauge;
        writeln!(
            self.writer,
            "{}  {}  {}",
            self.styler.bold(&metric.title),
            metric.display_value,
            self.styler.zone(gauge.zone, &gauge.zone_label)
        )?;
        writeln!(self.writer, "{}", self.styler.gauge_bar(gauge, GAUGE_WIDTH))?;

        let captions: Vec<String> = gauge
            .bands
            .iter()
            .map(|band| {
                let text = match (&gauge.middle_caption, band.band) {
                    (Some(caption), crate::classification::Band::Middle) => caption.text.as_str(),
                    _ => band.label.as_str(),
                };
                self.styler.zone(band.zone, text)
            })
            .collect();
        if !captions.is_empty() {
            writeln!(self.writer, "{}", captions.join(" | "))?;
        }
        let ticks: Vec<String> = gauge
            .threshold_ticks
            .iter()
            .map(|tick| tick.value.to_string())
            .collect();
        if !ticks.is_empty() {
            let line = format!("thresholds: {}", ticks.join(" / "));
            writeln!(self.writer, "{}", self.styler.dim(&line))?;
        }
        if let Some(benchmark) = &metric.benchmark {
            writeln!(self.writer, "industry: {benchmark}")?;
        }
        Ok(())
    }

    fn write_registry(&mut self, registry: &MetricRegistry) -> anyhow::Result<()> {
        let mut table = self.table();
        table.set_header(vec!["Id", "Title", "Kind", "Shape", "Scale", "Thresholds"]);
        for spec in registry.iter() {
            table.add_row(registry_row(spec).to_vec());
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn report_title(header: &ReportHeader) -> String {
    let company = header.company_name.as_deref().unwrap_or("Unnamed company");
    match &header.fiscal_year {
        Some(year) => format!("{company} (FY {year})"),
        None => company.to_string(),
    }
}

fn registry_row(spec: &MetricSpec) -> [String; 6] {
    let scale = spec.gauge.scale();
    let (t1, t2) = spec.gauge.threshold_values();
    let thresholds = if spec.gauge.is_two_band() || t1 == t2 {
        t1.to_string()
    } else {
        format!("{t1} / {t2}")
    };
    [
        spec.id.clone(),
        spec.title.clone(),
        spec.kind.label().to_string(),
        spec.gauge.shape_name().replace('_', "-"),
        format!("[{}, {}]", scale.min, scale.max),
        thresholds,
    ]
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
    styler: Styler,
) -> Box<dyn ReportWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, styler)),
    }
}
