use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::benchmarks::Country;
use crate::formatting::ColorMode;

#[derive(Parser, Debug)]
#[command(name = "riskgauge")]
#[command(about = "Gauge normalization and risk zone classification for financial metrics", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Registry file (TOML, JSON or YAML) used instead of the discovered
    /// .riskgauge.toml
    #[arg(long, global = true, env = "RISKGAUGE_CONFIG")]
    pub registry: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: Show progress information
    /// -vv: Show config discovery and evaluation details
    /// -vvv: Show all trace output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable colors and box-drawing characters
    #[arg(long, global = true)]
    pub plain: bool,

    /// When to color output; overrides NO_COLOR and CLICOLOR
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a single metric value
    Eval {
        /// Metric id, e.g. currentRatio or altmanZScore
        metric: String,

        /// Value to evaluate; "N/A" or omitted means not available
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Evaluate every metric in a scoring-service results file
    Report {
        /// JSON results payload ("-" reads stdin)
        payload: PathBuf,

        /// Country for industry benchmarks (overrides the payload)
        #[arg(long, value_parser = parse_country)]
        country: Option<Country>,

        /// Industry sector for benchmarks (overrides the payload)
        #[arg(long)]
        sector: Option<String>,

        /// Also list registered metrics missing from the payload
        #[arg(long)]
        include_missing: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a registry file, listing every problem found
    Validate {
        /// Registry file to check
        path: PathBuf,
    },

    /// List registered metrics and their gauges
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Markdown => Self::Markdown,
            OutputFormat::Terminal => Self::Terminal,
        }
    }
}

fn parse_country(s: &str) -> Result<Country, String> {
    s.parse()
}
