use anyhow::Result;
use clap::Parser;
use riskgauge::cli::{Cli, Commands};
use riskgauge::commands::{self, EvalConfig, ReportConfig};
use riskgauge::formatting::{FormattingConfig, Styler};
use riskgauge::observability;

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init_logging(cli.verbosity);

    let formatting = if cli.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    let styler = Styler::new(formatting.with_color(cli.color));

    match cli.command {
        Commands::Eval {
            metric,
            value,
            format,
        } => commands::evaluate_value(
            EvalConfig {
                metric,
                value,
                format: format.into(),
                registry: cli.registry,
            },
            styler,
        ),
        Commands::Report {
            payload,
            country,
            sector,
            include_missing,
            format,
            output,
        } => commands::run_report(
            ReportConfig {
                payload,
                country,
                sector,
                include_missing,
                format: format.into(),
                output,
                registry: cli.registry,
            },
            styler,
        ),
        Commands::Validate { path } => commands::validate_config(&path, styler),
        Commands::List { format } => {
            commands::list_metrics(cli.registry.as_deref(), format.into(), styler)
        }
        Commands::Init { force } => commands::init_config(force),
    }
}
