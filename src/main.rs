use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use u_statcalc::coercion::coerce_column;
use u_statcalc::correlation::{correlate_columns, Alignment, CorrelationConfig};
use u_statcalc::csv_parser::CsvParser;
use u_statcalc::descriptive::describe;
use u_statcalc::hypothesis::HypothesisTester;
use u_statcalc::report::{
    correlation_report, descriptive_report, hypothesis_report, write_report, ReportConfig,
};

#[derive(Parser, Debug)]
#[command(name = "u-statcalc")]
#[command(version)]
#[command(about = "Descriptive statistics, correlation and hypothesis tests for CSV files", long_about = None)]
struct Cli {
    /// Significance level for hypothesis tests
    #[arg(long, default_value_t = 0.05, global = true)]
    alpha: f64,

    /// Also write the report to this file
    #[arg(short, long, value_name = "PATH", global = true)]
    report: Option<PathBuf>,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',', global = true)]
    delimiter: char,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Descriptive statistics, frequency table and histogram
    Describe {
        file: PathBuf,
        /// Analyze one column; without it every numeric cell is used
        #[arg(short, long)]
        column: Option<String>,
    },
    /// Pearson correlation between two columns
    Correlate {
        file: PathBuf,
        col_a: String,
        col_b: String,
        /// Pair values by row, dropping rows invalid in either column
        #[arg(long)]
        pairwise: bool,
    },
    /// One-sample t-test against a population mean
    Ttest {
        file: PathBuf,
        column: String,
        #[arg(long, default_value_t = 0.0)]
        mu: f64,
    },
    /// Welch two-sample t-test
    Welch {
        file: PathBuf,
        col_a: String,
        col_b: String,
    },
    /// Chi-square goodness-of-fit over a categorical column
    Chisq { file: PathBuf, column: String },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<String> {
    let parser = CsvParser::new().delimiter(cli.delimiter as u8);
    let config = ReportConfig::default().alpha(cli.alpha);

    let load = |file: &PathBuf| {
        parser
            .parse_file(file)
            .with_context(|| format!("failed to load {}", file.display()))
    };

    let text = match &cli.command {
        Command::Describe { file, column } => {
            let sample = match column {
                Some(name) => coerce_column(load(file)?.column(name)?)?,
                None => parser
                    .numeric_cells_file(file)
                    .with_context(|| format!("failed to load {}", file.display()))?,
            };
            descriptive_report(&describe(&sample)?, &config)
        }
        Command::Correlate {
            file,
            col_a,
            col_b,
            pairwise,
        } => {
            let alignment = if *pairwise {
                Alignment::Pairwise
            } else {
                Alignment::Independent
            };
            let table = load(file)?;
            let result = correlate_columns(
                &table,
                col_a,
                col_b,
                &CorrelationConfig::default().alignment(alignment),
            )?;
            correlation_report(col_a, col_b, &result)
        }
        Command::Ttest { file, column, mu } => {
            let table = load(file)?;
            hypothesis_report(&HypothesisTester::new(&table).one_sample(column, *mu)?, &config)
        }
        Command::Welch { file, col_a, col_b } => {
            let table = load(file)?;
            hypothesis_report(
                &HypothesisTester::new(&table).two_sample(col_a, col_b)?,
                &config,
            )
        }
        Command::Chisq { file, column } => {
            let table = load(file)?;
            hypothesis_report(&HypothesisTester::new(&table).chi_square(column)?, &config)
        }
    };

    if let Some(path) = &cli.report {
        write_report(path, &text)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }
    Ok(text)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    anyhow::ensure!(
        cli.delimiter.is_ascii(),
        "delimiter must be a single ASCII character"
    );
    anyhow::ensure!(
        cli.alpha > 0.0 && cli.alpha < 1.0,
        "alpha must be between 0 and 1"
    );
    let text = run(cli)?;
    print!("{text}");
    Ok(())
}
