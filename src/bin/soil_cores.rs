//! Soil cores calculator CLI

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use soil_cores::{
    Calculation, CalculationRecord, DEFAULT_RANGES_FILE, InputRanges, Session, X_AXIS_LABEL,
    Y_AXIS_LABEL, format_result, plot_points,
};

#[derive(Parser)]
#[command(name = "soil-cores")]
#[command(about = "Soil cores calculator (Gilbert 1987, Fertcare Sampling Guide 2019)")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// TOML file with suggested input ranges and defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Number of soil cores needed for a target error
    Cores {
        /// Allowed sampling error (%)
        #[arg(short, long)]
        error: Option<f64>,

        /// Coefficient of variation (%)
        #[arg(long)]
        cv: Option<f64>,
    },

    /// Sampling error achieved with a number of soil cores
    Error {
        /// Number of soil cores
        #[arg(short = 'n', long)]
        cores: Option<f64>,

        /// Coefficient of variation (%)
        #[arg(long)]
        cv: Option<f64>,
    },

    /// Interactive session reading commands from stdin
    Session,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let ranges = load_ranges(cli.config.as_deref())?;
    let stdout = io::stdout();

    match cli.command {
        Commands::Cores { error, cv } => {
            let calc = Calculation::CoresFromError {
                error_percent: error.unwrap_or(ranges.error.default),
                cv: cv.unwrap_or(ranges.cv.default),
            };
            run_once(calc, &ranges, &mut stdout.lock())
        }
        Commands::Error { cores, cv } => {
            let calc = Calculation::ErrorFromCores {
                cores: cores.unwrap_or(ranges.cores.default),
                cv: cv.unwrap_or(ranges.cv.default),
            };
            run_once(calc, &ranges, &mut stdout.lock())
        }
        Commands::Session => {
            let stdin = io::stdin();
            run_session(stdin.lock(), &mut stdout.lock(), &ranges)
                .context("interactive session failed")
        }
    }
}

fn load_ranges(path: Option<&Path>) -> Result<InputRanges> {
    match path {
        Some(path) => InputRanges::load(path)
            .with_context(|| format!("loading input ranges from {}", path.display())),
        None if Path::new(DEFAULT_RANGES_FILE).exists() => InputRanges::load(DEFAULT_RANGES_FILE)
            .with_context(|| format!("loading input ranges from {DEFAULT_RANGES_FILE}")),
        None => Ok(InputRanges::default()),
    }
}

fn run_once(calc: Calculation, ranges: &InputRanges, out: &mut impl Write) -> Result<()> {
    let mut session = Session::new();
    for advisory in ranges.check(&calc) {
        writeln!(out, "warning: {advisory}")?;
    }
    match session.submit_calculation(calc) {
        Ok(record) => {
            writeln!(out, "{}", format_result(&record))?;
            Ok(())
        }
        Err(err) => bail!("calculation refused: {err}"),
    }
}

const HELP: &str = "\
commands:
  cores [error] [cv]   number of soil cores for an error (%)
  error [cores] [cv]   error (%) achieved with a number of cores
  log                  list past calculations
  plot                 scatter points of past calculations
  export               past calculations as TOML
  clear                clear past calculations
  help                 show this message
  quit                 leave the session";

fn run_session(input: impl BufRead, out: &mut impl Write, ranges: &InputRanges) -> Result<()> {
    let mut session = Session::new();
    tracing::info!("session started");
    writeln!(out, "{HELP}")?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match command {
            "cores" | "error" => {
                let calc = match parse_calculation(command, args, ranges) {
                    Ok(calc) => calc,
                    Err(msg) => {
                        writeln!(out, "{msg}")?;
                        continue;
                    }
                };
                for advisory in ranges.check(&calc) {
                    writeln!(out, "warning: {advisory}")?;
                }
                match session.submit_calculation(calc) {
                    Ok(record) => writeln!(out, "{}", format_result(&record))?,
                    Err(err) => writeln!(out, "calculation refused: {err}")?,
                }
            }
            "log" => write_log(out, session.log())?,
            "plot" => {
                writeln!(out, "x: {X_AXIS_LABEL}, y: {Y_AXIS_LABEL}")?;
                for point in plot_points(session.log()) {
                    writeln!(
                        out,
                        "{} ({:.2}, {}) {}",
                        point.marker.symbol(),
                        point.x,
                        point.y,
                        point.label
                    )?;
                }
            }
            "export" => write!(out, "{}", session.export_log()?)?,
            "clear" => {
                session.clear_log();
                writeln!(out, "Cleared all data.")?;
            }
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => break,
            other => writeln!(out, "unknown command '{other}', type 'help'")?,
        }
    }

    tracing::info!(entries = session.log().len(), "session ended");
    Ok(())
}

fn parse_calculation(
    command: &str,
    args: &[&str],
    ranges: &InputRanges,
) -> Result<Calculation, String> {
    if args.len() > 2 {
        return Err(format!("usage: {command} [value] [cv]"));
    }
    let mut values = args.iter().map(|arg| {
        arg.parse::<f64>()
            .map_err(|_| format!("'{arg}' is not a number"))
    });
    let first = values.next().transpose()?;
    let cv = values.next().transpose()?.unwrap_or(ranges.cv.default);

    Ok(if command == "cores" {
        Calculation::CoresFromError {
            error_percent: first.unwrap_or(ranges.error.default),
            cv,
        }
    } else {
        Calculation::ErrorFromCores {
            cores: first.unwrap_or(ranges.cores.default),
            cv,
        }
    })
}

fn write_log(out: &mut impl Write, log: &[CalculationRecord]) -> io::Result<()> {
    if log.is_empty() {
        return writeln!(out, "no calculations yet");
    }
    for (i, record) in log.iter().enumerate() {
        writeln!(
            out,
            "{}. {:?}: error {:.2}%, cv {}%, cores {:.0}",
            i + 1,
            record.mode,
            record.error_percent,
            record.cv,
            record.result_value
        )?;
    }
    Ok(())
}
