mod age;
mod calendar;
mod clock;
mod input;
mod report;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calendar::CalendarDate;
use clock::{Clock, FixedClock, SystemClock};
use report::Report;

/// Computes an age breakdown and life stage from a date of birth.
#[derive(Debug, Parser)]
#[command(name = "agecalc", version, about, long_about = None)]
struct Cli {
    /// Date of birth (DD-MM-YYYY, DD/MM/YYYY, DD.MM.YYYY or DD MM YYYY);
    /// prompts interactively when omitted
    #[arg(long)]
    dob: Option<String>,

    /// Use this date instead of the system date
    #[arg(long, env = "AGECALC_TODAY", value_parser = parse_calendar_date)]
    today: Option<CalendarDate>,

    /// Reject dates of birth more than this many years ago
    #[arg(long, default_value_t = input::DEFAULT_MAX_AGE_YEARS)]
    max_age: i32,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_calendar_date(text: &str) -> Result<CalendarDate, String> {
    let (day, month, year) = input::parse_date(text).map_err(|e| e.to_string())?;
    CalendarDate::new(day, month, year).map_err(|e| e.to_string())
}

const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn run<R: BufRead, W: Write>(cli: &Cli, clock: &dyn Clock, reader: R, mut output: W) -> Result<()> {
    // Read once so validation and computation agree across midnight.
    let today = clock.today();
    info!(%today, "resolved current date");

    if !cli.json {
        writeln!(output, "{}\n", report::BANNER)?;
    }

    let dob = match &cli.dob {
        Some(text) => input::accept_dob(text, today, cli.max_age)
            .with_context(|| format!("Rejected date of birth {text:?}"))?,
        None => input::read_dob(reader, &mut output, today, cli.max_age)?,
    };
    info!(%dob, weekday = dob.day_name(), "accepted date of birth");

    let report = Report::new(dob, today);
    if cli.json {
        writeln!(output, "{}", report.render_json()?)?;
    } else {
        write!(output, "\n{}", report.render_text())?;
        writeln!(output, "{}", report::FAREWELL)?;
    }
    output.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(
            cli.verbose,
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let clock: Box<dyn Clock> = match cli.today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };

    run(&cli, clock.as_ref(), io::stdin().lock(), io::stdout().lock())
}
