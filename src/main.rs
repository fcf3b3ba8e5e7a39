#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Error, Result};
use clap::{ArgAction, Parser};
use puzzle_framework::PartKind;
use puzzle_framework::runner::OutputHandler;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::settings::{DistanceMethod, EnclosureArg, Settings};

mod settings;
mod solutions;

/// Pipe maze and cosmic expansion puzzle solver.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's solution to run (10 or 11).
    day: u8,

    /// Sets an alternative input file to use over default input.
    #[arg(short, long, value_name = "FILE", conflicts_with = "example")]
    input: Option<PathBuf>,

    /// Use the day's example input instead of the default input.
    #[arg(short, long, action = ArgAction::SetTrue)]
    example: bool,

    /// Measure and print the durations of parsing and solving parts.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,

    /// Strategy to classify cells enclosed by the pipe loop.
    #[arg(long, value_enum, default_value_t)]
    enclosure: EnclosureArg,

    /// Method to find distances between galaxies.
    #[arg(long, value_enum, default_value_t)]
    distance: DistanceMethod,

    /// Expansion factor of empty rows and columns for part one.
    #[arg(long, value_name = "FACTOR", default_value_t = 2)]
    part_one_expansion: u64,

    /// Expansion factor of empty rows and columns for part two.
    #[arg(long, value_name = "FACTOR", default_value_t = 1_000_000)]
    part_two_expansion: u64,

    /// Number of worker threads summing distances; defaults to available parallelism.
    #[arg(long, value_name = "N")]
    workers: Option<NonZeroUsize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            enclosure: self.enclosure.into(),
            distance: self.distance,
            part_one_expansion: self.part_one_expansion,
            part_two_expansion: self.part_two_expansion,
            workers: self.workers,
        }
    }
}

/// Install a stderr log subscriber, filtered by `RUST_LOG` or else by the verbosity count.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read the default input file for a day to a string.
fn get_default_input(day: u8, example: bool) -> Result<String> {
    let filename = if example {
        format!("day{day:02}.example.txt")
    } else {
        format!("day{day:02}.txt")
    };
    let path = PathBuf::from("inputs").join(filename);

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file to a string.
fn get_input(input_file: &Path) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl CliOutputHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out if the duration is
    /// shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {
        // do nothing
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("Input parsed in {formatted_duration}");
        }
    }

    fn part_start(&mut self, part: PartKind) {
        println!("-- {part} --");
    }

    fn part_output(
        &mut self,
        _part: PartKind,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("{output} ({formatted_duration})");
        } else {
            println!("{output}");
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let settings = args.settings();
    info!(day = args.day, ?settings, "running solution");

    let input_str = args.input.as_deref().map_or_else(
        || get_default_input(args.day, args.example),
        get_input,
    )?;
    let mut handler = CliOutputHandler::new(Duration::from_millis(args.min_timing_ms));
    solutions::run_day(args.day, &input_str, &settings, &mut handler, args.timed).map_err(
        |dyn_error| {
            let anyhow_error = Error::from_boxed(dyn_error);
            anyhow_error.context("failed to run solution")
        },
    )
}
