use std::process;

use clap::ArgEnum;
use env_logger;
use log;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tape_sort::{ComparisonCounter, SortError, Tape, TapeSorter};

fn main() {
    let arg_parser = build_arg_parser();

    let log_level: LogLevel = arg_parser.value_of_t_or_exit("log_level");
    init_logger(log_level);

    let algorithm: Algorithm = arg_parser.value_of_t_or_exit("algorithm");
    let tapes: usize = arg_parser.value_of_t_or_exit("tapes");
    let count: usize = arg_parser.value_of_t_or_exit("count");
    let max_value: u64 = arg_parser.value_of_t_or_exit("max_value");
    let seed: Option<u64> = arg_parser
        .is_present("seed")
        .then(|| arg_parser.value_of_t_or_exit("seed"));

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("generating {} items (max value: {})", count, max_value);
    let mut tape = Tape::from_iter((0..count).map(|_| rng.gen_range(0..=max_value)));

    let mut sorter = TapeSorter::new();
    let counter = ComparisonCounter::new();

    if let Err(err) = run(&mut sorter, algorithm, tapes, &mut tape, &counter) {
        log::error!("data sorting error: {}", err);
        process::exit(1);
    }

    let sorted = tape.to_vec();
    if sorted.len() != count || sorted.windows(2).any(|pair| pair[0] > pair[1]) {
        log::error!("sorting result check failed");
        process::exit(1);
    }

    println!("algorithm: {:?}, items: {}, tapes: {}", algorithm, count, tapes_used(algorithm, tapes));
    println!("writes: {}", sorter.total_writes());
    println!("comparisons: {}", counter.count());
}

fn run(
    sorter: &mut TapeSorter,
    algorithm: Algorithm,
    tapes: usize,
    tape: &mut Tape<u64>,
    counter: &ComparisonCounter,
) -> Result<(), SortError> {
    match algorithm {
        Algorithm::Classic => {
            sorter.classic_sort_by(tape, counter.compare());
            Ok(())
        }
        Algorithm::Multi => sorter.multi_sort_by(tape, tapes, counter.compare()),
        Algorithm::Balanced => sorter.balanced_sort_by(tape, tapes, counter.compare()),
    }
}

/// Total number of tapes the algorithm works with, input tape included.
fn tapes_used(algorithm: Algorithm, tapes: usize) -> usize {
    match algorithm {
        Algorithm::Classic => 3,
        Algorithm::Multi => tapes + 1,
        Algorithm::Balanced => tapes * 2,
    }
}

#[derive(Copy, Clone, clap::ArgEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn possible_values() -> impl Iterator<Item = clap::PossibleValue<'static>> {
        Self::value_variants().iter().filter_map(|v| v.to_possible_value())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <LogLevel as clap::ArgEnum>::from_str(s, false)
    }
}

#[derive(Copy, Clone, Debug, clap::ArgEnum)]
enum Algorithm {
    Classic,
    Multi,
    Balanced,
}

impl Algorithm {
    pub fn possible_values() -> impl Iterator<Item = clap::PossibleValue<'static>> {
        Algorithm::value_variants().iter().filter_map(|v| v.to_possible_value())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Algorithm as clap::ArgEnum>::from_str(s, false)
    }
}

fn build_arg_parser() -> clap::ArgMatches {
    clap::App::new("tape-sort")
        .about("tape sort benchmark")
        .arg(
            clap::Arg::new("algorithm")
                .short('a')
                .long("algorithm")
                .help("sorting algorithm")
                .takes_value(true)
                .default_value("classic")
                .possible_values(Algorithm::possible_values()),
        )
        .arg(
            clap::Arg::new("tapes")
                .short('t')
                .long("tapes")
                .help("number of auxiliary tapes (multi) or tapes per group (balanced)")
                .takes_value(true)
                .default_value("3"),
        )
        .arg(
            clap::Arg::new("count")
                .short('n')
                .long("count")
                .help("number of items to sort")
                .takes_value(true)
                .default_value("1000"),
        )
        .arg(
            clap::Arg::new("max_value")
                .short('m')
                .long("max-value")
                .help("largest generated item value")
                .takes_value(true)
                .default_value("1000000"),
        )
        .arg(
            clap::Arg::new("seed")
                .short('s')
                .long("seed")
                .help("random number generator seed")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("log_level")
                .short('l')
                .long("loglevel")
                .help("logging level")
                .takes_value(true)
                .default_value("info")
                .possible_values(LogLevel::possible_values()),
        )
        .get_matches()
}

fn init_logger(log_level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(match log_level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        })
        .format_timestamp_millis()
        .init();
}
