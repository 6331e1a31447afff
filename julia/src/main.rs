#![deny(missing_docs)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::result_large_err)]
//! `julia` renders the points of a region of the complex plane that stay bounded under
//! `z <- z * z + c` to a black and white image.
//!
//! The grid is square with `2^(n+9)` pixels per side, where `n` is the one required argument.
//! Execute `julia --help` for a description of the command line options.

use std::path::PathBuf;
use std::process::exit;
use std::thread;
use std::time::Instant;

use clap::{Arg, ArgMatches, Command};
use log::{debug, info};
use simplog::SimpleLogger;

use errors::*;
use julialib::bitmap::write_bitmap;
use julialib::region::{GridSize, PlaneMapper};
use julialib::render::{render_with_threads, Parameters};

/// We'll put our errors in an `errors` module, and other modules in this crate will
/// `use crate::errors::*;` to get access to everything `error_chain` creates.
pub mod errors;

/// Name of the file written when no output is specified
const DEFAULT_OUTPUT: &str = "image.pbm";

/// `Options` gathers the information from parsing the command line options
struct Options {
    exponent: u32,
    output: PathBuf,
    threads: usize,
}

/// Main for julia binary - call `run()` and print any error that results or exit silently if OK
fn main() {
    match run() {
        Err(ref e) => {
            eprintln!("error: {}", e);

            for e in e.iter().skip(1) {
                eprintln!("caused by: {}", e);
            }

            // The backtrace is generated if env var `RUST_BACKTRACE` is set to `1` or `full`
            if let Some(backtrace) = e.backtrace() {
                eprintln!("backtrace: {:?}", backtrace);
            }

            exit(1);
        }
        Ok(_) => exit(0),
    }
}

/*
    Compute the grid then write it out. The output file is only touched once all points have
    been evaluated.
*/
fn run() -> Result<()> {
    let options = parse_args(get_matches());

    let size = GridSize::from_exponent(options.exponent)?;
    let parameters = Parameters::default();

    log_parameters(&parameters, size);

    info!("Starting computing pixels convergence using {} threads", options.threads);
    let start = Instant::now();
    let grid = render_with_threads(&parameters, size, options.threads)?;
    let seconds = start.elapsed().as_secs_f64();

    info!(
        "Computed {} pixels in {} seconds i.e. {} Mpx/s",
        size.count(),
        seconds,
        size.count() as f64 / seconds / 1.0e6
    );
    debug!("{} of {} pixels are bounded", grid.bounded_count(), size.count());

    write_bitmap(&options.output, &grid)
        .chain_err(|| format!("Could not write image to '{}'", options.output.display()))?;

    info!("Image written to '{}'", options.output.display());

    Ok(())
}

fn log_parameters(parameters: &Parameters, size: GridSize) {
    let mapper = PlaneMapper::new(&parameters.region, size.pixels());

    info!("Grid of size {}", size.pixels());
    info!("Grid parameters:");
    info!("{} x {} pixels", size.pixels(), size.pixels());
    info!("x_min = {}", parameters.region.xmin());
    info!("x_max = {}", parameters.region.xmax());
    info!("y_min = {}", parameters.region.ymin());
    info!("y_max = {}", parameters.region.ymax());
    info!("dx = {}", mapper.dx());
    info!("dy = {}", mapper.dy());
    info!("c = {}", parameters.constant);
    info!("limit = {}", parameters.limit);
}

// Parse the command line arguments using clap
fn get_matches() -> ArgMatches {
    let app = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"));

    let app = app
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .num_args(1)
            .value_parser(clap::value_parser!(PathBuf))
            .value_name("FILE")
            .help("Write the image to FILE, a '.png' extension writes a png (default: image.pbm)"))
        .arg(Arg::new("threads")
            .short('t')
            .long("threads")
            .num_args(1)
            .value_parser(clap::value_parser!(usize))
            .value_name("THREADS")
            .help("Set number of threads used to compute the grid (min: 1, default: cores available)"))
        .arg(Arg::new("verbosity")
            .short('v')
            .long("verbosity")
            .num_args(1)
            .value_name("VERBOSITY_LEVEL")
            .help("Set verbosity level for output (trace, debug, info, warn, error (default))"))
        .arg(Arg::new("size_exponent")
            .required(true)
            .value_parser(clap::value_parser!(u32))
            .value_name("SIZE_EXPONENT")
            .help("The grid has 2^(SIZE_EXPONENT + 9) pixels per side, 0 gives 512 x 512"));

    app.get_matches()
}

// Determine the number of threads to use to compute the grid
// - default (if value is not provided on the command line) of the number of cores
fn num_threads(matches: &ArgMatches) -> usize {
    match matches.get_one::<usize>("threads") {
        Some(num_threads) => *num_threads,
        None => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
    }
}

// Parse the command line arguments. clap has already exited with a usage error if the
// required size is missing or is not a non-negative integer.
fn parse_args(matches: ArgMatches) -> Options {
    let verbosity = matches.get_one::<String>("verbosity").map(|s| s.as_str());
    SimpleLogger::init_prefix_timestamp(verbosity, true, false);

    debug!(
        "'{}' version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Options {
        exponent: matches.get_one::<u32>("size_exponent").copied().unwrap_or_default(),
        output: matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        threads: num_threads(&matches),
    }
}
