use coderange::{
    code_range::{consolidate_code_ranges, inverse_code_range, CodeRange},
    pattern::{find_all_code_ranges, BuildError, Pattern},
};

use clap::{App, Arg, ArgMatches};
use slog::{debug, o, Discard, Drain, Logger};
use slog_term::{FullFormat, TermDecorator};

enum Error {
    Pattern(BuildError),
    IO(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

impl From<BuildError> for Error {
    fn from(e: BuildError) -> Error {
        Error::Pattern(e)
    }
}

fn parse_arguments() -> ArgMatches<'static> {
    App::new("coderange-find")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Mitja Karhusaari <mitja@karhusaari.me>")
        .about("Prints the line and column ranges of every match of a pattern")
        .arg(Arg::with_name("source")
             .help("File to search")
             .value_name("SOURCE")
             .required(true)
             .index(1))
        .arg(Arg::with_name("pattern")
             .help("Text to search for")
             .value_name("PATTERN")
             .required(true)
             .index(2))
        .arg(Arg::with_name("regex")
             .help("Interprets PATTERN as a regular expression")
             .long("regex")
             .short("r"))
        .arg(Arg::with_name("consolidate")
             .help("Merges overlapping and touching matches")
             .long("consolidate")
             .short("c"))
        .arg(Arg::with_name("invert")
             .help("Prints the ranges between the matches instead")
             .long("invert")
             .short("i"))
        .arg(Arg::with_name("verbose")
             .help("Enables verbose logging")
             .long("verbose")
             .short("v"))
        .get_matches()
}

fn main() {
    let args = parse_arguments();

    let logger = if args.is_present("verbose") {
        let decorator = TermDecorator::new().build();
        let drain = FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        Logger::root(drain, o!())
    } else {
        Logger::root(Discard, o!())
    };

    match run(&args, &logger) {
        Ok(ranges) => {
            for range in ranges {
                println!("{}", range);
            }
        },
        Err(Error::IO(io)) => {
            eprintln!("IO error: {}", io);
            std::process::exit(1);
        },
        Err(Error::Pattern(err)) => {
            eprintln!("Invalid pattern: {}", err);
            std::process::exit(1);
        },
    }
}

fn run(args: &ArgMatches, logger: &Logger) -> Result<Vec<CodeRange>, Error> {
    // Both arguments are required, so clap guarantees their presence.
    let file_path = args.value_of("source").unwrap_or_default();
    let pattern = args.value_of("pattern").unwrap_or_default();

    let source = std::fs::read_to_string(file_path)?;

    let pattern = if args.is_present("regex") {
        Pattern::regex(pattern)?
    } else {
        Pattern::literal(pattern)
    };

    let mut ranges = find_all_code_ranges(&source, &pattern);
    debug!(logger, "searched source"; "file" => file_path, "matches" => ranges.len());

    if args.is_present("consolidate") {
        ranges = consolidate_code_ranges(ranges);
        debug!(logger, "consolidated matches"; "ranges" => ranges.len());
    }

    if args.is_present("invert") {
        ranges = inverse_code_range(ranges);
        debug!(logger, "inverted matches"; "ranges" => ranges.len());
    }

    Ok(ranges)
}
