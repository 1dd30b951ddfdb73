//! CLI tool to report the kind and name declared by Delphi source files.
//!
//! Usage:
//!   delphi-skeleton check [--strict] `<paths>...`  - Parse files, or every source file in directories
//!   delphi-skeleton tokens `<path>`                - Dump the tokens of one file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use delphi_skeleton::{
    BomDecoder, Decode, Error, FileKind, ParseOptions, SourceReader, TrailingContent, tokenize,
};
use log::{LevelFilter, Log, Metadata, Record, debug};
use walkdir::WalkDir;

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn cli() -> Command {
    Command::new("delphi-skeleton")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reports the kind and name declared by Delphi source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (repeat for debug and trace output)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("check")
                .about("Parse files and print their kind and name")
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Reject anything but comments after the final 'end.'")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("paths")
                        .help("Source files, or directories to search for .dpr, .dpk and .pas files")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print every token of a source file")
                .arg(
                    Arg::new("path")
                        .help("Source file to scan")
                        .required(true)
                        .index(1)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("check", check_matches)) => check(check_matches),
        Some(("tokens", tokens_matches)) => dump_tokens(tokens_matches),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn check(matches: &ArgMatches) -> ExitCode {
    let trailing = if matches.get_flag("strict") {
        TrailingContent::Reject
    } else {
        TrailingContent::Ignore
    };
    let reader = SourceReader::new().options(ParseOptions::new().trailing(trailing));

    let mut had_error = false;

    for root in matches.get_many::<PathBuf>("paths").into_iter().flatten() {
        let files = match collect_sources(root) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("{}: {e}", root.display());
                had_error = true;
                continue;
            }
        };

        for path in files {
            match reader.parse_file(&path) {
                Ok(file) => {
                    println!("{}: {} {}", path.display(), file.kind(), file.name());
                }
                Err(Error::Syntax(e)) => {
                    eprintln!(
                        "{}:{}:{}: {e}",
                        path.display(),
                        e.span.line,
                        e.span.column
                    );
                    had_error = true;
                }
                Err(e @ Error::FileRead { .. }) => {
                    eprintln!("{e}");
                    had_error = true;
                }
                Err(e) => {
                    eprintln!("{}: {e}", path.display());
                    had_error = true;
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn dump_tokens(matches: &ArgMatches) -> ExitCode {
    let Some(path) = matches.get_one::<PathBuf>("path") else {
        return ExitCode::from(2);
    };

    let code = match fs::read(path) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let text = match BomDecoder.decode(&code) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}: unknown file encoding: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    for token in tokenize(&text) {
        println!(
            "{}:{} {} {:?}",
            token.span.line,
            token.span.column,
            token.kind.label(),
            token.text
        );
    }

    ExitCode::SUCCESS
}

/// Expand a path argument: files stay as given, directories are
/// searched recursively for Delphi sources. Symbolic links are not
/// followed.
fn collect_sources(path: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            debug!("searching {}", entry.path().display());
            continue;
        }
        if entry.file_type().is_file() && is_delphi_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_delphi_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FileKind::ALL
                .iter()
                .any(|kind| ext.eq_ignore_ascii_case(kind.extension()))
        })
}
