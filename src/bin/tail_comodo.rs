// src/bin/tail_comodo.rs

//! Driver program _tail-comodo_ drives the [_tclib_].
//!
//! Processes user-passed command-line arguments. Then locates the Comodo
//! Firewall store, sets a signal handler, and runs a [`FwLogProcessor`]
//! which passes each firewall event to a [`PrinterFwEvent`].
//!
//! The signal handler only sends a message on the cancellation channel. The
//! `FwLogProcessor` receives it while sleeping between polls, or between
//! printed rows, and returns; the store connection is then closed and the
//! process exits with status 0.
//!
//! `tail_comodo.rs` is the only place that prints firewall events to STDOUT.
//!
//! [_tclib_]: tclib
//! [`FwLogProcessor`]: tclib::readers::fwlogprocessor::FwLogProcessor
//! [`PrinterFwEvent`]: tclib::printer::printers::PrinterFwEvent

#![allow(non_camel_case_types)]

use std::error::Error as _;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;

use ::anyhow::Context;
use ::clap::error::{ContextKind, ContextValue, ErrorKind};
use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::si_trace_print::stack::stack_offset_set;

use ::tclib::common::{
    RowCount,
    RunMode,
    ENV_VAR_FWDB,
    INTERVAL_SECS_DEFAULT,
    WINDOW_DEFAULT,
};
use ::tclib::data::fwevent::FwEvent;
use ::tclib::debug::printers::{de_err, e_err, e_wrn, write_line};
use ::tclib::error::TailError;
use ::tclib::printer::printers::{ColorChoice, PrinterFwEvent};
use ::tclib::printer::summary::print_summary;
use ::tclib::readers::fweventreader::FwEventReader;
use ::tclib::readers::fwlogprocessor::{
    cancel_channel,
    CancelSend,
    FwLogProcessor,
    TailConfig,
};
use ::tclib::readers::storelocator::locate_store;
use ::tclib::v_out;

// --------------------
// command-line parsing

/// general error exit value, also used after printing `--help`
const EXIT_ERR: u8 = 1;

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = concatcp!(
    "\
Note: The environment variable ", ENV_VAR_FWDB, " overrides the default location
      for the database file to use.

The short forms also work, e.g.
  tail-comodo -25        show the last 25 events
  tail-comodo -f -s 5    follow the log, polling every 5 seconds

---

Version: ", env!("CARGO_PKG_VERSION"), "
License: ", env!("CARGO_PKG_LICENSE"), "
Author: ", env!("CARGO_PKG_AUTHORS"), "
"
);

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
// * bare `-N` and `-?` are rewritten by `cli_normalize_args` before clap
//   sees them.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "tail-comodo",
    version = concatcp!(
        "(tail the Comodo Firewall event log)\n",
        "Version: ", env!("CARGO_PKG_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    override_usage = "tail-comodo [OPTION]",
)]
struct CLI_Args {
    /// Show all firewall events.
    #[clap(
        short = 'a',
        long = "all",
        overrides_with = "follow",
    )]
    all: bool,

    /// Follow the log, displaying events as they occur.
    #[clap(
        short = 'f',
        long = "follow",
        overrides_with = "all",
    )]
    follow: bool,

    /// Show the last N events, where N is a positive number.
    /// May also be passed as "-N", e.g. "-25".
    /// When following, the number of events shown before new events.
    #[clap(
        long = "lines",
        value_name = "N",
        value_parser = cli_parse_lines,
        verbatim_doc_comment,
    )]
    lines: Option<RowCount>,

    /// Sleep interval in seconds between log polling. Default is 1 second.
    #[clap(
        short = 's',
        long = "sleep",
        value_name = "N",
        allow_hyphen_values = true,
        value_parser = cli_parse_interval,
    )]
    sleep: Option<u64>,

    /// Verbose, print some internal info during execution.
    #[clap(
        short = 'v',
        long = "verbose",
    )]
    verbose: bool,

    /// Choose to print the action column using colors.
    #[clap(
        short = 'c',
        long = "color",
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Show timestamps converted from UTC to the local system timezone.
    #[clap(
        short = 'l',
        long = "local",
    )]
    local: bool,

    /// Print a summary of the store queries to stderr before exiting.
    #[clap(long)]
    summary: bool,
}

/// `clap` argument processor for `--lines`.
fn cli_parse_lines(lines: &str) -> std::result::Result<RowCount, String> {
    if lines.is_empty() || !lines.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("number of events must be a positive number, not {:?}", lines));
    }
    match lines.parse::<RowCount>() {
        Ok(0) => Err(String::from("number of events must be larger than zero")),
        Ok(val) => Ok(val),
        Err(err) => Err(format!("number of events {:?} is not usable: {}", lines, err)),
    }
}

/// `clap` argument processor for `--sleep`. Returns seconds.
fn cli_parse_interval(secs: &str) -> std::result::Result<u64, String> {
    let digits: &str = secs.strip_prefix('-').unwrap_or(secs);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(String::from("sleep interval must be numeric"));
    }
    if secs.starts_with('-') {
        return Err(String::from("sleep interval must be larger than zero"));
    }
    match secs.parse::<u64>() {
        Ok(0) => Err(String::from("sleep interval must be larger than zero")),
        Ok(val) => Ok(val),
        Err(err) => Err(format!("sleep interval {:?} is not usable: {}", secs, err)),
    }
}

/// Rewrite the short forms `-N` and `-?` into arguments `clap` accepts.
///
/// * `-N` becomes `--lines N`
/// * `-?` becomes `-h`
/// * a bare `-` is dropped
/// * a value following `-s`/`--sleep` or `-c`/`--color` is passed as-is
///
/// Any other argument not starting with `-` is an error.
fn cli_normalize_args(argv: Vec<String>) -> std::result::Result<Vec<String>, String> {
    let mut args: Vec<String> = Vec::with_capacity(argv.len() + 1);
    let mut iter = argv.into_iter();
    if let Some(arg0) = iter.next() {
        args.push(arg0);
    }
    let mut takes_value: bool = false;
    for arg in iter {
        if takes_value {
            takes_value = false;
            args.push(arg);
            continue;
        }
        match arg.as_str() {
            "-" => {}
            "-?" => args.push(String::from("-h")),
            "-s" | "--sleep" | "-c" | "--color" => {
                takes_value = true;
                args.push(arg);
            }
            a if a.len() > 1 && a.starts_with('-') && a[1..].bytes().all(|b| b.is_ascii_digit()) => {
                args.push(String::from("--lines"));
                args.push(String::from(&a[1..]));
            }
            a if a.starts_with('-') => args.push(arg),
            _ => return Err(format!("Invalid argument: {}", arg)),
        }
    }

    Ok(args)
}

/// Processed command-line options.
#[derive(Debug)]
struct CliOptions {
    config: TailConfig,
    color_choice: ColorChoice,
    local_time: bool,
    summary: bool,
}

/// Command-line processing ended the program before tailing.
#[derive(Debug, PartialEq, Eq)]
enum CliExit {
    /// `-h`; print help, exit failure
    Help(String),
    /// `-V`; print version, exit success
    Version(String),
    /// bad argument; print error, exit failure
    Usage(String),
}

impl CliExit {
    fn report(self) -> ExitCode {
        match self {
            CliExit::Help(text) => {
                let _ = write_line(&mut std::io::stdout(), format_args!("{}", text.trim_end()));
                ExitCode::from(EXIT_ERR)
            }
            CliExit::Version(text) => {
                let _ = write_line(&mut std::io::stdout(), format_args!("{}", text.trim_end()));
                ExitCode::SUCCESS
            }
            CliExit::Usage(message) => {
                e_err!("{}", message);
                ExitCode::from(EXIT_ERR)
            }
        }
    }
}

/// Convert a `clap` error into a [`CliExit`].
fn clap_error_to_cliexit(err: clap::Error) -> CliExit {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            CliExit::Help(err.render().to_string())
        }
        ErrorKind::DisplayVersion => CliExit::Version(err.render().to_string()),
        ErrorKind::UnknownArgument => {
            for (kind, value) in err.context() {
                if let (ContextKind::InvalidArg, ContextValue::String(arg)) = (kind, value) {
                    return CliExit::Usage(format!("Invalid option: {}", arg));
                }
            }
            CliExit::Usage(String::from("Invalid option"))
        }
        ErrorKind::ValueValidation => match err.source() {
            Some(source) => CliExit::Usage(source.to_string()),
            None => CliExit::Usage(err.render().to_string()),
        },
        ErrorKind::InvalidValue | ErrorKind::NoEquals => {
            let sleep_arg: bool = err.context().any(|(kind, value)| match (kind, value) {
                (ContextKind::InvalidArg, ContextValue::String(arg)) => arg.contains("--sleep"),
                _ => false,
            });
            match sleep_arg {
                true => CliExit::Usage(String::from("Option \"-s N\" must have number of seconds as an argument")),
                false => CliExit::Usage(err.render().to_string().trim_end().to_string()),
            }
        }
        _ => CliExit::Usage(err.render().to_string().trim_end().to_string()),
    }
}

/// Process user-passed CLI argument strings into expected types.
fn cli_process_args(argv: Vec<String>) -> std::result::Result<CliOptions, CliExit> {
    let args = cli_normalize_args(argv).map_err(CliExit::Usage)?;
    defo!("args {:?}", args);
    let args: CLI_Args = CLI_Args::try_parse_from(args).map_err(clap_error_to_cliexit)?;
    defo!("CLI_Args {:?}", args);

    let mode: RunMode = match (args.follow, args.all) {
        (true, _) => RunMode::Follow,
        (false, true) => RunMode::ShowAll,
        (false, false) => RunMode::ShowLastN,
    };
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => match std::io::stdout().is_terminal() {
            true => ColorChoice::Auto,
            false => ColorChoice::Never,
        },
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    let config = TailConfig {
        mode,
        window: args.lines.unwrap_or(WINDOW_DEFAULT),
        interval: Duration::from_secs(args.sleep.unwrap_or(INTERVAL_SECS_DEFAULT)),
        verbose: args.verbose,
    };

    Ok(CliOptions {
        config,
        color_choice,
        local_time: args.local,
        summary: args.summary,
    })
}

// ---------------
// signal handling

/// Set a process signal handler that sends on the cancellation channel.
///
/// With `ctrlc` feature `termination` this also covers SIGTERM and SIGHUP,
/// and on Windows the console close, logoff and shutdown events.
fn set_signal_handler(cancel_send: CancelSend) -> anyhow::Result<()> {
    defn!();
    ctrlc::set_handler(move || {
        defñ!("signal received");
        // a full channel means a cancel is already pending
        let _ = cancel_send.try_send(());
    })
    .context("ctrlc::set_handler failed")?;
    defx!();

    Ok(())
}

// ----
// main

/// Map the result of a run to an exit code.
fn result_to_exitcode(ret: &Result<(), TailError>) -> ExitCode {
    match ret {
        Ok(_) => ExitCode::SUCCESS,
        // reader of stdout went away, e.g. `tail-comodo -a | head`
        Err(err) if err.is_broken_pipe() => ExitCode::SUCCESS,
        Err(err) => {
            e_err!("{}", err);
            ExitCode::from(EXIT_ERR)
        }
    }
}

/// Process the user-passed command-line arguments.
/// Run the `FwLogProcessor`.
/// Determine a process return code.
pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let argv: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let options: CliOptions = match cli_process_args(argv) {
        Ok(val) => val,
        Err(cliexit) => {
            defx!("{:?}", cliexit);
            return cliexit.report();
        }
    };
    let verbose: bool = options.config.verbose;

    let (cancel_send, cancel_recv) = cancel_channel();
    if let Err(err) = set_signal_handler(cancel_send) {
        e_wrn!("{:#}", err);
    }

    let path = match locate_store() {
        Ok(val) => val,
        Err(err) => {
            e_err!("{}", err);
            defx!("locate_store failed");
            return ExitCode::from(EXIT_ERR);
        }
    };
    v_out!(verbose, "Using firewall db file: {}\n", path);

    let reader = FwEventReader::new(path, verbose);
    let mut processor = FwLogProcessor::new(options.config, reader, cancel_recv);
    let mut printer = PrinterFwEvent::new_stdout(options.color_choice, options.local_time);
    let mut sink = |fwevent: &FwEvent| printer.print_fwevent(fwevent);

    let ret = processor.run(&mut sink);
    // `run` closed the store; closing again is harmless
    let _ = processor.terminate();

    if options.summary {
        if let Err(_err) = print_summary(&processor.summary(), options.color_choice) {
            de_err!("print_summary failed {}", _err);
        }
    }

    let exitcode = result_to_exitcode(&ret);
    defx!("exitcode {:?}", exitcode);

    exitcode
}

// -----
// tests
