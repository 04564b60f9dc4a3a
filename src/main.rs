//! CLI entry point for lsr

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use lsr::{ListCommand, Options, OutputConfig, default_provider};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Determine whether to use color output from the environment.
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(Parser, Debug)]
#[command(name = "lsr")]
#[command(about = "List directory contents")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
struct Args {
    /// Paths to list
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// Show entries starting with '.' plus the '.' and '..' entries
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Long listing: permissions, links, owner, group, size, time, name
    #[arg(short = 'l')]
    long: bool,

    /// Reverse the listing order
    #[arg(short = 'r', long = "reverse")]
    reverse: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long = "recursive")]
    recursive: bool,

    /// Sort by modification time, newest first
    #[arg(short = 't')]
    time: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            all: self.all,
            long_format: self.long,
            reverse: self.reverse,
            recursive: self.recursive,
            sort_by_mod_time: self.time,
        }
    }
}

/// Report a rejected command line.
fn argument_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::UnknownArgument => {
            if let Some(ContextValue::String(token)) = err.get(ContextKind::InvalidArg) {
                eprintln!("lsr: {}", Options::invalid_argument(token));
            } else {
                let _ = err.print();
            }
        }
        _ => {
            let _ = err.print();
        }
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    // Initialize tracing on stderr (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => return argument_error(err),
    };
    let options = args.options();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("lsr: cannot determine working directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output_config = OutputConfig {
        use_color: should_use_color(),
        ..OutputConfig::default()
    };
    let choice = if output_config.use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    let provider = default_provider();
    let command = ListCommand::new(&options, &output_config, provider.as_ref(), cwd);

    match command.run(&args.paths, &mut stdout) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("lsr: error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}
