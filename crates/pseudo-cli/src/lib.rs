//! The `pseudo` command-line tool.
//!
//! Argument parsing and command execution live here so they can be tested
//! without spawning the binary; `main.rs` only wires them to the process.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

use pseudo_eval::{
    AssertionMode, EvalError, Interpreter, RunnerConfig, TestFramework, TestStatus, Value,
};
use pseudo_parser::{parse_literal, ParseError};
use thiserror::Error;
use tracing::debug;

pub const USAGE: &str = "\
Pseudocode TDD runner

Usage:
  pseudo run <impl> <tests> [options]   Run a test script against an implementation
      --suite <name>                    Suite name (default from config, else \"Default\")
      --all-assertions                  Check every assertion line, not only the first
      --json                            Print the suite as JSON
      --config <file>                   Read runner settings from a JSON file
  pseudo call <impl> <function> [literal...]
                                        Call one function with literal arguments
  pseudo reference                      Print the language reference
  pseudo help                           Show this help message
  pseudo version                        Show version information
";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Enable with `RUST_LOG=pseudo_eval=debug` or `RUST_LOG=pseudo_parser=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

// ══════════════════════════════════════════════════════════════════════════════
// Errors
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad command line; the caller shows the usage text.
    #[error("{0}")]
    Usage(String),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::UnknownCommand(_))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Arguments
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Call {
        implementation: PathBuf,
        function: String,
        literals: Vec<String>,
    },
    Reference,
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub implementation: PathBuf,
    pub tests: PathBuf,
    pub suite: Option<String>,
    pub all_assertions: bool,
    pub json: bool,
    pub config: Option<PathBuf>,
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Err(CliError::Usage("Missing command".to_string()));
    };

    match command.as_str() {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "version" | "--version" | "-v" => Ok(Command::Version),
        "reference" => Ok(Command::Reference),
        "run" => parse_run(rest).map(Command::Run),
        "call" => match rest {
            [implementation, function, literals @ ..] => Ok(Command::Call {
                implementation: PathBuf::from(implementation),
                function: function.clone(),
                literals: literals.to_vec(),
            }),
            _ => Err(CliError::Usage(
                "'call' needs an implementation file and a function name".to_string(),
            )),
        },
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

fn parse_run(args: &[String]) -> Result<RunOptions, CliError> {
    let mut options = RunOptions::default();
    let mut files = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--suite" => options.suite = Some(flag_value(&mut iter, "--suite")?),
            "--config" => options.config = Some(flag_value(&mut iter, "--config")?.into()),
            "--all-assertions" => options.all_assertions = true,
            "--json" => options.json = true,
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("Unknown option '{flag}'")));
            }
            _ => files.push(arg),
        }
    }

    match files.as_slice() {
        [implementation, tests] => {
            options.implementation = PathBuf::from(implementation);
            options.tests = PathBuf::from(tests);
            Ok(options)
        }
        _ => Err(CliError::Usage(
            "'run' needs an implementation file and a test file".to_string(),
        )),
    }
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<String, CliError> {
    iter.next()
        .cloned()
        .ok_or_else(|| CliError::Usage(format!("'{flag}' needs a value")))
}

// ══════════════════════════════════════════════════════════════════════════════
// Commands
// ══════════════════════════════════════════════════════════════════════════════

/// How a successfully executed command should end the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The suite ran and is red.
    TestsFailed,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::TestsFailed => 1,
        }
    }
}

/// Execute a parsed command, writing its normal output to `out`.
pub fn execute(command: &Command, out: &mut impl Write) -> Result<Outcome, CliError> {
    match command {
        Command::Run(options) => run_command(options, out),
        Command::Call {
            implementation,
            function,
            literals,
        } => {
            let value = call_command(implementation, function, literals)?;
            writeln!(out, "{value}")?;
            Ok(Outcome::Success)
        }
        Command::Reference => {
            write!(out, "{}", pseudo_types::reference::generate_reference())?;
            Ok(Outcome::Success)
        }
        Command::Help => {
            write!(out, "{USAGE}")?;
            Ok(Outcome::Success)
        }
        Command::Version => {
            writeln!(out, "pseudo {}", env!("CARGO_PKG_VERSION"))?;
            Ok(Outcome::Success)
        }
    }
}

fn run_command(options: &RunOptions, out: &mut impl Write) -> Result<Outcome, CliError> {
    let config = load_config(options)?;
    let implementation = read_file(&options.implementation)?;
    let tests = read_file(&options.tests)?;

    let mut framework = TestFramework::with_config(config);
    let suite = match &options.suite {
        Some(name) => framework.run_tests(&implementation, &tests, name),
        None => framework.run_tests_default(&implementation, &tests),
    };
    let status = framework.determine_status(&suite);

    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&suite)?)?;
    } else {
        writeln!(out, "{suite}")?;
        writeln!(out, "status: {status}")?;
    }

    if status == TestStatus::Red {
        Ok(Outcome::TestsFailed)
    } else {
        Ok(Outcome::Success)
    }
}

fn call_command(implementation: &Path, function: &str, literals: &[String]) -> Result<Value, CliError> {
    let source = read_file(implementation)?;
    let args = literals
        .iter()
        .map(|text| parse_literal(text))
        .collect::<Result<Vec<_>, _>>()?;

    let mut interpreter = Interpreter::new();
    interpreter.load_code(&source);
    Ok(interpreter.execute(function, &args)?)
}

/// Config file first, then command-line flags on top.
fn load_config(options: &RunOptions) -> Result<RunnerConfig, CliError> {
    let mut config = match &options.config {
        Some(path) => RunnerConfig::from_json(&read_file(path)?).map_err(|source| {
            CliError::Config {
                path: path.clone(),
                source,
            }
        })?,
        None => RunnerConfig::default(),
    };
    if options.all_assertions {
        config.assertion_mode = AssertionMode::All;
    }
    debug!(?config, "runner config");
    Ok(config)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
