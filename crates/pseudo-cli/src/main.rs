use std::env;
use std::io;
use std::process::ExitCode;

use pseudo_cli::{execute, init_tracing, parse_args, USAGE};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = parse_args(&args).and_then(|command| execute(&command, &mut io::stdout().lock()));

    match result {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_usage() {
                eprintln!();
                eprint!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}
