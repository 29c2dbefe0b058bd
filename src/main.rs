use anyhow::Result;
use std::process::ExitCode;
use sxm_net_cleanup::cli::{self, Invocation, EXIT_USAGE};

fn main() -> Result<ExitCode> {
    match cli::parse_args(std::env::args_os()) {
        Invocation::Help { usage } => {
            println!("{}", usage);
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Version { text } => {
            print!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Usage { usage, error } => {
            eprintln!("{}", error);
            println!("{}", usage);
            Ok(ExitCode::from(EXIT_USAGE))
        }
        Invocation::Run(cli) => cli.run(),
    }
}
