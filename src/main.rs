use clap::Parser;
use stratsim::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
