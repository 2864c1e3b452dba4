use clap::Parser;
use etfscan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
