use clap::Parser;
use stockexplorer::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    env_logger::init();
    run(Cli::parse())
}
