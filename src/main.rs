// Genesis block miner - CLI

use clap::Parser;
use genesis_miner::cli::{Cli, run};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
