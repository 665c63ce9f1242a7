use clap::Parser;
use quest::cli::commands::{Cli, Commands};
use quest::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init(args)) => {
            // Init is handled before workspace discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
