use clap::Parser;
use std::process::ExitCode;
use tempsweep_cli::app;
use tempsweep_cli::args::Args;
use tempsweep_cli::config::Config;
use tempsweep_cli::logging;

/// Same code clap uses for usage errors.
const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration Error: {e}");
            return ExitCode::from(USAGE_ERROR);
        }
    };

    match app::run(&config) {
        Ok(summary) => {
            print!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // The sweep itself finished. Only presenting it failed.
            eprintln!("Application Error: {e}");
            ExitCode::SUCCESS
        }
    }
}
