use pagehaul_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // File logging is best-effort; an unwritable state dir falls back to stderr.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("pagehaul error: {:#}", err);
        std::process::exit(1);
    }
}
