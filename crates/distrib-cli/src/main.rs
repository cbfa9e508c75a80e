use distrib_core::logging;

mod cli;

use crate::cli::{exit_code, Cli};

fn main() {
    // Initialize logging as early as possible; a read-only state dir must not stop downloads.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
    }

    let outcome = Cli::run_from_args();
    if let Err(err) = &outcome {
        eprintln!("distrib-dl error: {:#}", err);
    }
    let code = exit_code(&outcome);
    if code != 0 {
        std::process::exit(code);
    }
}
