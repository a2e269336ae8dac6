use cabundle_core::logging;
use cabundle_core::UpdateError;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("cabundle error: {:#}", err);
        let code = err
            .downcast_ref::<UpdateError>()
            .map_or(1, UpdateError::exit_code);
        std::process::exit(code);
    }
}
