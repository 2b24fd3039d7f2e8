mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Logging is initialized inside run_from_args once the config and flags are known.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("durreq error: {:#}", err);
        std::process::exit(1);
    }
}
