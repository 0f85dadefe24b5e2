use crate::cli::WrkDriverCli;
use clap::Parser;

/// Initialise the CLI and logging for the wrk driver.
pub fn init() -> WrkDriverCli {
    env_logger::init();

    WrkDriverCli::parse()
}
