mod arguments;
mod cli;
mod driver;
mod executable;
mod init;
mod log_naming;
mod options;
mod process;
mod progress;
mod staging;
mod target;
mod wrk;
mod wrk_binary;

pub mod prelude {
    pub use crate::arguments::{build_arguments, ArgumentContext, KILL_SIGNAL};
    pub use crate::cli::WrkDriverCli;
    pub use crate::driver::RunDriver;
    pub use crate::executable::{resolve_executable, Executable, SSH_PROGRAM, TIMEOUT_PROGRAM};
    pub use crate::init::init;
    pub use crate::log_naming::LogNaming;
    pub use crate::options::RunOptions;
    pub use crate::process::{Process, RunOutcome};
    pub use crate::staging::{
        remote_path, stage_urls, substitute_placeholders, target_host, StagedUrls,
        HTTP_HOST_PLACEHOLDER, HTTP_PORT_PLACEHOLDER,
    };
    pub use crate::target::Target;
    pub use crate::wrk::{Wrk, DEFAULT_SCRIPT, DEFAULT_TIME};
    pub use crate::wrk_binary::{wrk_path, WRK_PATH_ENV};
    pub use wrk_driver_core::prelude::*;
}
