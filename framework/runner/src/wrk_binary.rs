use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use wrk_driver_core::prelude::WrkResult;

/// Environment variable to override the path to the wrk binary.
pub const WRK_PATH_ENV: &str = "WRK_PATH";

/// Get the path to the wrk binary for local runs.
///
/// If the [`WRK_PATH_ENV`] environment variable is set, its value is used as the path to the
/// binary. If it is not set, `wrk` is looked up in the user's `PATH`.
pub fn wrk_path() -> WrkResult<PathBuf> {
    wrk_path_from(env::var(WRK_PATH_ENV).ok().as_deref())
}

fn wrk_path_from(value: Option<&str>) -> WrkResult<PathBuf> {
    match value {
        Some("") => {
            bail!("'{WRK_PATH_ENV}' set to empty string");
        }
        Some("wrk") | None => {
            log::debug!("'{WRK_PATH_ENV}' is not a path so looking in user's 'PATH'");
            which::which("wrk").with_context(|| {
                format!(
                    "wrk binary not found in PATH. Please install wrk or set '{WRK_PATH_ENV}' to the correct path."
                )
            })
        }
        Some(path) => {
            let wrk_path = PathBuf::from(path);
            if !wrk_path.exists() {
                bail!(
                    "Path to wrk binary overwritten with '{WRK_PATH_ENV}={path}' but that path doesn't exist",
                    path = wrk_path.display()
                );
            }
            Ok(wrk_path)
        }
    }
}
