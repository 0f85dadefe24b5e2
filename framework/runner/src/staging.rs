use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context};
use wrk_driver_core::prelude::WrkResult;

use crate::options::RunOptions;
use crate::target::Target;

/// Replaced with the host requests are sent to.
pub const HTTP_HOST_PLACEHOLDER: &str = "__HTTP_HOST__";
/// Replaced with [RunOptions::http_port].
pub const HTTP_PORT_PLACEHOLDER: &str = "__HTTP_PORT__";

// The tool doesn't support IPv6.
const HTTP_HOST: &str = "localhost";

/// A URL list with its placeholders filled in, ready for the tool to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUrls {
    local: PathBuf,
    remote: Option<PathBuf>,
}

impl StagedUrls {
    pub fn new(local: PathBuf, remote: Option<PathBuf>) -> Self {
        Self { local, remote }
    }

    /// The staged file on this machine.
    pub fn local_path(&self) -> &Path {
        &self.local
    }

    /// The path to hand to the tool: the copy on the remote host for remote runs, the local file
    /// otherwise.
    pub fn tool_path(&self) -> &Path {
        self.remote.as_deref().unwrap_or(&self.local)
    }
}

/// The host URL that requests are sent to.
pub fn target_host(options: &RunOptions) -> String {
    format!("http://{HTTP_HOST}:{}", options.http_port)
}

/// Fill in the placeholders of a URL list.
pub fn substitute_placeholders(urls: &str, http_port: u16) -> String {
    urls.replace(HTTP_PORT_PLACEHOLDER, &http_port.to_string())
        .replace(HTTP_HOST_PLACEHOLDER, HTTP_HOST)
}

/// Where a local file ends up once copied into `remote_dir`.
pub fn remote_path(remote_dir: &Path, local: &Path) -> WrkResult<PathBuf> {
    let file_name = local
        .file_name()
        .with_context(|| format!("Staged file '{}' has no file name", local.display()))?;
    Ok(remote_dir.join(file_name))
}

/// Write the target's URL list to a new file in the temp directory, and copy it to the remote
/// host for remote runs.
///
/// The copy blocks until it is complete, so the file is in place before the tool is started.
pub fn stage_urls(options: &RunOptions, target: &Target) -> WrkResult<StagedUrls> {
    let urls = std::fs::read_to_string(target.urls_file()).with_context(|| {
        format!(
            "Failed to read URL list '{}'",
            target.urls_file().display()
        )
    })?;
    let urls = substitute_placeholders(&urls, options.http_port);

    let mut file = tempfile::Builder::new()
        .prefix("urls")
        .tempfile_in(&options.temp_dir)
        .with_context(|| {
            format!(
                "Failed to create URL list file in '{}'",
                options.temp_dir.display()
            )
        })?;
    file.write_all(urls.as_bytes())
        .context("Failed to write URL list")?;
    let (_, local) = file.keep().context("Failed to keep URL list file")?;
    log::debug!("Staged URL list at {}", local.display());

    let remote = match &options.remote_wrk {
        Some(remote_host) => {
            copy_to_remote(&local, remote_host, &options.wrk_tmp_dir)?;
            Some(remote_path(&options.wrk_tmp_dir, &local)?)
        }
        None => None,
    };

    Ok(StagedUrls::new(local, remote))
}

fn copy_to_remote(local: &Path, remote_host: &str, remote_dir: &Path) -> WrkResult<()> {
    let destination = format!("{remote_host}:{}", remote_dir.display());
    log::info!("Copying {} to {destination}", local.display());

    let status = Command::new("scp")
        .arg(local)
        .arg(&destination)
        .status()
        .context("Failed to execute 'scp'")?;
    if !status.success() {
        bail!(
            "Copying '{}' to '{destination}' failed with exit code: {status}",
            local.display()
        );
    }

    Ok(())
}
