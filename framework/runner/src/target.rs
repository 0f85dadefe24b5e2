use std::path::{Path, PathBuf};

/// What to send load at: a file of request specs, one URL per line, containing the
/// [crate::staging::HTTP_HOST_PLACEHOLDER] and [crate::staging::HTTP_PORT_PLACEHOLDER] placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    urls_file: PathBuf,
}

impl Target {
    pub fn new<P>(urls_file: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            urls_file: urls_file.into(),
        }
    }

    pub fn urls_file(&self) -> &Path {
        &self.urls_file
    }
}
