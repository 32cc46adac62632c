//! Token pair persisted as a JSON file between CLI invocations.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use session::{SessionTokens, StorageError, TokenStore};

pub const TOKEN_FILE_VAR: &str = "VIDSYNC_TOKEN_FILE";

/// `~/.vidsync/tokens.json`; `None` when the platform reports no home directory.
#[must_use]
pub fn default_token_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vidsync").join("tokens.json"))
}

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<SessionTokens> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "could not read token file");
                return None;
            }
        };
        match serde_json::from_slice::<SessionTokens>(&raw) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "ignoring malformed token file");
                None
            }
        }
    }

    fn save(&self, tokens: &SessionTokens) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(tokens).map_err(|e| StorageError::Write(e.to_string()))?;
        self.write_atomic(&json).map_err(|e| StorageError::Write(format!("{}: {e}", self.path.display())))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Unavailable(format!("{}: {e}", self.path.display()))),
        }
    }
}
