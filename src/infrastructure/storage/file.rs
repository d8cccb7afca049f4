#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::SessionStore;

/// Persists the session token in a plain file so it survives restarts.
pub struct FileSessionStore {
    pub file_path: PathBuf,
}

impl Default for FileSessionStore {
    fn default() -> FileSessionStore {
        return FileSessionStore::new(PathBuf::from(Config::get(ConfigKey::TokenFile)));
    }
}

impl FileSessionStore {
    pub fn new(file_path: PathBuf) -> FileSessionStore {
        return FileSessionStore { file_path };
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let token = fs::read_to_string(&self.file_path)?.trim().to_string();
        if token.is_empty() {
            return Ok(None);
        }

        return Ok(Some(token));
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).truncate(true).create(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&self.file_path)?;
        // Files created before the mode was applied keep their old bits.
        #[cfg(unix)]
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(token.as_bytes())?;
        file.flush()?;

        tracing::debug!(path = ?self.file_path, "Stored session token");

        return Ok(());
    }

    fn clear(&self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.file_path)?;
        tracing::debug!(path = ?self.file_path, "Cleared session token");

        return Ok(());
    }
}
