//! JSON file holding the CLI defaults and cached session token.

use crate::core::domain::{error::CcpResult, model::defaults::Defaults};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides the defaults file location.
pub const DEFAULTS_PATH_ENV: &str = "CCPCTL_CONF";
const DEFAULTS_FILE_NAME: &str = ".ccpctl.json";

#[derive(Debug, Clone)]
pub struct DefaultsStore {
    path: PathBuf,
}

impl DefaultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$CCPCTL_CONF` when set, otherwise `~/.ccpctl.json`. Falls back to the
    /// working directory when no home directory can be resolved.
    pub fn default_location() -> PathBuf {
        match std::env::var_os(DEFAULTS_PATH_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => dirs::home_dir()
                .unwrap_or_default()
                .join(DEFAULTS_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the defaults. A missing file yields empty defaults.
    pub async fn load(&self) -> CcpResult<Defaults> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no defaults file yet");
                return Ok(Defaults::default());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&contents)?)
    }

    /// Writes the defaults as indented JSON, readable by the owner only.
    pub async fn save(&self, defaults: &Defaults) -> CcpResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(defaults)?;
        tokio::fs::write(&self.path, json).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        debug!(path = %self.path.display(), "defaults saved");
        Ok(())
    }
}
