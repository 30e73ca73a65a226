use super::CredentialStore;
use crate::CREDENTIAL_KEY;
use crate::error::StoreError;

use common::{Credential, ErrorLocation};

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::{Map, Value};

/// Credential persisted as a small JSON document: `{"openai_api_key": "..."}`.
///
/// Writes go through a temp file + rename, so a reader never observes a torn
/// value. On Unix the file is created owner-readable only.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No credential file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                warn!("Failed to read credential file: {}", e);
                return Err(StoreError::Read {
                    location: ErrorLocation::from(Location::caller()),
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let document: Map<String, Value> =
            serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        match document.get(CREDENTIAL_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) if value.trim().is_empty() => Ok(None),
            Some(Value::String(value)) => {
                // Hand-edited files may carry a trailing newline.
                let credential = Credential::new(value.trim());
                debug!("Credential loaded ({} chars)", credential.len());
                Ok(Some(credential))
            }
            Some(_) => Err(StoreError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: format!("'{CREDENTIAL_KEY}' is not a string"),
            }),
        }
    }

    fn persist(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                location: ErrorLocation::from(Location::caller()),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut document = Map::new();
        document.insert(
            CREDENTIAL_KEY.to_string(),
            Value::String(credential.expose().to_string()),
        );

        let json = serde_json::to_string_pretty(&document).map_err(|e| StoreError::Serialize {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        let temp_path = self.temp_path();

        if let Err(e) = write_owner_only(&temp_path, json.as_bytes()) {
            discard_temp_file(&temp_path);
            return Err(StoreError::Write {
                location: ErrorLocation::from(Location::caller()),
                path: temp_path,
                source: e,
            });
        }

        // Atomic rename (POSIX guarantees atomicity)
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            discard_temp_file(&temp_path);
            return Err(StoreError::Write {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            });
        }

        info!("Credential written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Credential removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// Create (or truncate) `path` and write `contents`. On Unix the file is
/// created with mode 0600, so the key is never readable by others.
fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // `mode` only applies on creation; a stale temp file keeps its old mode.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()
}

/// Best-effort removal of a temp file that still holds the key.
fn discard_temp_file(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed temp credential file {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Failed to remove temp credential file {}: {}",
            path.display(),
            e
        ),
    }
}
