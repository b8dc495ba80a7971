//! Key file persistence.
//!
//! Reads and writes PEM key files for the file-backed strategies. Access is
//! synchronous and happens only during startup; concurrent writers to the
//! same path are not supported.

use crate::config::KeyFilePath;
use crate::crypto::{self, KeyMaterial};
use crate::errors::JwksError;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::instrument;

/// Read a key file as text.
#[instrument(skip_all, fields(path = %path))]
pub fn read(path: &KeyFilePath) -> Result<String, JwksError> {
    fs::read_to_string(path.as_path()).map_err(|source| io_error(path, source))
}

/// Write the key's private PKCS#1 PEM to `path`, replacing any existing file.
///
/// Missing parent directories are created. On Unix a new file is created with
/// mode 0600, and an existing file is restricted to 0600 before any key bytes
/// are written to it.
#[instrument(skip_all, fields(path = %path, kid = %key.kid))]
pub fn save(path: &KeyFilePath, key: &KeyMaterial) -> Result<(), JwksError> {
    let pem = crypto::to_pem(key, true)?;

    if let Some(parent) = path.as_path().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| io_error(path, source))?;
        }
    }

    let mut file = open_owner_only(path.as_path()).map_err(|source| io_error(path, source))?;
    restrict_permissions(&file).map_err(|source| io_error(path, source))?;
    file.write_all(pem.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|source| io_error(path, source))?;

    tracing::info!(target: "key_files", "Saved RSA signing key");
    Ok(())
}

#[cfg(unix)]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// `mode` only applies on creation; a pre-existing file keeps its old bits
#[cfg(unix)]
fn restrict_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}

fn io_error(path: &KeyFilePath, source: std::io::Error) -> JwksError {
    JwksError::Io {
        path: path.to_string(),
        source,
    }
}
