//! JSON save file holding a [`WorldSnapshot`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use deadhold_world::WorldSnapshot;
use thiserror::Error;

/// Errors that can occur while reading a save file.
#[derive(Debug, Error)]
pub(crate) enum SaveFileError {
    /// Nothing has been saved at the path yet.
    #[error("no valid save at {}", .0.display())]
    NoValidSave(PathBuf),
    /// The file exists but could not be read.
    #[error("could not read save at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file does not hold a snapshot.
    #[error("save at {} is corrupt", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the snapshot stored at `path`.
pub(crate) fn load(path: &Path) -> Result<WorldSnapshot, SaveFileError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(SaveFileError::NoValidSave(path.to_path_buf()));
        }
        Err(source) => {
            return Err(SaveFileError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if contents.trim().is_empty() {
        return Err(SaveFileError::NoValidSave(path.to_path_buf()));
    }
    serde_json::from_str(&contents).map_err(|source| SaveFileError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `snapshot` to `path` as pretty-printed JSON.
pub(crate) fn store(path: &Path, snapshot: &WorldSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to encode snapshot")?;
    fs::write(path, json).with_context(|| format!("failed to write save to {}", path.display()))
}
