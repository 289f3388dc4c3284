//! Crash-safe persistence of the ladder state as a single JSON file.

use crate::models::LadderState;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Loads and saves the ladder state file. The in-memory state is owned by the
/// service; this type owns only the on-disk representation.
#[derive(Clone, Debug)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file. A missing or unparsable file yields a fresh empty
    /// state instead of an error, so a corrupt file never blocks startup.
    /// Availability over durability: back the file up externally if that matters.
    pub fn load(&self) -> LadderState {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!(
                        "State file {} is corrupt ({}); starting with an empty ladder",
                        self.path.display(),
                        e
                    );
                    LadderState::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => LadderState::default(),
            Err(e) => {
                log::warn!(
                    "Could not read state file {} ({}); starting with an empty ladder",
                    self.path.display(),
                    e
                );
                LadderState::default()
            }
        }
    }

    /// Serialize the full state to a temp file in the same directory and
    /// atomically rename it over the canonical path, so readers observe either
    /// the fully-old or fully-new file, never a partial write.
    pub fn save(&self, state: &LadderState) -> io::Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let mut tmp = self.path.clone();
        tmp.as_mut_os_string().push(".tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}
