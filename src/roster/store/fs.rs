use super::SlotStorage;
use crate::error::{Result, RosterError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

/// File-backed slots: each key is stored as `<root>/<key>.json`.
pub struct FileSlots {
    root: PathBuf,
}

impl FileSlots {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl SlotStorage for FileSlots {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RosterError::Io(e)),
        }
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        let write = || -> std::io::Result<()> {
            if !self.root.exists() {
                fs::create_dir_all(&self.root)?;
            }
            // Atomic write: temp file, then rename over the slot
            let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
            if let Err(e) = fs::write(&tmp_file, value)
                .and_then(|()| fs::rename(&tmp_file, self.slot_path(key)))
            {
                let _ = fs::remove_file(&tmp_file);
                return Err(e);
            }
            Ok(())
        };
        write().map_err(|e| RosterError::StorageWriteFailure(e.to_string()))
    }

    fn clear_slot(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RosterError::Io(e)),
        }
    }
}
