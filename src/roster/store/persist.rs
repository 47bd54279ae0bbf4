//! Maps the roster onto a single storage slot.
//!
//! The slot holds the whole roster as a JSON array, rewritten in full after
//! every change. Loading is forgiving: a missing or empty slot is an empty
//! roster, and a slot that does not parse (whitespace included) is logged,
//! cleared, and replaced by an empty roster.

use super::SlotStorage;
use crate::error::{Result, RosterError};
use crate::model::StudentRecord;
use tracing::{debug, error, info, warn};

pub const DEFAULT_STORAGE_KEY: &str = "students_v1";

/// What [`Persistence::load`] found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    pub records: Vec<StudentRecord>,
    /// The slot held unreadable data and was cleared.
    pub recovered: bool,
}

pub struct Persistence<S: SlotStorage> {
    slots: S,
    key: String,
}

impl<S: SlotStorage> Persistence<S> {
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    /// Overwrites the slot with the full roster.
    ///
    /// Any failure comes back as [`RosterError::StorageWriteFailure`].
    pub fn save(&self, records: &[StudentRecord]) -> Result<()> {
        let content = serde_json::to_string(records)
            .map_err(|e| RosterError::StorageWriteFailure(e.to_string()))?;
        self.slots
            .write_slot(&self.key, &content)
            .map_err(|e| match e {
                RosterError::StorageWriteFailure(_) => e,
                other => RosterError::StorageWriteFailure(other.to_string()),
            })?;
        debug!(key = %self.key, count = records.len(), "roster saved");
        Ok(())
    }

    /// Reads the roster back.
    ///
    /// Only a failure to *read* the slot is returned as an error. Corrupt data
    /// is not an error: it is discarded and reported via `recovered`.
    pub fn load(&self) -> Result<LoadOutcome> {
        let raw = match self.slots.read_slot(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                debug!(key = %self.key, "no stored roster");
                return Ok(LoadOutcome::default());
            }
        };

        match parse_roster(&raw) {
            Ok(records) => {
                debug!(key = %self.key, count = records.len(), "roster loaded");
                Ok(LoadOutcome {
                    records,
                    recovered: false,
                })
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "invalid stored data, resetting storage");
                if let Err(clear_err) = self.slots.clear_slot(&self.key) {
                    warn!(key = %self.key, error = %clear_err, "could not clear corrupt slot");
                } else {
                    info!(key = %self.key, "corrupt slot cleared");
                }
                Ok(LoadOutcome {
                    records: Vec::new(),
                    recovered: true,
                })
            }
        }
    }
}

/// Parses slot content. `null` counts as an empty roster.
fn parse_roster(raw: &str) -> Result<Vec<StudentRecord>> {
    let parsed: Option<Vec<StudentRecord>> =
        serde_json::from_str(raw).map_err(|e| RosterError::StorageCorrupt(e.to_string()))?;
    Ok(parsed.unwrap_or_default())
}
