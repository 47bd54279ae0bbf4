use super::SlotStorage;
use crate::error::{Result, RosterError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory slot storage for testing.
///
/// Uses `RefCell` since roster is single-threaded, which lets the
/// `SlotStorage` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemSlots {
    slots: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to plant a raw value, e.g. a corrupt roster.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }
}

impl SlotStorage for MemSlots {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RosterError::StorageWriteFailure(
                "Simulated write error".to_string(),
            ));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear_slot(&self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_slot_is_none() {
        let slots = MemSlots::new();
        assert_eq!(slots.read_slot("students_v1").unwrap(), None);
    }

    #[test]
    fn write_then_read() {
        let slots = MemSlots::new();
        slots.write_slot("k", "[]").unwrap();
        assert_eq!(slots.read_slot("k").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn simulated_write_error() {
        let slots = MemSlots::new();
        slots.set_simulate_write_error(true);
        let err = slots.write_slot("k", "[]").unwrap_err();
        assert!(matches!(err, RosterError::StorageWriteFailure(_)));
        assert!(!slots.contains("k"));
    }

    #[test]
    fn clear_absent_slot_is_ok() {
        let slots = MemSlots::new();
        slots.clear_slot("nothing").unwrap();
    }
}
