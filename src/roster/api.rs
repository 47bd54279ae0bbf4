//! # API Facade
//!
//! A thin facade over the [`Controller`] and the command layer. It is the single
//! entry point for one-shot roster operations, whatever UI is driving them.
//!
//! The facade:
//! - **Normalizes inputs**: user-facing positions are 1-based, the controller's are 0-based
//! - **Dispatches** to the controller or the command modules
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O of its own and holds no business rules. A rejected submission
//! comes back as [`RosterError::Validation`] so a one-shot caller can fail fast;
//! interactive clients that want to keep a half-filled form around talk to the
//! controller directly through [`RosterApi::controller_mut`].

use crate::commands;
use crate::commands::config::ConfigAction;
use crate::controller::{Confirm, Controller};
use crate::error::{Result, RosterError};
use crate::model::Field;
use crate::store::SlotStorage;
use std::path::PathBuf;

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, Outcome};

/// Fields to change on an existing record. `None` keeps the stored value.
///
/// The student id is not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.contact.is_none()
    }
}

pub struct RosterApi<S: SlotStorage, C: Confirm> {
    controller: Controller<S, C>,
    data_dir: PathBuf,
}

impl<S: SlotStorage, C: Confirm> RosterApi<S, C> {
    pub fn new(controller: Controller<S, C>, data_dir: PathBuf) -> Self {
        Self {
            controller,
            data_dir,
        }
    }

    pub fn controller(&self) -> &Controller<S, C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<S, C> {
        &mut self.controller
    }

    pub fn add_student(
        &mut self,
        name: &str,
        id: &str,
        email: &str,
        contact: &str,
    ) -> Result<CmdResult> {
        self.controller.cancel();
        for (field, value) in [
            (Field::Name, name),
            (Field::Id, id),
            (Field::Email, email),
            (Field::Contact, contact),
        ] {
            self.controller.set_field(field, value);
        }
        self.submit()
    }

    pub fn list(&self) -> Result<CmdResult> {
        let mut result = CmdResult::default().with_table(self.controller.table());
        if self.controller.recovered_from_corruption() {
            result.add_message(CmdMessage::warning(
                "Stored roster was unreadable and has been reset.",
            ));
        }
        Ok(result)
    }

    pub fn edit_student(&mut self, display: usize, update: StudentUpdate) -> Result<CmdResult> {
        let position = self.existing_position(display)?;
        self.controller.edit(position);
        if let Some(name) = update.name {
            self.controller.set_field(Field::Name, name);
        }
        if let Some(email) = update.email {
            self.controller.set_field(Field::Email, email);
        }
        if let Some(contact) = update.contact {
            self.controller.set_field(Field::Contact, contact);
        }
        self.submit()
    }

    pub fn delete_student(&mut self, display: usize) -> Result<CmdResult> {
        let position = self.existing_position(display)?;
        Ok(self.controller.delete(position))
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    fn submit(&mut self) -> Result<CmdResult> {
        let result = self.controller.submit();
        if result.outcome == Outcome::Rejected {
            self.controller.cancel();
            return Err(RosterError::Validation(result.field_errors));
        }
        Ok(result)
    }

    fn existing_position(&self, display: usize) -> Result<usize> {
        let position = to_position(display)?;
        if position >= self.controller.store().len() {
            return Err(RosterError::Api(format!("No student at position {}", display)));
        }
        Ok(position)
    }
}

/// Converts a 1-based position as shown to users into a roster index.
pub fn to_position(display: usize) -> Result<usize> {
    display
        .checked_sub(1)
        .ok_or_else(|| RosterError::Api("Positions start at 1".to_string()))
}
