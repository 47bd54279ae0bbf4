//! # Presentation Layer
//!
//! Pure functions from state to view models:
//!
//! - [`render_table`]: roster → [`TableView`] (rows with bound actions, or the
//!   empty state)
//! - [`render_form`]: form state + edit session → [`FormView`]
//! - [`Overflow::for_height`]: the "cap visible height, scroll the rest" policy
//!
//! Nothing here draws anything. A UI client turns these models into output
//! (the CLI does it with templates) and turns user actions back into
//! controller calls using the positions carried by [`RowAction`].
//!
//! Views are rebuilt from scratch on every render, so row actions always carry
//! the row's *current* position, even after deletes shift rows up.

use crate::model::{EditSession, Field, StudentRecord};
use crate::validation::{FieldError, FieldResult};
use std::collections::BTreeMap;

pub const EMPTY_STATE_MESSAGE: &str =
    "No students registered yet. Add your first student using the form above!";

/// Table height above which the table is capped and scrolls.
pub const DEFAULT_OVERFLOW_THRESHOLD: usize = 420;

pub const TABLE_HEADERS: [&str; 5] = [
    "Student Name",
    "Student ID",
    "Email Address",
    "Contact Number",
    "Actions",
];

/// Where the user's attention should go after an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Table,
}

/// Raw form state: what is typed in each input and which inputs are flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, String>,
    focus: Option<Focus>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = Some(focus);
    }

    /// Shows or clears the indicator for the field a validation result is about.
    pub fn apply(&mut self, field: Field, result: &FieldResult) {
        match result {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(e) => self.mark_invalid(e),
        }
    }

    pub fn mark_invalid(&mut self, error: &FieldError) {
        self.errors.insert(error.field, error.message.clone());
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Fills every input from `record` and drops stale indicators.
    pub fn populate(&mut self, record: &StudentRecord) {
        for field in Field::ALL {
            self.set_value(field, record.value(field));
        }
        self.clear_errors();
    }

    /// Empties inputs and indicators. Focus is kept.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }

    /// The record described by the inputs, trimmed.
    pub fn to_record(&self) -> StudentRecord {
        StudentRecord::new(
            self.value(Field::Name).trim(),
            self.value(Field::Id).trim(),
            self.value(Field::Email).trim(),
            self.value(Field::Contact).trim(),
        )
    }
}

/// A user action bound to a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit(usize),
    Delete(usize),
}

impl RowAction {
    pub fn position(&self) -> usize {
        match self {
            RowAction::Edit(p) | RowAction::Delete(p) => *p,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit(_) => "Edit",
            RowAction::Delete(_) => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub action: RowAction,
    pub label: &'static str,
    /// Accessible description naming the student, e.g. "Edit student Ann Lee".
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub position: usize,
    pub name: String,
    pub id: String,
    pub email: String,
    pub contact: String,
    pub actions: [ActionView; 2],
}

impl RowView {
    pub fn cells(&self) -> [&str; 4] {
        [&self.name, &self.id, &self.email, &self.contact]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Empty { message: &'static str },
    Rows(Vec<RowView>),
}

impl TableView {
    pub fn rows(&self) -> &[RowView] {
        match self {
            TableView::Empty { .. } => &[],
            TableView::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty { .. })
    }
}

pub fn render_table(records: &[StudentRecord]) -> TableView {
    if records.is_empty() {
        return TableView::Empty {
            message: EMPTY_STATE_MESSAGE,
        };
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let name = sanitize(&record.name);
            let actions = [RowAction::Edit(position), RowAction::Delete(position)].map(|action| {
                ActionView {
                    action,
                    label: action.label(),
                    description: format!("{} student {}", action.label(), name),
                }
            });
            RowView {
                position,
                id: sanitize(&record.id),
                email: sanitize(&record.email),
                contact: sanitize(&record.contact),
                name,
                actions,
            }
        })
        .collect();

    TableView::Rows(rows)
}

/// Replaces control characters so stored text cannot drive the terminal.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}

/// How the table container should size itself once the table is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Let the container grow with the table.
    Natural,
    /// Cap the container at `max_height` and scroll vertically.
    Scroll { max_height: usize },
}

impl Overflow {
    pub fn for_height(measured: usize, threshold: usize) -> Self {
        if measured > threshold {
            Overflow::Scroll {
                max_height: threshold,
            }
        } else {
            Overflow::Natural
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub cancel_enabled: bool,
    pub id_locked: bool,
    pub fields: Vec<FieldView>,
    pub focus: Option<Focus>,
}

impl FormView {
    pub fn field(&self, field: Field) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.field == field)
    }
}

pub fn render_form(form: &Form, session: EditSession) -> FormView {
    let editing = session.is_editing();
    let (title, submit_label) = if editing {
        ("Edit Student Details", "Update Student")
    } else {
        ("Register New Student", "Add Student")
    };

    let fields = Field::ALL
        .iter()
        .map(|&field| FieldView {
            field,
            label: field.label(),
            value: form.value(field).to_string(),
            error: form.error(field).map(str::to_string),
            locked: editing && field == Field::Id,
        })
        .collect();

    FormView {
        title,
        submit_label,
        cancel_enabled: editing,
        id_locked: editing,
        fields,
        focus: form.focus(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_contact;

    fn ann() -> StudentRecord {
        StudentRecord::new("Ann Lee", "101", "a@b.com", "1234567890")
    }

    #[test]
    fn empty_roster_renders_empty_state() {
        let view = render_table(&[]);
        assert_eq!(
            view,
            TableView::Empty {
                message: EMPTY_STATE_MESSAGE
            }
        );
        assert!(view.rows().is_empty());
    }

    #[test]
    fn rows_follow_roster_order_with_bound_actions() {
        let records = vec![
            ann(),
            StudentRecord::new("Bo Chen", "102", "bo@c.com", "9998887777"),
        ];
        let view = render_table(&records);
        let rows = view.rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells(), ["Ann Lee", "101", "a@b.com", "1234567890"]);
        assert_eq!(rows[1].position, 1);
        assert_eq!(rows[1].actions[0].action, RowAction::Edit(1));
        assert_eq!(rows[1].actions[1].action, RowAction::Delete(1));
        assert_eq!(rows[1].actions[1].description, "Delete student Bo Chen");
    }

    #[test]
    fn rerender_rebinds_positions_after_delete() {
        let mut records = vec![
            ann(),
            StudentRecord::new("Bo Chen", "102", "bo@c.com", "9998887777"),
        ];
        records.remove(0);
        let view = render_table(&records);
        assert_eq!(view.rows()[0].name, "Bo Chen");
        assert_eq!(view.rows()[0].actions[0].action, RowAction::Edit(0));
    }

    #[test]
    fn control_characters_are_neutralized() {
        let record = StudentRecord::new("Ann\x1b[31m", "1", "a@b.com", "1234567890");
        let view = render_table(&[record]);
        assert!(!view.rows()[0].name.contains('\x1b'));
    }

    #[test]
    fn overflow_policy() {
        assert_eq!(Overflow::for_height(100, 420), Overflow::Natural);
        assert_eq!(Overflow::for_height(420, 420), Overflow::Natural);
        assert_eq!(
            Overflow::for_height(421, 420),
            Overflow::Scroll { max_height: 420 }
        );
    }

    #[test]
    fn idle_form_is_in_create_mode() {
        let view = render_form(&Form::new(), EditSession::Idle);
        assert_eq!(view.title, "Register New Student");
        assert_eq!(view.submit_label, "Add Student");
        assert!(!view.cancel_enabled);
        assert!(!view.id_locked);
        assert!(!view.field(Field::Id).unwrap().locked);
    }

    #[test]
    fn editing_form_locks_id_and_enables_cancel() {
        let mut form = Form::new();
        form.populate(&ann());
        let view = render_form(&form, EditSession::Editing(0));

        assert_eq!(view.title, "Edit Student Details");
        assert_eq!(view.submit_label, "Update Student");
        assert!(view.cancel_enabled);
        assert!(view.id_locked);
        assert!(view.field(Field::Id).unwrap().locked);
        assert_eq!(view.field(Field::Name).unwrap().value, "Ann Lee");
    }

    #[test]
    fn form_indicators_follow_validation_results() {
        let mut form = Form::new();
        form.apply(Field::Contact, &validate_contact("12"));
        assert_eq!(
            form.error(Field::Contact),
            Some("Contact number must be at least 10 digits")
        );

        form.apply(Field::Contact, &validate_contact("1234567890"));
        assert_eq!(form.error(Field::Contact), None);
        assert!(!form.has_errors());
    }

    #[test]
    fn form_record_is_trimmed() {
        let mut form = Form::new();
        form.set_value(Field::Name, "  Ann Lee ");
        form.set_value(Field::Id, "101 ");
        form.set_value(Field::Email, " a@b.com");
        form.set_value(Field::Contact, "1234567890");
        assert_eq!(form.to_record(), ann());
    }
}
