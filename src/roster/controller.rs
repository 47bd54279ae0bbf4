//! # Controller
//!
//! Owns the roster, the edit session, and the form, and turns discrete user
//! events into changes of that state:
//!
//! ```text
//!            edit(p)                 submit() ok / cancel() / delete(p)
//!   Idle ───────────────▶ Editing(p) ─────────────────────────────────▶ Idle
//! ```
//!
//! Every event runs to completion before the next one. A successful add,
//! update, or delete is written through to storage immediately. If that write
//! fails the in-memory change stands and the result carries a warning.
//!
//! Positions are plain indexes into the roster. An edit session is only
//! cleared by deleting *its* row; deleting an earlier row leaves it pointing
//! at whatever now sits at that index.

use crate::commands::{CmdMessage, CmdResult, Outcome};
use crate::error::Result;
use crate::model::{EditSession, Field};
use crate::store::persist::Persistence;
use crate::store::{RecordStore, SlotStorage};
use crate::validation::{filter_input, validate_field, FieldError, FieldResult};
use crate::view::{render_form, render_table, Focus, Form, FormView, TableView};
use tracing::{debug, warn};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student record?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct Controller<S: SlotStorage, C: Confirm> {
    store: RecordStore,
    persistence: Persistence<S>,
    confirm: C,
    session: EditSession,
    form: Form,
    recovered: bool,
}

impl<S: SlotStorage, C: Confirm> Controller<S, C> {
    /// Loads the persisted roster and starts idle with an empty form.
    pub fn open(persistence: Persistence<S>, confirm: C) -> Result<Self> {
        let loaded = persistence.load()?;
        debug!(count = loaded.records.len(), "controller opened");
        Ok(Self {
            store: RecordStore::from_records(loaded.records),
            persistence,
            confirm,
            session: EditSession::Idle,
            form: Form::new(),
            recovered: loaded.recovered,
        })
    }

    /// True when stored data was unreadable and the roster started empty.
    pub fn recovered_from_corruption(&self) -> bool {
        self.recovered
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn table(&self) -> TableView {
        render_table(self.store.records())
    }

    pub fn form_view(&self) -> FormView {
        render_form(&self.form, self.session)
    }

    /// A keystroke-level edit: the field's entry filter is applied first.
    pub fn input(&mut self, field: Field, raw: &str) {
        let filtered = filter_input(field, raw);
        self.set_field(field, filtered);
    }

    /// Sets a field verbatim. The id is locked while editing.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if field == Field::Id && self.session.is_editing() {
            debug!("id field is locked while editing");
            return;
        }
        self.form.set_value(field, value);
    }

    /// Validates one field as the user leaves it.
    pub fn blur(&mut self, field: Field) -> FieldResult {
        let result = validate_field(
            field,
            self.form.value(field),
            &self.store,
            self.session.target(),
        );
        self.form.apply(field, &result);
        result
    }

    pub fn submit(&mut self) -> CmdResult {
        let target = self.session.target();
        let mut errors: Vec<FieldError> = Vec::new();
        for field in Field::ALL {
            let checked = validate_field(field, self.form.value(field), &self.store, target);
            self.form.apply(field, &checked);
            if let Err(e) = checked {
                errors.push(e);
            }
        }

        if !errors.is_empty() {
            debug!(errors = errors.len(), "submission rejected");
            let mut result = CmdResult::default().with_outcome(Outcome::Rejected);
            for e in &errors {
                result.add_message(CmdMessage::error(format!("{}: {}", e.field.label(), e.message)));
            }
            result.field_errors = errors;
            return result;
        }

        let record = self.form.to_record();
        let mut result = CmdResult::default();
        match self.session {
            EditSession::Idle => {
                self.store.add(record.clone());
                let position = self.store.len() - 1;
                debug!(position, id = %record.id, "student added");
                result.add_message(CmdMessage::success(format!(
                    "Student added: {} ({})",
                    record.name, record.id
                )));
                result.outcome = Outcome::Added(position);
            }
            EditSession::Editing(position) => {
                if self.store.update_at(position, record.clone()) {
                    debug!(position, id = %record.id, "student updated");
                    result.add_message(CmdMessage::success(format!(
                        "Student updated: {} ({})",
                        record.name, record.id
                    )));
                    result.outcome = Outcome::Updated(position);
                } else {
                    debug!(position, "edit target no longer exists");
                    result.outcome = Outcome::Ignored;
                }
            }
        }

        self.persist(&mut result);
        self.reset_form();
        self.form.set_focus(Focus::Table);
        result.with_table(self.table())
    }

    pub fn edit(&mut self, position: usize) -> CmdResult {
        let Some(record) = self.store.get(position).cloned() else {
            debug!(position, "edit requested for missing row");
            return CmdResult::default().with_outcome(Outcome::Ignored);
        };

        self.session = EditSession::Editing(position);
        self.form.populate(&record);
        self.form.set_focus(Focus::Field(Field::Name));

        let mut result = CmdResult::default().with_outcome(Outcome::Editing(position));
        result.add_message(CmdMessage::info(format!(
            "Editing {} ({})",
            record.name, record.id
        )));
        result
    }

    pub fn delete(&mut self, position: usize) -> CmdResult {
        if !self.confirm.confirm(DELETE_PROMPT) {
            let mut result = CmdResult::default().with_outcome(Outcome::Declined);
            result.add_message(CmdMessage::info("Deletion cancelled."));
            return result;
        }

        let mut result = CmdResult::default();
        match self.store.delete_at(position) {
            Some(removed) => {
                debug!(position, id = %removed.id, "student deleted");
                result.add_message(CmdMessage::success(format!(
                    "Student deleted: {} ({})",
                    removed.name, removed.id
                )));
                result.outcome = Outcome::Deleted(position);
            }
            None => {
                debug!(position, "delete requested for missing row");
                result.outcome = Outcome::Ignored;
            }
        }

        self.persist(&mut result);
        if self.session == EditSession::Editing(position) {
            self.reset_form();
        }
        result.with_table(self.table())
    }

    /// Leaves edit mode (if any) and discards whatever was typed.
    pub fn cancel(&mut self) -> CmdResult {
        self.reset_form();
        CmdResult::default().with_outcome(Outcome::Cancelled)
    }

    fn reset_form(&mut self) {
        self.session = EditSession::Idle;
        self.form.reset();
    }

    fn persist(&mut self, result: &mut CmdResult) {
        if let Err(e) = self.persistence.save(self.store.records()) {
            warn!(error = %e, "roster change kept in memory but not saved");
            result.add_message(CmdMessage::warning(format!(
                "Changes are kept for this session but were not saved: {}",
                e
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentRecord;
    use crate::store::memory::MemSlots;
    use crate::store::persist::DEFAULT_STORAGE_KEY;
    use crate::validation::ValidationKind;
    use crate::view::EMPTY_STATE_MESSAGE;

    fn always_yes(_: &str) -> bool {
        true
    }

    fn always_no(_: &str) -> bool {
        false
    }

    fn open(slots: &MemSlots) -> Controller<&MemSlots, fn(&str) -> bool> {
        Controller::open(Persistence::new(slots), always_yes as fn(&str) -> bool).unwrap()
    }

    fn fill<S: SlotStorage, C: Confirm>(
        c: &mut Controller<S, C>,
        name: &str,
        id: &str,
        email: &str,
        contact: &str,
    ) {
        c.set_field(Field::Name, name);
        c.set_field(Field::Id, id);
        c.set_field(Field::Email, email);
        c.set_field(Field::Contact, contact);
    }

    fn add<S: SlotStorage, C: Confirm>(c: &mut Controller<S, C>, name: &str, id: &str) -> CmdResult {
        fill(c, name, id, "a@b.com", "1234567890");
        c.submit()
    }

    fn stored(slots: &MemSlots) -> Vec<StudentRecord> {
        Persistence::new(slots).load().unwrap().records
    }

    #[test]
    fn submit_from_idle_appends_and_persists() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann Lee", "101");
        let result = add(&mut c, "Bo Chen", "102");

        assert_eq!(result.outcome, Outcome::Added(1));
        assert_eq!(c.store().len(), 2);
        assert_eq!(c.store().get(1).unwrap().name, "Bo Chen");
        assert_eq!(stored(&slots), c.store().records());
    }

    #[test]
    fn successful_submit_resets_form_and_focuses_table() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann Lee", "101");

        assert_eq!(c.session(), EditSession::Idle);
        assert_eq!(c.form().value(Field::Name), "");
        assert!(!c.form().has_errors());
        assert_eq!(c.form().focus(), Some(Focus::Table));
        assert_eq!(c.form_view().title, "Register New Student");
    }

    #[test]
    fn submitted_values_are_trimmed() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        fill(&mut c, "  Ann Lee ", " 101", "a@b.com ", "1234567890");
        c.submit();
        assert_eq!(
            c.store().get(0).unwrap(),
            &StudentRecord::new("Ann Lee", "101", "a@b.com", "1234567890")
        );
    }

    #[test]
    fn invalid_submissions_never_mutate_the_roster() {
        let cases = [
            ("", "1", "a@b.com", "1234567890", Field::Name, ValidationKind::EmptyField),
            ("Ann", "1x", "a@b.com", "1234567890", Field::Id, ValidationKind::InvalidFormat),
            ("Ann", "1", "a@b", "1234567890", Field::Email, ValidationKind::InvalidFormat),
            ("Ann", "1", "a@b.com", "123456789", Field::Contact, ValidationKind::InvalidFormat),
        ];

        for (name, id, email, contact, field, kind) in cases {
            let slots = MemSlots::new();
            let mut c = open(&slots);
            fill(&mut c, name, id, email, contact);
            let result = c.submit();

            assert_eq!(result.outcome, Outcome::Rejected);
            assert!(c.store().is_empty());
            assert!(!slots.contains(DEFAULT_STORAGE_KEY));
            assert_eq!(result.field_errors.len(), 1);
            assert_eq!(result.field_errors[0].field, field);
            assert_eq!(result.field_errors[0].kind, kind);
            assert!(c.form().error(field).is_some());
            assert_eq!(c.form().value(Field::Name), name);
        }
    }

    #[test]
    fn rejected_submit_reports_every_failing_field() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        let result = c.submit();
        assert_eq!(result.field_errors.len(), 4);
        assert!(result
            .field_errors
            .iter()
            .all(|e| e.kind == ValidationKind::EmptyField));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann Lee", "1");
        let result = add(&mut c, "Bo Chen", "1");

        assert_eq!(result.outcome, Outcome::Rejected);
        assert_eq!(result.field_errors[0].kind, ValidationKind::DuplicateKey);
        assert_eq!(c.store().len(), 1);
        assert_eq!(c.form().error(Field::Id), Some("Student ID already exists"));
    }

    #[test]
    fn editing_with_unchanged_id_is_not_a_duplicate() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann Lee", "101");
        add(&mut c, "Bo Chen", "102");

        c.edit(1);
        c.set_field(Field::Name, "Bo Chen Jr");
        let result = c.submit();

        assert_eq!(result.outcome, Outcome::Updated(1));
        assert!(result.field_errors.is_empty());
        assert_eq!(c.store().get(1).unwrap().name, "Bo Chen Jr");
        assert_eq!(c.store().get(1).unwrap().id, "102");
    }

    #[test]
    fn edit_populates_form_and_locks_id() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann Lee", "101");

        let result = c.edit(0);
        assert_eq!(result.outcome, Outcome::Editing(0));
        assert_eq!(c.session(), EditSession::Editing(0));
        assert_eq!(c.form().value(Field::Id), "101");
        assert_eq!(c.form().focus(), Some(Focus::Field(Field::Name)));

        c.set_field(Field::Id, "999");
        c.input(Field::Id, "888");
        assert_eq!(c.form().value(Field::Id), "101");

        let view = c.form_view();
        assert!(view.id_locked);
        assert!(view.cancel_enabled);
    }

    #[test]
    fn edit_missing_row_is_ignored() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        let result = c.edit(3);
        assert_eq!(result.outcome, Outcome::Ignored);
        assert_eq!(c.session(), EditSession::Idle);
    }

    #[test]
    fn cancel_discards_edits_and_returns_to_idle() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann Lee", "101");
        c.edit(0);
        c.set_field(Field::Name, "Someone Else");

        c.cancel();

        assert_eq!(c.session(), EditSession::Idle);
        assert_eq!(c.form().value(Field::Name), "");
        assert_eq!(c.store().get(0).unwrap().name, "Ann Lee");
        assert!(!c.form_view().cancel_enabled);
    }

    #[test]
    fn declined_delete_is_a_no_op() {
        let slots = MemSlots::new();
        let mut c = Controller::open(Persistence::new(&slots), always_no).unwrap();
        add(&mut c, "Ann Lee", "101");

        let result = c.delete(0);
        assert_eq!(result.outcome, Outcome::Declined);
        assert_eq!(c.store().len(), 1);
    }

    #[test]
    fn confirm_receives_the_prompt() {
        let slots = MemSlots::new();
        let mut prompts = Vec::new();
        {
            let mut c = Controller::open(Persistence::new(&slots), |p: &str| {
                prompts.push(p.to_string());
                true
            })
            .unwrap();
            add(&mut c, "Ann Lee", "101");
            c.delete(0);
        }
        assert_eq!(prompts, vec![DELETE_PROMPT.to_string()]);
    }

    #[test]
    fn delete_shifts_rows_and_persists() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        for (name, id) in [("Ann", "1"), ("Bo", "2"), ("Cy", "3")] {
            add(&mut c, name, id);
        }

        let result = c.delete(1);
        assert_eq!(result.outcome, Outcome::Deleted(1));
        let ids: Vec<_> = c.store().records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(stored(&slots), c.store().records());
    }

    #[test]
    fn deleting_the_edited_row_resets_the_form() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann", "1");
        add(&mut c, "Bo", "2");
        c.edit(1);

        c.delete(1);
        assert_eq!(c.session(), EditSession::Idle);
        assert_eq!(c.form().value(Field::Name), "");
    }

    #[test]
    fn deleting_another_row_keeps_the_stale_session() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann", "1");
        add(&mut c, "Bo", "2");
        add(&mut c, "Cy", "3");
        c.edit(2);

        c.delete(1);
        c.delete(1);
        assert_eq!(c.session(), EditSession::Editing(2));

        // Position 2 is now past the end: the update silently does nothing
        let result = c.submit();
        assert_eq!(result.outcome, Outcome::Ignored);
        let ids: Vec<_> = c.store().records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["1"]);
        assert_eq!(stored(&slots), c.store().records());
        assert_eq!(c.session(), EditSession::Idle);
    }

    #[test]
    fn stale_session_sees_its_own_record_as_a_duplicate() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        add(&mut c, "Ann", "1");
        add(&mut c, "Bo", "2");
        add(&mut c, "Cy", "3");
        c.edit(2);

        // "3" shifts to position 1 while the session still targets 2
        c.delete(0);
        let result = c.submit();
        assert_eq!(result.outcome, Outcome::Rejected);
        assert_eq!(result.field_errors[0].field, Field::Id);
        assert_eq!(result.field_errors[0].kind, ValidationKind::DuplicateKey);
        assert_eq!(c.session(), EditSession::Editing(2));
    }

    #[test]
    fn write_failure_keeps_change_and_warns() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        slots.set_simulate_write_error(true);

        let result = add(&mut c, "Ann Lee", "101");
        assert_eq!(result.outcome, Outcome::Added(0));
        assert!(result.has_warnings());
        assert_eq!(c.store().len(), 1);
        assert!(!slots.contains(DEFAULT_STORAGE_KEY));
    }

    #[test]
    fn opening_over_corrupt_storage_starts_empty() {
        let slots = MemSlots::new();
        slots.put_raw(DEFAULT_STORAGE_KEY, "[[[");
        let c = open(&slots);
        assert!(c.recovered_from_corruption());
        assert!(c.store().is_empty());
        assert!(!slots.contains(DEFAULT_STORAGE_KEY));
    }

    #[test]
    fn roster_survives_reopen() {
        let slots = MemSlots::new();
        {
            let mut c = open(&slots);
            add(&mut c, "Ann Lee", "101");
            add(&mut c, "Bo Chen", "102");
        }
        let c = open(&slots);
        assert_eq!(c.store().len(), 2);
        assert_eq!(c.store().get(0).unwrap().id, "101");
    }

    #[test]
    fn input_applies_entry_filters() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        c.input(Field::Name, "Ann3 Lee");
        c.input(Field::Contact, "(123) 456-7890");
        assert_eq!(c.form().value(Field::Name), "Ann Lee");
        assert_eq!(c.form().value(Field::Contact), "1234567890");
    }

    #[test]
    fn blur_shows_and_clears_indicator() {
        let slots = MemSlots::new();
        let mut c = open(&slots);
        c.set_field(Field::Email, "nope");
        assert!(c.blur(Field::Email).is_err());
        assert_eq!(
            c.form().error(Field::Email),
            Some("Please enter a valid email address")
        );

        c.set_field(Field::Email, "a@b.com");
        assert!(c.blur(Field::Email).is_ok());
        assert_eq!(c.form().error(Field::Email), None);
    }

    #[test]
    fn ann_lee_scenario() {
        let slots = MemSlots::new();
        let mut c = open(&slots);

        fill(&mut c, "Ann Lee", "101", "a@b.com", "1234567890");
        c.submit();
        let table = c.table();
        assert_eq!(table.rows().len(), 1);
        assert_eq!(
            table.rows()[0].cells(),
            ["Ann Lee", "101", "a@b.com", "1234567890"]
        );

        c.edit(0);
        c.set_field(Field::Contact, "9998887777");
        c.submit();
        let table = c.table();
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].contact, "9998887777");
        assert_eq!(table.rows()[0].id, "101");

        c.delete(0);
        assert_eq!(
            c.table(),
            TableView::Empty {
                message: EMPTY_STATE_MESSAGE
            }
        );
    }
}
