use serde::{Deserialize, Serialize};
use std::fmt;

/// A single registered student.
///
/// Every field is kept as text: ids and contact numbers are digit strings so
/// leading zeros survive and long numbers never overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub id: String,
    pub email: String,
    pub contact: String,
}

impl StudentRecord {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            email: email.into(),
            contact: contact.into(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Id => &self.id,
            Field::Email => &self.email,
            Field::Contact => &self.contact,
        }
    }
}

/// One input of the student form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Id,
    Email,
    Contact,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Id, Field::Email, Field::Contact];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Id => "id",
            Field::Email => "email",
            Field::Contact => "contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Student Name",
            Field::Id => "Student ID",
            Field::Email => "Email Address",
            Field::Contact => "Contact Number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "id" => Ok(Field::Id),
            "email" => Ok(Field::Email),
            "contact" => Ok(Field::Contact),
            other => Err(format!(
                "Unknown field: {} (expected name, id, email or contact)",
                other
            )),
        }
    }
}

/// Whether the form is creating a new record or editing an existing one.
///
/// The position is index-based: it is never repaired when earlier rows are
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(usize),
}

impl EditSession {
    pub fn target(&self) -> Option<usize> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(position) => Some(*position),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_plain_string_fields() {
        let record = StudentRecord::new("Ann Lee", "0101", "a@b.com", "1234567890");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Ann Lee","id":"0101","email":"a@b.com","contact":"1234567890"}"#
        );
    }

    #[test]
    fn field_parses_case_insensitively() {
        assert_eq!("Email".parse::<Field>().unwrap(), Field::Email);
        assert_eq!(" contact ".parse::<Field>().unwrap(), Field::Contact);
        assert!("phone".parse::<Field>().is_err());
    }

    #[test]
    fn edit_session_target() {
        assert_eq!(EditSession::Idle.target(), None);
        assert_eq!(EditSession::Editing(3).target(), Some(3));
        assert!(EditSession::Editing(0).is_editing());
    }
}
