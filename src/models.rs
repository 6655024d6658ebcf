use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Provenance label for assignments whose date was typed in by hand.
pub const PICKED_MANUALLY: &str = "manual";

/// One reminder. Serialized with the camelCase keys of the stored blob
/// (`dueKey`, `createdAt`, `pickedFrom`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(rename = "dueKey")]
    pub due: NaiveDate,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_picked_from")]
    pub picked_from: String,
}

fn default_picked_from() -> String {
    PICKED_MANUALLY.to_string()
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Fields supplied when creating an assignment. Id and creation time are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    pub title: String,
    pub subject: String,
    pub due: NaiveDate,
    pub notes: Option<String>,
    pub pinned: bool,
    pub picked_from: Option<String>,
}

impl NewAssignment {
    pub fn new(title: impl Into<String>, subject: impl Into<String>, due: NaiveDate) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            due,
            notes: None,
            pinned: false,
            picked_from: None,
        }
    }
}

/// A partial update. `None` leaves the field alone; `notes: Some(None)`
/// clears the notes. Has no `done` field: completion only goes through
/// `AssignmentStore::mark_done`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub due: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
    pub pinned: Option<bool>,
    pub picked_from: Option<String>,
}

impl AssignmentPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subject.is_none()
            && self.due.is_none()
            && self.notes.is_none()
            && self.pinned.is_none()
            && self.picked_from.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EmptySubject,
    UnknownSubject(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptySubject => write!(f, "subject must not be empty"),
            Self::UnknownSubject(subject) => {
                write!(f, "subject '{subject}' is not in the timetable")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims a title and rejects it when nothing is left.
pub fn clean_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Trims a subject code, rejects blanks, and when `known` is given rejects
/// codes the timetable never uses.
pub fn clean_subject(
    subject: &str,
    known: Option<&BTreeSet<String>>,
) -> Result<String, ValidationError> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(ValidationError::EmptySubject);
    }
    if let Some(known) = known {
        if !known.contains(subject) {
            return Err(ValidationError::UnknownSubject(subject.to_string()));
        }
    }
    Ok(subject.to_string())
}

pub fn clean_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_trims() {
        assert_eq!(clean_title("  Essay  ").unwrap(), "Essay");
    }

    #[test]
    fn test_clean_title_rejects_whitespace() {
        assert_eq!(clean_title(" \t\n"), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_clean_subject_unknown() {
        let known: BTreeSet<String> = ["MAT".to_string()].into_iter().collect();
        assert_eq!(clean_subject("MAT", Some(&known)).unwrap(), "MAT");
        assert_eq!(
            clean_subject("ART", Some(&known)),
            Err(ValidationError::UnknownSubject("ART".to_string()))
        );
        assert_eq!(clean_subject("ART", None).unwrap(), "ART");
    }

    #[test]
    fn test_clean_notes_blank_is_none() {
        assert_eq!(clean_notes(Some("   ")), None);
        assert_eq!(clean_notes(Some(" read ch. 4 ")), Some("read ch. 4".to_string()));
        assert_eq!(clean_notes(None), None);
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let json = r#"{
            "id": "5f1c",
            "title": "Essay",
            "subject": "ANJ",
            "dueKey": "2024-03-11",
            "notes": "",
            "pinned": false,
            "done": false,
            "createdAt": "2024-03-01T08:15:00.000Z",
            "pickedFrom": "Week A • 2024-03-11"
        }"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert_eq!(a.due, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(a.notes, None);
        assert!(a.created_at.is_some());
        assert_eq!(a.picked_from, "Week A • 2024-03-11");
    }

    #[test]
    fn test_deserialize_minimal_record_defaults() {
        let json = r#"{"id": "x", "title": "T", "subject": "MAT", "dueKey": "2024-03-11"}"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert!(!a.pinned);
        assert!(!a.done);
        assert_eq!(a.created_at, None);
        assert_eq!(a.picked_from, PICKED_MANUALLY);
    }

    #[test]
    fn test_deserialize_rejects_bad_due_key() {
        let json = r#"{"id": "x", "title": "T", "subject": "MAT", "dueKey": "2024-02-30"}"#;
        assert!(serde_json::from_str::<Assignment>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let a = Assignment {
            id: "1".to_string(),
            title: "T".to_string(),
            subject: "MAT".to_string(),
            due: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            notes: None,
            pinned: true,
            done: false,
            created_at: None,
            picked_from: PICKED_MANUALLY.to_string(),
        };
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains(r#""dueKey":"2024-03-01""#));
        assert!(json.contains(r#""pickedFrom":"manual""#));
        assert!(json.contains(r#""createdAt":null"#));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(AssignmentPatch::default().is_empty());
        let patch = AssignmentPatch {
            pinned: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
