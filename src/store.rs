//! The assignment collection and its persistence round trip.
//!
//! The store is the single owner of the collection. Every mutating
//! operation builds the next collection, writes it in full under
//! [`STORAGE_KEY`], and only then swaps it in, so a rejected or failed
//! operation leaves both memory and storage as they were.

use chrono::Utc;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::db::BlobStore;
use crate::models::{
    clean_notes, clean_subject, clean_title, Assignment, AssignmentPatch, NewAssignment,
    ValidationError, PICKED_MANUALLY,
};

pub const STORAGE_KEY: &str = "school_remindme_assignments_v1";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound(String),
    Persistence(anyhow::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "assignment not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to save assignments: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(&**err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub struct AssignmentStore<B: BlobStore> {
    backend: B,
    items: Vec<Assignment>,
    subjects: Option<BTreeSet<String>>,
}

impl<B: BlobStore> AssignmentStore<B> {
    /// Reads the stored collection. A missing, unreadable or malformed blob
    /// yields an empty store; the next successful write replaces it.
    pub fn load(backend: B) -> Self {
        let items = match backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Assignment>>(&raw) {
                Ok(items) => items,
                Err(err) => {
                    warn!(error = %err, "stored assignments are corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "could not read stored assignments, starting empty");
                Vec::new()
            }
        };
        debug!(count = items.len(), "loaded assignments");

        Self {
            backend,
            items,
            subjects: None,
        }
    }

    /// Restricts subjects to the given set (normally the timetable's).
    pub fn with_subjects(mut self, subjects: BTreeSet<String>) -> Self {
        self.subjects = Some(subjects);
        self
    }

    pub fn add(&mut self, new: NewAssignment) -> StoreResult<Assignment> {
        let title = clean_title(&new.title)?;
        let subject = clean_subject(&new.subject, self.subjects.as_ref())?;

        let assignment = Assignment {
            id: Uuid::new_v4().to_string(),
            title,
            subject,
            due: new.due,
            notes: clean_notes(new.notes.as_deref()),
            pinned: new.pinned,
            done: false,
            created_at: Some(Utc::now()),
            picked_from: new
                .picked_from
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| PICKED_MANUALLY.to_string()),
        };

        let mut next = self.items.clone();
        next.push(assignment.clone());
        self.commit(next)?;

        debug!(id = %assignment.id, due = %assignment.due, "added assignment");
        Ok(assignment)
    }

    /// Replaces the supplied fields. Id, creation time and completion are
    /// never touched.
    pub fn update(&mut self, id: &str, patch: AssignmentPatch) -> StoreResult<Assignment> {
        let index = self.position(id)?;

        let mut updated = self.items[index].clone();
        if let Some(title) = &patch.title {
            updated.title = clean_title(title)?;
        }
        if let Some(subject) = &patch.subject {
            updated.subject = clean_subject(subject, self.subjects.as_ref())?;
        }
        if let Some(due) = patch.due {
            updated.due = due;
        }
        if let Some(notes) = &patch.notes {
            updated.notes = clean_notes(notes.as_deref());
        }
        if let Some(pinned) = patch.pinned {
            updated.pinned = pinned;
        }
        if let Some(picked_from) = patch.picked_from.filter(|p| !p.trim().is_empty()) {
            updated.picked_from = picked_from;
        }

        let mut next = self.items.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        debug!(id = %updated.id, "updated assignment");
        Ok(updated)
    }

    pub fn remove(&mut self, id: &str) -> StoreResult<()> {
        let index = self.position(id)?;

        let mut next = self.items.clone();
        next.remove(index);
        self.commit(next)?;

        debug!(id, "removed assignment");
        Ok(())
    }

    pub fn mark_done(&mut self, id: &str) -> StoreResult<()> {
        let index = self.position(id)?;

        let mut next = self.items.clone();
        next[index].done = true;
        self.commit(next)?;

        debug!(id, "marked assignment done");
        Ok(())
    }

    /// Copy of the collection in stored order.
    pub fn all(&self) -> Vec<Assignment> {
        self.items.clone()
    }

    pub fn get(&self, id: &str) -> Option<Assignment> {
        self.items.iter().find(|a| a.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &str) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn commit(&mut self, next: Vec<Assignment>) -> StoreResult<()> {
        let blob =
            serde_json::to_string(&next).map_err(|err| StoreError::Persistence(err.into()))?;
        self.backend
            .put(STORAGE_KEY, &blob)
            .map_err(StoreError::Persistence)?;
        self.items = next;
        Ok(())
    }
}
