//! Checklist tree editing.
//!
//! # Responsibility
//! - Address nested collections and fields with typed paths.
//! - Provide pure add/remove/update operations returning new snapshots.
//!
//! # Invariants
//! - >=1 moment per checklist and >=1 question per moment are never broken
//!   by an edit.
//! - Editing never performs I/O.

use crate::model::checklist::{MomentId, QuestionId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod collection;
pub mod path;

pub use collection::{append, can_remove, remove, update, update_checklist, NewChild};
pub use path::{ChecklistChange, CollectionPath, FieldChange};

pub type EditResult<T> = Result<T, EditError>;

/// Errors raised by document edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Collection path names a moment that does not exist.
    UnknownMoment(MomentId),
    /// Child id does not exist in the addressed collection.
    UnknownChild(Uuid),
    /// Response form edit names a question absent from the template.
    UnknownQuestion(QuestionId),
    /// Child kind or field does not belong to the addressed collection.
    FieldMismatch { path: CollectionPath },
    /// Removal would leave the collection below its minimum length.
    MinimumCardinality { path: CollectionPath, min: usize },
    /// List index outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// Document is locked while a submission is in flight.
    SubmissionInFlight,
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMoment(id) => write!(f, "moment not found: {id}"),
            Self::UnknownChild(id) => write!(f, "child not found: {id}"),
            Self::UnknownQuestion(id) => write!(f, "question not found: {id}"),
            Self::FieldMismatch { path } => {
                write!(f, "edit does not apply to collection {path:?}")
            }
            Self::MinimumCardinality { path, min } => {
                write!(f, "collection {path:?} must keep at least {min} item(s)")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::SubmissionInFlight => write!(f, "document is locked by a pending submission"),
        }
    }
}

impl Error for EditError {}
