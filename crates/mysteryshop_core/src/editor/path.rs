//! Typed addresses into the checklist tree.
//!
//! Collections and fields are named by enums, never by string keys, so an
//! edit that targets a field the child does not have is caught at the call
//! site or rejected as `FieldMismatch`.

use crate::model::checklist::{ChecklistStatus, MomentId, Pillar};

/// Names one ordered child collection in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionPath {
    /// `checklist.moments`
    Moments,
    /// `checklist.moments[id].questions`
    Questions(MomentId),
}

impl CollectionPath {
    /// Smallest length the collection may have.
    pub fn min_len(self) -> usize {
        1
    }
}

/// One-field replacement for a child node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    MomentName(String),
    MomentDescription(String),
    QuestionText(String),
    QuestionPillar(Option<Pillar>),
    QuestionRequired(bool),
}

impl FieldChange {
    /// Whether this change applies to children of `path`.
    pub fn targets(&self, path: CollectionPath) -> bool {
        match self {
            Self::MomentName(_) | Self::MomentDescription(_) => path == CollectionPath::Moments,
            Self::QuestionText(_) | Self::QuestionPillar(_) | Self::QuestionRequired(_) => {
                matches!(path, CollectionPath::Questions(_))
            }
        }
    }
}

/// One-field replacement for the checklist root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistChange {
    Name(String),
    Description(String),
    Status(Option<ChecklistStatus>),
}
