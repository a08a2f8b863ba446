//! Editable-collection controller over the checklist tree.
//!
//! # Responsibility
//! - Append, remove and update children of any ordered collection in the tree.
//! - Return a new tree snapshot; the input tree is never mutated.
//!
//! # Invariants
//! - Appended children always receive fresh ids distinct from every sibling.
//! - Removal never drops a collection below `CollectionPath::min_len`.
//! - Updates replace one field in place and never reorder a collection.

use super::path::{ChecklistChange, CollectionPath, FieldChange};
use super::{EditError, EditResult};
use crate::model::checklist::{Checklist, Moment, Question};
use uuid::Uuid;

/// Child node carried by an ordered collection.
trait TreeChild {
    fn id(&self) -> Uuid;
    /// Gives this node (and anything it owns) fresh identifiers.
    fn refresh_ids(&mut self);
}

impl TreeChild for Question {
    fn id(&self) -> Uuid {
        self.id
    }

    fn refresh_ids(&mut self) {
        self.id = Uuid::new_v4();
    }
}

impl TreeChild for Moment {
    fn id(&self) -> Uuid {
        self.id
    }

    fn refresh_ids(&mut self) {
        self.id = Uuid::new_v4();
        for question in &mut self.questions {
            question.refresh_ids();
        }
    }
}

/// Initial content for a child inserted by [`append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewChild {
    Moment(Moment),
    Question(Question),
}

impl NewChild {
    /// Editor defaults for a child of `path`.
    pub fn default_for(path: CollectionPath) -> Self {
        match path {
            CollectionPath::Moments => Self::Moment(Moment::new()),
            CollectionPath::Questions(_) => Self::Question(Question::new()),
        }
    }
}

/// Appends a child at the end of the collection named by `path`.
///
/// The child keeps the field values of `defaults` but always gets a fresh id.
/// A moment supplied without questions receives one default question so the
/// per-moment minimum holds.
///
/// # Errors
/// - `UnknownMoment` when `path` names a missing moment.
/// - `FieldMismatch` when `defaults` is not a child kind of `path`.
pub fn append(
    tree: &Checklist,
    path: CollectionPath,
    defaults: NewChild,
) -> EditResult<(Checklist, Uuid)> {
    let mut next = tree.clone();
    let id = match (path, defaults) {
        (CollectionPath::Moments, NewChild::Moment(mut moment)) => {
            if moment.questions.is_empty() {
                moment.questions.push(Question::new());
            }
            push_unique(&mut next.moments, moment)
        }
        (CollectionPath::Questions(moment_id), NewChild::Question(question)) => {
            let moment = find_mut(&mut next.moments, moment_id)
                .ok_or(EditError::UnknownMoment(moment_id))?;
            push_unique(&mut moment.questions, question)
        }
        (path, _) => return Err(EditError::FieldMismatch { path }),
    };
    Ok((next, id))
}

/// Removes `child_id` from the collection named by `path`.
///
/// # Errors
/// - `MinimumCardinality` when the collection is already at its minimum; the
///   caller's tree is untouched.
/// - `UnknownMoment` / `UnknownChild` when an id does not resolve.
pub fn remove(tree: &Checklist, path: CollectionPath, child_id: Uuid) -> EditResult<Checklist> {
    let mut next = tree.clone();
    match path {
        CollectionPath::Moments => remove_from(&mut next.moments, child_id, path)?,
        CollectionPath::Questions(moment_id) => {
            let moment = find_mut(&mut next.moments, moment_id)
                .ok_or(EditError::UnknownMoment(moment_id))?;
            remove_from(&mut moment.questions, child_id, path)?;
        }
    }
    Ok(next)
}

/// Replaces one field of `child_id` inside the collection named by `path`.
///
/// # Errors
/// - `FieldMismatch` when `change` does not apply to children of `path`.
/// - `UnknownMoment` / `UnknownChild` when an id does not resolve.
pub fn update(
    tree: &Checklist,
    path: CollectionPath,
    child_id: Uuid,
    change: FieldChange,
) -> EditResult<Checklist> {
    if !change.targets(path) {
        return Err(EditError::FieldMismatch { path });
    }

    let mut next = tree.clone();
    match path {
        CollectionPath::Moments => {
            let moment =
                find_mut(&mut next.moments, child_id).ok_or(EditError::UnknownChild(child_id))?;
            match change {
                FieldChange::MomentName(value) => moment.name = value,
                FieldChange::MomentDescription(value) => moment.description = value,
                _ => return Err(EditError::FieldMismatch { path }),
            }
        }
        CollectionPath::Questions(moment_id) => {
            let moment = find_mut(&mut next.moments, moment_id)
                .ok_or(EditError::UnknownMoment(moment_id))?;
            let question = find_mut(&mut moment.questions, child_id)
                .ok_or(EditError::UnknownChild(child_id))?;
            match change {
                FieldChange::QuestionText(value) => question.text = value,
                FieldChange::QuestionPillar(value) => question.pillar = value,
                FieldChange::QuestionRequired(value) => question.required = value,
                _ => return Err(EditError::FieldMismatch { path }),
            }
        }
    }
    Ok(next)
}

/// Replaces one top-level checklist field.
pub fn update_checklist(tree: &Checklist, change: ChecklistChange) -> Checklist {
    let mut next = tree.clone();
    match change {
        ChecklistChange::Name(value) => next.name = value,
        ChecklistChange::Description(value) => next.description = value,
        ChecklistChange::Status(value) => next.status = value,
    }
    next
}

/// Whether removing one child of `path` is currently allowed.
///
/// Returns `false` for an unknown moment.
pub fn can_remove(tree: &Checklist, path: CollectionPath) -> bool {
    collection_len(tree, path).is_some_and(|len| len > path.min_len())
}

fn collection_len(tree: &Checklist, path: CollectionPath) -> Option<usize> {
    match path {
        CollectionPath::Moments => Some(tree.moments.len()),
        CollectionPath::Questions(moment_id) => {
            tree.moment(moment_id).map(|moment| moment.questions.len())
        }
    }
}

fn find_mut<T: TreeChild>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn push_unique<T: TreeChild>(items: &mut Vec<T>, mut child: T) -> Uuid {
    child.refresh_ids();
    while items.iter().any(|item| item.id() == child.id()) {
        child.refresh_ids();
    }
    let id = child.id();
    items.push(child);
    id
}

fn remove_from<T: TreeChild>(
    items: &mut Vec<T>,
    child_id: Uuid,
    path: CollectionPath,
) -> EditResult<()> {
    let index = items
        .iter()
        .position(|item| item.id() == child_id)
        .ok_or(EditError::UnknownChild(child_id))?;
    if items.len() <= path.min_len() {
        return Err(EditError::MinimumCardinality {
            path,
            min: path.min_len(),
        });
    }
    items.remove(index);
    Ok(())
}
