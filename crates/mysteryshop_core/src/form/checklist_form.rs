//! Checklist builder session.
//!
//! # Responsibility
//! - Bind the collection controller and the checklist validator to one
//!   exclusively owned editor instance.
//! - Turn cardinality rejections into silent no-ops (`Ok(false)`), the way a
//!   disabled remove button behaves.

use crate::editor::{
    append, can_remove, remove, update, update_checklist, ChecklistChange, CollectionPath,
    EditError, EditResult, FieldChange, NewChild,
};
use crate::model::checklist::{Checklist, ChecklistStatus, MomentId, QuestionId};
use crate::submission::{DocumentKind, FormSession, SubmittableDocument};
use crate::validation::{validate_checklist, ValidationReport};
use log::debug;
use uuid::Uuid;

impl SubmittableDocument for Checklist {
    const KIND: DocumentKind = DocumentKind::Checklist;
    const SUCCESS_MESSAGE: &'static str = "Checklist created successfully";

    type Payload = Checklist;

    fn validate(&self) -> ValidationReport {
        validate_checklist(self)
    }

    fn payload(&self) -> Self::Payload {
        self.clone()
    }

    fn reset(&self) -> Self {
        Checklist::new()
    }
}

/// Editor for one checklist document.
pub type ChecklistEditor = FormSession<Checklist>;

impl FormSession<Checklist> {
    /// Opens an editor over the default empty document.
    pub fn new() -> Self {
        Self::with_document(Checklist::new())
    }

    pub fn checklist(&self) -> &Checklist {
        self.document()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> EditResult<()> {
        self.change_root(ChecklistChange::Name(name.into()))
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> EditResult<()> {
        self.change_root(ChecklistChange::Description(description.into()))
    }

    pub fn set_status(&mut self, status: Option<ChecklistStatus>) -> EditResult<()> {
        self.change_root(ChecklistChange::Status(status))
    }

    /// Appends a default moment (with one default question).
    pub fn add_moment(&mut self) -> EditResult<MomentId> {
        self.append_child(CollectionPath::Moments)
    }

    /// Removes a moment; returns `Ok(false)` when it is the last one.
    pub fn remove_moment(&mut self, moment_id: MomentId) -> EditResult<bool> {
        self.remove_child(CollectionPath::Moments, moment_id)
    }

    /// Whether the remove-moment action is available.
    pub fn can_remove_moment(&self) -> bool {
        can_remove(self.document(), CollectionPath::Moments)
    }

    pub fn update_moment(&mut self, moment_id: MomentId, change: FieldChange) -> EditResult<()> {
        self.update_child(CollectionPath::Moments, moment_id, change)
    }

    /// Appends a default question to `moment_id`.
    pub fn add_question(&mut self, moment_id: MomentId) -> EditResult<QuestionId> {
        self.append_child(CollectionPath::Questions(moment_id))
    }

    /// Removes a question; returns `Ok(false)` when it is the last one of its moment.
    pub fn remove_question(
        &mut self,
        moment_id: MomentId,
        question_id: QuestionId,
    ) -> EditResult<bool> {
        self.remove_child(CollectionPath::Questions(moment_id), question_id)
    }

    /// Whether the remove-question action is available for `moment_id`.
    pub fn can_remove_question(&self, moment_id: MomentId) -> bool {
        can_remove(self.document(), CollectionPath::Questions(moment_id))
    }

    pub fn update_question(
        &mut self,
        moment_id: MomentId,
        question_id: QuestionId,
        change: FieldChange,
    ) -> EditResult<()> {
        self.update_child(CollectionPath::Questions(moment_id), question_id, change)
    }

    fn change_root(&mut self, change: ChecklistChange) -> EditResult<()> {
        let document = self.document_mut()?;
        *document = update_checklist(document, change);
        Ok(())
    }

    fn append_child(&mut self, path: CollectionPath) -> EditResult<Uuid> {
        let document = self.document_mut()?;
        let (next, id) = append(document, path, NewChild::default_for(path))?;
        *document = next;
        Ok(id)
    }

    fn remove_child(&mut self, path: CollectionPath, child_id: Uuid) -> EditResult<bool> {
        let document = self.document_mut()?;
        match remove(document, path, child_id) {
            Ok(next) => {
                *document = next;
                Ok(true)
            }
            Err(EditError::MinimumCardinality { min, .. }) => {
                debug!(
                    "event=edit_rejected module=editor reason=minimum_cardinality path={path:?} min={min}"
                );
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn update_child(
        &mut self,
        path: CollectionPath,
        child_id: Uuid,
        change: FieldChange,
    ) -> EditResult<()> {
        let document = self.document_mut()?;
        *document = update(document, path, child_id, change)?;
        Ok(())
    }
}

impl Default for FormSession<Checklist> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ChecklistEditor;
    use crate::editor::{EditError, FieldChange};
    use crate::submission::{
        GatewayError, SimulatedGateway, SubmissionGateway, SubmissionState, SubmitOutcome,
        SubmitRejected,
    };
    use std::time::Duration;

    fn valid_editor(name: &str) -> ChecklistEditor {
        let mut editor = ChecklistEditor::new();
        let moment_id = editor.checklist().moments[0].id;
        let question_id = editor.checklist().moments[0].questions[0].id;
        editor.set_name(name).expect("edit");
        editor
            .update_question(
                moment_id,
                question_id,
                FieldChange::QuestionText("Cumprimentou o cliente?".into()),
            )
            .expect("edit");
        editor
    }

    #[test]
    fn last_moment_and_question_cannot_be_removed() {
        let mut editor = ChecklistEditor::new();
        let before = editor.checklist().clone();
        let moment_id = before.moments[0].id;
        let question_id = before.moments[0].questions[0].id;

        assert!(!editor.can_remove_moment());
        assert!(!editor.remove_moment(moment_id).expect("no error"));
        assert!(!editor.can_remove_question(moment_id));
        assert!(!editor
            .remove_question(moment_id, question_id)
            .expect("no error"));
        assert_eq!(editor.checklist(), &before);
    }

    #[test]
    fn unknown_ids_surface_as_errors() {
        let mut editor = ChecklistEditor::new();
        let stray = uuid::Uuid::new_v4();
        assert_eq!(
            editor.add_question(stray),
            Err(EditError::UnknownMoment(stray))
        );
    }

    #[test]
    fn edits_are_locked_while_submission_is_pending() {
        let mut editor = ChecklistEditor::new();
        let moment_id = editor.checklist().moments[0].id;
        let question_id = editor.checklist().moments[0].questions[0].id;
        editor.set_name("Atendimento Loja").expect("edit");
        editor
            .update_question(
                moment_id,
                question_id,
                FieldChange::QuestionText("Cumprimentou o cliente?".into()),
            )
            .expect("edit");

        let pending = editor.begin_submit().expect("valid document");
        assert!(editor.is_submitting());
        assert_eq!(editor.set_name("Outro"), Err(EditError::SubmissionInFlight));
        assert_eq!(editor.add_moment(), Err(EditError::SubmissionInFlight));

        let outcome = editor.complete_submit(
            pending,
            Err(GatewayError::Unavailable("timeout".to_string())),
        );
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(editor.state(), SubmissionState::Idle);
        editor.set_name("Outro").expect("unlocked after failure");
    }

    #[test]
    fn second_begin_while_pending_is_rejected_without_side_effects() {
        let mut editor = valid_editor("Atendimento Loja");
        let pending = editor.begin_submit().expect("valid document");
        let document = editor.checklist().clone();
        let trace = editor.trace().to_vec();

        assert!(matches!(editor.begin_submit(), Err(SubmitRejected::InFlight)));
        assert_eq!(editor.state(), SubmissionState::Submitting);
        assert_eq!(editor.trace(), trace.as_slice());
        assert_eq!(editor.checklist(), &document);

        let gateway = SimulatedGateway::new(Duration::ZERO);
        let result = gateway.write(pending.envelope());
        assert!(editor.complete_submit(pending, result).is_submitted());
        assert_eq!(gateway.write_count(), 1);
    }

    #[test]
    fn ticket_from_another_session_is_stale() {
        let mut first = valid_editor("Atendimento Loja");
        let mut second = valid_editor("Operação Drive");
        let first_ticket = first.begin_submit().expect("valid document");
        let second_ticket = second.begin_submit().expect("valid document");
        let gateway = SimulatedGateway::new(Duration::ZERO);

        let foreign = gateway.write(first_ticket.envelope());
        assert_eq!(
            second.complete_submit(first_ticket, foreign),
            SubmitOutcome::Rejected(SubmitRejected::StaleTicket)
        );
        assert_eq!(second.state(), SubmissionState::Submitting);
        assert_eq!(second.checklist().name, "Operação Drive");
        assert!(second.take_notifications().is_empty());

        let own = gateway.write(second_ticket.envelope());
        assert!(second.complete_submit(second_ticket, own).is_submitted());
        assert_eq!(second.state(), SubmissionState::Submitted);
        assert!(first.is_submitting());
    }

    #[test]
    fn submit_with_default_document_reports_violations() {
        let mut editor = ChecklistEditor::new();
        let gateway = SimulatedGateway::new(Duration::ZERO);

        let outcome = editor.submit(&gateway);
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(gateway.write_count(), 0);
        assert!(!editor.violations().is_valid());
        assert_eq!(
            editor.trace(),
            &[
                SubmissionState::Idle,
                SubmissionState::Validating,
                SubmissionState::Invalid,
                SubmissionState::Idle
            ]
        );
    }
}
