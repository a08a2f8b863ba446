use mysteryshop_core::editor::{append, remove, CollectionPath, NewChild};
use mysteryshop_core::submission::SubmissionEnvelope;
use mysteryshop_core::validation::{ChecklistField, FieldPath};
use mysteryshop_core::{
    validate_checklist, Checklist, ChecklistEditor, FieldChange, GatewayError, NotificationLevel,
    Pillar, SimulatedGateway, SubmissionState, SubmitOutcome,
};
use std::collections::HashSet;
use std::time::Duration;

fn name_violation(checklist: &Checklist) -> Option<String> {
    validate_checklist(checklist)
        .first_for(&FieldPath::Checklist(ChecklistField::Name))
        .map(|violation| violation.message.clone())
}

fn fill_valid(editor: &mut ChecklistEditor) {
    let moment_id = editor.checklist().moments[0].id;
    let question_id = editor.checklist().moments[0].questions[0].id;
    editor.set_name("Atendimento Loja").unwrap();
    editor
        .update_moment(moment_id, FieldChange::MomentName("Recepção".into()))
        .unwrap();
    editor
        .update_question(
            moment_id,
            question_id,
            FieldChange::QuestionText("O atendente cumprimentou o cliente?".into()),
        )
        .unwrap();
}

#[test]
fn name_length_boundary() {
    let mut checklist = Checklist::new();
    checklist.name = "AB".to_string();
    assert_eq!(
        name_violation(&checklist).as_deref(),
        Some("name too short: minimum 3 characters")
    );

    checklist.name = "ABC".to_string();
    assert_eq!(name_violation(&checklist), None);
}

#[test]
fn zero_moments_always_fails() {
    let mut checklist = Checklist::new();
    checklist.name = "Atendimento Loja".to_string();
    checklist.moments.clear();

    let report = validate_checklist(&checklist);
    assert!(report
        .first_for(&FieldPath::Checklist(ChecklistField::Moments))
        .is_some());
}

#[test]
fn removing_last_moment_or_question_leaves_tree_unchanged() {
    let tree = Checklist::new();
    let before = tree.clone();
    let moment_id = tree.moments[0].id;
    let question_id = tree.moments[0].questions[0].id;

    assert!(remove(&tree, CollectionPath::Moments, moment_id).is_err());
    assert!(remove(&tree, CollectionPath::Questions(moment_id), question_id).is_err());
    assert_eq!(tree, before);
}

#[test]
fn appended_ids_are_distinct_from_siblings() {
    let mut tree = Checklist::new();
    for _ in 0..5 {
        let before = tree.moments.len();
        let (next, id) = append(
            &tree,
            CollectionPath::Moments,
            NewChild::default_for(CollectionPath::Moments),
        )
        .unwrap();
        assert_eq!(next.moments.len(), before + 1);
        assert!(tree.moments.iter().all(|moment| moment.id != id));
        tree = next;
    }

    let ids: HashSet<_> = tree.moments.iter().map(|moment| moment.id).collect();
    assert_eq!(ids.len(), tree.moments.len());
}

#[test]
fn scenario_invalid_then_valid_submission_resets_editor() {
    let mut editor = ChecklistEditor::new();
    let gateway = SimulatedGateway::new(Duration::ZERO);

    editor.set_name("AB").unwrap();
    let rejected = editor.submit(&gateway);
    assert!(matches!(rejected, SubmitOutcome::Rejected(_)));
    assert_eq!(gateway.write_count(), 0);
    assert!(editor
        .violations()
        .violations()
        .iter()
        .any(|violation| violation.message == "name too short: minimum 3 characters"));

    fill_valid(&mut editor);
    let outcome = editor.submit(&gateway);
    assert!(outcome.is_submitted());
    assert_eq!(gateway.write_count(), 1);
    assert_eq!(
        editor.trace(),
        &[
            SubmissionState::Idle,
            SubmissionState::Validating,
            SubmissionState::Submitting,
            SubmissionState::Submitted
        ]
    );
    assert!(editor.checklist().is_pristine());
    assert!(editor.violations().is_empty());

    let notifications = editor.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Success);
    assert_eq!(notifications[0].message, "Checklist created successfully");

    let envelope: SubmissionEnvelope = gateway.last_envelope().unwrap();
    let sent: Checklist = serde_json::from_str(&envelope.body).unwrap();
    assert_eq!(sent.name, "Atendimento Loja");
    assert_eq!(sent.moments[0].questions[0].pillar, Some(Pillar::Experience));
}

#[test]
fn failed_write_returns_to_idle_with_document_unchanged() {
    let mut editor = ChecklistEditor::new();
    fill_valid(&mut editor);
    let before = editor.checklist().clone();
    let gateway = SimulatedGateway::failing(
        Duration::ZERO,
        GatewayError::Unavailable("connection reset".to_string()),
    );

    let outcome = editor.submit(&gateway);
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(editor.state(), SubmissionState::Idle);
    assert_eq!(editor.checklist(), &before);
    assert_eq!(
        editor.trace(),
        &[
            SubmissionState::Idle,
            SubmissionState::Validating,
            SubmissionState::Submitting,
            SubmissionState::Failed,
            SubmissionState::Idle
        ]
    );

    let notifications = editor.take_notifications();
    assert_eq!(notifications[0].level, NotificationLevel::Error);
}
