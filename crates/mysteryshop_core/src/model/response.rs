//! Completed response model (read side).
//!
//! # Responsibility
//! - Describe a filled checklist as submitted by a mystery shopper.
//! - Carry per-question evaluation outcomes for compliance reports.
//!
//! # Invariants
//! - Moment and question order mirrors the checklist the response was taken from.
//! - `evaluation == None` only happens for optional questions left blank.
//! - A draft only holds answers for questions of its own template.

use crate::editor::{EditError, EditResult};
use crate::model::checklist::{Checklist, Pillar, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome recorded for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    Compliant,
    NonCompliant,
    NotApplicable,
}

impl Evaluation {
    /// Short code printed in tables (`CF`, `NC`, `NA`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Compliant => "CF",
            Self::NonCompliant => "NC",
            Self::NotApplicable => "NA",
        }
    }

    /// Parses a short table code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CF" => Some(Self::Compliant),
            "NC" => Some(Self::NonCompliant),
            "NA" => Some(Self::NotApplicable),
            _ => None,
        }
    }
}

/// Answer slot edited on the response form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub evaluation: Option<Evaluation>,
    pub notes: String,
}

/// One answered question inside a completed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question_id: QuestionId,
    pub text: String,
    pub pillar: Option<Pillar>,
    pub required: bool,
    pub evaluation: Option<Evaluation>,
    pub notes: String,
}

/// One moment inside a completed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredMoment {
    pub name: String,
    pub questions: Vec<AnsweredQuestion>,
}

/// Completed checklist instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedResponse {
    pub checklist_name: String,
    pub shopper_name: String,
    /// `YYYY-MM-DD`.
    pub visit_date: String,
    /// `HH:MM`.
    pub visit_time: String,
    pub attendants: Vec<String>,
    pub moments: Vec<AnsweredMoment>,
    /// Attachment file names; upload storage is external.
    pub attachments: Vec<String>,
}

impl CompletedResponse {
    /// Iterates answered questions in document order.
    pub fn questions(&self) -> impl Iterator<Item = &AnsweredQuestion> {
        self.moments.iter().flat_map(|moment| moment.questions.iter())
    }
}

/// Response form being filled by a mystery shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDraft {
    /// Checklist being answered. Read-only from the form's point of view.
    pub template: Checklist,
    /// `YYYY-MM-DD`.
    pub visit_date: Option<String>,
    /// `HH:MM`.
    pub visit_time: Option<String>,
    pub shopper_name: String,
    pub attendants: Vec<String>,
    pub answers: BTreeMap<QuestionId, Answer>,
    pub attachments: Vec<String>,
}

impl ResponseDraft {
    /// Empty draft for `template`.
    pub fn new(template: Checklist) -> Self {
        Self {
            template,
            visit_date: None,
            visit_time: None,
            shopper_name: String::new(),
            attendants: Vec::new(),
            answers: BTreeMap::new(),
            attachments: Vec::new(),
        }
    }

    /// Empty draft for the same template.
    pub fn cleared(&self) -> Self {
        Self::new(self.template.clone())
    }

    /// Answer slot of `question_id`, if anything was entered.
    pub fn answer(&self, question_id: QuestionId) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    /// Records (or clears) the evaluation of one question.
    pub fn set_evaluation(
        &mut self,
        question_id: QuestionId,
        evaluation: Option<Evaluation>,
    ) -> EditResult<()> {
        self.answer_mut(question_id)?.evaluation = evaluation;
        Ok(())
    }

    /// Replaces the free-text notes of one question.
    pub fn set_notes(
        &mut self,
        question_id: QuestionId,
        notes: impl Into<String>,
    ) -> EditResult<()> {
        self.answer_mut(question_id)?.notes = notes.into();
        Ok(())
    }

    /// Adds an attendant name. Blank input is ignored and returns `false`.
    pub fn add_attendant(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.attendants.push(trimmed.to_string());
        true
    }

    /// Replaces the attendant at `index`.
    pub fn update_attendant(&mut self, index: usize, name: impl Into<String>) -> EditResult<()> {
        let len = self.attendants.len();
        let slot = self
            .attendants
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { index, len })?;
        *slot = name.into();
        Ok(())
    }

    /// Removes and returns the attendant at `index`.
    pub fn remove_attendant(&mut self, index: usize) -> EditResult<String> {
        checked_remove(&mut self.attendants, index)
    }

    /// Adds an attachment file name. Blank input is ignored and returns `false`.
    pub fn attach(&mut self, file_name: &str) -> bool {
        let trimmed = file_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.attachments.push(trimmed.to_string());
        true
    }

    /// Removes and returns the attachment at `index`.
    pub fn detach(&mut self, index: usize) -> EditResult<String> {
        checked_remove(&mut self.attachments, index)
    }

    /// Builds the completed response as it will be submitted.
    pub fn complete(&self) -> CompletedResponse {
        let moments = self
            .template
            .moments
            .iter()
            .map(|moment| AnsweredMoment {
                name: moment.name.clone(),
                questions: moment
                    .questions
                    .iter()
                    .map(|question| {
                        let answer = self.answers.get(&question.id);
                        AnsweredQuestion {
                            question_id: question.id,
                            text: question.text.clone(),
                            pillar: question.pillar,
                            required: question.required,
                            evaluation: answer.and_then(|answer| answer.evaluation),
                            notes: answer.map(|answer| answer.notes.clone()).unwrap_or_default(),
                        }
                    })
                    .collect(),
            })
            .collect();

        CompletedResponse {
            checklist_name: self.template.name.clone(),
            shopper_name: self.shopper_name.trim().to_string(),
            visit_date: trimmed_or_empty(self.visit_date.as_deref()),
            visit_time: trimmed_or_empty(self.visit_time.as_deref()),
            attendants: self
                .attendants
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            moments,
            attachments: self.attachments.clone(),
        }
    }

    fn answer_mut(&mut self, question_id: QuestionId) -> EditResult<&mut Answer> {
        if self.template.questions().all(|(_, question)| question.id != question_id) {
            return Err(EditError::UnknownQuestion(question_id));
        }
        Ok(self.answers.entry(question_id).or_default())
    }
}

fn trimmed_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn checked_remove(items: &mut Vec<String>, index: usize) -> EditResult<String> {
    if index >= items.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::{Evaluation, ResponseDraft};
    use crate::editor::EditError;
    use crate::model::checklist::{Checklist, Pillar, Question};
    use uuid::Uuid;

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!(Evaluation::from_code("cf"), Some(Evaluation::Compliant));
        assert_eq!(Evaluation::from_code(" NC "), Some(Evaluation::NonCompliant));
        assert_eq!(Evaluation::from_code("na"), Some(Evaluation::NotApplicable));
        assert_eq!(Evaluation::from_code("yes"), None);
        assert_eq!(Evaluation::NonCompliant.code(), "NC");
    }

    #[test]
    fn evaluation_serializes_snake_case() {
        let json = serde_json::to_value(Evaluation::NotApplicable).expect("serialize");
        assert_eq!(json, "not_applicable");
    }

    fn template() -> Checklist {
        let mut checklist = Checklist::new();
        checklist.name = "Atendimento - Loja Centro".to_string();
        checklist.moments[0].name = "Recepção".to_string();
        checklist.moments[0].questions = vec![
            Question::with_text("O atendente cumprimentou?", Pillar::Experience, true),
            Question::with_text("Informações foram claras?", Pillar::Experience, false),
        ];
        checklist
    }

    #[test]
    fn answers_for_unknown_questions_are_rejected() {
        let mut draft = ResponseDraft::new(template());
        let stray = Uuid::new_v4();
        let err = draft
            .set_evaluation(stray, Some(Evaluation::Compliant))
            .expect_err("unknown question");
        assert_eq!(err, EditError::UnknownQuestion(stray));
        assert!(draft.answers.is_empty());
    }

    #[test]
    fn attendants_ignore_blank_names_and_check_indices() {
        let mut draft = ResponseDraft::new(template());
        assert!(!draft.add_attendant("   "));
        assert!(draft.add_attendant(" Ana "));
        assert_eq!(draft.attendants, vec!["Ana".to_string()]);
        assert!(matches!(
            draft.remove_attendant(3),
            Err(EditError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(draft.remove_attendant(0).expect("remove"), "Ana");
    }

    #[test]
    fn complete_copies_template_order_and_answers() {
        let mut draft = ResponseDraft::new(template());
        let first = draft.template.moments[0].questions[0].id;
        draft
            .set_evaluation(first, Some(Evaluation::NonCompliant))
            .expect("evaluate");
        draft.set_notes(first, "sem saudação").expect("notes");
        draft.shopper_name = "  Carlos ".to_string();

        let completed = draft.complete();
        assert_eq!(completed.shopper_name, "Carlos");
        assert_eq!(completed.moments[0].name, "Recepção");
        let questions: Vec<_> = completed.questions().collect();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].evaluation, Some(Evaluation::NonCompliant));
        assert_eq!(questions[0].notes, "sem saudação");
        assert_eq!(questions[1].evaluation, None);
    }

    #[test]
    fn complete_trims_visit_date_and_time() {
        let mut draft = ResponseDraft::new(template());
        draft.visit_date = Some(" 2024-01-15 ".to_string());
        draft.visit_time = Some("\t09:15 ".to_string());

        let completed = draft.complete();
        assert_eq!(completed.visit_date, "2024-01-15");
        assert_eq!(completed.visit_time, "09:15");

        draft.visit_time = None;
        assert_eq!(draft.complete().visit_time, "");
    }
}
