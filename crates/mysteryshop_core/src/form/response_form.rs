//! Mystery-shopper response form session.

use crate::editor::EditResult;
use crate::model::checklist::{Checklist, QuestionId};
use crate::model::response::{CompletedResponse, Evaluation, ResponseDraft};
use crate::submission::{DocumentKind, FormSession, SubmittableDocument};
use crate::validation::{validate_response, ValidationReport};

impl SubmittableDocument for ResponseDraft {
    const KIND: DocumentKind = DocumentKind::Response;
    const SUCCESS_MESSAGE: &'static str =
        "Checklist sent successfully. Thank you for your evaluation!";

    type Payload = CompletedResponse;

    fn validate(&self) -> ValidationReport {
        validate_response(self)
    }

    fn payload(&self) -> Self::Payload {
        self.complete()
    }

    fn reset(&self) -> Self {
        self.cleared()
    }
}

/// Form for answering one checklist.
pub type ResponseForm = FormSession<ResponseDraft>;

impl FormSession<ResponseDraft> {
    /// Opens an empty form for `template`.
    pub fn for_checklist(template: Checklist) -> Self {
        Self::with_document(ResponseDraft::new(template))
    }

    pub fn draft(&self) -> &ResponseDraft {
        self.document()
    }

    pub fn set_visit_date(&mut self, date: Option<String>) -> EditResult<()> {
        self.document_mut()?.visit_date = date;
        Ok(())
    }

    pub fn set_visit_time(&mut self, time: Option<String>) -> EditResult<()> {
        self.document_mut()?.visit_time = time;
        Ok(())
    }

    pub fn set_shopper_name(&mut self, name: impl Into<String>) -> EditResult<()> {
        self.document_mut()?.shopper_name = name.into();
        Ok(())
    }

    /// Adds an attendant; blank names are ignored (`Ok(false)`).
    pub fn add_attendant(&mut self, name: &str) -> EditResult<bool> {
        Ok(self.document_mut()?.add_attendant(name))
    }

    pub fn update_attendant(&mut self, index: usize, name: impl Into<String>) -> EditResult<()> {
        self.document_mut()?.update_attendant(index, name)
    }

    pub fn remove_attendant(&mut self, index: usize) -> EditResult<String> {
        self.document_mut()?.remove_attendant(index)
    }

    pub fn set_evaluation(
        &mut self,
        question_id: QuestionId,
        evaluation: Option<Evaluation>,
    ) -> EditResult<()> {
        self.document_mut()?.set_evaluation(question_id, evaluation)
    }

    pub fn set_notes(
        &mut self,
        question_id: QuestionId,
        notes: impl Into<String>,
    ) -> EditResult<()> {
        self.document_mut()?.set_notes(question_id, notes)
    }

    /// Adds an attachment file name; blank names are ignored (`Ok(false)`).
    pub fn attach(&mut self, file_name: &str) -> EditResult<bool> {
        Ok(self.document_mut()?.attach(file_name))
    }

    pub fn detach(&mut self, index: usize) -> EditResult<String> {
        self.document_mut()?.detach(index)
    }
}
