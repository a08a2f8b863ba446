//! Declarative whole-document validation.
//!
//! # Responsibility
//! - Map a document snapshot to an ordered list of field-level violations.
//! - Keep rule sets as data (field, predicate, message) so they can be tested
//!   without any UI binding.
//!
//! # Invariants
//! - Validation is pure: no I/O, no mutation of the input.
//! - A report with zero violations is the only submittable state.

use crate::model::checklist::QuestionId;
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub mod checklist;
pub mod response;

pub use checklist::{validate_checklist, CHECKLIST_NAME_MIN_CHARS, QUESTION_TEXT_MIN_CHARS};
pub use response::validate_response;

/// Checklist root fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistField {
    Name,
    Description,
    Status,
    Moments,
}

/// Moment fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentField {
    Name,
    Description,
    Questions,
}

/// Question fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionField {
    Text,
    Pillar,
    Required,
}

/// Response form header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseField {
    VisitDate,
    VisitTime,
    ShopperName,
}

/// Address of a validated field. Indices are positions at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Checklist(ChecklistField),
    Moment {
        moment: usize,
        field: MomentField,
    },
    Question {
        moment: usize,
        question: usize,
        field: QuestionField,
    },
    Response(ResponseField),
    Answer(QuestionId),
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checklist(field) => f.write_str(checklist_field_name(*field)),
            Self::Moment { moment, field } => {
                write!(f, "moments[{moment}].{}", moment_field_name(*field))
            }
            Self::Question {
                moment,
                question,
                field,
            } => write!(
                f,
                "moments[{moment}].questions[{question}].{}",
                question_field_name(*field)
            ),
            Self::Response(field) => f.write_str(response_field_name(*field)),
            Self::Answer(id) => write!(f, "answers[{id}].evaluation"),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn checklist_field_name(field: ChecklistField) -> &'static str {
    match field {
        ChecklistField::Name => "name",
        ChecklistField::Description => "description",
        ChecklistField::Status => "status",
        ChecklistField::Moments => "moments",
    }
}

fn moment_field_name(field: MomentField) -> &'static str {
    match field {
        MomentField::Name => "name",
        MomentField::Description => "description",
        MomentField::Questions => "questions",
    }
}

fn question_field_name(field: QuestionField) -> &'static str {
    match field {
        QuestionField::Text => "text",
        QuestionField::Pillar => "pillar",
        QuestionField::Required => "required",
    }
}

fn response_field_name(field: ResponseField) -> &'static str {
    match field {
        ResponseField::VisitDate => "visit_date",
        ResponseField::VisitTime => "visit_time",
        ResponseField::ShopperName => "shopper_name",
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: FieldPath,
    pub message: String,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Text reported when a rule fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleMessage {
    Fixed(&'static str),
    /// Renders `"<subject> too short: minimum <min> characters"`.
    TooShort { subject: &'static str, min: usize },
}

impl Display for RuleMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(text) => f.write_str(text),
            Self::TooShort { subject, min } => {
                write!(f, "{subject} too short: minimum {min} characters")
            }
        }
    }
}

/// Declarative rule: `holds` must return `true` for `field` to be valid.
pub(crate) struct Rule<T: ?Sized, F> {
    pub(crate) field: F,
    pub(crate) holds: fn(&T) -> bool,
    pub(crate) message: RuleMessage,
}

impl<T: ?Sized, F: Copy> Rule<T, F> {
    /// Runs every rule in `rules` against `subject` and records failures.
    pub(crate) fn apply_all(
        rules: &[Self],
        subject: &T,
        path: impl Fn(F) -> FieldPath,
        report: &mut ValidationReport,
    ) {
        for rule in rules {
            if !(rule.holds)(subject) {
                report.push(path(rule.field), rule.message.to_string());
            }
        }
    }
}

/// Flat, ordered result of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Empty (valid) report.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, path: FieldPath, message: impl Into<String>) {
        self.violations.push(Violation {
            path,
            message: message.into(),
        });
    }

    /// Whether the document is submittable.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations in report order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// First violation recorded for `path`; this is what a form shows next
    /// to the field.
    pub fn first_for(&self, path: &FieldPath) -> Option<&Violation> {
        self.violations
            .iter()
            .find(|violation| &violation.path == path)
    }

    /// First violation of every failing field, in report order.
    pub fn first_per_field(&self) -> Vec<&Violation> {
        let mut seen = Vec::new();
        let mut firsts = Vec::new();
        for violation in &self.violations {
            if !seen.contains(&violation.path) {
                seen.push(violation.path);
                firsts.push(violation);
            }
        }
        firsts
    }

    /// `path: message` lines, used for notifications and logs.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
