//! Checklist document model.
//!
//! # Responsibility
//! - Define the checklist tree edited by administrators:
//!   `Checklist -> Moment -> Question`.
//! - Provide the default document used when an editor opens or resets.
//!
//! # Invariants
//! - Moment and question ids are assigned once at creation and never reused.
//! - Each question belongs to exactly one moment, each moment to exactly one
//!   checklist. There are no back-references.
//! - Minimum cardinality (>=1 moment, >=1 question per moment) is enforced by
//!   the collection controller, not by these constructors. A hand-built tree
//!   can violate it and will then fail validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a moment inside one checklist.
pub type MomentId = Uuid;

/// Stable identifier of a question inside one moment.
pub type QuestionId = Uuid;

/// Publication state of a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    /// Visible to evaluators.
    Active,
    /// Still being authored.
    Draft,
}

/// Classification axis used when aggregating compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Experience,
    Operation,
    Sales,
}

impl Pillar {
    /// All pillars in display order.
    pub const ALL: [Pillar; 3] = [Pillar::Experience, Pillar::Operation, Pillar::Sales];

    /// Stable lowercase label, matches the wire format.
    pub fn label(self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Operation => "operation",
            Self::Sales => "sales",
        }
    }
}

/// One evaluation question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// `None` means the selector was cleared; validation rejects it.
    pub pillar: Option<Pillar>,
    pub required: bool,
}

impl Question {
    /// Creates an empty question with editor defaults
    /// (`pillar = Experience`, `required = true`).
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            text: String::new(),
            pillar: Some(Pillar::Experience),
            required: true,
        }
    }

    /// Creates a filled question with a fresh id.
    pub fn with_text(text: impl Into<String>, pillar: Pillar, required: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            pillar: Some(pillar),
            required,
        }
    }
}

impl Default for Question {
    fn default() -> Self {
        Self::new()
    }
}

/// A moment of truth: one stage of the customer interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
    pub id: MomentId,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Moment {
    /// Creates an empty moment holding one default question.
    pub fn new() -> Self {
        Self::named("", "")
    }

    /// Creates a moment with one default question.
    pub fn named(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            questions: vec![Question::new()],
        }
    }

    /// Returns the question with `id`, if present.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }
}

impl Default for Moment {
    fn default() -> Self {
        Self::new()
    }
}

/// Checklist document edited as one transactional unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub name: String,
    pub description: String,
    /// `None` means the selector was cleared; validation rejects it.
    pub status: Option<ChecklistStatus>,
    pub moments: Vec<Moment>,
}

impl Checklist {
    /// Default empty document: one empty moment with one empty question.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            status: Some(ChecklistStatus::Active),
            moments: vec![Moment::new()],
        }
    }

    /// Returns the moment with `id`, if present.
    pub fn moment(&self, id: MomentId) -> Option<&Moment> {
        self.moments.iter().find(|moment| moment.id == id)
    }

    /// Total number of questions across all moments.
    pub fn question_count(&self) -> usize {
        self.moments.iter().map(|moment| moment.questions.len()).sum()
    }

    /// Iterates `(moment, question)` pairs in document order.
    pub fn questions(&self) -> impl Iterator<Item = (&Moment, &Question)> {
        self.moments
            .iter()
            .flat_map(|moment| moment.questions.iter().map(move |question| (moment, question)))
    }

    /// Whether this tree has the same shape and content as a fresh document,
    /// ignoring identifiers.
    pub fn is_pristine(&self) -> bool {
        let fresh = Question::new();
        self.name.is_empty()
            && self.description.is_empty()
            && self.status == Some(ChecklistStatus::Active)
            && self.moments.len() == 1
            && self.moments[0].name.is_empty()
            && self.moments[0].description.is_empty()
            && self.moments[0].questions.len() == 1
            && self.moments[0].questions[0].text.is_empty()
            && self.moments[0].questions[0].pillar == fresh.pillar
            && self.moments[0].questions[0].required == fresh.required
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::new()
    }
}
