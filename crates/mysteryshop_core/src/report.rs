//! Compliance aggregation over completed responses.
//!
//! # Invariants
//! - `compliance = compliant / (compliant + non_compliant)`; Not-Applicable
//!   answers never count.
//! - Compliance is undefined (`None`) when nothing was evaluated as
//!   compliant or non-compliant.
//! - Unanswered optional questions are ignored entirely.

use crate::model::checklist::Pillar;
use crate::model::response::{AnsweredQuestion, CompletedResponse, Evaluation};
use serde::Serialize;
use std::collections::BTreeMap;

/// Evaluation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceTally {
    pub compliant: u32,
    pub non_compliant: u32,
    pub not_applicable: u32,
}

impl ComplianceTally {
    pub fn record(&mut self, evaluation: Evaluation) {
        match evaluation {
            Evaluation::Compliant => self.compliant += 1,
            Evaluation::NonCompliant => self.non_compliant += 1,
            Evaluation::NotApplicable => self.not_applicable += 1,
        }
    }

    pub fn merge(&mut self, other: &ComplianceTally) {
        self.compliant += other.compliant;
        self.non_compliant += other.non_compliant;
        self.not_applicable += other.not_applicable;
    }

    /// Answers that count toward compliance.
    pub fn evaluated(&self) -> u32 {
        self.compliant + self.non_compliant
    }

    /// Compliance in percent (`0.0..=100.0`).
    pub fn percentage(&self) -> Option<f64> {
        let evaluated = self.evaluated();
        if evaluated == 0 {
            return None;
        }
        Some(f64::from(self.compliant) * 100.0 / f64::from(evaluated))
    }

    /// Percentage rounded half away from zero, as shown on badges.
    pub fn rounded_percentage(&self) -> Option<u8> {
        self.percentage().map(|value| value.round() as u8)
    }
}

/// Tally of one moment inside a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MomentTally {
    pub name: String,
    pub tally: ComplianceTally,
}

/// Compliance breakdown of one completed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseReport {
    pub checklist_name: String,
    pub shopper_name: String,
    pub overall: ComplianceTally,
    pub by_pillar: BTreeMap<Pillar, ComplianceTally>,
    pub by_moment: Vec<MomentTally>,
}

impl ResponseReport {
    pub fn from_response(response: &CompletedResponse) -> Self {
        let mut overall = ComplianceTally::default();
        let mut by_pillar = BTreeMap::new();
        let mut by_moment = Vec::with_capacity(response.moments.len());

        for moment in &response.moments {
            let mut tally = ComplianceTally::default();
            for question in &moment.questions {
                record_question(question, &mut tally, &mut by_pillar);
            }
            overall.merge(&tally);
            by_moment.push(MomentTally {
                name: moment.name.clone(),
                tally,
            });
        }

        Self {
            checklist_name: response.checklist_name.clone(),
            shopper_name: response.shopper_name.clone(),
            overall,
            by_pillar,
            by_moment,
        }
    }
}

/// Dashboard numbers across many responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidatedReport {
    pub responses: usize,
    pub overall: ComplianceTally,
    pub by_pillar: BTreeMap<Pillar, ComplianceTally>,
}

impl ConsolidatedReport {
    /// Total non-compliance findings.
    pub fn non_conformities(&self) -> u32 {
        self.overall.non_compliant
    }

    /// Compliance of `pillar`, `None` when never evaluated.
    pub fn pillar_percentage(&self, pillar: Pillar) -> Option<f64> {
        self.by_pillar.get(&pillar).and_then(ComplianceTally::percentage)
    }
}

/// Aggregates every response into one consolidated report.
pub fn consolidate(responses: &[CompletedResponse]) -> ConsolidatedReport {
    let mut report = ConsolidatedReport {
        responses: responses.len(),
        ..ConsolidatedReport::default()
    };
    for response in responses {
        for question in response.questions() {
            record_question(question, &mut report.overall, &mut report.by_pillar);
        }
    }
    report
}

fn record_question(
    question: &AnsweredQuestion,
    tally: &mut ComplianceTally,
    by_pillar: &mut BTreeMap<Pillar, ComplianceTally>,
) {
    let Some(evaluation) = question.evaluation else {
        return;
    };
    tally.record(evaluation);
    if let Some(pillar) = question.pillar {
        by_pillar.entry(pillar).or_default().record(evaluation);
    }
}

#[cfg(test)]
mod tests {
    use super::{consolidate, ComplianceTally, ResponseReport};
    use crate::model::checklist::Pillar;
    use crate::model::response::{
        AnsweredMoment, AnsweredQuestion, CompletedResponse, Evaluation,
    };
    use uuid::Uuid;

    fn question(pillar: Pillar, evaluation: Option<Evaluation>) -> AnsweredQuestion {
        AnsweredQuestion {
            question_id: Uuid::new_v4(),
            text: "Pergunta de teste".to_string(),
            pillar: Some(pillar),
            required: evaluation.is_some(),
            evaluation,
            notes: String::new(),
        }
    }

    fn response(moments: Vec<AnsweredMoment>) -> CompletedResponse {
        CompletedResponse {
            checklist_name: "Atendimento - Loja Centro".to_string(),
            shopper_name: "Carlos Santos".to_string(),
            visit_date: "2024-01-15".to_string(),
            visit_time: "14:30".to_string(),
            attendants: Vec::new(),
            moments,
            attachments: Vec::new(),
        }
    }

    #[test]
    fn not_applicable_is_excluded_from_percentage() {
        let mut tally = ComplianceTally::default();
        tally.record(Evaluation::Compliant);
        tally.record(Evaluation::Compliant);
        tally.record(Evaluation::Compliant);
        tally.record(Evaluation::NonCompliant);
        tally.record(Evaluation::NotApplicable);

        assert_eq!(tally.percentage(), Some(75.0));
        assert_eq!(tally.rounded_percentage(), Some(75));
    }

    #[test]
    fn only_not_applicable_has_no_percentage() {
        let mut tally = ComplianceTally::default();
        tally.record(Evaluation::NotApplicable);
        assert_eq!(tally.percentage(), None);
    }

    #[test]
    fn response_report_splits_by_pillar_and_moment() {
        let completed = response(vec![
            AnsweredMoment {
                name: "Recepção".to_string(),
                questions: vec![
                    question(Pillar::Experience, Some(Evaluation::Compliant)),
                    question(Pillar::Operation, Some(Evaluation::NonCompliant)),
                ],
            },
            AnsweredMoment {
                name: "Atendimento Técnico".to_string(),
                questions: vec![
                    question(Pillar::Sales, Some(Evaluation::Compliant)),
                    question(Pillar::Experience, None),
                ],
            },
        ]);

        let report = ResponseReport::from_response(&completed);
        assert_eq!(report.overall.evaluated(), 3);
        assert_eq!(report.by_moment[0].tally.percentage(), Some(50.0));
        assert_eq!(report.by_moment[1].tally.percentage(), Some(100.0));
        assert_eq!(report.by_pillar[&Pillar::Operation].non_compliant, 1);
        assert_eq!(report.by_pillar[&Pillar::Experience].compliant, 1);
    }

    #[test]
    fn consolidate_sums_across_responses() {
        let first = response(vec![AnsweredMoment {
            name: "Recepção".to_string(),
            questions: vec![question(Pillar::Sales, Some(Evaluation::NonCompliant))],
        }]);
        let second = response(vec![AnsweredMoment {
            name: "Recepção".to_string(),
            questions: vec![
                question(Pillar::Sales, Some(Evaluation::Compliant)),
                question(Pillar::Operation, Some(Evaluation::NotApplicable)),
            ],
        }]);

        let report = consolidate(&[first, second]);
        assert_eq!(report.responses, 2);
        assert_eq!(report.non_conformities(), 1);
        assert_eq!(report.pillar_percentage(Pillar::Sales), Some(50.0));
        assert_eq!(report.pillar_percentage(Pillar::Operation), None);
        assert_eq!(report.pillar_percentage(Pillar::Experience), None);
    }
}
