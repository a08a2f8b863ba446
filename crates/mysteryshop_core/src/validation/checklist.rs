//! Checklist rule set.
//!
//! Rules run bottom-up: the questions of a moment, then that moment, and the
//! checklist root last. The report is flat and keeps that order.

use super::{
    ChecklistField, FieldPath, MomentField, QuestionField, Rule, RuleMessage, ValidationReport,
};
use crate::model::checklist::{Checklist, Moment, Question};

/// Minimum trimmed length of a checklist name.
pub const CHECKLIST_NAME_MIN_CHARS: usize = 3;

/// Minimum trimmed length of a question text.
pub const QUESTION_TEXT_MIN_CHARS: usize = 5;

const QUESTION_RULES: &[Rule<Question, QuestionField>] = &[
    Rule {
        field: QuestionField::Text,
        holds: question_text_long_enough,
        message: RuleMessage::TooShort {
            subject: "question text",
            min: QUESTION_TEXT_MIN_CHARS,
        },
    },
    Rule {
        field: QuestionField::Pillar,
        holds: question_pillar_selected,
        message: RuleMessage::Fixed("pillar must be selected"),
    },
];

const MOMENT_RULES: &[Rule<Moment, MomentField>] = &[Rule {
    field: MomentField::Questions,
    holds: moment_has_questions,
    message: RuleMessage::Fixed("moment must contain at least 1 question"),
}];

const CHECKLIST_RULES: &[Rule<Checklist, ChecklistField>] = &[
    Rule {
        field: ChecklistField::Name,
        holds: checklist_name_long_enough,
        message: RuleMessage::TooShort {
            subject: "name",
            min: CHECKLIST_NAME_MIN_CHARS,
        },
    },
    Rule {
        field: ChecklistField::Status,
        holds: checklist_status_selected,
        message: RuleMessage::Fixed("status must be selected"),
    },
    Rule {
        field: ChecklistField::Moments,
        holds: checklist_has_moments,
        message: RuleMessage::Fixed("checklist must contain at least 1 moment"),
    },
];

/// Validates the whole checklist tree in one pass.
pub fn validate_checklist(checklist: &Checklist) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (moment_index, moment) in checklist.moments.iter().enumerate() {
        for (question_index, question) in moment.questions.iter().enumerate() {
            Rule::apply_all(
                QUESTION_RULES,
                question,
                |field| FieldPath::Question {
                    moment: moment_index,
                    question: question_index,
                    field,
                },
                &mut report,
            );
        }
        Rule::apply_all(
            MOMENT_RULES,
            moment,
            |field| FieldPath::Moment {
                moment: moment_index,
                field,
            },
            &mut report,
        );
    }

    Rule::apply_all(CHECKLIST_RULES, checklist, FieldPath::Checklist, &mut report);
    report
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn question_text_long_enough(question: &Question) -> bool {
    trimmed_len(&question.text) >= QUESTION_TEXT_MIN_CHARS
}

fn question_pillar_selected(question: &Question) -> bool {
    question.pillar.is_some()
}

fn moment_has_questions(moment: &Moment) -> bool {
    !moment.questions.is_empty()
}

fn checklist_name_long_enough(checklist: &Checklist) -> bool {
    trimmed_len(&checklist.name) >= CHECKLIST_NAME_MIN_CHARS
}

fn checklist_status_selected(checklist: &Checklist) -> bool {
    checklist.status.is_some()
}

fn checklist_has_moments(checklist: &Checklist) -> bool {
    !checklist.moments.is_empty()
}

#[cfg(test)]
mod tests {
    use super::{validate_checklist, CHECKLIST_NAME_MIN_CHARS, QUESTION_TEXT_MIN_CHARS};
    use crate::model::checklist::{Checklist, Moment, Pillar, Question};
    use crate::validation::{ChecklistField, FieldPath, MomentField, QuestionField};

    fn valid_checklist() -> Checklist {
        let mut checklist = Checklist::new();
        checklist.name = "Atendimento Loja".to_string();
        checklist.moments[0].questions[0].text = "Cumprimentou o cliente?".to_string();
        checklist
    }

    #[test]
    fn too_short_messages_follow_minimum_constants() {
        let mut checklist = valid_checklist();
        checklist.name = String::new();
        checklist.moments[0].questions[0].text = String::new();
        let report = validate_checklist(&checklist);

        let name = report
            .first_for(&FieldPath::Checklist(ChecklistField::Name))
            .expect("name violation");
        assert_eq!(
            name.message,
            format!("name too short: minimum {CHECKLIST_NAME_MIN_CHARS} characters")
        );
        let text = report
            .first_for(&FieldPath::Question {
                moment: 0,
                question: 0,
                field: QuestionField::Text,
            })
            .expect("text violation");
        assert_eq!(
            text.message,
            format!("question text too short: minimum {QUESTION_TEXT_MIN_CHARS} characters")
        );
    }

    #[test]
    fn valid_checklist_passes() {
        assert!(validate_checklist(&valid_checklist()).is_valid());
    }

    #[test]
    fn name_length_boundary_is_three_chars() {
        let name_path = FieldPath::Checklist(ChecklistField::Name);

        let mut checklist = valid_checklist();
        checklist.name = "AB".to_string();
        let report = validate_checklist(&checklist);
        let violation = report.first_for(&name_path).expect("name violation");
        assert!(violation.message.contains("name too short"));

        checklist.name = "ABC".to_string();
        let report = validate_checklist(&checklist);
        assert!(report.first_for(&name_path).is_none());
    }

    #[test]
    fn name_length_ignores_surrounding_whitespace() {
        let mut checklist = valid_checklist();
        checklist.name = "  AB  ".to_string();
        assert!(!validate_checklist(&checklist).is_valid());
    }

    #[test]
    fn zero_moments_always_fails() {
        let mut checklist = valid_checklist();
        checklist.moments.clear();
        let report = validate_checklist(&checklist);
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.violations()[0].path,
            FieldPath::Checklist(ChecklistField::Moments)
        );
    }

    #[test]
    fn violations_are_reported_bottom_up() {
        let mut checklist = Checklist::new();
        checklist.name = "AB".to_string();
        checklist.status = None;
        let mut empty_moment = Moment::new();
        empty_moment.questions.clear();
        checklist.moments.push(empty_moment);
        checklist.moments[0].questions.push(Question {
            pillar: None,
            ..Question::with_text("Tempo de espera adequado?", Pillar::Operation, false)
        });

        let report = validate_checklist(&checklist);
        let paths: Vec<FieldPath> = report.violations().iter().map(|v| v.path).collect();
        assert_eq!(
            paths,
            vec![
                FieldPath::Question {
                    moment: 0,
                    question: 0,
                    field: QuestionField::Text
                },
                FieldPath::Question {
                    moment: 0,
                    question: 1,
                    field: QuestionField::Pillar
                },
                FieldPath::Moment {
                    moment: 1,
                    field: MomentField::Questions
                },
                FieldPath::Checklist(ChecklistField::Name),
                FieldPath::Checklist(ChecklistField::Status),
            ]
        );
    }

    #[test]
    fn short_question_text_is_rejected() {
        let mut checklist = valid_checklist();
        checklist.moments[0].questions[0].text = "Ok?".to_string();
        let report = validate_checklist(&checklist);
        let path = FieldPath::Question {
            moment: 0,
            question: 0,
            field: QuestionField::Text,
        };
        assert!(report.first_for(&path).is_some());
    }
}
