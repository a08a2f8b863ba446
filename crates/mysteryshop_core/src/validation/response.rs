//! Response form rule set.
//!
//! Header rules first (visit date, visit time, shopper name), then one
//! `Answer` violation per required question without an evaluation, in
//! template order. Optional questions may stay blank.

use super::{FieldPath, ResponseField, Rule, RuleMessage, ValidationReport};
use crate::model::response::ResponseDraft;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid time regex"));

const HEADER_RULES: &[Rule<ResponseDraft, ResponseField>] = &[
    Rule {
        field: ResponseField::VisitDate,
        holds: visit_date_present,
        message: RuleMessage::Fixed("visit date is required"),
    },
    Rule {
        field: ResponseField::VisitDate,
        holds: visit_date_well_formed,
        message: RuleMessage::Fixed("visit date must use YYYY-MM-DD"),
    },
    Rule {
        field: ResponseField::VisitDate,
        holds: visit_date_on_calendar,
        message: RuleMessage::Fixed("visit date does not exist"),
    },
    Rule {
        field: ResponseField::VisitTime,
        holds: visit_time_present,
        message: RuleMessage::Fixed("visit time is required"),
    },
    Rule {
        field: ResponseField::VisitTime,
        holds: visit_time_well_formed,
        message: RuleMessage::Fixed("visit time must use HH:MM"),
    },
    Rule {
        field: ResponseField::ShopperName,
        holds: shopper_name_present,
        message: RuleMessage::Fixed("mystery shopper name is required"),
    },
];

/// Validates a response draft against its template.
pub fn validate_response(draft: &ResponseDraft) -> ValidationReport {
    let mut report = ValidationReport::new();
    Rule::apply_all(HEADER_RULES, draft, FieldPath::Response, &mut report);

    for (_, question) in draft.template.questions() {
        if !question.required {
            continue;
        }
        let answered = draft
            .answer(question.id)
            .is_some_and(|answer| answer.evaluation.is_some());
        if !answered {
            report.push(
                FieldPath::Answer(question.id),
                format!("required answer missing: {}", question.text.trim()),
            );
        }
    }

    report
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}

fn visit_date_present(draft: &ResponseDraft) -> bool {
    non_blank(draft.visit_date.as_ref()).is_some()
}

// Absent values are reported by the presence rule only.
fn visit_date_well_formed(draft: &ResponseDraft) -> bool {
    non_blank(draft.visit_date.as_ref()).map_or(true, |value| DATE_PATTERN.is_match(value))
}

// Malformed values are reported by the format rule only.
fn visit_date_on_calendar(draft: &ResponseDraft) -> bool {
    let Some(captures) =
        non_blank(draft.visit_date.as_ref()).and_then(|value| DATE_PATTERN.captures(value))
    else {
        return true;
    };
    let field = |index: usize| captures[index].parse::<u32>().unwrap_or_default();
    field(3) <= days_in_month(field(1), field(2))
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn visit_time_present(draft: &ResponseDraft) -> bool {
    non_blank(draft.visit_time.as_ref()).is_some()
}

fn visit_time_well_formed(draft: &ResponseDraft) -> bool {
    non_blank(draft.visit_time.as_ref()).map_or(true, |value| TIME_PATTERN.is_match(value))
}

fn shopper_name_present(draft: &ResponseDraft) -> bool {
    !draft.shopper_name.trim().is_empty()
}
