//! Sample documents for the `demo` subcommands.

use mysteryshop_core::{
    Checklist, ChecklistEditor, CompletedResponse, EditError, EditResult, Evaluation,
    FieldChange, Moment, Pillar, Question, ResponseForm, SimulatedGateway,
};
use std::time::Duration;

/// Editor holding the "store service" checklist with two moments.
pub fn store_service_editor(name: &str) -> EditResult<ChecklistEditor> {
    let mut editor = ChecklistEditor::new();
    editor.set_name(name)?;
    editor.set_description("Avaliação completa do atendimento na loja física")?;

    let reception = editor.checklist().moments[0].id;
    editor.update_moment(reception, FieldChange::MomentName("Recepção".into()))?;
    let greeting = editor.checklist().moments[0].questions[0].id;
    editor.update_question(
        reception,
        greeting,
        FieldChange::QuestionText("O atendente cumprimentou o cliente?".into()),
    )?;
    let cleanliness = editor.add_question(reception)?;
    editor.update_question(
        reception,
        cleanliness,
        FieldChange::QuestionText("O ambiente estava limpo e organizado?".into()),
    )?;
    editor.update_question(
        reception,
        cleanliness,
        FieldChange::QuestionPillar(Some(Pillar::Operation)),
    )?;

    let sales = editor.add_moment()?;
    editor.update_moment(sales, FieldChange::MomentName("Vendas".into()))?;
    let upsell = editor
        .checklist()
        .moment(sales)
        .and_then(|moment| moment.questions.first())
        .map(|question| question.id)
        .ok_or(EditError::UnknownMoment(sales))?;
    editor.update_question(
        sales,
        upsell,
        FieldChange::QuestionText("Ofereceu produtos complementares?".into()),
    )?;
    editor.update_question(sales, upsell, FieldChange::QuestionPillar(Some(Pillar::Sales)))?;
    editor.update_question(sales, upsell, FieldChange::QuestionRequired(false))?;

    Ok(editor)
}

fn response_template() -> Checklist {
    let mut reception = Moment::named("Recepção", "");
    reception.questions = vec![
        Question::with_text("O atendente cumprimentou o cliente?", Pillar::Experience, true),
        Question::with_text("O ambiente estava limpo e organizado?", Pillar::Operation, true),
    ];
    let mut sales = Moment::named("Vendas", "");
    sales.questions = vec![Question::with_text(
        "Ofereceu produtos complementares?",
        Pillar::Sales,
        false,
    )];

    let mut checklist = Checklist::new();
    checklist.name = "Atendimento - Loja Centro".to_string();
    checklist.moments = vec![reception, sales];
    checklist
}

/// Fills and submits one sample response per shopper, returning what was sent.
pub fn sample_responses() -> EditResult<Vec<CompletedResponse>> {
    let visits: [(&str, &str, [Option<Evaluation>; 3]); 3] = [
        (
            "Carlos Santos",
            "2024-01-15",
            [
                Some(Evaluation::Compliant),
                Some(Evaluation::Compliant),
                Some(Evaluation::NonCompliant),
            ],
        ),
        (
            "Maria Oliveira",
            "2024-01-14",
            [
                Some(Evaluation::Compliant),
                Some(Evaluation::NonCompliant),
                Some(Evaluation::NotApplicable),
            ],
        ),
        (
            "João Silva",
            "2024-01-13",
            [Some(Evaluation::Compliant), Some(Evaluation::Compliant), None],
        ),
    ];

    let template = response_template();
    let gateway = SimulatedGateway::new(Duration::ZERO);
    let mut sent = Vec::with_capacity(visits.len());
    for (shopper, date, evaluations) in visits {
        let mut form = ResponseForm::for_checklist(template.clone());
        form.set_visit_date(Some(date.to_string()))?;
        form.set_visit_time(Some("14:30".to_string()))?;
        form.set_shopper_name(shopper)?;
        let ids: Vec<_> = template.questions().map(|(_, question)| question.id).collect();
        for (id, evaluation) in ids.into_iter().zip(evaluations) {
            form.set_evaluation(id, evaluation)?;
        }
        let payload = form.draft().complete();
        if form.submit(&gateway).is_submitted() {
            sent.push(payload);
        }
    }
    Ok(sent)
}
