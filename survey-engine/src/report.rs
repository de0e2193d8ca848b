//! Results reporting.
//!
//! Stored responses are paired with their answers and summarised per question.
//! Answers whose response or question no longer exists are dropped.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use survey_engine_types::{
    Answer, AnswerValue, Element, ElementId, ElementKind, ElementType, Repository, Response,
    ResponseId, Survey, SurveyError, SurveyId,
};

/// A stored response with the answers that belong to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseWithAnswers {
    pub response: Response,
    pub answers: Vec<Answer>,
}

impl ResponseWithAnswers {
    pub fn answer_for(&self, id: &ElementId) -> Option<&AnswerValue> {
        self.answers
            .iter()
            .find(|answer| &answer.question_id == id)
            .map(|answer| &answer.value)
    }
}

/// Aggregated answers for one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Breakdown {
    /// Count per configured choice, plus free-text "other" answers.
    Choices {
        counts: Vec<(String, usize)>,
        other: usize,
    },
    /// Numeric answers.
    Numeric {
        count: usize,
        mean: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    YesNo { yes: usize, no: usize },
    /// Free-text answers in response order.
    Text { values: Vec<String> },
}

/// Summary of one answerable element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub element_id: ElementId,
    pub label: String,
    pub element_type: ElementType,
    pub answered: usize,
    pub breakdown: Breakdown,
}

/// Per-question results for a survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyReport {
    pub survey_id: SurveyId,
    pub total_responses: usize,
    pub questions: Vec<QuestionSummary>,
}

/// Group answers under their responses, dropping orphans.
pub fn pair_responses(
    survey: &Survey,
    responses: Vec<Response>,
    answers: Vec<Answer>,
) -> Vec<ResponseWithAnswers> {
    let questions: HashSet<&ElementId> = survey
        .answerable_elements()
        .map(|element| element.id())
        .collect();

    let mut by_response: HashMap<ResponseId, Vec<Answer>> = HashMap::new();
    let mut orphans = 0usize;
    for answer in answers {
        if questions.contains(&answer.question_id) {
            by_response.entry(answer.response_id).or_default().push(answer);
        } else {
            orphans += 1;
        }
    }

    let paired: Vec<ResponseWithAnswers> = responses
        .into_iter()
        .filter(|response| response.survey_id == survey.id)
        .map(|response| ResponseWithAnswers {
            answers: by_response.remove(&response.id).unwrap_or_default(),
            response,
        })
        .collect();

    orphans += by_response.values().map(Vec::len).sum::<usize>();
    if orphans > 0 {
        tracing::debug!(survey = %survey.id, orphans, "dropping orphaned answers from report");
    }

    paired
}

/// Summarise paired responses per answerable element, in survey order.
pub fn build_report(survey: &Survey, responses: &[ResponseWithAnswers]) -> SurveyReport {
    let questions = survey
        .answerable_elements()
        .map(|element| {
            let values: Vec<&AnswerValue> = responses
                .iter()
                .filter_map(|response| response.answer_for(element.id()))
                .filter(|value| !value.is_blank())
                .collect();

            QuestionSummary {
                element_id: element.id().clone(),
                label: element.display_label().to_string(),
                element_type: element.element_type(),
                answered: values.len(),
                breakdown: breakdown(element, &values),
            }
        })
        .collect();

    SurveyReport {
        survey_id: survey.id,
        total_responses: responses.len(),
        questions,
    }
}

/// Load a survey's responses and answers and build its report.
pub async fn load_report<S, R, A>(
    surveys: &S,
    responses: &R,
    answers: &A,
    survey_id: &SurveyId,
) -> Result<SurveyReport, SurveyError>
where
    S: Repository<Survey> + ?Sized,
    R: Repository<Response> + ?Sized,
    A: Repository<Answer> + ?Sized,
{
    let survey = surveys.get(survey_id).await?.ok_or(SurveyError::NotFound)?;
    let stored = responses.list_by_parent(survey_id).await?;

    let mut rows = Vec::new();
    for response in &stored {
        rows.extend(answers.list_by_parent(&response.id).await?);
    }

    let paired = pair_responses(&survey, stored, rows);
    Ok(build_report(&survey, &paired))
}

fn breakdown(element: &Element, values: &[&AnswerValue]) -> Breakdown {
    match element.kind() {
        ElementKind::YesNo(_) => Breakdown::YesNo {
            yes: values.iter().filter(|v| v.as_bool() == Some(true)).count(),
            no: values.iter().filter(|v| v.as_bool() == Some(false)).count(),
        },
        ElementKind::Number(_)
        | ElementKind::Rating(_)
        | ElementKind::OpinionScale(_)
        | ElementKind::RatingScale(_) => numeric(values),
        kind => match kind.choices() {
            Some(choices) => tally(choices, values),
            None => Breakdown::Text {
                values: values
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect(),
            },
        },
    }
}

fn tally(choices: &[String], values: &[&AnswerValue]) -> Breakdown {
    let mut counts: Vec<(String, usize)> = choices.iter().map(|c| (c.clone(), 0)).collect();
    let mut other = 0;

    let selections = values.iter().flat_map(|value| match value {
        AnswerValue::List(items) => items.iter().map(String::as_str).collect::<Vec<_>>(),
        AnswerValue::Text(text) => vec![text.as_str()],
        _ => Vec::new(),
    });
    for selection in selections {
        match counts.iter_mut().find(|(choice, _)| choice.as_str() == selection) {
            Some((_, count)) => *count += 1,
            None if !selection.trim().is_empty() => other += 1,
            None => {}
        }
    }

    Breakdown::Choices { counts, other }
}

fn numeric(values: &[&AnswerValue]) -> Breakdown {
    let numbers: Vec<f64> = values.iter().filter_map(|v| v.to_number()).collect();
    let count = numbers.len();
    let mean = (count > 0).then(|| numbers.iter().sum::<f64>() / count as f64);

    Breakdown::Numeric {
        count,
        mean,
        min: numbers.iter().copied().reduce(f64::min),
        max: numbers.iter().copied().reduce(f64::max),
    }
}
