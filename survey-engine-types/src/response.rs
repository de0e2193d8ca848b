use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AnswerId, AnswerValue, ElementId, ResponseId, SurveyId};

/// Who filled in a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RespondentType {
    /// Staff entering a response from the dashboard.
    Internal,
    /// An anonymous visitor using the public link.
    #[default]
    External,
}

/// Values collected on the personal-info step, keyed by field key.
pub type PersonalInfo = BTreeMap<String, String>;

/// One respondent's submission to a survey (`survey_responses` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: ResponseId,
    pub survey_id: SurveyId,
    pub respondent_type: RespondentType,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub submitted_at: DateTime<Utc>,
}

impl Response {
    /// Create an unsaved response; the store assigns id and timestamp.
    pub fn new(survey_id: SurveyId, respondent_type: RespondentType) -> Self {
        Self {
            id: ResponseId::nil(),
            survey_id,
            respondent_type,
            metadata: serde_json::Map::new(),
            submitted_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Map<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// One element's recorded value within a response (`survey_answers` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: AnswerId,
    pub response_id: ResponseId,
    pub question_id: ElementId,
    pub value: AnswerValue,
}

impl Answer {
    /// Create an unsaved answer row.
    pub fn new(response_id: ResponseId, question_id: ElementId, value: AnswerValue) -> Self {
        Self {
            id: AnswerId::nil(),
            response_id,
            question_id,
            value,
        }
    }
}

/// One `{questionId, value}` pair of a submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_id: ElementId,
    pub value: AnswerValue,
}

/// The payload a respondent's final submit sends in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub survey_id: SurveyId,

    /// Category of the survey; decides which gateway writes it.
    #[serde(default)]
    pub survey_type: String,

    #[serde(default)]
    pub respondent_type: RespondentType,

    pub answers: Vec<AnswerInput>,

    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
}

impl Submission {
    pub fn new(survey_id: SurveyId, survey_type: impl Into<String>) -> Self {
        Self {
            survey_id,
            survey_type: survey_type.into(),
            respondent_type: RespondentType::External,
            answers: Vec::new(),
            metadata: serde_json::Map::new(),
            personal_info: None,
        }
    }

    /// Append an answer.
    pub fn with_answer(
        mut self,
        question_id: impl Into<ElementId>,
        value: impl Into<AnswerValue>,
    ) -> Self {
        self.answers.push(AnswerInput {
            question_id: question_id.into(),
            value: value.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_wire_format() {
        let submission = Submission::new(SurveyId::nil(), "workshop_feedback")
            .with_answer("q1", true)
            .with_answer("q2", vec!["a", "b"]);
        let value = serde_json::to_value(&submission).unwrap();

        assert_eq!(value["answers"][0]["questionId"], "q1");
        assert_eq!(value["answers"][0]["value"], true);
        assert_eq!(value["answers"][1]["value"][1], "b");
        assert_eq!(value["respondentType"], "external");
        assert!(value.get("personalInfo").is_none());
    }

    #[test]
    fn personal_info_is_carried_when_present() {
        let mut submission = Submission::new(SurveyId::generate(), "recovery_intake");
        submission.personal_info = Some(PersonalInfo::from([(
            "firstName".to_string(),
            "Sam".to_string(),
        )]));
        let json = serde_json::to_string(&submission).unwrap();
        let parsed: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, submission);
    }
}
