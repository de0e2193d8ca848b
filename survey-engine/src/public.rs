//! Anonymous survey loading.
//!
//! A public link carries only the survey's opaque token. Whatever goes wrong
//! while resolving it (unknown token, inactive survey, storage failure) the
//! respondent sees the same terminal "not found" state.

use survey_engine_types::{Repository, Survey, SurveyError, SurveyId};

/// Load the active survey whose public token is `token`.
pub async fn load_public_survey<R>(repo: &R, token: &str) -> Result<Survey, SurveyError>
where
    R: Repository<Survey> + ?Sized,
{
    let surveys = repo.list().await.map_err(|err| {
        tracing::warn!(error = %err, "failed to list surveys for public link");
        SurveyError::NotFound
    })?;

    surveys
        .into_iter()
        .find(|survey| survey.is_open_to(token))
        .ok_or_else(|| {
            tracing::debug!("no active survey for public token");
            SurveyError::NotFound
        })
}

/// Load a survey by id, requiring it to be active and to match `token`.
pub async fn load_public_survey_by_id<R>(
    repo: &R,
    id: &SurveyId,
    token: &str,
) -> Result<Survey, SurveyError>
where
    R: Repository<Survey> + ?Sized,
{
    match repo.get(id).await {
        Ok(Some(survey)) if survey.is_open_to(token) => Ok(survey),
        Ok(_) => {
            tracing::debug!(survey = %id, "survey missing, inactive or token mismatch");
            Err(SurveyError::NotFound)
        }
        Err(err) => {
            tracing::warn!(survey = %id, error = %err, "failed to load survey for public link");
            Err(SurveyError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use survey_engine_types::SurveyStatus;

    use super::*;
    use crate::store::{MemoryRepository, Operation};

    async fn repo_with(status: SurveyStatus) -> (MemoryRepository<Survey>, Survey) {
        let repo = MemoryRepository::new();
        let survey = repo
            .insert(Survey::new("Feedback", "general").with_status(status))
            .await
            .unwrap();
        (repo, survey)
    }

    #[tokio::test]
    async fn active_survey_loads_by_token() {
        let (repo, survey) = repo_with(SurveyStatus::Active).await;
        let token = survey.public_token.as_str();

        assert_eq!(load_public_survey(&repo, token).await.unwrap(), survey);
        assert_eq!(
            load_public_survey_by_id(&repo, &survey.id, token).await.unwrap(),
            survey
        );
    }

    #[tokio::test]
    async fn every_failure_is_not_found() {
        let (repo, survey) = repo_with(SurveyStatus::Draft).await;
        let token = survey.public_token.as_str().to_string();

        // Inactive.
        assert!(load_public_survey(&repo, &token).await.unwrap_err().is_not_found());
        assert!(
            load_public_survey_by_id(&repo, &survey.id, &token)
                .await
                .unwrap_err()
                .is_not_found()
        );

        // Wrong or empty token.
        let (active, survey) = repo_with(SurveyStatus::Active).await;
        assert!(load_public_survey(&active, "nope").await.unwrap_err().is_not_found());
        assert!(load_public_survey(&active, "").await.unwrap_err().is_not_found());
        assert!(
            load_public_survey_by_id(&active, &SurveyId::generate(), survey.public_token.as_str())
                .await
                .unwrap_err()
                .is_not_found()
        );

        // Storage failure.
        active.fail_on(Operation::List, "timeout");
        active.fail_on(Operation::Get, "timeout");
        let token = survey.public_token.as_str();
        assert!(load_public_survey(&active, token).await.unwrap_err().is_not_found());
        assert!(
            load_public_survey_by_id(&active, &survey.id, token)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}
