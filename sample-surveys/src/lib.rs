//! Sample surveys used by tests and renderer demos.
//!
//! Each module builds one survey with `survey()` and exports the ids of its
//! answerable elements as constants.

pub mod quick_poll;
pub mod recovery_intake;
pub mod workshop_feedback;

use survey_engine_types::Survey;

/// Wire-format JSON of a survey as stored in the `surveys` table.
pub const COMMUNITY_CHECKIN_JSON: &str = include_str!("../fixtures/community_checkin.json");

/// Parse a stored survey document.
pub fn from_json(json: &str) -> anyhow::Result<Survey> {
    Ok(serde_json::from_str(json)?)
}

/// The community check-in survey, parsed from its JSON fixture.
pub fn community_checkin() -> anyhow::Result<Survey> {
    from_json(COMMUNITY_CHECKIN_JSON)
}

/// Every built-in sample.
pub fn all() -> Vec<Survey> {
    vec![
        quick_poll::survey(),
        recovery_intake::survey(),
        workshop_feedback::survey(),
    ]
}
