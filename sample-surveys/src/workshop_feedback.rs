use survey_engine_types::{
    CheckboxSettings, Element, ElementKind, ElementType, ImageSettings, NumberSettings,
    OpinionScaleSettings, Page, RatingScaleSettings, Survey, SurveyStatus, TextBlockSettings,
};

pub const SURVEY_TYPE: &str = "workshop_feedback";

pub const OVERALL: &str = "overall";
pub const PACE: &str = "pace";
pub const TOPICS: &str = "topics";
pub const ATTENDEES: &str = "attendees";
pub const RECOMMEND: &str = "recommend";
pub const COMMENTS: &str = "comments";

/// Feedback form handed out after a workshop. Light default theme.
pub fn survey() -> Survey {
    let ratings = Page::new("Ratings")
        .with_element(
            Element::with_kind(ElementKind::TextBlock(TextBlockSettings {
                content: "Tell us how the session went.".to_string(),
                rich_content: false,
            }))
            .with_id("intro"),
        )
        .with_element(
            Element::new(ElementType::Rating)
                .with_id(OVERALL)
                .with_label("Overall rating")
                .with_required(true),
        )
        .with_element(
            Element::with_kind(ElementKind::OpinionScale(OpinionScaleSettings {
                min: 1,
                max: 5,
                min_label: "Too slow".to_string(),
                max_label: "Too fast".to_string(),
            }))
            .with_id(PACE)
            .with_label("How was the pace?")
            .with_required(true),
        );

    let details = Page::new("Details")
        .with_element(
            Element::with_kind(ElementKind::Image(ImageSettings {
                image_url: Some("https://example.org/workshop.jpg".to_string()),
                alt_text: "Workshop room".to_string(),
                caption: String::new(),
            }))
            .with_id("banner"),
        )
        .with_element(
            Element::with_kind(ElementKind::Checkboxes(CheckboxSettings {
                choices: vec![
                    "Budgeting".to_string(),
                    "Resumes".to_string(),
                    "Interviews".to_string(),
                    "Wellbeing".to_string(),
                ],
                min_selections: Some(2),
                ..CheckboxSettings::default()
            }))
            .with_id(TOPICS)
            .with_label("Which topics were useful?")
            .with_description("Pick at least two.")
            .with_required(true),
        )
        .with_element(
            Element::with_kind(ElementKind::Number(NumberSettings::with_bounds(
                Some(1.0),
                Some(40.0),
            )))
            .with_id(ATTENDEES)
            .with_label("How many people came with you?"),
        )
        .with_element(
            Element::with_kind(ElementKind::RatingScale(RatingScaleSettings::default()))
                .with_id(RECOMMEND)
                .with_label("Would you recommend this workshop?")
                .with_required(true),
        )
        .with_element(
            Element::new(ElementType::LongText)
                .with_id(COMMENTS)
                .with_label("Comments"),
        );

    Survey::new("Workshop feedback", SURVEY_TYPE)
        .with_pages(vec![ratings, details])
        .with_status(SurveyStatus::Active)
}
