use survey_engine_types::{Element, ElementType, Page, Survey, SurveyStatus};

pub const SURVEY_TYPE: &str = "general";

pub const ATTENDING: &str = "attending";

/// One page, one required yes/no question. No welcome, no personal info.
pub fn survey() -> Survey {
    Survey::new("Quick poll", SURVEY_TYPE)
        .with_pages(vec![
            Page::new("Question").with_element(
                Element::new(ElementType::YesNo)
                    .with_id(ATTENDING)
                    .with_label("Will you attend the open house?")
                    .with_required(true),
            ),
        ])
        .with_status(SurveyStatus::Active)
}
