use survey_engine_types::{
    CheckboxSettings, ChoiceSettings, DropdownSettings, Element, ElementKind, ElementType, Page,
    PersonalInfoField, PersonalInfoKind, StatementSettings, Survey, SurveySettings, SurveyStatus,
    ThankYouScreen, ThemeSettings, WelcomeScreen,
};

/// Survey type of the intake form; submitted through the elevated gateway.
pub const SURVEY_TYPE: &str = "recovery_intake";

pub const REFERRAL: &str = "referral";
pub const HOUSING: &str = "housing";
pub const EMPLOYED: &str = "employed";
pub const SERVICES: &str = "services";
pub const NOTES: &str = "notes";

/// Intake form for people seeking recovery support.
///
/// Welcome screen, personal info step, then two pages. Active, dark theme.
pub fn survey() -> Survey {
    let situation = Page::new("Your situation")
        .with_element(
            Element::with_kind(ElementKind::MultipleChoice(ChoiceSettings {
                choices: strings(&["Friend or family", "Court referral", "Online search"]),
                allow_other: true,
            }))
            .with_id(REFERRAL)
            .with_label("How did you hear about us?"),
        )
        .with_element(
            Element::with_kind(ElementKind::Dropdown(DropdownSettings {
                choices: strings(&[
                    "Own home",
                    "Renting",
                    "With family",
                    "Shelter",
                    "No stable housing",
                ]),
                ..DropdownSettings::default()
            }))
            .with_id(HOUSING)
            .with_label("Current housing")
            .with_required(true),
        )
        .with_element(
            Element::new(ElementType::YesNo)
                .with_id(EMPLOYED)
                .with_label("Are you currently employed?")
                .with_required(true),
        );

    let support = Page::new("Support needs")
        .with_element(
            Element::with_kind(ElementKind::Statement(StatementSettings {
                content: "Everything you share stays with our case workers.".to_string(),
                ..StatementSettings::default()
            }))
            .with_id("privacy-note"),
        )
        .with_element(
            Element::with_kind(ElementKind::Checkboxes(CheckboxSettings {
                choices: strings(&["Counseling", "Job training", "Housing help", "Peer groups"]),
                min_selections: Some(1),
                ..CheckboxSettings::default()
            }))
            .with_id(SERVICES)
            .with_label("Which services are you interested in?")
            .with_required(true),
        )
        .with_element(
            Element::new(ElementType::LongText)
                .with_id(NOTES)
                .with_label("Anything else we should know?"),
        );

    let settings = SurveySettings {
        welcome: WelcomeScreen {
            enabled: true,
            title: "Welcome".to_string(),
            message: "This takes about five minutes.".to_string(),
            button_text: "Begin".to_string(),
        },
        thank_you: ThankYouScreen {
            title: "Thank you".to_string(),
            message: "A case worker will reach out within two days.".to_string(),
        },
        theme: ThemeSettings {
            bg_color: "#1a1a2e".to_string(),
            accent_color: "#e94560".to_string(),
            card_bg_color: "#16213e".to_string(),
            input_bg_color: "#0f3460".to_string(),
            font_color: "#eaeaea".to_string(),
            ..ThemeSettings::default()
        },
        personal_info_fields: vec![
            PersonalInfoField::new("first_name", "First name").required(),
            PersonalInfoField::new("last_name", "Last name").required(),
            PersonalInfoField::new("email", "Email").with_kind(PersonalInfoKind::Email),
            PersonalInfoField::new("phone", "Phone").with_kind(PersonalInfoKind::Phone),
        ],
    };

    Survey::new("Recovery intake", SURVEY_TYPE)
        .with_pages(vec![situation, support])
        .with_settings(settings)
        .with_status(SurveyStatus::Active)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
