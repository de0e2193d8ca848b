use serde::{Deserialize, Serialize};

/// Survey-wide configuration stored alongside the pages.
///
/// Every key is optional on the wire so older surveys keep loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurveySettings {
    pub welcome: WelcomeScreen,
    pub thank_you: ThankYouScreen,
    pub theme: ThemeSettings,
    pub personal_info_fields: Vec<PersonalInfoField>,
}

impl SurveySettings {
    /// Check if respondents see the welcome step.
    pub fn has_welcome(&self) -> bool {
        self.welcome.enabled
    }

    /// Check if respondents see the personal-info step.
    pub fn has_personal_info(&self) -> bool {
        !self.personal_info_fields.is_empty()
    }
}

/// Optional screen shown before the first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WelcomeScreen {
    pub enabled: bool,
    pub title: String,
    pub message: String,
    pub button_text: String,
}

impl Default for WelcomeScreen {
    fn default() -> Self {
        Self {
            enabled: false,
            title: "Welcome".to_string(),
            message: String::new(),
            button_text: "Start".to_string(),
        }
    }
}

/// Screen shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThankYouScreen {
    pub title: String,
    pub message: String,
}

impl Default for ThankYouScreen {
    fn default() -> Self {
        Self {
            title: "Thank you!".to_string(),
            message: "Your response has been recorded.".to_string(),
        }
    }
}

/// How much shadow survey cards cast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardShadow {
    None,
    #[default]
    Subtle,
    Medium,
    Strong,
}

/// The six theme inputs a survey author picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeSettings {
    pub bg_color: String,
    pub accent_color: String,
    pub card_bg_color: String,
    pub card_shadow: CardShadow,
    pub input_bg_color: String,
    pub font_color: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            bg_color: "#ffffff".to_string(),
            accent_color: "#6366f1".to_string(),
            card_bg_color: "#ffffff".to_string(),
            card_shadow: CardShadow::Subtle,
            input_bg_color: "#ffffff".to_string(),
            font_color: "#1f2937".to_string(),
        }
    }
}

/// Kind of input used for a personal-info field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalInfoKind {
    #[default]
    Text,
    Email,
    Phone,
    Date,
}

/// One field of the personal-info step (name, phone, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoField {
    /// Key under which the value is stored, e.g. `"firstName"`.
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub kind: PersonalInfoKind,
    #[serde(default)]
    pub required: bool,
}

impl PersonalInfoField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: PersonalInfoKind::Text,
            required: false,
        }
    }

    pub fn with_kind(mut self, kind: PersonalInfoKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
