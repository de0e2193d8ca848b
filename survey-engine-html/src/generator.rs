//! HTML renderer implementation.

use survey_engine::theme::build_theme_from_settings;
use survey_engine::{
    AnswerValue, Answers, Element, ElementKind, PersonalInfo, PersonalInfoField,
    PersonalInfoKind, Step, Survey, SurveyRuntime, ThemeTokens,
};

/// Most points a rating or opinion scale renders; larger spans are cut off.
pub const MAX_SCALE_POINTS: i32 = 101;

/// Options for HTML generation.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Title for the HTML document; the survey title when unset.
    pub title: Option<String>,
    /// Whether to include default CSS styling.
    pub include_styles: bool,
    /// Whether to emit the survey's theme tokens as CSS variables.
    pub include_theme: bool,
    /// Whether to generate a complete HTML document (with html/head/body tags).
    pub full_document: bool,
    /// CSS class prefix for all generated elements.
    pub class_prefix: String,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            include_theme: true,
            full_document: true,
            class_prefix: "survey".to_string(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable default CSS styling.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Enable or disable the theme's CSS variables.
    pub fn with_theme(mut self, include: bool) -> Self {
        self.include_theme = include;
        self
    }

    /// Generate a complete HTML document or just the form fragment.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Set a custom CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}

/// Render the runtime's current step with its answers and inline error.
pub fn render_step(runtime: &SurveyRuntime, options: &HtmlOptions) -> String {
    let survey = runtime.survey();
    let prefix = options.class_prefix.as_str();
    let mut body = String::new();

    body.push_str(&progress_html(prefix, runtime.progress()));

    match runtime.step() {
        Step::Welcome => {
            let welcome = &survey.settings.welcome;
            body.push_str(&format!(
                "  <section class=\"{prefix}-card {prefix}-welcome\">\n"
            ));
            body.push_str(&format!(
                "    <h1 class=\"{prefix}-title\">{}</h1>\n",
                escape_html(&welcome.title)
            ));
            body.push_str(&paragraphs_html(prefix, "message", &welcome.message, 2));
            body.push_str(&format!(
                "    <button type=\"submit\" name=\"action\" value=\"next\" \
                 class=\"{prefix}-button\">{}</button>\n",
                escape_html(&welcome.button_text)
            ));
            body.push_str("  </section>\n");
        }
        Step::PersonalInfo => {
            body.push_str(&format!(
                "  <section class=\"{prefix}-card {prefix}-personal-info\">\n"
            ));
            body.push_str(&format!(
                "    <h2 class=\"{prefix}-page-title\">About you</h2>\n"
            ));
            for field in &survey.settings.personal_info_fields {
                body.push_str(&personal_info_field_html(prefix, field, runtime.personal_info()));
            }
            body.push_str(&error_html(prefix, runtime.error_message()));
            body.push_str(&navigation_html(prefix, runtime.can_go_back(), "Next"));
            body.push_str("  </section>\n");
        }
        Step::Page(index) => {
            if let Some(page) = survey.page(index) {
                body.push_str(&format!(
                    "  <section class=\"{prefix}-card {prefix}-page\" data-page=\"{index}\">\n"
                ));
                if !page.name.is_empty() {
                    body.push_str(&format!(
                        "    <h2 class=\"{prefix}-page-title\">{}</h2>\n",
                        escape_html(&page.name)
                    ));
                }
                for element in page.elements() {
                    body.push_str(&render_element(element, runtime.answers(), prefix, 2));
                }
                body.push_str(&error_html(prefix, runtime.error_message()));
                let next = if runtime.is_last_page() { "Submit" } else { "Next" };
                body.push_str(&navigation_html(prefix, runtime.can_go_back(), next));
                body.push_str("  </section>\n");
            }
        }
        Step::ThankYou => {
            let thank_you = &survey.settings.thank_you;
            body.push_str(&format!(
                "  <section class=\"{prefix}-card {prefix}-thank-you\">\n"
            ));
            body.push_str(&format!(
                "    <h1 class=\"{prefix}-title\">{}</h1>\n",
                escape_html(&thank_you.title)
            ));
            body.push_str(&paragraphs_html(prefix, "message", &thank_you.message, 2));
            body.push_str("  </section>\n");
        }
    }

    wrap(survey, options, &body)
}

/// Render every page of a survey at once, for authoring previews.
pub fn render_survey(survey: &Survey, options: &HtmlOptions) -> String {
    let prefix = options.class_prefix.as_str();
    let answers = Answers::new();
    let mut body = String::new();

    body.push_str(&format!(
        "  <h1 class=\"{prefix}-title\">{}</h1>\n",
        escape_html(&survey.title)
    ));
    for (index, page) in survey.pages().iter().enumerate() {
        body.push_str(&format!(
            "  <section class=\"{prefix}-card {prefix}-page\" data-page=\"{index}\">\n"
        ));
        body.push_str(&format!(
            "    <h2 class=\"{prefix}-page-title\">{}</h2>\n",
            escape_html(&page.name)
        ));
        for element in page.elements() {
            body.push_str(&render_element(element, &answers, prefix, 2));
        }
        body.push_str("  </section>\n");
    }

    wrap(survey, options, &body)
}

/// Render one element, pre-filled from `answers`.
pub fn render_element(
    element: &Element,
    answers: &Answers,
    prefix: &str,
    indent: usize,
) -> String {
    let ind = "  ".repeat(indent);
    let id = escape_html(element.id().as_str());
    let value = answers.get(element.id());
    let required = if element.is_required() { " required" } else { "" };
    let mut html = String::new();

    // Wrapper for single inputs: div + label + hint.
    let open_field = |kind: &str| {
        let mut open = format!(
            "{ind}<div class=\"{prefix}-field {prefix}-{kind}\" data-element=\"{id}\">\n"
        );
        open.push_str(&format!(
            "{ind}  <label for=\"{id}\">{}</label>\n",
            label_html(element, prefix)
        ));
        open.push_str(&hint_html(prefix, element, indent + 1));
        open
    };
    // Wrapper for option groups: fieldset + legend + hint.
    let open_fieldset = |kind: &str| {
        let mut open = format!(
            "{ind}<fieldset class=\"{prefix}-fieldset {prefix}-{kind}\" data-element=\"{id}\">\n"
        );
        open.push_str(&format!(
            "{ind}  <legend>{}</legend>\n",
            label_html(element, prefix)
        ));
        open.push_str(&hint_html(prefix, element, indent + 1));
        open
    };

    match element.kind() {
        ElementKind::ShortText(settings) => {
            html.push_str(&open_field("short-text"));
            let max_length = settings
                .max_length
                .map(|n| format!(" maxlength=\"{n}\""))
                .unwrap_or_default();
            html.push_str(&format!(
                "{ind}  <input type=\"text\" id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\"\
                 {}{}{max_length}{required}>\n",
                placeholder_attr(&settings.placeholder),
                value_attr(value),
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }
        ElementKind::LongText(settings) => {
            html.push_str(&open_field("long-text"));
            let content = value
                .and_then(AnswerValue::as_str)
                .map(escape_html)
                .unwrap_or_default();
            html.push_str(&format!(
                "{ind}  <textarea id=\"{id}\" name=\"{id}\" rows=\"4\" class=\"{prefix}-textarea\"\
                 {}{required}>{content}</textarea>\n",
                placeholder_attr(&settings.placeholder),
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }
        ElementKind::Email(settings) => {
            html.push_str(&open_field("email"));
            html.push_str(&format!(
                "{ind}  <input type=\"email\" id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\"\
                 {}{}{required}>\n",
                placeholder_attr(&settings.placeholder),
                value_attr(value),
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }
        ElementKind::Number(settings) => {
            html.push_str(&open_field("number"));
            let mut attrs = format!(
                "type=\"number\" step=\"any\" id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\""
            );
            if let Some(min) = settings.min {
                attrs.push_str(&format!(" min=\"{min}\""));
            }
            if let Some(max) = settings.max {
                attrs.push_str(&format!(" max=\"{max}\""));
            }
            let number = value
                .and_then(AnswerValue::to_number)
                .map(|n| format!(" value=\"{n}\""))
                .unwrap_or_default();
            html.push_str(&format!(
                "{ind}  <input {attrs}{}{number}{required}>\n",
                placeholder_attr(&settings.placeholder)
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }
        ElementKind::Date(settings) => {
            html.push_str(&open_field("date"));
            let mut attrs =
                format!("type=\"date\" id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\"");
            if let Some(min) = settings.min {
                attrs.push_str(&format!(" min=\"{min}\""));
            }
            if let Some(max) = settings.max {
                attrs.push_str(&format!(" max=\"{max}\""));
            }
            html.push_str(&format!(
                "{ind}  <input {attrs}{}{required}>\n",
                value_attr(value)
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }
        ElementKind::MultipleChoice(settings) => {
            html.push_str(&open_fieldset("choice"));
            let selected = value.and_then(AnswerValue::as_str);
            for (idx, choice) in settings.choices.iter().enumerate() {
                let checked = selected == Some(choice.as_str());
                html.push_str(&option_html(prefix, &ind, "radio", &id, idx, choice, checked));
            }
            if settings.allow_other {
                let other =
                    selected.filter(|s| !settings.choices.iter().any(|c| c.as_str() == *s));
                html.push_str(&other_html(prefix, &ind, &id, other));
            }
            html.push_str(&format!("{ind}</fieldset>\n"));
        }
        ElementKind::Checkboxes(settings) => {
            html.push_str(&open_fieldset("checkboxes"));
            let selected = value.and_then(AnswerValue::as_list).unwrap_or_default();
            let name = format!("{id}[]");
            for (idx, choice) in settings.choices.iter().enumerate() {
                let checked = selected.contains(choice);
                html.push_str(&option_html(prefix, &ind, "checkbox", &name, idx, choice, checked));
            }
            if settings.allow_other {
                let other = selected
                    .iter()
                    .find(|s| !settings.choices.contains(*s))
                    .map(String::as_str);
                html.push_str(&other_html(prefix, &ind, &id, other));
            }
            html.push_str(&format!("{ind}</fieldset>\n"));
        }
        ElementKind::Dropdown(settings) => {
            html.push_str(&open_field("dropdown"));
            let (multiple, name) = if settings.multi_select {
                (" multiple", format!("{id}[]"))
            } else {
                ("", id.clone())
            };
            html.push_str(&format!(
                "{ind}  <select id=\"{id}\" name=\"{name}\" class=\"{prefix}-select\"\
                 {multiple}{required}>\n"
            ));
            if !settings.multi_select {
                html.push_str(&format!(
                    "{ind}    <option value=\"\">{}</option>\n",
                    escape_html(&settings.placeholder)
                ));
            }
            for choice in &settings.choices {
                let chosen = match value {
                    Some(AnswerValue::Text(text)) => text == choice,
                    Some(AnswerValue::List(items)) => items.contains(choice),
                    _ => false,
                };
                html.push_str(&format!(
                    "{ind}    <option value=\"{0}\"{1}>{0}</option>\n",
                    escape_html(choice),
                    if chosen { " selected" } else { "" }
                ));
            }
            html.push_str(&format!("{ind}  </select>\n"));
            html.push_str(&format!("{ind}</div>\n"));
        }
        ElementKind::Rating(settings) => {
            html.push_str(&open_fieldset("rating"));
            let scale = Scale::new(1, i32::from(settings.max_rating), "", "");
            html.push_str(&scale.html(prefix, &ind, &id, value));
            html.push_str(&format!("{ind}</fieldset>\n"));
        }
        ElementKind::OpinionScale(settings) => {
            html.push_str(&open_fieldset("opinion-scale"));
            let scale = Scale::new(
                settings.min,
                settings.max,
                &settings.min_label,
                &settings.max_label,
            );
            html.push_str(&scale.html(prefix, &ind, &id, value));
            html.push_str(&format!("{ind}</fieldset>\n"));
        }
        ElementKind::RatingScale(settings) => {
            html.push_str(&open_fieldset("rating-scale"));
            let scale = Scale::new(
                settings.min,
                settings.max,
                &settings.min_label,
                &settings.max_label,
            );
            html.push_str(&scale.html(prefix, &ind, &id, value));
            html.push_str(&format!("{ind}</fieldset>\n"));
        }
        ElementKind::YesNo(settings) => {
            html.push_str(&open_fieldset("yes-no"));
            let answer = value.and_then(AnswerValue::as_bool);
            for (flag, label) in [(true, &settings.yes_label), (false, &settings.no_label)] {
                let option_id = format!("{id}-{flag}");
                let checked = if answer == Some(flag) { " checked" } else { "" };
                html.push_str(&format!("{ind}  <div class=\"{prefix}-radio-option\">\n"));
                html.push_str(&format!(
                    "{ind}    <input type=\"radio\" id=\"{option_id}\" name=\"{id}\" \
                     value=\"{flag}\"{checked}>\n"
                ));
                html.push_str(&format!(
                    "{ind}    <label for=\"{option_id}\">{}</label>\n",
                    escape_html(label)
                ));
                html.push_str(&format!("{ind}  </div>\n"));
            }
            html.push_str(&format!("{ind}</fieldset>\n"));
        }
        ElementKind::Section(_) => {
            html.push_str(&format!(
                "{ind}<h3 class=\"{prefix}-section\" data-element=\"{id}\">{}</h3>\n",
                escape_html(element.label())
            ));
            html.push_str(&hint_html(prefix, element, indent));
        }
        ElementKind::TextBlock(settings) => {
            html.push_str(&format!(
                "{ind}<div class=\"{prefix}-text-block\" data-element=\"{id}\">\n"
            ));
            html.push_str(&paragraphs_html(prefix, "text", &settings.content, indent + 1));
            html.push_str(&format!("{ind}</div>\n"));
        }
        ElementKind::Image(settings) => {
            html.push_str(&format!(
                "{ind}<figure class=\"{prefix}-image\" data-element=\"{id}\">\n"
            ));
            if let Some(url) = &settings.image_url {
                html.push_str(&format!(
                    "{ind}  <img src=\"{}\" alt=\"{}\">\n",
                    escape_html(url),
                    escape_html(&settings.alt_text)
                ));
            }
            if !settings.caption.is_empty() {
                html.push_str(&format!(
                    "{ind}  <figcaption>{}</figcaption>\n",
                    escape_html(&settings.caption)
                ));
            }
            html.push_str(&format!("{ind}</figure>\n"));
        }
        ElementKind::Statement(settings) => {
            html.push_str(&format!(
                "{ind}<div class=\"{prefix}-statement\" data-element=\"{id}\">\n"
            ));
            html.push_str(&paragraphs_html(prefix, "text", &settings.content, indent + 1));
            html.push_str(&format!(
                "{ind}  <button type=\"button\" \
                 class=\"{prefix}-button {prefix}-button-secondary\">{}</button>\n",
                escape_html(&settings.button_text)
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }
    }

    html
}

/// CSS variables for the theme tokens, as a `:root` rule.
pub fn theme_css(tokens: &ThemeTokens) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in tokens.to_css_variables() {
        css.push_str(&format!("  {name}: {value};\n"));
    }
    css.push_str("}\n");
    css
}

fn wrap(survey: &Survey, options: &HtmlOptions, body: &str) -> String {
    let prefix = options.class_prefix.as_str();
    let mut html = String::new();

    if options.full_document {
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );

        let title = options.title.as_deref().unwrap_or(&survey.title);
        html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));

        if options.include_theme || options.include_styles {
            html.push_str("  <style>\n");
            if options.include_theme {
                html.push_str(&theme_css(&build_theme_from_settings(&survey.settings.theme)));
            }
            if options.include_styles {
                html.push_str(&generate_styles(prefix));
            }
            html.push_str("  </style>\n");
        }

        html.push_str("</head>\n<body>\n");
    }

    html.push_str(&format!("<form class=\"{prefix}-form\" method=\"post\">\n"));
    html.push_str(body);
    html.push_str("</form>\n");

    if options.full_document {
        html.push_str("</body>\n</html>\n");
    }

    html
}

/// A numeric scale rendered as a row of radio inputs.
struct Scale<'a> {
    min: i32,
    max: i32,
    min_label: &'a str,
    max_label: &'a str,
}

impl<'a> Scale<'a> {
    /// Spans wider than `MAX_SCALE_POINTS` are cut at the top end.
    fn new(min: i32, max: i32, min_label: &'a str, max_label: &'a str) -> Self {
        let max = max.min(min.saturating_add(MAX_SCALE_POINTS - 1));
        Self {
            min,
            max,
            min_label,
            max_label,
        }
    }

    fn html(&self, prefix: &str, ind: &str, id: &str, value: Option<&AnswerValue>) -> String {
        let selected = value.and_then(AnswerValue::to_number);
        let mut html = format!("{ind}  <div class=\"{prefix}-scale\">\n");
        for point in self.min..=self.max {
            let option_id = format!("{id}-{point}");
            let checked = if selected == Some(f64::from(point)) { " checked" } else { "" };
            html.push_str(&format!(
                "{ind}    <input type=\"radio\" id=\"{option_id}\" name=\"{id}\" \
                 value=\"{point}\"{checked}>\n"
            ));
            html.push_str(&format!("{ind}    <label for=\"{option_id}\">{point}</label>\n"));
        }
        html.push_str(&format!("{ind}  </div>\n"));
        if !self.min_label.is_empty() || !self.max_label.is_empty() {
            html.push_str(&format!(
                "{ind}  <div class=\"{prefix}-scale-labels\">\
                 <span>{}</span><span>{}</span></div>\n",
                escape_html(self.min_label),
                escape_html(self.max_label)
            ));
        }
        html
    }
}

fn label_html(element: &Element, prefix: &str) -> String {
    let mut label = escape_html(element.display_label());
    if element.is_required() {
        label.push_str(&format!(" <span class=\"{prefix}-required\">*</span>"));
    }
    label
}

fn hint_html(prefix: &str, element: &Element, indent: usize) -> String {
    if element.description().is_empty() {
        return String::new();
    }
    format!(
        "{}<p class=\"{prefix}-hint\">{}</p>\n",
        "  ".repeat(indent),
        escape_html(element.description())
    )
}

/// One `<p>` per blank-line separated paragraph.
fn paragraphs_html(prefix: &str, kind: &str, text: &str, indent: usize) -> String {
    let ind = "  ".repeat(indent);
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("{ind}<p class=\"{prefix}-{kind}\">{}</p>\n", escape_html(p)))
        .collect()
}

fn option_html(
    prefix: &str,
    ind: &str,
    input_type: &str,
    name: &str,
    idx: usize,
    choice: &str,
    checked: bool,
) -> String {
    let option_id = format!("{}-{idx}", name.trim_end_matches("[]"));
    let checked = if checked { " checked" } else { "" };
    let choice = escape_html(choice);
    let mut html = format!("{ind}  <div class=\"{prefix}-{input_type}-option\">\n");
    html.push_str(&format!(
        "{ind}    <input type=\"{input_type}\" id=\"{option_id}\" name=\"{name}\" \
         value=\"{choice}\"{checked}>\n"
    ));
    html.push_str(&format!("{ind}    <label for=\"{option_id}\">{choice}</label>\n"));
    html.push_str(&format!("{ind}  </div>\n"));
    html
}

fn other_html(prefix: &str, ind: &str, id: &str, value: Option<&str>) -> String {
    let value = value
        .map(|v| format!(" value=\"{}\"", escape_html(v)))
        .unwrap_or_default();
    format!(
        "{ind}  <input type=\"text\" id=\"{id}-other\" name=\"{id}-other\" \
         class=\"{prefix}-input {prefix}-other\" placeholder=\"Other\"{value}>\n"
    )
}

fn personal_info_field_html(
    prefix: &str,
    field: &PersonalInfoField,
    info: &PersonalInfo,
) -> String {
    let input_type = match field.kind {
        PersonalInfoKind::Text => "text",
        PersonalInfoKind::Email => "email",
        PersonalInfoKind::Phone => "tel",
        PersonalInfoKind::Date => "date",
    };
    let key = escape_html(&field.key);
    let (required, marker) = if field.required {
        (" required", format!(" <span class=\"{prefix}-required\">*</span>"))
    } else {
        ("", String::new())
    };
    let value = info
        .get(&field.key)
        .map(|v| format!(" value=\"{}\"", escape_html(v)))
        .unwrap_or_default();

    let mut html = format!("    <div class=\"{prefix}-field\">\n");
    html.push_str(&format!(
        "      <label for=\"{key}\">{}{marker}</label>\n",
        escape_html(&field.label)
    ));
    html.push_str(&format!(
        "      <input type=\"{input_type}\" id=\"{key}\" name=\"{key}\" \
         class=\"{prefix}-input\"{value}{required}>\n"
    ));
    html.push_str("    </div>\n");
    html
}

fn error_html(prefix: &str, error: Option<&str>) -> String {
    error
        .map(|message| {
            format!(
                "    <div class=\"{prefix}-error\" role=\"alert\">{}</div>\n",
                escape_html(message)
            )
        })
        .unwrap_or_default()
}

fn navigation_html(prefix: &str, can_go_back: bool, next: &str) -> String {
    let mut html = format!("    <div class=\"{prefix}-navigation\">\n");
    if can_go_back {
        html.push_str(&format!(
            "      <button type=\"submit\" name=\"action\" value=\"back\" \
             class=\"{prefix}-button {prefix}-button-secondary\">Back</button>\n"
        ));
    }
    let action = next.to_lowercase();
    html.push_str(&format!(
        "      <button type=\"submit\" name=\"action\" value=\"{action}\" \
         class=\"{prefix}-button\">{next}</button>\n"
    ));
    html.push_str("    </div>\n");
    html
}

fn progress_html(prefix: &str, progress: f64) -> String {
    let percent = (progress * 100.0).round();
    format!(
        "  <div class=\"{prefix}-progress\" role=\"progressbar\" aria-valuenow=\"{percent}\" \
         aria-valuemin=\"0\" aria-valuemax=\"100\">\
         <div class=\"{prefix}-progress-fill\" style=\"width: {percent}%\"></div></div>\n"
    )
}

fn value_attr(value: Option<&AnswerValue>) -> String {
    value
        .and_then(AnswerValue::as_str)
        .map(|s| format!(" value=\"{}\"", escape_html(s)))
        .unwrap_or_default()
}

fn placeholder_attr(placeholder: &str) -> String {
    if placeholder.is_empty() {
        String::new()
    } else {
        format!(" placeholder=\"{}\"", escape_html(placeholder))
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate default CSS styles, driven by the theme variables.
fn generate_styles(prefix: &str) -> String {
    format!(
        r#"    body {{
      background: var(--survey-background, #ffffff);
      color: var(--survey-text, #1f2937);
      font-family: sans-serif;
    }}
    .{prefix}-form {{
      max-width: 640px;
      margin: 2rem auto;
      padding: 1rem;
    }}
    .{prefix}-card {{
      background: var(--survey-card-background);
      box-shadow: var(--survey-card-shadow);
      border-radius: 12px;
      padding: 1.5rem;
    }}
    .{prefix}-progress {{
      height: 6px;
      margin-bottom: 1rem;
      background: var(--survey-progress-track);
      border-radius: 3px;
    }}
    .{prefix}-progress-fill {{
      height: 100%;
      background: var(--survey-progress-fill);
      border-radius: 3px;
    }}
    .{prefix}-field, .{prefix}-fieldset {{
      margin: 1rem 0;
      border: none;
      padding: 0;
    }}
    .{prefix}-field label, .{prefix}-fieldset legend {{
      display: block;
      margin-bottom: 0.25rem;
    }}
    .{prefix}-hint {{
      color: var(--survey-text-muted);
      margin: 0 0 0.5rem;
    }}
    .{prefix}-required {{
      color: var(--survey-error);
    }}
    .{prefix}-input, .{prefix}-textarea, .{prefix}-select {{
      width: 100%;
      padding: 0.5rem;
      box-sizing: border-box;
      background: var(--survey-input-background);
      color: var(--survey-text);
      border: 1px solid var(--survey-input-border);
      border-radius: 6px;
    }}
    .{prefix}-input::placeholder, .{prefix}-textarea::placeholder {{
      color: var(--survey-input-placeholder);
    }}
    .{prefix}-input:hover, .{prefix}-textarea:hover, .{prefix}-select:hover {{
      background: var(--survey-input-hover-background);
    }}
    .{prefix}-input:focus, .{prefix}-textarea:focus, .{prefix}-select:focus {{
      border-color: var(--survey-border-focus);
      box-shadow: var(--survey-focus-ring);
      outline: none;
    }}
    .{prefix}-radio-option, .{prefix}-checkbox-option {{
      margin: 0.25rem 0;
      padding: 0.5rem;
      border: 1px solid var(--survey-border);
      border-radius: 6px;
    }}
    .{prefix}-radio-option:hover, .{prefix}-checkbox-option:hover {{
      background: var(--survey-option-hover-background);
    }}
    .{prefix}-radio-option:has(input:checked), .{prefix}-checkbox-option:has(input:checked) {{
      background: var(--survey-option-selected-background);
      border-color: var(--survey-option-selected-border);
    }}
    .{prefix}-scale {{
      display: flex;
      gap: 0.25rem;
    }}
    .{prefix}-scale-labels {{
      display: flex;
      justify-content: space-between;
      color: var(--survey-text-subtle);
    }}
    .{prefix}-error {{
      color: var(--survey-error);
      margin: 1rem 0;
    }}
    .{prefix}-button {{
      padding: 0.5rem 1rem;
      background: var(--survey-accent);
      color: var(--survey-accent-contrast);
      border: none;
      border-radius: 6px;
    }}
    .{prefix}-button:hover {{
      background: var(--survey-accent-hover);
      box-shadow: 0 0 12px var(--survey-glow);
    }}
    .{prefix}-button:active {{
      background: var(--survey-accent-active);
    }}
    .{prefix}-button-secondary {{
      background: var(--survey-accent-soft);
      color: var(--survey-text);
    }}
    .{prefix}-navigation {{
      display: flex;
      justify-content: space-between;
      margin-top: 1.5rem;
    }}
"#
    )
}
