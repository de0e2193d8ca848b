//! Page validation: decides whether a respondent may advance.
//!
//! Only required elements are checked, in element order, and the first
//! violated rule is reported. Static blocks never block advancement.

use survey_engine_types::{
    AnswerValue, Answers, Element, ElementKind, PersonalInfo, PersonalInfoField, PersonalInfoKind,
};

/// The first rule a page (or the personal-info step) violates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Element id or personal-info key the message is about.
    pub field: String,

    /// Message shown inline to the respondent.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn for_element(element: &Element, message: String) -> Self {
        Self::new(element.id().as_str(), message)
    }
}

/// Validate the elements of one page against the in-progress answers.
pub fn validate_page(elements: &[Element], answers: &Answers) -> Result<(), ValidationError> {
    elements
        .iter()
        .filter(|element| element.is_required())
        .try_for_each(|element| validate_element(element, answers.get(element.id())))
}

/// Validate a single required element.
pub fn validate_element(
    element: &Element,
    value: Option<&AnswerValue>,
) -> Result<(), ValidationError> {
    let label = element.display_label();

    match element.kind() {
        ElementKind::Section(_)
        | ElementKind::TextBlock(_)
        | ElementKind::Image(_)
        | ElementKind::Statement(_) => Ok(()),

        ElementKind::Checkboxes(settings) => {
            check_selections(element, value, settings.min_selections)
        }
        ElementKind::Dropdown(settings) if settings.multi_select => {
            check_selections(element, value, settings.min_selections)
        }
        ElementKind::Dropdown(_) => {
            if has_value(value) {
                Ok(())
            } else {
                Err(ValidationError::for_element(
                    element,
                    format!("Please select an option for \"{label}\""),
                ))
            }
        }

        ElementKind::Email(_) => match value.and_then(AnswerValue::as_str) {
            Some(text) if text.contains('@') => Ok(()),
            _ => Err(ValidationError::for_element(
                element,
                format!("Please enter a valid email address for \"{label}\""),
            )),
        },

        ElementKind::Number(settings) => {
            let Some(number) = value.and_then(AnswerValue::to_number) else {
                return Err(ValidationError::for_element(
                    element,
                    format!("Please enter a number for \"{label}\""),
                ));
            };
            match (settings.min, settings.max) {
                (Some(min), Some(max)) if number < min || number > max => {
                    Err(ValidationError::for_element(
                        element,
                        format!("\"{label}\" must be between {min} and {max}"),
                    ))
                }
                (Some(min), None) if number < min => Err(ValidationError::for_element(
                    element,
                    format!("\"{label}\" must be at least {min}"),
                )),
                (None, Some(max)) if number > max => Err(ValidationError::for_element(
                    element,
                    format!("\"{label}\" must be at most {max}"),
                )),
                _ => Ok(()),
            }
        }

        ElementKind::YesNo(_) => match value {
            Some(AnswerValue::Bool(_)) => Ok(()),
            _ => Err(ValidationError::for_element(
                element,
                format!("Please answer yes or no for \"{label}\""),
            )),
        },

        ElementKind::MultipleChoice(_)
        | ElementKind::Rating(_)
        | ElementKind::OpinionScale(_)
        | ElementKind::RatingScale(_) => {
            if has_value(value) {
                Ok(())
            } else {
                Err(ValidationError::for_element(
                    element,
                    format!("Please choose an answer for \"{label}\""),
                ))
            }
        }

        ElementKind::ShortText(_) | ElementKind::LongText(_) | ElementKind::Date(_) => {
            if has_value(value) {
                Ok(())
            } else {
                Err(ValidationError::for_element(
                    element,
                    format!("Please fill in \"{label}\""),
                ))
            }
        }
    }
}

/// Validate the personal-info step.
pub fn validate_personal_info(
    fields: &[PersonalInfoField],
    info: &PersonalInfo,
) -> Result<(), ValidationError> {
    for field in fields {
        let value = info.get(&field.key).map(|v| v.trim()).unwrap_or_default();
        if value.is_empty() {
            if field.required {
                return Err(ValidationError::new(
                    &field.key,
                    format!("Please fill in \"{}\"", field.label),
                ));
            }
            continue;
        }
        if field.kind == PersonalInfoKind::Email && !value.contains('@') {
            return Err(ValidationError::new(
                &field.key,
                format!("Please enter a valid email address for \"{}\"", field.label),
            ));
        }
    }
    Ok(())
}

fn has_value(value: Option<&AnswerValue>) -> bool {
    value.is_some_and(|v| !v.is_blank())
}

fn check_selections(
    element: &Element,
    value: Option<&AnswerValue>,
    min_selections: Option<u32>,
) -> Result<(), ValidationError> {
    let label = element.display_label();
    let count = value.map(AnswerValue::selection_count).unwrap_or(0);

    if count == 0 {
        return Err(ValidationError::for_element(
            element,
            format!("Please select at least one option for \"{label}\""),
        ));
    }
    if let Some(min) = min_selections
        && count < min as usize
    {
        return Err(ValidationError::for_element(
            element,
            format!("Please select at least {min} options for \"{label}\""),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_engine_types::{
        CheckboxSettings, DropdownSettings, ElementType, NumberSettings, PersonalInfoField,
    };

    fn required(element_type: ElementType, id: &str) -> Element {
        Element::new(element_type)
            .with_id(id)
            .with_label(id)
            .with_required(true)
    }

    fn checkboxes_with_min(min: u32) -> Element {
        Element::with_kind(ElementKind::Checkboxes(CheckboxSettings {
            choices: (1..=6).map(|i| format!("c{i}")).collect(),
            min_selections: Some(min),
            ..Default::default()
        }))
        .with_id("boxes")
        .with_label("Topics")
        .with_required(true)
    }

    #[test]
    fn checkbox_minimum_is_enforced_for_every_selection_size() {
        for k in 1..=4u32 {
            let element = checkboxes_with_min(k);
            for size in 0..=6usize {
                let mut answers = Answers::new();
                let picks: Vec<String> = (1..=size).map(|i| format!("c{i}")).collect();
                answers.insert("boxes", picks);

                let result = validate_page(std::slice::from_ref(&element), &answers);
                if size < k as usize {
                    let err = result.expect_err("selection below minimum must fail");
                    assert!(err.message.contains("Topics"));
                } else {
                    assert!(result.is_ok(), "size {size} with min {k} should pass");
                }
            }
        }
    }

    #[test]
    fn multi_select_dropdown_uses_selection_rules() {
        let element = Element::with_kind(ElementKind::Dropdown(DropdownSettings {
            multi_select: true,
            min_selections: Some(2),
            ..Default::default()
        }))
        .with_id("langs")
        .with_required(true);

        let mut answers = Answers::new();
        answers.insert("langs", vec!["Option 1"]);
        assert!(validate_page(std::slice::from_ref(&element), &answers).is_err());

        answers.insert("langs", vec!["Option 1", "Option 2"]);
        assert!(validate_page(std::slice::from_ref(&element), &answers).is_ok());
    }

    #[test]
    fn single_dropdown_needs_a_value() {
        let element = required(ElementType::Dropdown, "city");
        let mut answers = Answers::new();
        answers.insert("city", "");
        assert!(validate_page(std::slice::from_ref(&element), &answers).is_err());

        answers.insert("city", "Option 2");
        assert!(validate_page(std::slice::from_ref(&element), &answers).is_ok());
    }

    #[test]
    fn email_must_contain_at_sign() {
        let element = required(ElementType::Email, "email");
        let mut answers = Answers::new();
        answers.insert("email", "sam.example.org");
        let err = validate_page(std::slice::from_ref(&element), &answers).unwrap_err();
        assert_eq!(err.field, "email");

        answers.insert("email", "sam@example.org");
        assert!(validate_page(std::slice::from_ref(&element), &answers).is_ok());
    }

    #[test]
    fn number_bounds_are_inclusive() {
        let element = Element::with_kind(ElementKind::Number(NumberSettings::with_bounds(
            Some(1.0),
            Some(10.0),
        )))
        .with_id("count")
        .with_label("Household size")
        .with_required(true);
        let page = std::slice::from_ref(&element);

        let mut answers = Answers::new();
        assert!(validate_page(page, &answers).is_err());

        for ok in [1.0, 5.5, 10.0] {
            answers.insert("count", ok);
            assert!(validate_page(page, &answers).is_ok(), "{ok} should pass");
        }
        for bad in [0.0, 10.5] {
            answers.insert("count", bad);
            let err = validate_page(page, &answers).unwrap_err();
            assert_eq!(err.message, "\"Household size\" must be between 1 and 10");
        }

        answers.insert("count", "7");
        assert!(validate_page(page, &answers).is_ok());
        answers.insert("count", "seven");
        assert!(validate_page(page, &answers).is_err());
    }

    #[test]
    fn non_finite_numbers_do_not_pass_bounds() {
        let element = Element::with_kind(ElementKind::Number(NumberSettings::with_bounds(
            Some(1.0),
            Some(10.0),
        )))
        .with_id("count")
        .with_label("Household size")
        .with_required(true);
        let page = std::slice::from_ref(&element);

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut answers = Answers::new();
            answers.insert("count", value);
            let err = validate_page(page, &answers).unwrap_err();
            assert_eq!(err.message, "Please enter a number for \"Household size\"");
        }
    }

    #[test]
    fn yes_no_accepts_false_but_not_missing() {
        let element = required(ElementType::YesNo, "consent");
        let page = std::slice::from_ref(&element);
        let mut answers = Answers::new();
        assert!(validate_page(page, &answers).is_err());

        answers.insert("consent", "false");
        assert!(validate_page(page, &answers).is_err());

        answers.insert("consent", false);
        assert!(validate_page(page, &answers).is_ok());
    }

    #[test]
    fn choice_and_scale_types_need_a_value() {
        for element_type in [
            ElementType::MultipleChoice,
            ElementType::Rating,
            ElementType::OpinionScale,
            ElementType::RatingScale,
        ] {
            let element = required(element_type, "pick");
            let page = std::slice::from_ref(&element);
            let mut answers = Answers::new();
            assert!(validate_page(page, &answers).is_err(), "{element_type}");

            answers.insert("pick", 3);
            assert!(validate_page(page, &answers).is_ok(), "{element_type}");
        }
    }

    #[test]
    fn static_blocks_never_block() {
        let page: Vec<Element> = [
            ElementType::Section,
            ElementType::TextBlock,
            ElementType::Image,
            ElementType::Statement,
        ]
        .into_iter()
        .map(|t| required(t, t.as_str()))
        .collect();
        assert!(validate_page(&page, &Answers::new()).is_ok());
    }

    #[test]
    fn text_types_are_trimmed() {
        for element_type in [
            ElementType::ShortText,
            ElementType::LongText,
            ElementType::Date,
        ] {
            let element = required(element_type, "text");
            let page = std::slice::from_ref(&element);
            let mut answers = Answers::new();
            answers.insert("text", "   ");
            assert!(validate_page(page, &answers).is_err(), "{element_type}");
            answers.insert("text", " hi ");
            assert!(validate_page(page, &answers).is_ok(), "{element_type}");
        }
    }

    #[test]
    fn optional_elements_are_not_checked() {
        let element = Element::new(ElementType::Email).with_id("email");
        let mut answers = Answers::new();
        answers.insert("email", "not an email");
        assert!(validate_page(std::slice::from_ref(&element), &answers).is_ok());
    }

    #[test]
    fn first_error_in_element_order_wins() {
        let page = vec![
            required(ElementType::ShortText, "first"),
            required(ElementType::YesNo, "second"),
        ];
        let err = validate_page(&page, &Answers::new()).unwrap_err();
        assert_eq!(err.field, "first");

        let mut answers = Answers::new();
        answers.insert("first", "done");
        let err = validate_page(&page, &answers).unwrap_err();
        assert_eq!(err.field, "second");
    }

    #[test]
    fn personal_info_rules() {
        let fields = vec![
            PersonalInfoField::new("firstName", "First name").required(),
            PersonalInfoField::new("email", "Email").with_kind(PersonalInfoKind::Email),
        ];
        let mut info = PersonalInfo::new();
        let err = validate_personal_info(&fields, &info).unwrap_err();
        assert_eq!(err.field, "firstName");

        info.insert("firstName".into(), "Sam".into());
        assert!(validate_personal_info(&fields, &info).is_ok());

        info.insert("email".into(), "nope".into());
        let err = validate_personal_info(&fields, &info).unwrap_err();
        assert_eq!(err.field, "email");
    }
}
