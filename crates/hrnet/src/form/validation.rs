//! Field-level validation of a submitted employee.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::employee::{Field, NewEmployee};
use crate::widgets::select::SelectOption;

/// US zip code: five digits, optionally a hyphen and four more.
pub const ZIP_CODE_PATTERN: &str = r"^\d{5}(-\d{4})?$";

/// Error message per invalid field. Empty means the form may be submitted.
pub type FieldErrors = BTreeMap<Field, String>;

/// The option lists the state and department values must come from.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Allowed states.
    pub states: Vec<SelectOption>,
    /// Allowed departments.
    pub departments: Vec<SelectOption>,
}

impl FormOptions {
    /// The built-in state and department lists.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            states: crate::data::state_options(),
            departments: crate::data::department_options(),
        }
    }
}

fn zip_code_regex() -> &'static Regex {
    static ZIP: OnceLock<Regex> = OnceLock::new();
    ZIP.get_or_init(|| Regex::new(ZIP_CODE_PATTERN).expect("zip code pattern is valid"))
}

/// Whether `zip` matches [`ZIP_CODE_PATTERN`].
#[must_use]
pub fn is_valid_zip_code(zip: &str) -> bool {
    zip_code_regex().is_match(zip)
}

fn required_message(field: Field) -> String {
    format!("{} is required", field.label())
}

fn check(field: Field, values: &NewEmployee, options: &FormOptions) -> Option<String> {
    let value = values.get(field);
    match field {
        Field::FirstName | Field::LastName | Field::Street | Field::City => {
            value.trim().is_empty().then(|| required_message(field))
        }
        Field::DateOfBirth | Field::StartDate => value.is_empty().then(|| required_message(field)),
        Field::State | Field::Department => {
            let allowed = if field == Field::State {
                &options.states
            } else {
                &options.departments
            };
            if value.is_empty() {
                Some(required_message(field))
            } else if allowed.iter().any(|o| o.value == value) {
                None
            } else {
                Some(format!("{} must be one of the listed options", field.label()))
            }
        }
        Field::ZipCode => {
            if value.trim().is_empty() {
                Some(required_message(field))
            } else if is_valid_zip_code(value) {
                None
            } else {
                Some("Invalid zip code format".to_string())
            }
        }
    }
}

/// Validate every field independently.
///
/// Returns one message per invalid field, the first failing rule's.
#[must_use]
pub fn validate(values: &NewEmployee, options: &FormOptions) -> FieldErrors {
    Field::ALL
        .into_iter()
        .filter_map(|field| check(field, values, options).map(|message| (field, message)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewEmployee {
        NewEmployee {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            date_of_birth: "12/09/1906".to_string(),
            start_date: "01/01/2024".to_string(),
            street: "1 Navy Yard".to_string(),
            city: "Arlington".to_string(),
            state: "VA".to_string(),
            zip_code: "22202".to_string(),
            department: "Engineering".to_string(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let options = FormOptions::builtin();
        assert!(validate(&valid(), &options).is_empty());

        let mut plus_four = valid();
        plus_four.zip_code = "12345-6789".to_string();
        assert!(validate(&plus_four, &options).is_empty());
    }

    #[test]
    fn test_empty_form_flags_every_field() {
        let errors = validate(&NewEmployee::default(), &FormOptions::builtin());
        assert_eq!(errors.len(), Field::ALL.len());
        assert_eq!(errors[&Field::FirstName], "First Name is required");
        assert_eq!(errors[&Field::ZipCode], "Zip Code is required");
    }

    #[test]
    fn test_each_missing_field_reported_alone() {
        let options = FormOptions::builtin();
        for field in Field::ALL {
            let mut values = valid();
            values.set(field, "");
            let errors = validate(&values, &options);
            assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![field]);
        }
    }

    #[test]
    fn test_whitespace_only_text_is_missing() {
        let mut values = valid();
        values.first_name = "   ".to_string();
        values.city = "\t".to_string();

        let errors = validate(&values, &FormOptions::builtin());
        assert!(errors.contains_key(&Field::FirstName));
        assert!(errors.contains_key(&Field::City));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_zip_code_format() {
        let options = FormOptions::builtin();
        let mut values = valid();

        values.zip_code = "1234".to_string();
        let errors = validate(&values, &options);
        assert_eq!(errors[&Field::ZipCode], "Invalid zip code format");

        for bad in ["123456", "12345-678", "abcde", "12345 6789"] {
            values.zip_code = bad.to_string();
            assert!(validate(&values, &options).contains_key(&Field::ZipCode), "{bad}");
        }

        for good in ["12345", "12345-6789"] {
            values.zip_code = good.to_string();
            assert!(validate(&values, &options).is_empty(), "{good}");
        }
    }

    #[test]
    fn test_selection_must_be_listed() {
        let options = FormOptions::builtin();
        let mut values = valid();
        values.state = "Virginia".to_string();
        values.department = "Catering".to_string();

        let errors = validate(&values, &options);
        assert_eq!(errors[&Field::State], "State must be one of the listed options");
        assert!(errors.contains_key(&Field::Department));
    }

    #[test]
    fn test_custom_option_lists() {
        let options = FormOptions {
            states: vec![SelectOption::new("Ontario", "ON")],
            departments: vec![SelectOption::plain("Research")],
        };
        let mut values = valid();
        values.state = "ON".to_string();
        values.department = "Research".to_string();

        assert!(validate(&values, &options).is_empty());
    }

    #[test]
    fn test_is_valid_zip_code() {
        assert!(is_valid_zip_code("00501"));
        assert!(!is_valid_zip_code(""));
    }
}
