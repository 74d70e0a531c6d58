//! The create-employee form.
//!
//! [`EmployeeForm`] holds the field values being edited, the errors from the
//! last submit attempt and the confirmation dialog flag. Validation runs only
//! on [`EmployeeForm::submit`], never while typing.

mod validation;

use tracing::debug;

use crate::employee::{Employee, Field, NewEmployee};
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::store::EmployeeStore;
use crate::widgets::{DateInput, SearchableSelect};

pub use validation::{is_valid_zip_code, validate, FieldErrors, FormOptions, ZIP_CODE_PATTERN};

/// Text of the confirmation dialog.
pub const CONFIRMATION_MESSAGE: &str = "Employee Created!";

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was appended to the store.
    Created(Employee),
    /// Nothing was saved; one message per invalid field.
    Rejected(FieldErrors),
}

/// Form state for creating one employee at a time.
#[derive(Debug, Clone)]
pub struct EmployeeForm {
    values: NewEmployee,
    errors: FieldErrors,
    rejected_input: FieldErrors,
    options: FormOptions,
    confirmation_open: bool,
}

impl EmployeeForm {
    /// An empty form validating against `options`.
    #[must_use]
    pub fn new(options: FormOptions) -> Self {
        Self {
            values: NewEmployee::default(),
            errors: FieldErrors::new(),
            rejected_input: FieldErrors::new(),
            options,
            confirmation_open: false,
        }
    }

    /// Current field values.
    #[must_use]
    pub fn values(&self) -> &NewEmployee {
        &self.values
    }

    /// Errors from the last rejected submit, minus fields edited since.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The error shown next to `field`, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The option lists used for the state and department fields.
    #[must_use]
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Edit a field. Clears that field's error.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        self.errors.remove(&field);
        self.rejected_input.remove(&field);
    }

    /// Edit a field from free text, going through the field's widget.
    ///
    /// Dates are parsed by the field's [`DateInput`] in either text form and
    /// stored as `MM/DD/YYYY`. State and department text is resolved by the
    /// field's [`SearchableSelect`]; text matching no single option is kept
    /// as typed, so submit reports it as unlisted.
    ///
    /// # Errors
    ///
    /// Returns the date input's error if the text is not a selectable date.
    /// The field is then cleared and the message is reported for it on the
    /// next submit, in place of the missing-value message.
    pub fn set_text(&mut self, field: Field, text: &str) -> Result<()> {
        match field {
            Field::DateOfBirth | Field::StartDate => {
                let mut input = if field == Field::DateOfBirth {
                    Self::date_of_birth_input()
                } else {
                    Self::start_date_input()
                };
                match input.set_text(text) {
                    Ok(()) => {
                        self.set(field, input.external());
                        Ok(())
                    }
                    Err(e) => {
                        self.set(field, "");
                        self.rejected_input.insert(field, e.to_string());
                        Err(e)
                    }
                }
            }
            Field::State | Field::Department => {
                let mut select = if field == Field::State {
                    self.state_select()
                } else {
                    self.department_select()
                };
                let value = select.resolve(text).unwrap_or_else(|| text.to_string());
                self.set(field, value);
                Ok(())
            }
            _ => {
                self.set(field, text);
                Ok(())
            }
        }
    }

    /// Validate and, if clean, append to `store`, reset the fields and open
    /// the confirmation dialog.
    pub fn submit<S: KeyValueStore>(&mut self, store: &mut EmployeeStore<S>) -> SubmitOutcome {
        let mut errors = validate(&self.values, &self.options);
        errors.extend(self.rejected_input.clone());
        if !errors.is_empty() {
            debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Form rejected");
            self.errors = errors.clone();
            return SubmitOutcome::Rejected(errors);
        }

        let employee = store.append(std::mem::take(&mut self.values));
        self.errors.clear();
        self.rejected_input.clear();
        self.confirmation_open = true;
        SubmitOutcome::Created(employee)
    }

    /// Whether the confirmation dialog is showing.
    #[must_use]
    pub fn is_confirmation_open(&self) -> bool {
        self.confirmation_open
    }

    /// Dismiss the confirmation dialog.
    pub fn close_confirmation(&mut self) {
        self.confirmation_open = false;
    }

    /// A state picker over this form's options, showing the current value.
    #[must_use]
    pub fn state_select(&self) -> SearchableSelect {
        let mut select = SearchableSelect::new(self.options.states.clone())
            .with_placeholder("Select a state");
        select.set_value(Some(self.values.state.clone()));
        select
    }

    /// A department picker over this form's options, showing the current value.
    #[must_use]
    pub fn department_select(&self) -> SearchableSelect {
        let mut select = SearchableSelect::new(self.options.departments.clone())
            .with_placeholder("Select a department")
            .searchable(false);
        select.set_value(Some(self.values.department.clone()));
        select
    }

    /// Date input for the birth date; future dates are not selectable.
    #[must_use]
    pub fn date_of_birth_input() -> DateInput {
        DateInput::new().not_after_today()
    }

    /// Date input for the start date.
    #[must_use]
    pub fn start_date_input() -> DateInput {
        DateInput::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::Storage;
    use crate::store::DEFAULT_KEY;

    fn store() -> EmployeeStore<Storage> {
        EmployeeStore::load(Storage::open_in_memory().unwrap(), DEFAULT_KEY)
    }

    fn fill(form: &mut EmployeeForm) {
        form.set(Field::FirstName, "Grace");
        form.set(Field::LastName, "Hopper");
        form.set(Field::DateOfBirth, "12/09/1906");
        form.set(Field::StartDate, "01/01/2024");
        form.set(Field::Street, "1 Navy Yard");
        form.set(Field::City, "Arlington");
        form.set(Field::State, "VA");
        form.set(Field::ZipCode, "22202");
        form.set(Field::Department, "Engineering");
    }

    #[test]
    fn test_submit_valid_creates_and_resets() {
        let mut store = store();
        let mut form = EmployeeForm::new(FormOptions::builtin());
        fill(&mut form);

        let outcome = form.submit(&mut store);
        let SubmitOutcome::Created(employee) = outcome else {
            panic!("expected a created employee");
        };

        assert_eq!(employee.fields.first_name, "Grace");
        assert_eq!(store.len(), 1);
        assert_eq!(form.values(), &NewEmployee::default());
        assert!(form.errors().is_empty());
        assert!(form.is_confirmation_open());

        form.close_confirmation();
        assert!(!form.is_confirmation_open());
    }

    #[test]
    fn test_submit_invalid_keeps_values_and_store() {
        let mut store = store();
        let mut form = EmployeeForm::new(FormOptions::builtin());
        fill(&mut form);
        form.set(Field::ZipCode, "1234");

        let outcome = form.submit(&mut store);
        assert!(matches!(outcome, SubmitOutcome::Rejected(ref e) if e.len() == 1));
        assert!(store.is_empty());
        assert_eq!(form.values().first_name, "Grace");
        assert_eq!(form.error(Field::ZipCode), Some("Invalid zip code format"));
        assert!(!form.is_confirmation_open());
    }

    #[test]
    fn test_editing_clears_only_that_error() {
        let mut store = store();
        let mut form = EmployeeForm::new(FormOptions::builtin());
        form.submit(&mut store);
        assert_eq!(form.errors().len(), Field::ALL.len());

        form.set(Field::City, "Reno");
        assert!(form.error(Field::City).is_none());
        assert!(form.error(Field::Street).is_some());
        assert_eq!(form.errors().len(), Field::ALL.len() - 1);
    }

    #[test]
    fn test_no_validation_before_submit() {
        let mut form = EmployeeForm::new(FormOptions::builtin());
        form.set(Field::ZipCode, "12");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_selects_reflect_current_values() {
        let mut form = EmployeeForm::new(FormOptions::builtin());
        assert_eq!(form.state_select().display_value(), "Select a state");

        form.set(Field::State, "AL");
        form.set(Field::Department, "Legal");
        assert_eq!(form.state_select().display_value(), "Alabama");
        assert_eq!(form.department_select().display_value(), "Legal");
    }

    #[test]
    fn test_set_text_normalizes_dates() {
        let mut form = EmployeeForm::new(FormOptions::builtin());
        form.set_text(Field::StartDate, "2024-03-17").unwrap();
        form.set_text(Field::DateOfBirth, "12/09/1906").unwrap();

        assert_eq!(form.values().start_date, "03/17/2024");
        assert_eq!(form.values().date_of_birth, "12/09/1906");
    }

    #[test]
    fn test_set_text_bad_date_reported_on_submit() {
        let mut store = store();
        let mut form = EmployeeForm::new(FormOptions::builtin());
        fill(&mut form);

        let err = form.set_text(Field::StartDate, "13/45/2024").unwrap_err();
        assert!(matches!(err, Error::DateFormat { .. }));
        assert_eq!(form.values().start_date, "");

        let SubmitOutcome::Rejected(errors) = form.submit(&mut store) else {
            panic!("expected a rejection");
        };
        assert_eq!(errors.len(), 1);
        assert!(errors[&Field::StartDate].contains("13/45/2024"));
        assert_ne!(errors[&Field::StartDate], "Start Date is required");
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_text_future_birth_date_rejected() {
        let mut store = store();
        let mut form = EmployeeForm::new(FormOptions::builtin());
        fill(&mut form);

        let err = form.set_text(Field::DateOfBirth, "9999-01-01").unwrap_err();
        assert!(matches!(err, Error::DateOutOfRange { .. }));

        let SubmitOutcome::Rejected(errors) = form.submit(&mut store) else {
            panic!("expected a rejection");
        };
        assert!(errors[&Field::DateOfBirth].contains("outside the selectable range"));
    }

    #[test]
    fn test_set_text_correction_clears_rejection() {
        let mut store = store();
        let mut form = EmployeeForm::new(FormOptions::builtin());
        fill(&mut form);

        assert!(form.set_text(Field::StartDate, "not a date").is_err());
        form.set_text(Field::StartDate, "01/02/2024").unwrap();

        assert!(matches!(form.submit(&mut store), SubmitOutcome::Created(_)));
    }

    #[test]
    fn test_set_text_resolves_selects() {
        let mut form = EmployeeForm::new(FormOptions::builtin());

        form.set_text(Field::State, "Alabama").unwrap();
        assert_eq!(form.values().state, "AL");

        form.set_text(Field::State, "new york").unwrap();
        assert_eq!(form.values().state, "NY");

        form.set_text(Field::Department, "legal").unwrap();
        assert_eq!(form.values().department, "Legal");
    }

    #[test]
    fn test_set_text_ambiguous_state_is_unlisted() {
        let mut store = store();
        let mut form = EmployeeForm::new(FormOptions::builtin());
        fill(&mut form);

        // Matches both Alabama and Alaska.
        form.set_text(Field::State, "ala").unwrap();
        assert_eq!(form.values().state, "ala");

        let SubmitOutcome::Rejected(errors) = form.submit(&mut store) else {
            panic!("expected a rejection");
        };
        assert_eq!(
            errors[&Field::State],
            "State must be one of the listed options"
        );
    }

    #[test]
    fn test_date_inputs() {
        assert!(EmployeeForm::date_of_birth_input().max().is_some());
        assert!(EmployeeForm::start_date_input().max().is_none());
    }
}
