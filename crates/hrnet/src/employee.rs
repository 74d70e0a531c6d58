//! Employee record types.
//!
//! [`NewEmployee`] is what the form collects; [`Employee`] is what the store
//! hands back once an identifier and creation timestamp have been assigned.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the nine user-editable fields of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Birth date, `MM/DD/YYYY`.
    DateOfBirth,
    /// Employment start date, `MM/DD/YYYY`.
    StartDate,
    /// Street address.
    Street,
    /// City.
    City,
    /// State, stored as the option value (e.g. `AL`).
    State,
    /// US zip code, 5 or 5+4 digits.
    ZipCode,
    /// Department name.
    Department,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::DateOfBirth,
        Field::StartDate,
        Field::Street,
        Field::City,
        Field::State,
        Field::ZipCode,
        Field::Department,
    ];

    /// The JSON key for this field, also used as the table column key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::DateOfBirth => "dateOfBirth",
            Self::StartDate => "startDate",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::Department => "department",
        }
    }

    /// Human readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::DateOfBirth => "Date of Birth",
            Self::StartDate => "Start Date",
            Self::Street => "Street",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "Zip Code",
            Self::Department => "Department",
        }
    }

    /// Look a field up by its JSON key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field values of an employee that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Birth date, `MM/DD/YYYY`.
    pub date_of_birth: String,
    /// Employment start date, `MM/DD/YYYY`.
    pub start_date: String,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// State option value.
    pub state: String,
    /// Zip code.
    pub zip_code: String,
    /// Department option value.
    pub department: String,
}

impl NewEmployee {
    /// Read a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::DateOfBirth => &self.date_of_birth,
            Field::StartDate => &self.start_date,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::ZipCode => &self.zip_code,
            Field::Department => &self.department,
        }
    }

    /// Overwrite a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::StartDate => &mut self.start_date,
            Field::Street => &mut self.street,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::ZipCode => &mut self.zip_code,
            Field::Department => &mut self.department,
        };
        *slot = value.into();
    }
}

/// A saved employee record.
///
/// Records are never modified after creation. The `id` is a decimal string
/// that strictly increases with creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// The submitted field values.
    #[serde(flatten)]
    pub fields: NewEmployee,

    /// Unique identifier assigned by the store.
    pub id: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Build a saved record from form values.
    #[must_use]
    pub fn new(fields: NewEmployee, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            fields,
            id,
            created_at,
        }
    }

    /// Read a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    /// Numeric value of the identifier, if it is a plain decimal.
    #[must_use]
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    /// Full name, first then last.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fields.first_name, self.fields.last_name)
            .trim()
            .to_string()
    }
}
