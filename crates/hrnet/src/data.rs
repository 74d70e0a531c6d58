//! Built-in option lists and the employee table layout.

use crate::employee::Field;
use crate::table::{ColumnDef, ColumnKind};
use crate::widgets::select::SelectOption;

/// US states and the District of Columbia as `(name, abbreviation)`.
pub const STATES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District Of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Department names. Label and value are the same.
pub const DEPARTMENTS: &[&str] = &[
    "Sales",
    "Marketing",
    "Engineering",
    "Human Resources",
    "Legal",
];

/// Built-in state options.
#[must_use]
pub fn state_options() -> Vec<SelectOption> {
    STATES
        .iter()
        .map(|(name, abbreviation)| SelectOption::new(*name, *abbreviation))
        .collect()
}

/// Built-in department options.
#[must_use]
pub fn department_options() -> Vec<SelectOption> {
    DEPARTMENTS.iter().map(|d| SelectOption::plain(*d)).collect()
}

/// Columns of the employee list, in display order.
#[must_use]
pub fn employee_columns() -> Vec<ColumnDef> {
    [
        (Field::FirstName, ColumnKind::Text),
        (Field::LastName, ColumnKind::Text),
        (Field::StartDate, ColumnKind::Date),
        (Field::Department, ColumnKind::Text),
        (Field::DateOfBirth, ColumnKind::Date),
        (Field::Street, ColumnKind::Text),
        (Field::City, ColumnKind::Text),
        (Field::State, ColumnKind::Text),
        (Field::ZipCode, ColumnKind::Text),
    ]
    .into_iter()
    .map(|(field, kind)| ColumnDef::new(field.key(), field.label()).with_kind(kind))
    .collect()
}
