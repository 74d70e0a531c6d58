//! The employee record store.
//!
//! Owns the in-memory sequence of [`Employee`] records and mirrors it, in
//! full, into a [`KeyValueStore`] under one key after every append. Loading
//! never fails: a missing or unreadable payload yields an empty store.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::employee::{Employee, NewEmployee};
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Default key the records are persisted under.
pub const DEFAULT_KEY: &str = "employees";

/// Ordered, append-only collection of employee records.
#[derive(Debug)]
pub struct EmployeeStore<S> {
    backend: S,
    key: String,
    employees: Vec<Employee>,
    last_id: u64,
}

impl<S: KeyValueStore> EmployeeStore<S> {
    /// Load the records stored under `key`.
    ///
    /// A missing key, a read failure or a corrupt payload all produce an
    /// empty store; the latter two are logged.
    pub fn load(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let employees = match backend.get_item(&key) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Employee>>(&payload) {
                Ok(employees) => {
                    debug!(key = %key, count = employees.len(), "Loaded employees");
                    employees
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding unparseable employee payload");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No stored employees");
                Vec::new()
            }
            Err(e) => {
                error!(key = %key, error = %e, "Failed to read employees");
                Vec::new()
            }
        };

        let last_id = employees
            .iter()
            .filter_map(Employee::numeric_id)
            .max()
            .unwrap_or(0);

        Self {
            backend,
            key,
            employees,
            last_id,
        }
    }

    /// Create a record from `fields`, append it and persist the store.
    ///
    /// The record is kept in memory even if persisting fails.
    pub fn append(&mut self, fields: NewEmployee) -> Employee {
        self.append_at(fields, Utc::now())
    }

    fn append_at(&mut self, fields: NewEmployee, now: DateTime<Utc>) -> Employee {
        let id = self.next_id(now);
        let employee = Employee::new(fields, id, now);
        self.employees.push(employee.clone());

        if let Err(e) = self.persist() {
            error!(key = %self.key, id = %employee.id, error = %e, "Failed to save employees");
        } else {
            info!(id = %employee.id, name = %employee.full_name(), "Employee created");
        }

        employee
    }

    /// Millisecond timestamp, bumped so identifiers strictly increase.
    ///
    /// Once the numeric range is used up, identifiers become
    /// `<u64::MAX>-<position>`. Positions never repeat since records are
    /// never removed.
    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match self.last_id.checked_add(1) {
            Some(next) => {
                let id = millis.max(next);
                self.last_id = id;
                id.to_string()
            }
            None => {
                warn!(key = %self.key, "Numeric employee ids exhausted");
                format!("{}-{}", self.last_id, self.employees.len())
            }
        }
    }

    /// Write the full record sequence to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.employees)?;
        self.backend.set_item(&self.key, &payload)
    }

    /// All records in creation order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Look a record up by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// The persistence key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The persistence backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }
}
