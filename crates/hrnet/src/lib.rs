//! `hrnet` - Employee record keeping
//!
//! This library provides the record store, the create-employee form and its
//! widgets, the employee table and the navigation shell used by the `hrnet`
//! binary. Records are persisted as one JSON array in a SQLite-backed
//! key/value store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod employee;
pub mod error;
pub mod form;
pub mod logging;
pub mod shell;
pub mod storage;
pub mod store;
pub mod table;
pub mod widgets;

pub use config::Config;
pub use employee::{Employee, Field, NewEmployee};
pub use error::{Error, Result};
pub use form::{EmployeeForm, SubmitOutcome};
pub use logging::init_logging;
pub use shell::Route;
pub use storage::{KeyValueStore, Storage, StorageStats};
pub use store::EmployeeStore;
pub use table::{DataTable, PageSize};
