//! Input widgets feeding the employee form.
//!
//! Both widgets are plain state machines: each user action is a method call,
//! and the rendered state is read back through accessors.

pub mod date_input;
pub mod select;

pub use date_input::DateInput;
pub use select::{OptionInput, SearchableSelect, SelectOption};
