//! Single-value select with an optional type-to-filter box.

use serde::{Deserialize, Serialize};

/// Placeholder shown while nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Select...";

/// One selectable entry. `value` is what gets stored; `label` is what is shown
/// and filtered on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display text.
    pub label: String,
    /// Stored value.
    pub value: String,
}

impl SelectOption {
    /// Option with distinct label and value.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Option whose label doubles as its value.
    #[must_use]
    pub fn plain(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
        }
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.label.to_lowercase().contains(needle_lower)
    }
}

/// Option list entry as supplied from outside (configuration files, JSON).
///
/// Either a bare string or an object with `label` (or `name`) and an optional
/// `value` (or `abbreviation`). Converted into [`SelectOption`] on ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionInput {
    /// A bare string used as both label and value.
    Plain(String),
    /// A label with an optional distinct value.
    Pair {
        /// Display text.
        #[serde(alias = "name")]
        label: String,
        /// Stored value; falls back to the label when absent or empty.
        #[serde(default, alias = "abbreviation", skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

impl From<OptionInput> for SelectOption {
    fn from(input: OptionInput) -> Self {
        match input {
            OptionInput::Plain(label) => Self::plain(label),
            OptionInput::Pair { label, value } => match value {
                Some(value) if !value.is_empty() => Self::new(label, value),
                _ => Self::plain(label),
            },
        }
    }
}

impl From<&SelectOption> for OptionInput {
    fn from(option: &SelectOption) -> Self {
        if option.label == option.value {
            Self::Plain(option.label.clone())
        } else {
            Self::Pair {
                label: option.label.clone(),
                value: Some(option.value.clone()),
            }
        }
    }
}

/// Normalize an externally supplied option list.
#[must_use]
pub fn normalize(inputs: impl IntoIterator<Item = OptionInput>) -> Vec<SelectOption> {
    inputs.into_iter().map(SelectOption::from).collect()
}

/// Dropdown state: current selection, open/closed, and filter text.
#[derive(Debug, Clone)]
pub struct SearchableSelect {
    options: Vec<SelectOption>,
    value: Option<String>,
    placeholder: String,
    searchable: bool,
    disabled: bool,
    open: bool,
    filter: String,
}

impl SearchableSelect {
    /// A closed, enabled, searchable select with nothing selected.
    #[must_use]
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            value: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            searchable: true,
            disabled: false,
            open: false,
            filter: String::new(),
        }
    }

    /// Set the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable or disable the filter box.
    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Enable or disable the whole widget.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
        self
    }

    /// The full option list.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Current value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    /// Replace the current value from outside, e.g. after a form reset.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Whether the dropdown is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current filter text.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Open the dropdown. No-op when disabled.
    pub fn open(&mut self) {
        if !self.disabled {
            self.open = true;
        }
    }

    /// Close the dropdown and clear the filter. The selection is kept.
    pub fn close(&mut self) {
        self.open = false;
        self.filter.clear();
    }

    /// Click on the trigger.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Escape key.
    pub fn press_escape(&mut self) {
        self.close();
    }

    /// Pointer action outside the widget.
    pub fn click_outside(&mut self) {
        self.close();
    }

    /// Replace the filter text. Ignored unless open and searchable.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        if self.open && self.searchable {
            self.filter = text.into();
        }
    }

    /// Options whose label contains the filter text, ignoring case.
    #[must_use]
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        filter_options(&self.options, &self.filter)
    }

    /// Select the `index`-th visible option and close.
    ///
    /// Returns the selected value, or `None` if the index is out of range.
    pub fn select_visible(&mut self, index: usize) -> Option<String> {
        let value = self.visible_options().get(index)?.value.clone();
        self.value = Some(value.clone());
        self.close();
        Some(value)
    }

    /// Select the option with the given value and close.
    ///
    /// Returns `false` and leaves the state untouched if no option has that
    /// value.
    pub fn select_value(&mut self, value: &str) -> bool {
        if self.options.iter().any(|o| o.value == value) {
            self.value = Some(value.to_string());
            self.close();
            true
        } else {
            false
        }
    }

    /// Whether `option` is the current selection.
    #[must_use]
    pub fn is_selected(&self, option: &SelectOption) -> bool {
        self.value() == Some(option.value.as_str())
    }

    /// Text shown on the trigger: the selected option's label, the raw value
    /// if it matches no option, or the placeholder.
    #[must_use]
    pub fn display_value(&self) -> &str {
        match self.value() {
            None => &self.placeholder,
            Some(value) => self
                .options
                .iter()
                .find(|o| o.value == value)
                .map_or(value, |o| o.label.as_str()),
        }
    }

    /// Pick an option from free text.
    ///
    /// An exact case-insensitive match on value or label wins; otherwise the
    /// text is used as a filter and selects the option if exactly one
    /// remains. Returns the selected value.
    pub fn resolve(&mut self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let exact = self
            .options
            .iter()
            .find(|o| o.value.eq_ignore_ascii_case(input) || o.label.eq_ignore_ascii_case(input))
            .map(|o| o.value.clone());
        if let Some(value) = exact {
            self.select_value(&value);
            return Some(value);
        }

        let candidates = filter_options(&self.options, input);
        match candidates.as_slice() {
            [only] => {
                let value = only.value.clone();
                self.select_value(&value);
                Some(value)
            }
            _ => None,
        }
    }
}

fn filter_options<'a>(options: &'a [SelectOption], filter: &str) -> Vec<&'a SelectOption> {
    if filter.is_empty() {
        return options.iter().collect();
    }
    let needle = filter.to_lowercase();
    options.iter().filter(|o| o.matches(&needle)).collect()
}
