//! Two-page navigation shell.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Application title shown in the header.
pub const APP_TITLE: &str = "HRnet";

/// The pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The create-employee form.
    CreateEmployee,
    /// The employee list.
    EmployeeList,
}

impl Route {
    /// Canonical path.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::CreateEmployee => "/",
            Self::EmployeeList => "/employees",
        }
    }

    /// Resolve a path. `/create` is an alias of `/`; a trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        match normalized {
            "/" | "/create" => Some(Self::CreateEmployee),
            "/employees" => Some(Self::EmployeeList),
            _ => None,
        }
    }

    /// Page heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::CreateEmployee => "Create Employee",
            Self::EmployeeList => "Current Employees",
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| Error::UnknownRoute(s.to_string()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One entry of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Target page.
    pub route: Route,
    /// Link text.
    pub label: &'static str,
}

impl NavItem {
    /// Whether this item points at `current`.
    #[must_use]
    pub fn is_active(&self, current: Route) -> bool {
        self.route == current
    }
}

/// Navigation entries in display order.
#[must_use]
pub fn nav_items() -> [NavItem; 2] {
    [
        NavItem {
            route: Route::CreateEmployee,
            label: "Home",
        },
        NavItem {
            route: Route::EmployeeList,
            label: "Current Employees",
        },
    ]
}

/// Header line with the active page in brackets, followed by the page title.
///
/// ```
/// use hrnet::shell::{render_header, Route};
///
/// let header = render_header(Route::EmployeeList);
/// assert!(header.starts_with("HRnet | Home | [Current Employees]"));
/// ```
#[must_use]
pub fn render_header(current: Route) -> String {
    let links: Vec<String> = nav_items()
        .iter()
        .map(|item| {
            if item.is_active(current) {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect();
    format!("{APP_TITLE} | {}\n\n{}\n", links.join(" | "), current.title())
}
