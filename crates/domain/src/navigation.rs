//! Side navigation entries and the active-route rule.

/// Route of the dashboard landing page (the experience list).
pub const DASHBOARD_ROOT: &str = "/dashboard";

/// Route of the experience create form.
pub const ADD_EXPERIENCE_ROUTE: &str = "/dashboard/add-experience";

/// Route of the planning contact list.
pub const PLANNING_ROUTE: &str = "/dashboard/planning";

/// One link in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub name: &'static str,
    pub href: &'static str,
}

/// Side panel links, in display order.
pub const NAVIGATION: [NavEntry; 3] = [
    NavEntry {
        name: "Experiences",
        href: DASHBOARD_ROOT,
    },
    NavEntry {
        name: "Add Experiences",
        href: ADD_EXPERIENCE_ROUTE,
    },
    NavEntry {
        name: "Planning",
        href: PLANNING_ROUTE,
    },
];

impl NavEntry {
    /// Whether this entry should be highlighted for `path`.
    ///
    /// The dashboard root only matches itself; every other entry also
    /// matches the routes nested under it.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        let path = trim_trailing_slash(path);
        if path == self.href {
            return true;
        }
        self.href != DASHBOARD_ROOT
            && path
                .strip_prefix(self.href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// The entry highlighted for `path`, if any.
#[must_use]
pub fn active_entry(path: &str) -> Option<&'static NavEntry> {
    NAVIGATION.iter().find(|entry| entry.is_active(path))
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
