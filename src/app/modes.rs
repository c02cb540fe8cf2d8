//! View and input mode types.
//!
//! The dashboard shows exactly one [`View`] at a time. Independently of the
//! view, [`InputMode`] decides how keys are interpreted: normal navigation,
//! search, an open form, or a pending delete confirmation.

/// The visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Stat counters plus the first five tasks and users.
    #[default]
    Dashboard,
    /// The full task list with its filters.
    Tasks,
    /// The full user list.
    Users,
}

impl View {
    /// Every view in tab order.
    pub const ALL: [Self; 3] = [Self::Dashboard, Self::Tasks, Self::Users];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Tasks => "Tasks",
            Self::Users => "Users",
        }
    }

    /// The next tab, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Tasks,
            Self::Tasks => Self::Users,
            Self::Users => Self::Dashboard,
        }
    }

    /// The previous tab, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Dashboard => Self::Users,
            Self::Tasks => Self::Dashboard,
            Self::Users => Self::Tasks,
        }
    }
}

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the query.
    Typing,
    /// Keys move through the results panel.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,

    /// Global search is active.
    Search(SearchFocus),

    /// A task or user form is open; keys edit its fields.
    Form,

    /// Waiting for the user to confirm deleting `task_id`.
    ConfirmDelete {
        task_id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_both_ways() {
        for view in View::ALL {
            assert_eq!(view.next().prev(), view);
        }
        assert_eq!(View::Users.next(), View::Dashboard);
        assert_eq!(View::Dashboard.prev(), View::Users);
    }
}
