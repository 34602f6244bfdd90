//! Application state slices and their reducers.
//!
//! `AppState` is plain data. Reducers here are pure: persistence and
//! change notification live in [`crate::store::AppStore`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// The signed-in user. Only the name is kept; passwords never reach state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Authentication slice.
///
/// `is_authenticated()` is derived from `user`, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
}

impl AuthState {
    pub fn with_user(user: Option<User>) -> Self {
        Self { user }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn login(&mut self, user: User) {
        self.user = Some(user);
    }

    fn logout(&mut self) {
        self.user = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Exact match on `"light"` or `"dark"`.
    pub fn parse(raw: &str) -> Option<Theme> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub theme: Theme,
}

/// Everything the views derive their output from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub auth: AuthState,
    pub theme: ThemeState,
}

/// Updates the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    Login(User),
    Logout,
    SetTheme(Theme),
}

/// Apply one action. Re-applying the same action yields the same state.
pub fn reduce(state: &mut AppState, action: &StoreAction) {
    match action {
        StoreAction::Login(user) => state.auth.login(user.clone()),
        StoreAction::Logout => state.auth.logout(),
        StoreAction::SetTheme(theme) => state.theme.theme = *theme,
    }
}
