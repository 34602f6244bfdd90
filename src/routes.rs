//! View selection.
//!
//! Two route subtrees: guests only ever see `/login`, authenticated users only
//! ever see `/dashboard`. Anything else redirects to the subtree default.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSelection {
    pub route: Route,
    /// The requested path did not match and was replaced by the default.
    pub redirected: bool,
}

/// Pure function of auth status and the requested path.
pub fn select_view(is_authenticated: bool, requested_path: &str) -> ViewSelection {
    let default = if is_authenticated {
        Route::Dashboard
    } else {
        Route::Login
    };
    ViewSelection {
        route: default,
        redirected: normalize_path(requested_path) != default.path(),
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    let path = path.strip_prefix('#').unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Holds the requested location, like the hash in a hash router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    path: String,
}

impl Default for Navigator {
    fn default() -> Self {
        Self { path: "/".into() }
    }
}

impl Navigator {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn navigate(&mut self, path: &str) {
        if self.path != path {
            tracing::debug!("navigate {} -> {}", self.path, path);
            self.path = path.to_string();
        }
    }

    /// Resolve against current auth status, following any redirect.
    pub fn resolve(&mut self, is_authenticated: bool) -> Route {
        let selection = select_view(is_authenticated, &self.path);
        if selection.redirected {
            self.navigate(selection.route.path());
        }
        selection.route
    }
}
