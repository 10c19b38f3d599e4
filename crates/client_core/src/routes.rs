/// Navigable surfaces of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// What resolving a requested path decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Render(Route),
    Redirect(Route),
}

/// Maps a requested path to an outcome, given whether a session marker
/// exists. Unknown paths always bounce to the login page; an unmatched route
/// is a redirect, never an error surfaced to the user.
pub fn resolve(path: &str, authenticated: bool) -> RouteOutcome {
    match (path, authenticated) {
        ("/login", false) => RouteOutcome::Render(Route::Login),
        // Signed-in users have no business on the login page.
        ("/login", true) => RouteOutcome::Redirect(Route::Dashboard),
        ("/dashboard", true) => RouteOutcome::Render(Route::Dashboard),
        ("/dashboard", false) => RouteOutcome::Redirect(Route::Login),
        ("/", true) => RouteOutcome::Redirect(Route::Dashboard),
        ("/", false) => RouteOutcome::Redirect(Route::Login),
        (_, _) => RouteOutcome::Redirect(Route::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_renders_for_anonymous_users() {
        assert_eq!(resolve("/login", false), RouteOutcome::Render(Route::Login));
    }

    #[test]
    fn login_redirects_signed_in_users_to_the_dashboard() {
        assert_eq!(
            resolve("/login", true),
            RouteOutcome::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn dashboard_is_protected() {
        assert_eq!(
            resolve("/dashboard", true),
            RouteOutcome::Render(Route::Dashboard)
        );
        assert_eq!(
            resolve("/dashboard", false),
            RouteOutcome::Redirect(Route::Login)
        );
    }

    #[test]
    fn root_redirects_by_session_state() {
        assert_eq!(resolve("/", true), RouteOutcome::Redirect(Route::Dashboard));
        assert_eq!(resolve("/", false), RouteOutcome::Redirect(Route::Login));
    }

    #[test]
    fn unknown_paths_redirect_to_login() {
        assert_eq!(
            resolve("/no-such-page", true),
            RouteOutcome::Redirect(Route::Login)
        );
        assert_eq!(
            resolve("/no-such-page", false),
            RouteOutcome::Redirect(Route::Login)
        );
    }
}
