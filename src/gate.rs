use serde::{Deserialize, Serialize};

use crate::{
    navigation::{Location, LocationState},
    view::View,
};

/// Where a signed-out session is sent when it asks for a protected view.
pub const LOGIN_PATH: &str = "/login";
/// Where a signed-in session is sent from the sign-in screens by default.
pub const HOME_PATH: &str = "/";

/// AuthStatus
///
/// What the client currently knows about its session. `Unknown` lasts from startup
/// until the first session check settles, successfully or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    Unknown,
    Authenticated,
    Unauthenticated,
}

impl AuthStatus {
    /// Derives the status from the user slice's two flags.
    pub fn from_flags(auth_checked: bool, is_authenticated: bool) -> Self {
        match (auth_checked, is_authenticated) {
            (false, _) => AuthStatus::Unknown,
            (true, true) => AuthStatus::Authenticated,
            (true, false) => AuthStatus::Unauthenticated,
        }
    }
}

/// GateMode
///
/// The session a gated view demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// Signed-out only: login, registration, password recovery.
    UnauthOnly,
    /// Signed-in only: the profile area.
    AuthRequired,
}

/// guard
///
/// The authorization gate. Decides whether `view`, requested at `location`, may be
/// shown to a session in `status`.
///
/// * `Unknown` status: a `Preloader`, never a redirect.
/// * `AuthRequired` and signed out: replace-redirect to `/login`, carrying `location`
///   in the `from` state field so the login flow can return to it.
/// * `UnauthOnly` and signed in: replace-redirect to the location this one was itself
///   redirected from, or to `/` when there is none.
///
/// Pure: the decision depends only on the arguments.
pub fn guard(mode: GateMode, status: AuthStatus, location: &Location, view: View) -> View {
    match (mode, status) {
        (_, AuthStatus::Unknown) => View::Preloader,
        (GateMode::AuthRequired, AuthStatus::Unauthenticated) => View::Redirect {
            to: Location::new(LOGIN_PATH).with_state(LocationState::with_from(location.clone())),
            replace: true,
        },
        (GateMode::UnauthOnly, AuthStatus::Authenticated) => {
            let target = location
                .redirected_from()
                .map(|from| Location::new(&from.href()))
                .unwrap_or_else(|| Location::new(HOME_PATH));
            View::Redirect {
                to: target,
                replace: true,
            }
        }
        _ => view,
    }
}
