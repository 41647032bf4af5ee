use stellar_burgers::{
    Location, LocationState,
    gate::{AuthStatus, GateMode, HOME_PATH, LOGIN_PATH, guard},
    view::{Page, View},
};

fn profile_view() -> View {
    View::Page { page: Page::Profile }
}

#[test]
fn test_auth_status_from_flags() {
    assert_eq!(AuthStatus::from_flags(false, false), AuthStatus::Unknown);
    assert_eq!(AuthStatus::from_flags(false, true), AuthStatus::Unknown);
    assert_eq!(AuthStatus::from_flags(true, true), AuthStatus::Authenticated);
    assert_eq!(AuthStatus::from_flags(true, false), AuthStatus::Unauthenticated);
}

#[test]
fn test_unknown_status_never_redirects() {
    let location = Location::new("/profile");
    for mode in [GateMode::UnauthOnly, GateMode::AuthRequired] {
        let view = guard(mode, AuthStatus::Unknown, &location, profile_view());
        assert_eq!(view, View::Preloader);
    }
}

#[test]
fn test_auth_required_passes_signed_in_session() {
    let location = Location::new("/profile");
    let view = guard(
        GateMode::AuthRequired,
        AuthStatus::Authenticated,
        &location,
        profile_view(),
    );
    assert_eq!(view, profile_view());
}

#[test]
fn test_auth_required_redirects_signed_out_session_to_login() {
    let location = Location::new("/profile/orders?page=2");
    let view = guard(
        GateMode::AuthRequired,
        AuthStatus::Unauthenticated,
        &location,
        profile_view(),
    );

    let View::Redirect { to, replace } = view else {
        panic!("expected a redirect");
    };
    assert!(replace, "gate redirects replace the history entry");
    assert_eq!(to.pathname, LOGIN_PATH);
    let from = to.redirected_from().unwrap();
    assert_eq!(from.href(), "/profile/orders?page=2");
}

#[test]
fn test_unauth_only_passes_signed_out_session() {
    let location = Location::new("/login");
    let login = View::Page { page: Page::Login };
    let view = guard(
        GateMode::UnauthOnly,
        AuthStatus::Unauthenticated,
        &location,
        login.clone(),
    );
    assert_eq!(view, login);
}

#[test]
fn test_unauth_only_sends_signed_in_session_home() {
    let location = Location::new("/register");
    let view = guard(
        GateMode::UnauthOnly,
        AuthStatus::Authenticated,
        &location,
        View::Page { page: Page::Register },
    );

    assert_eq!(view.redirect_target().unwrap().pathname, HOME_PATH);
}

#[test]
fn test_unauth_only_returns_to_original_location_after_sign_in() {
    let origin = Location::new("/profile/orders");
    let location = Location::new("/login").with_state(LocationState::with_from(origin));
    let view = guard(
        GateMode::UnauthOnly,
        AuthStatus::Authenticated,
        &location,
        View::Page { page: Page::Login },
    );

    let target = view.redirect_target().unwrap();
    assert_eq!(target.pathname, "/profile/orders");
    assert!(target.state.is_empty());
}
