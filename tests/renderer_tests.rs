use stellar_burgers::{
    Location, LocationState, Navigator,
    gate::AuthStatus,
    render, render_with,
    routes::{INGREDIENT_DETAILS_TITLE, RouteTable},
    view::{CloseAction, Page, View},
};

// --- Helpers ---

fn with_marker(path: &str, background: &str) -> Location {
    Location::new(path).with_state(LocationState::with_background(Location::new(background)))
}

const ALL_STATUSES: [AuthStatus; 3] = [
    AuthStatus::Unknown,
    AuthStatus::Authenticated,
    AuthStatus::Unauthenticated,
];

const SAMPLE_PATHS: [&str; 12] = [
    "/",
    "/feed",
    "/feed/42",
    "/ingredients/abc",
    "/login",
    "/register",
    "/forgot-password",
    "/reset-password",
    "/profile",
    "/profile/orders",
    "/profile/orders/7",
    "/does/not/exist",
];

// --- Properties ---

#[test]
fn test_no_marker_renders_exactly_one_layer() {
    for status in ALL_STATUSES {
        for path in SAMPLE_PATHS {
            let frame = render(&Location::new(path), status);
            assert_eq!(frame.layer_count(), 1, "{path} under {status:?}");
            assert!(frame.overlay.is_none());
        }
    }
}

#[test]
fn test_marker_path_always_drives_the_base_layer() {
    for status in ALL_STATUSES {
        for background in SAMPLE_PATHS {
            for path in SAMPLE_PATHS {
                let current = with_marker(path, background);
                let with_overlay = render(&current, status);
                let marker_alone = render(&Location::new(background), status);

                assert_eq!(with_overlay.base.location.pathname, background);
                assert_eq!(with_overlay.base.pattern, marker_alone.base.pattern);
                assert_eq!(
                    with_overlay.base.view.page(),
                    marker_alone.base.view.page(),
                    "{path} over {background} under {status:?}"
                );
            }
        }
    }
}

#[test]
fn test_gated_overlay_never_shows_content_when_signed_out() {
    let table = RouteTable::standard();
    for entry in table.modal.iter().filter(|entry| entry.requires_auth) {
        let path = entry.pattern.as_str().replace(":number", "7");
        let frame = render(&with_marker(&path, "/feed"), AuthStatus::Unauthenticated);

        let overlay = frame.overlay.expect("gated overlay still yields a layer");
        assert!(overlay.view.is_redirect(), "{path} leaked modal content");
        assert_eq!(overlay.view.page(), None);
    }
}

#[test]
fn test_closing_overlay_returns_to_marker_path() {
    for background in ["/", "/feed", "/profile/orders"] {
        for overlay in ["/ingredients/abc", "/feed/42", "/profile/orders/7"] {
            let mut navigator = Navigator::new(Location::new(background));
            navigator.open_overlay(overlay);

            let marker = navigator.current().background().cloned().unwrap();
            navigator.close_overlay();

            assert_eq!(navigator.current().pathname, marker.pathname);
            assert!(navigator.current().background().is_none());
        }
    }
}

// --- Scenarios ---

#[test]
fn test_deep_link_to_order_renders_full_page() {
    let frame = render(&Location::new("/feed/42"), AuthStatus::Unknown);

    assert!(frame.overlay.is_none());
    assert_eq!(frame.base.pattern, Some("/feed/:number"));
    assert_eq!(frame.base.params.get("number"), Some("42"));
    assert_eq!(
        frame.base.view,
        View::Centered {
            title: "#42".to_string(),
            page: Page::OrderInfo,
        }
    );
}

#[test]
fn test_ingredient_overlay_on_top_of_constructor() {
    let frame = render(&with_marker("/ingredients/abc", "/"), AuthStatus::Unauthenticated);

    assert_eq!(frame.base.location.pathname, "/");
    assert_eq!(frame.base.view, View::Page { page: Page::Constructor });

    let overlay = frame.overlay.expect("overlay expected");
    assert_eq!(overlay.params.get("id"), Some("abc"));
    assert_eq!(
        overlay.view,
        View::Modal {
            title: INGREDIENT_DETAILS_TITLE.to_string(),
            page: Page::IngredientDetails,
            on_close: CloseAction::GoBack,
        }
    );
}

#[test]
fn test_signed_out_profile_order_overlay_redirects_to_login() {
    let current = with_marker("/profile/orders/7", "/");
    let frame = render(&current, AuthStatus::Unauthenticated);

    assert_eq!(frame.base.location.pathname, "/");
    assert_eq!(frame.base.view, View::Page { page: Page::Constructor });

    let overlay = frame.overlay.expect("overlay layer expected");
    let View::Redirect { to, replace } = overlay.view else {
        panic!("expected a redirect overlay");
    };
    assert!(replace);
    assert_eq!(to.pathname, "/login");
    let from = to.redirected_from().expect("from recorded");
    assert_eq!(from.pathname, "/profile/orders/7");
}

#[test]
fn test_signed_in_profile_order_overlay_shows_numbered_modal() {
    let frame = render(
        &with_marker("/profile/orders/7", "/profile/orders"),
        AuthStatus::Authenticated,
    );

    assert_eq!(frame.base.view, View::Page { page: Page::ProfileOrders });
    let overlay = frame.overlay.unwrap();
    assert_eq!(overlay.view.title(), Some("#7"));
    assert_eq!(overlay.view.page(), Some(Page::OrderInfo));
}

#[test]
fn test_feed_order_overlay_title_uses_current_path() {
    let frame = render(&with_marker("/feed/123", "/feed"), AuthStatus::Unknown);

    assert_eq!(frame.base.view, View::Page { page: Page::Feed });
    assert_eq!(frame.overlay.unwrap().view.title(), Some("#123"));
}

// --- Failure Semantics ---

#[test]
fn test_unknown_path_renders_not_found() {
    let frame = render(&Location::new("/nowhere"), AuthStatus::Authenticated);

    assert_eq!(frame.base.pattern, None);
    assert_eq!(frame.base.view, View::Page { page: Page::NotFound404 });
}

#[test]
fn test_marker_on_non_modal_path_renders_no_overlay() {
    let frame = render(&with_marker("/feed", "/"), AuthStatus::Authenticated);

    assert!(frame.overlay.is_none());
    assert_eq!(frame.base.view, View::Page { page: Page::Constructor });
}

#[test]
fn test_unknown_marker_path_renders_not_found_base() {
    let frame = render(&with_marker("/ingredients/abc", "/gone"), AuthStatus::Authenticated);

    assert_eq!(frame.base.view, View::Page { page: Page::NotFound404 });
    assert!(frame.overlay.is_some());
}

// --- Gating in the base layer ---

#[test]
fn test_protected_base_shows_preloader_while_unknown() {
    let frame = render(&Location::new("/profile"), AuthStatus::Unknown);

    assert_eq!(frame.base.view, View::Preloader);
    assert!(frame.redirect().is_none());
}

#[test]
fn test_login_page_redirects_home_when_signed_in() {
    let frame = render(&Location::new("/login"), AuthStatus::Authenticated);

    let target = frame.redirect().expect("redirect expected");
    assert_eq!(target.pathname, "/");
}

#[test]
fn test_empty_table_renders_not_found_everywhere() {
    let table = RouteTable {
        public: &[],
        unauth_only: &[],
        auth_only: &[],
        modal: &[],
    };

    let frame = render_with(&with_marker("/ingredients/abc", "/"), &table, AuthStatus::Unknown);
    assert_eq!(frame.base.view, View::Page { page: Page::NotFound404 });
    assert!(frame.overlay.is_none());
}
