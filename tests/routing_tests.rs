use stellar_burgers::{
    Location,
    navigation::{PathPattern, pattern::CATCH_ALL},
    routes::{Access, INGREDIENT_DETAILS_TITLE, RouteTable, order_number_title},
    view::Page,
};

// --- Pattern Matching ---

#[test]
fn test_pattern_matches_static_paths() {
    let pattern = PathPattern::new("/feed");

    assert!(pattern.matches("/feed").is_some());
    assert!(pattern.matches("/feed/").is_some(), "one trailing slash is tolerated");
    assert!(pattern.matches("/FEED").is_some(), "static segments ignore ASCII case");
    assert!(pattern.matches("/feeds").is_none());
    assert!(pattern.matches("/feed/42").is_none());
}

#[test]
fn test_root_pattern_only_matches_root() {
    let root = PathPattern::new("/");

    assert!(root.matches("/").is_some());
    assert!(root.matches("").is_some());
    assert!(root.matches("/feed").is_none());
}

#[test]
fn test_pattern_captures_named_params() {
    let pattern = PathPattern::new("/profile/orders/:number");

    let params = pattern
        .matches("/profile/orders/1234")
        .expect("should match");
    assert_eq!(params.len(), 1);
    assert_eq!(params.get("number"), Some("1234"));
    assert_eq!(pattern.param_names(), vec!["number"]);
}

#[test]
fn test_param_segment_must_be_non_empty() {
    let pattern = PathPattern::new("/ingredients/:id");

    assert!(pattern.matches("/ingredients/").is_none());
    assert!(pattern.matches("/ingredients//").is_none());
    assert!(pattern.matches("/ingredients").is_none());
}

#[test]
fn test_params_are_not_validated_or_decoded() {
    let pattern = PathPattern::new("/feed/:number");

    let params = pattern.matches("/feed/not-a-number").unwrap();
    assert_eq!(params.get("number"), Some("not-a-number"));

    let params = pattern.matches("/feed/a%20b").unwrap();
    assert_eq!(params.get("number"), Some("a%20b"));
}

#[test]
fn test_catch_all_matches_everything() {
    assert!(CATCH_ALL.matches("/").is_some());
    assert!(CATCH_ALL.matches("/some/deep/path").is_some());
}

// --- Route Table ---

#[test]
fn test_every_modal_route_is_also_a_page_route() {
    let table = RouteTable::standard();

    assert!(
        table.unnavigable_modal_patterns().is_empty(),
        "deep links to overlay screens must render full page"
    );
}

#[test]
fn test_page_routes_are_enumerated_in_access_order() {
    let table = RouteTable::standard();
    let accesses: Vec<Access> = table.page_routes().map(|route| route.access).collect();

    let first_unauth = accesses.iter().position(|a| *a == Access::UnauthOnly).unwrap();
    let first_auth = accesses.iter().position(|a| *a == Access::AuthOnly).unwrap();
    assert!(accesses[..first_unauth].iter().all(|a| *a == Access::Public));
    assert!(first_unauth < first_auth);
    assert!(accesses[first_auth..].iter().all(|a| *a == Access::AuthOnly));
}

#[test]
fn test_route_table_declares_expected_pages() {
    let table = RouteTable::standard();
    let find = |path: &str| {
        table
            .page_routes()
            .find(|route| route.pattern.matches(path).is_some())
            .map(|route| (route.element.page(), route.access))
    };

    assert_eq!(find("/"), Some((Page::Constructor, Access::Public)));
    assert_eq!(find("/feed"), Some((Page::Feed, Access::Public)));
    assert_eq!(find("/feed/7"), Some((Page::OrderInfo, Access::Public)));
    assert_eq!(find("/ingredients/x"), Some((Page::IngredientDetails, Access::Public)));
    assert_eq!(find("/login"), Some((Page::Login, Access::UnauthOnly)));
    assert_eq!(find("/register"), Some((Page::Register, Access::UnauthOnly)));
    assert_eq!(find("/forgot-password"), Some((Page::ForgotPassword, Access::UnauthOnly)));
    assert_eq!(find("/reset-password"), Some((Page::ResetPassword, Access::UnauthOnly)));
    assert_eq!(find("/profile"), Some((Page::Profile, Access::AuthOnly)));
    assert_eq!(find("/profile/orders"), Some((Page::ProfileOrders, Access::AuthOnly)));
    assert_eq!(find("/profile/orders/9"), Some((Page::OrderInfo, Access::AuthOnly)));
    assert_eq!(find("/nope"), None);
}

#[test]
fn test_only_profile_order_overlay_requires_auth() {
    let table = RouteTable::standard();

    let gated: Vec<&str> = table
        .modal
        .iter()
        .filter(|entry| entry.requires_auth)
        .map(|entry| entry.pattern.as_str())
        .collect();
    assert_eq!(gated, vec!["/profile/orders/:number"]);
}

// --- Titles ---

#[test]
fn test_order_number_title_uses_first_digit_run() {
    assert_eq!(order_number_title(&Location::new("/feed/42")), "#42");
    assert_eq!(order_number_title(&Location::new("/profile/orders/007")), "#007");
    assert_eq!(order_number_title(&Location::new("/feed/12abc34")), "#12");
}

#[test]
fn test_order_number_title_without_digits_is_bare_hash() {
    assert_eq!(order_number_title(&Location::new("/feed/abc")), "#");
}

#[test]
fn test_ingredient_title_is_fixed() {
    assert_eq!(INGREDIENT_DETAILS_TITLE, "Детали ингредиента");
}

// --- Location ---

#[test]
fn test_location_parses_href_parts() {
    let location = Location::new("feed/42?tab=all#top");

    assert_eq!(location.pathname, "/feed/42");
    assert_eq!(location.search, "?tab=all");
    assert_eq!(location.hash, "#top");
    assert_eq!(location.href(), "/feed/42?tab=all#top");
    assert!(location.state.is_empty());
}

#[test]
fn test_locations_get_distinct_keys() {
    assert_ne!(Location::new("/").key, Location::new("/").key);
}
