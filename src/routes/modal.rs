use super::{INGREDIENT_DETAILS_TITLE, ModalRouteEntry, order_number_title};
use crate::{
    navigation::PathPattern,
    view::{Page, Title},
};

/// Modal Routes
///
/// Screens that open as an overlay when navigated to from inside the app (the
/// navigation carries a Background Marker). Matched against the *current* location,
/// never against the background.
pub static MODAL_ROUTES: &[ModalRouteEntry] = &[
    ModalRouteEntry {
        pattern: PathPattern::new("/ingredients/:id"),
        title: Title::Literal(INGREDIENT_DETAILS_TITLE),
        page: Page::IngredientDetails,
        requires_auth: false,
    },
    ModalRouteEntry {
        pattern: PathPattern::new("/feed/:number"),
        title: Title::Derived(order_number_title),
        page: Page::OrderInfo,
        requires_auth: false,
    },
    // Profile orders belong to the signed-in customer, so the overlay is gated too.
    ModalRouteEntry {
        pattern: PathPattern::new("/profile/orders/:number"),
        title: Title::Derived(order_number_title),
        page: Page::OrderInfo,
        requires_auth: true,
    },
];
