use super::{Access, RouteEntry, order_number_title};
use crate::{
    navigation::PathPattern,
    view::{Element, Page, Title},
};

/// Authenticated Routes
///
/// The customer's profile area. Every entry goes through the authorization gate in
/// auth-required mode; a signed-out session is redirected to the login screen.
pub static AUTH_ROUTES: &[RouteEntry] = &[
    RouteEntry {
        pattern: PathPattern::new("/profile"),
        element: Element::Page(Page::Profile),
        access: Access::AuthOnly,
    },
    // Order history of the signed-in customer.
    RouteEntry {
        pattern: PathPattern::new("/profile/orders"),
        element: Element::Page(Page::ProfileOrders),
        access: Access::AuthOnly,
    },
    RouteEntry {
        pattern: PathPattern::new("/profile/orders/:number"),
        element: Element::Centered {
            title: Title::Derived(order_number_title),
            page: Page::OrderInfo,
        },
        access: Access::AuthOnly,
    },
];
