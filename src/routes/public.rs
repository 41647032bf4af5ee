use super::{Access, INGREDIENT_DETAILS_TITLE, RouteEntry, order_number_title};
use crate::{
    navigation::PathPattern,
    view::{Element, Page, Title},
};

/// Public Routes
///
/// Reachable by any session, signed in or not. The two detail screens are listed here
/// as well as in the overlay table: this is where a deep link or a reload lands them.
pub static PUBLIC_ROUTES: &[RouteEntry] = &[
    // The burger constructor is the landing page.
    RouteEntry {
        pattern: PathPattern::new("/"),
        element: Element::Page(Page::Constructor),
        access: Access::Public,
    },
    RouteEntry {
        pattern: PathPattern::new("/feed"),
        element: Element::Page(Page::Feed),
        access: Access::Public,
    },
    RouteEntry {
        pattern: PathPattern::new("/feed/:number"),
        element: Element::Centered {
            title: Title::Derived(order_number_title),
            page: Page::OrderInfo,
        },
        access: Access::Public,
    },
    RouteEntry {
        pattern: PathPattern::new("/ingredients/:id"),
        element: Element::Centered {
            title: Title::Literal(INGREDIENT_DETAILS_TITLE),
            page: Page::IngredientDetails,
        },
        access: Access::Public,
    },
];
