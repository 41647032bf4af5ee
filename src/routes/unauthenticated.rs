use super::{Access, RouteEntry};
use crate::{
    navigation::PathPattern,
    view::{Element, Page},
};

/// Unauthenticated-Only Routes
///
/// The sign-in and account recovery screens. A session that is already signed in is
/// sent away from these by the authorization gate.
pub static UNAUTH_ROUTES: &[RouteEntry] = &[
    RouteEntry {
        pattern: PathPattern::new("/login"),
        element: Element::Page(Page::Login),
        access: Access::UnauthOnly,
    },
    RouteEntry {
        pattern: PathPattern::new("/register"),
        element: Element::Page(Page::Register),
        access: Access::UnauthOnly,
    },
    RouteEntry {
        pattern: PathPattern::new("/forgot-password"),
        element: Element::Page(Page::ForgotPassword),
        access: Access::UnauthOnly,
    },
    RouteEntry {
        pattern: PathPattern::new("/reset-password"),
        element: Element::Page(Page::ResetPassword),
        access: Access::UnauthOnly,
    },
];
