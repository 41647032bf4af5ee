//! Route Table Module Index
//!
//! Declares every navigable path of the application, segregated by the session state
//! each one requires. The tables are `static` and fixed for the life of the process;
//! the renderer only ever enumerates them.

use crate::{
    navigation::{Location, PathPattern},
    view::{Element, Page, Title},
};

/// Paths open to everyone (constructor, feed, detail screens).
pub mod public;

/// Paths only a signed-out session may see (login and recovery flows).
pub mod unauthenticated;

/// Paths that require a signed-in session (profile and order history).
pub mod authenticated;

/// Paths that may also be shown as an overlay above the page they were opened from.
pub mod modal;

/// Heading used by the ingredient detail screen, full page or overlay.
pub const INGREDIENT_DETAILS_TITLE: &str = "Детали ингредиента";

/// Access
///
/// The session requirement attached to a page route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    UnauthOnly,
    AuthOnly,
}

/// RouteEntry
///
/// One page route: a path template, what it renders and who may see it.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub pattern: PathPattern,
    pub element: Element,
    pub access: Access,
}

/// ModalRouteEntry
///
/// One overlay route. Its pattern must also be declared as a page route so that a
/// deep link or reload still renders the screen full page.
#[derive(Debug, Clone, Copy)]
pub struct ModalRouteEntry {
    pub pattern: PathPattern,
    pub title: Title,
    pub page: Page,
    pub requires_auth: bool,
}

/// RouteTable
///
/// The three page tables in matching order plus the overlay table.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    pub public: &'static [RouteEntry],
    pub unauth_only: &'static [RouteEntry],
    pub auth_only: &'static [RouteEntry],
    pub modal: &'static [ModalRouteEntry],
}

impl RouteTable {
    /// The application's route configuration.
    pub const fn standard() -> Self {
        Self {
            public: public::PUBLIC_ROUTES,
            unauth_only: unauthenticated::UNAUTH_ROUTES,
            auth_only: authenticated::AUTH_ROUTES,
            modal: modal::MODAL_ROUTES,
        }
    }

    /// Every page route in matching order: public, then unauth-only, then auth-only.
    pub fn page_routes(&self) -> impl Iterator<Item = &'static RouteEntry> {
        self.public
            .iter()
            .chain(self.unauth_only.iter())
            .chain(self.auth_only.iter())
    }

    /// Overlay patterns that have no page route of their own. Empty for a valid table.
    pub fn unnavigable_modal_patterns(&self) -> Vec<PathPattern> {
        self.modal
            .iter()
            .map(|entry| entry.pattern)
            .filter(|pattern| !self.page_routes().any(|route| route.pattern == *pattern))
            .collect()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// order_number_title
///
/// `#` followed by the first run of digits in the path, e.g. `/feed/42` gives `#42`.
/// A path without digits gives a bare `#`.
pub fn order_number_title(location: &Location) -> String {
    let digits: String = location
        .pathname
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    format!("#{digits}")
}
