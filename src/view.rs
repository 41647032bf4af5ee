use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::navigation::Location;

/// Page
///
/// The presentational pages the view layer knows how to draw. The core only decides
/// *which* page goes where; drawing it is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Constructor,
    Feed,
    OrderInfo,
    IngredientDetails,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Profile,
    ProfileOrders,
    NotFound404,
}

/// Title
///
/// A heading that is either fixed or computed from the location being shown (the
/// order screens put the order number from the path into their heading).
#[derive(Debug, Clone, Copy)]
pub enum Title {
    Literal(&'static str),
    Derived(fn(&Location) -> String),
}

impl Title {
    pub fn resolve(&self, location: &Location) -> String {
        match self {
            Title::Literal(text) => (*text).to_string(),
            Title::Derived(compute) => compute(location),
        }
    }
}

/// Element
///
/// What a page route renders: the page on its own, or the page centred under a title
/// (used when an overlay-capable screen is opened full page).
#[derive(Debug, Clone, Copy)]
pub enum Element {
    Page(Page),
    Centered { title: Title, page: Page },
}

impl Element {
    pub fn page(&self) -> Page {
        match self {
            Element::Page(page) | Element::Centered { page, .. } => *page,
        }
    }

    /// Turns the declaration into a concrete view for `location`.
    pub fn render(&self, location: &Location) -> View {
        match self {
            Element::Page(page) => View::Page { page: *page },
            Element::Centered { title, page } => View::Centered {
                title: title.resolve(location),
                page: *page,
            },
        }
    }
}

/// CloseAction
///
/// What dismissing an overlay does. There is one answer: step back in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseAction {
    GoBack,
}

/// View
///
/// A resolved, serialisable layer description handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Page {
        page: Page,
    },
    Centered {
        title: String,
        page: Page,
    },
    Modal {
        title: String,
        page: Page,
        on_close: CloseAction,
    },
    /// Neutral placeholder while the session check is still running.
    Preloader,
    /// Navigate to `to` instead of rendering anything.
    Redirect {
        to: Location,
        replace: bool,
    },
}

impl View {
    pub fn page(&self) -> Option<Page> {
        match self {
            View::Page { page } | View::Centered { page, .. } | View::Modal { page, .. } => {
                Some(*page)
            }
            View::Preloader | View::Redirect { .. } => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            View::Centered { title, .. } | View::Modal { title, .. } => Some(title),
            _ => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&Location> {
        match self {
            View::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, View::Redirect { .. })
    }
}
