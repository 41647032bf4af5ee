use serde::Serialize;

use crate::{
    gate::{AuthStatus, GateMode, guard},
    navigation::{Location, RouteParams},
    routes::{Access, RouteTable},
    view::{CloseAction, Page, View},
};

/// Layer
///
/// One rendered layer: the location it was matched from, the template that matched
/// (none for the not-found fallback), the captured parameters and the resolved view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub location: Location,
    pub pattern: Option<&'static str>,
    pub params: RouteParams,
    pub view: View,
}

/// Frame
///
/// Everything visible after one navigation: the full-page base layer and, when the
/// navigation carried a Background Marker and the current path is overlay-capable,
/// a dismissible overlay on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub base: Layer,
    pub overlay: Option<Layer>,
}

impl Frame {
    pub fn layer_count(&self) -> usize {
        1 + usize::from(self.overlay.is_some())
    }

    /// The first redirect in the frame, base layer first.
    pub fn redirect(&self) -> Option<&Location> {
        self.base.view.redirect_target().or_else(|| {
            self.overlay
                .as_ref()
                .and_then(|overlay| overlay.view.redirect_target())
        })
    }
}

/// render
///
/// Renders `current` against the application's route configuration.
pub fn render(current: &Location, status: AuthStatus) -> Frame {
    render_with(current, &RouteTable::standard(), status)
}

/// render_with
///
/// The dual-route dispatch.
///
/// 1. The base location is the Background Marker when present, else `current`.
/// 2. The base location is matched against the page tables (public, then unauth-only,
///    then auth-only, each gated accordingly); first match wins, nothing matching
///    renders the not-found page.
/// 3. Only when a marker is present, `current` itself is matched against the overlay
///    table. A miss there renders no overlay.
pub fn render_with(current: &Location, table: &RouteTable, status: AuthStatus) -> Frame {
    let background = current.background();
    let base_location = background.unwrap_or(current);

    let base = match_page(base_location, table, status);
    let overlay = background.and_then(|_| match_overlay(current, table, status));

    tracing::debug!(
        path = %current.pathname,
        base = %base.location.pathname,
        overlay = overlay.is_some(),
        "rendered frame"
    );

    Frame { base, overlay }
}

fn match_page(location: &Location, table: &RouteTable, status: AuthStatus) -> Layer {
    for route in table.page_routes() {
        let Some(params) = route.pattern.matches(&location.pathname) else {
            continue;
        };

        let view = route.element.render(location);
        let view = match route.access {
            Access::Public => view,
            Access::UnauthOnly => guard(GateMode::UnauthOnly, status, location, view),
            Access::AuthOnly => guard(GateMode::AuthRequired, status, location, view),
        };

        return Layer {
            location: location.clone(),
            pattern: Some(route.pattern.as_str()),
            params,
            view,
        };
    }

    Layer {
        location: location.clone(),
        pattern: None,
        params: RouteParams::default(),
        view: View::Page {
            page: Page::NotFound404,
        },
    }
}

fn match_overlay(current: &Location, table: &RouteTable, status: AuthStatus) -> Option<Layer> {
    table.modal.iter().find_map(|entry| {
        let params = entry.pattern.matches(&current.pathname)?;

        let modal = View::Modal {
            title: entry.title.resolve(current),
            page: entry.page,
            on_close: CloseAction::GoBack,
        };
        let view = if entry.requires_auth {
            guard(GateMode::AuthRequired, status, current, modal)
        } else {
            modal
        };

        Some(Layer {
            location: current.clone(),
            pattern: Some(entry.pattern.as_str()),
            params,
            view,
        })
    })
}
