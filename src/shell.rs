use crate::{
    navigation::{Location, Navigator},
    renderer::{Frame, render},
    store::Store,
    view::View,
};

/// Longest chain of redirects followed for one presentation.
pub const MAX_REDIRECT_DEPTH: usize = 5;

/// present
///
/// Renders the navigator's current location for the store's session. With
/// `follow_redirects`, redirect instructions found in the frame (base layer first)
/// are carried out on the navigator and the result re-rendered, up to
/// `MAX_REDIRECT_DEPTH` times; the last frame is returned either way.
pub async fn present(store: &Store, navigator: &mut Navigator, follow_redirects: bool) -> Frame {
    let status = store.auth_status().await;
    let mut frame = render(navigator.current(), status);
    if !follow_redirects {
        return frame;
    }

    for _ in 0..MAX_REDIRECT_DEPTH {
        let Some((target, replace)) = pending_redirect(&frame) else {
            return frame;
        };

        tracing::info!(
            from = %navigator.current().pathname,
            to = %target.pathname,
            replace,
            "following redirect"
        );
        let href = target.href();
        if replace {
            navigator.replace(&href, target.state);
        } else {
            navigator.push(&href, target.state);
        }
        frame = render(navigator.current(), status);
    }

    if frame.redirect().is_some() {
        tracing::warn!(
            path = %navigator.current().pathname,
            "redirect depth exceeded, returning unresolved frame"
        );
    }
    frame
}

fn pending_redirect(frame: &Frame) -> Option<(Location, bool)> {
    let mut layers = std::iter::once(&frame.base).chain(frame.overlay.iter());
    layers.find_map(|layer| match &layer.view {
        View::Redirect { to, replace } => Some((to.clone(), *replace)),
        _ => None,
    })
}
