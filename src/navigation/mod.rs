//! Navigation Module Index
//!
//! The in-app navigation primitives: where the user is (`Location`), how a path is
//! matched against a route template (`PathPattern`), and the back/forward stack that
//! produces new locations (`Navigator`).

/// Location values and their attached state payload.
pub mod location;

/// Route template matching shared by the page and modal passes.
pub mod pattern;

/// The history stack: push, replace, back, forward.
pub mod history;

pub use history::Navigator;
pub use location::{Location, LocationState};
pub use pattern::{PathPattern, RouteParams};
