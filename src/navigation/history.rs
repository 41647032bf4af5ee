use super::location::{Location, LocationState};

/// Navigator
///
/// The in-memory history stack that stands in for the browser's. `entries[index]` is
/// the current location; pushing drops everything ahead of the cursor, and moving past
/// either end of the stack is ignored.
#[derive(Debug, Clone)]
pub struct Navigator {
    entries: Vec<Location>,
    index: usize,
}

impl Navigator {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// push
    ///
    /// Adds a new entry after the current one, discarding any forward entries.
    pub fn push(&mut self, to: &str, state: LocationState) -> &Location {
        let location = Location::new(to).with_state(state);
        tracing::debug!(to = %location.href(), "navigation push");

        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
        self.current()
    }

    /// replace
    ///
    /// Swaps the current entry in place. Used for redirects so that going back skips
    /// the location that was redirected away from.
    pub fn replace(&mut self, to: &str, state: LocationState) -> &Location {
        let location = Location::new(to).with_state(state);
        tracing::debug!(to = %location.href(), "navigation replace");

        self.entries[self.index] = location;
        self.current()
    }

    /// go
    ///
    /// Moves the cursor by `delta` entries. Out-of-range moves leave it where it is.
    pub fn go(&mut self, delta: isize) -> &Location {
        match self.index.checked_add_signed(delta) {
            Some(target) if target < self.entries.len() => {
                self.index = target;
                tracing::debug!(delta, to = %self.current().href(), "navigation go");
            }
            _ => tracing::debug!(delta, "navigation go out of range, ignored"),
        }
        self.current()
    }

    pub fn back(&mut self) -> &Location {
        self.go(-1)
    }

    pub fn forward(&mut self) -> &Location {
        self.go(1)
    }

    /// open_overlay
    ///
    /// What an in-app link to a modal-capable path does: push `to` with the current
    /// location attached as its Background Marker.
    pub fn open_overlay(&mut self, to: &str) -> &Location {
        let background = self.current().clone();
        self.push(to, LocationState::with_background(background))
    }

    /// close_overlay
    ///
    /// Dismissing an overlay steps back rather than pushing the background's path, so
    /// the restored entry is exactly the one the overlay was opened from.
    pub fn close_overlay(&mut self) -> &Location {
        self.back()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Location::default())
    }
}
