use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Location
///
/// Where the user currently is. The path parts come from the URL; `state` is attached
/// at navigation time and does not survive a full reload. Every history entry gets a
/// fresh `key`, so two visits to the same path are still distinct entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
    #[serde(default)]
    pub state: LocationState,
    #[serde(default = "Uuid::new_v4")]
    pub key: Uuid,
}

/// LocationState
///
/// The navigation-time payload. `background` is the Background Marker: a previous
/// location to keep rendering as page content while the current path is shown as an
/// overlay. `from` records the location a protected view redirected away from.
/// Any other keys a caller attaches are carried along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Box<Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Box<Location>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocationState {
    /// State carrying only a Background Marker.
    pub fn with_background(background: Location) -> Self {
        Self {
            background: Some(Box::new(background)),
            ..Self::default()
        }
    }

    /// State carrying only the location a redirect came from.
    pub fn with_from(from: Location) -> Self {
        Self {
            from: Some(Box::new(from)),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.from.is_none() && self.extra.is_empty()
    }
}

impl Location {
    /// new
    ///
    /// Parses an href such as `/feed/42?tab=all#top` into its parts. A missing leading
    /// slash is added and an empty path becomes `/`.
    pub fn new(href: &str) -> Self {
        let (rest, hash) = match href.find('#') {
            Some(idx) => (&href[..idx], &href[idx..]),
            None => (href, ""),
        };
        let (path, search) = match rest.find('?') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };

        let pathname = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self {
            pathname,
            search: search.to_string(),
            hash: hash.to_string(),
            state: LocationState::default(),
            key: Uuid::new_v4(),
        }
    }

    pub fn with_state(mut self, state: LocationState) -> Self {
        self.state = state;
        self
    }

    /// The Background Marker, if this navigation asked for overlay rendering.
    pub fn background(&self) -> Option<&Location> {
        self.state.background.as_deref()
    }

    /// The location a protected view redirected away from, if any.
    pub fn redirected_from(&self) -> Option<&Location> {
        self.state.from.as_deref()
    }

    /// Reassembles the URL form: path, then query, then fragment.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}
