use serde::Serialize;
use std::collections::BTreeMap;

/// RouteParams
///
/// Values captured by `:name` segments, keyed by name. The matcher does not validate
/// them; whichever view receives them decides what a well-formed id looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// PathPattern
///
/// A route template such as `/feed/:number`. Static segments compare ASCII
/// case-insensitively, a `:name` segment captures exactly one non-empty segment, and a
/// single trailing slash on the path is ignored. The lone pattern `*` matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathPattern(&'static str);

/// The catch-all template.
pub const CATCH_ALL: PathPattern = PathPattern("*");

impl PathPattern {
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Names of the `:name` segments, in order.
    pub fn param_names(&self) -> Vec<&'static str> {
        segments(self.0)
            .into_iter()
            .filter_map(|segment| segment.strip_prefix(':'))
            .collect()
    }

    /// matches
    ///
    /// Returns the captured parameters when `pathname` fits this template.
    pub fn matches(&self, pathname: &str) -> Option<RouteParams> {
        if self.0 == "*" {
            return Some(RouteParams::default());
        }

        let expected = segments(self.0);
        let actual = segments(pathname);
        if expected.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (template, value) in expected.iter().zip(actual.iter()) {
            match template.strip_prefix(':') {
                Some(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.to_string(), value.to_string());
                }
                None if template.eq_ignore_ascii_case(value) => {}
                None => return None,
            }
        }

        Some(RouteParams(params))
    }
}

// "/" and "" have no segments; one leading and one trailing slash are dropped.
fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}
