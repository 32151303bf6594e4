//! Route locations and protected areas.
//!
//! DESIGN
//! ======
//! Area membership works on path segments: `/admin` covers `/admin` and
//! `/admin/users` but not `/administrator`. Auth pages are exact matches
//! because `/login/help`-style children do not exist.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::config::GateConfig;

/// Characters escaped when a path travels inside a query value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Query parameter carrying the post-login return path.
pub const REDIRECT_PARAM: &str = "redirect";

/// Current router location: path plus decoded query pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: Vec::new() }
    }

    /// Parse `"/path?a=1&b=2"`. A fragment, if present, is dropped.
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let href = href.split_once('#').map_or(href, |(before, _)| before);
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self { path: path.to_owned(), query: parse_query(query) }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// First value for `key`, if any.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `redirect` value when it names a local path.
    #[must_use]
    pub fn return_path(&self) -> Option<&str> {
        self.query_value(REDIRECT_PARAM)
            .filter(|value| is_local_path(value))
    }
}

/// Parse a raw query string into decoded pairs. Empty keys are skipped.
#[must_use]
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            if key.is_empty() {
                return None;
            }
            Some((key, decode_component(value)))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// `true` for same-origin absolute paths (`/x`), rejecting `//host` and schemes.
///
/// Control characters are rejected outright: URL parsers strip tab, CR and
/// LF, which would turn `/\t/host` into `//host`.
#[must_use]
pub fn is_local_path(value: &str) -> bool {
    value.starts_with('/')
        && !value.starts_with("//")
        && !value.contains('\\')
        && !value.chars().any(char::is_control)
}

/// Build the login URL that returns to `path` after sign-in.
#[must_use]
pub fn login_redirect(config: &GateConfig, path: &str) -> String {
    format!(
        "{}?{REDIRECT_PARAM}={}",
        config.login_path,
        utf8_percent_encode(path, QUERY_VALUE)
    )
}

/// Protected or special route zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Area {
    /// Requires the `admin` role.
    Admin,
    /// Requires any signed-in identity.
    Account,
    /// Login and signup pages.
    Auth,
}

impl Area {
    #[must_use]
    pub fn contains(self, config: &GateConfig, path: &str) -> bool {
        match self {
            Self::Admin => config.admin_prefixes.iter().any(|p| under_prefix(path, p)),
            Self::Account => config.account_prefixes.iter().any(|p| under_prefix(path, p)),
            Self::Auth => {
                let trimmed = trim_trailing_slash(path);
                config.auth_pages.iter().any(|p| trim_trailing_slash(p) == trimmed)
            }
        }
    }
}

fn under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = trim_trailing_slash(prefix);
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}
