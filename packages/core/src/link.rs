//! Verified links.
//!
//! A [`Link`] can only be obtained from [`make_link`], which renders the
//! target route after proving it is both an element of the API
//! ([`is_elem`](crate::containment::is_elem)) and an eligible link target
//! ([`is_link`](crate::validation::is_link)). Any `Link` value in a program
//! therefore names a real endpoint of the API it was checked against.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::containment::is_elem;
use crate::types::Route;
use crate::validation::first_ineligible;

/// A rendered path that is provably an endpoint of some API.
///
/// There is no public constructor and no `Deserialize` impl; the only way to
/// get one is [`make_link`] (or the helpers built on it).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Link(String);

impl Link {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Link {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Link {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Link {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Why a link could not be built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("route {route} is not an endpoint of the API")]
    NotContained { route: String },

    #[error("route {route} cannot be a link: {node} is not a literal path segment")]
    NotLinkable { route: String, node: String },
}

/// Build a [`Link`] to `target`, provided it is an endpoint of `api` and
/// consists only of literal segments and a verb.
///
/// Containment is checked first, so a route failing both checks reports
/// [`LinkError::NotContained`].
pub fn make_link(target: &Route, api: &Route) -> Result<Link, LinkError> {
    if !is_elem(target, api) {
        tracing::debug!(route = %target, "link rejected: not contained in API");
        return Err(LinkError::NotContained {
            route: target.to_string(),
        });
    }
    if let Some(node) = first_ineligible(target) {
        tracing::debug!(route = %target, node = node.kind(), "link rejected: not linkable");
        return Err(LinkError::NotLinkable {
            route: target.to_string(),
            node: node.head(),
        });
    }
    Ok(Link(render_link(target)))
}

/// Concatenate the literal segments of `route` as `/seg1/seg2...`.
///
/// The terminal verb contributes nothing, so a bare verb renders to `""`.
/// Segments are emitted verbatim. Only meaningful for routes that pass
/// [`is_link`](crate::validation::is_link); walking stops at the first node
/// that is not a literal segment.
pub fn render_link(route: &Route) -> String {
    let mut out = String::new();
    let mut node = route;
    while let Route::Segment { literal, rest } = node {
        out.push('/');
        out.push_str(literal);
        node = rest;
    }
    out
}

// --- tests -------------------------------------------------------------------
