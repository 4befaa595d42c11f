use thiserror::Error;

use crate::types::{Method, Route, Verb};

/// Errors returned when a [`Route`] tree is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("path segment must not be empty")]
    EmptySegment,

    #[error("path segment {0:?} must not contain '/'; split it into separate segments")]
    SegmentContainsSlash(String),

    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    #[error("{0} type name must not be empty")]
    EmptyTypeName(&'static str),

    #[error("DELETE must not carry content types or a response type")]
    DeleteWithPayload,

    #[error("{0} must declare a response type")]
    MissingResponse(Method),
}

/// Validate that `route` is a well-formed tree.
///
/// Returns `Ok(())` if every node is well-formed, or the first
/// [`RouteError`] found walking the tree left to right.
pub fn validate_route(route: &Route) -> Result<(), RouteError> {
    match route {
        Route::Alt { left, right } => {
            validate_route(left)?;
            validate_route(right)
        }
        Route::Verb(verb) => validate_verb(verb),
        node => {
            validate_head(node)?;
            match node.rest() {
                Some(rest) => validate_route(rest),
                None => Ok(()),
            }
        }
    }
}

/// Whether `route` may be used as a link target: zero or more literal
/// segments followed by exactly one verb.
pub fn is_link(route: &Route) -> bool {
    first_ineligible(route).is_none()
}

/// The first node (left to right) that keeps `route` from being a link, or
/// `None` if the route is eligible.
///
/// Captures, bodies, query and matrix modifiers and alternatives are all
/// ineligible.
pub fn first_ineligible(route: &Route) -> Option<&Route> {
    let mut node = route;
    loop {
        match node {
            Route::Segment { rest, .. } => node = rest,
            Route::Verb(_) => return None,
            other => return Some(other),
        }
    }
}

// --- helpers -----------------------------------------------------------------

fn validate_head(node: &Route) -> Result<(), RouteError> {
    let kind = node.kind();
    match node {
        Route::Segment { literal, .. } => {
            if literal.is_empty() {
                return Err(RouteError::EmptySegment);
            }
            if literal.contains('/') {
                return Err(RouteError::SegmentContainsSlash(literal.clone()));
            }
        }
        Route::Capture { name, ty, .. }
        | Route::QueryParam { name, ty, .. }
        | Route::QueryParams { name, ty, .. }
        | Route::MatrixParam { name, ty, .. }
        | Route::MatrixParams { name, ty, .. } => {
            non_empty_name(name, kind)?;
            if ty.is_empty() {
                return Err(RouteError::EmptyTypeName(kind));
            }
        }
        Route::QueryFlag { name, .. } | Route::MatrixFlag { name, .. } => {
            non_empty_name(name, kind)?;
        }
        Route::ReqBody { ty, .. } => {
            if ty.is_empty() {
                return Err(RouteError::EmptyTypeName(kind));
            }
        }
        Route::Alt { .. } | Route::Verb(_) => {}
    }
    Ok(())
}

fn non_empty_name(name: &str, kind: &'static str) -> Result<(), RouteError> {
    if name.is_empty() {
        Err(RouteError::EmptyName(kind))
    } else {
        Ok(())
    }
}

fn validate_verb(verb: &Verb) -> Result<(), RouteError> {
    match (verb.method, &verb.response) {
        (Method::Delete, None) if verb.content_types.is_empty() => Ok(()),
        (Method::Delete, _) => Err(RouteError::DeleteWithPayload),
        (method, None) => Err(RouteError::MissingResponse(method)),
        (_, Some(ty)) if ty.is_empty() => Err(RouteError::EmptyTypeName("verb")),
        _ => Ok(()),
    }
}

// --- tests -------------------------------------------------------------------
