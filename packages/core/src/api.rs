use crate::containment::is_elem;
use crate::link::{make_link, Link, LinkError};
use crate::types::Route;
use crate::validation::{is_link, validate_route, RouteError};

/// A validated API description with traversal and link helpers.
///
/// The API is not a router; it is a read-only tree. Build one from the
/// route tree an API author declared, then check link targets against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    root: Route,
}

impl Api {
    /// Wrap `root` after checking it is well-formed.
    pub fn new(root: Route) -> Result<Self, RouteError> {
        validate_route(&root)?;
        Ok(Self { root })
    }

    /// Build an API offering every route in `routes`, in order.
    ///
    /// Returns `Ok(None)` when `routes` is empty.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Result<Option<Self>, RouteError> {
        Route::choice(routes).map(Self::new).transpose()
    }

    pub fn root(&self) -> &Route {
        &self.root
    }

    /// Whether `target` is an endpoint of this API.
    pub fn contains(&self, target: &Route) -> bool {
        is_elem(target, &self.root)
    }

    /// Build a [`Link`] to `target` within this API.
    pub fn link(&self, target: &Route) -> Result<Link, LinkError> {
        make_link(target, &self.root)
    }

    /// Every endpoint of the API as a linear route, left to right.
    ///
    /// Alternatives are distributed over their common prefix, so
    /// `"v1" :> ("a" :> Get .. :<|> "b" :> Get ..)` yields two routes, each
    /// starting with `"v1"`.
    pub fn endpoints(&self) -> Vec<Route> {
        flatten(&self.root)
    }

    /// Endpoints that are themselves eligible link targets.
    pub fn linkable_endpoints(&self) -> Vec<Route> {
        self.endpoints().into_iter().filter(is_link).collect()
    }

    /// Number of endpoints.
    pub fn len(&self) -> usize {
        count(&self.root)
    }

    /// Always `false`: every well-formed tree ends in at least one verb.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Route> for Api {
    type Error = RouteError;
    fn try_from(root: Route) -> Result<Self, Self::Error> {
        Self::new(root)
    }
}

// Prefix-distributing traversal. Each linear node is re-attached on top of
// every endpoint of its child.
fn flatten(route: &Route) -> Vec<Route> {
    match route {
        Route::Alt { left, right } => {
            let mut out = flatten(left);
            out.extend(flatten(right));
            out
        }
        Route::Verb(_) => vec![route.clone()],
        linear => {
            let Some(rest) = linear.rest() else {
                return vec![];
            };
            flatten(rest)
                .into_iter()
                .map(|tail| with_rest(linear, tail))
                .collect()
        }
    }
}

fn count(route: &Route) -> usize {
    match route {
        Route::Alt { left, right } => count(left) + count(right),
        Route::Verb(_) => 1,
        linear => linear.rest().map_or(0, count),
    }
}

/// A copy of the linear node `node` with its child replaced by `rest`.
fn with_rest(node: &Route, rest: Route) -> Route {
    let mut out = node.clone();
    match &mut out {
        Route::Segment { rest: r, .. }
        | Route::Capture { rest: r, .. }
        | Route::ReqBody { rest: r, .. }
        | Route::QueryParam { rest: r, .. }
        | Route::QueryParams { rest: r, .. }
        | Route::QueryFlag { rest: r, .. }
        | Route::MatrixParam { rest: r, .. }
        | Route::MatrixParams { rest: r, .. }
        | Route::MatrixFlag { rest: r, .. } => **r = rest,
        Route::Alt { .. } | Route::Verb(_) => {}
    }
    out
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentType::*, Verb};

    fn api() -> Api {
        Api::new(Route::segment(
            "v1",
            Route::alt(
                Route::path(["users"], Verb::get([Json], "Users")),
                Route::alt(
                    Route::segment(
                        "users",
                        Route::capture("id", "Int", Route::verb(Verb::get([Json], "User"))),
                    ),
                    Route::segment(
                        "users",
                        Route::req_body([Json], "NewUser", Route::verb(Verb::post([Json], "User"))),
                    ),
                ),
            ),
        ))
        .unwrap()
    }

    #[test]
    fn rejects_malformed_tree() {
        assert_eq!(
            Api::new(Route::path([""], Verb::delete())),
            Err(RouteError::EmptySegment)
        );
    }

    #[test]
    fn endpoints_distribute_prefix() {
        let eps = api().endpoints();
        assert_eq!(eps.len(), 3);
        assert_eq!(api().len(), 3);
        assert_eq!(eps[0], Route::path(["v1", "users"], Verb::get([Json], "Users")));
        assert!(eps.iter().all(|e| matches!(e, Route::Segment { literal, .. } if literal == "v1")));
    }

    #[test]
    fn every_endpoint_is_contained() {
        let api = api();
        for ep in api.endpoints() {
            assert!(api.contains(&ep), "{ep} should be contained");
        }
    }

    #[test]
    fn linkable_endpoints_excludes_captures_and_bodies() {
        let eps = api().linkable_endpoints();
        assert_eq!(eps, vec![Route::path(["v1", "users"], Verb::get([Json], "Users"))]);
    }

    #[test]
    fn link_within_api() {
        let api = api();
        let link = api
            .link(&Route::path(["v1", "users"], Verb::get([Json], "Users")))
            .unwrap();
        assert_eq!(link, "/v1/users");
        assert!(api
            .link(&Route::path(["v2", "users"], Verb::get([Json], "Users")))
            .is_err());
    }

    #[test]
    fn from_routes() {
        let built = Api::from_routes([
            Route::path(["a"], Verb::delete()),
            Route::path(["b"], Verb::delete()),
        ])
        .unwrap()
        .unwrap();
        assert_eq!(built.len(), 2);
        assert_eq!(Api::from_routes(Vec::new()), Ok(None));
    }
}
