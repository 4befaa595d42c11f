//! Structural containment of a target route inside an API tree.
//!
//! [`is_elem`] decides whether a target route is reachable in an API under
//! asymmetric matching rules: alternatives on the API side are searched,
//! body/query/matrix modifiers on the API side are transparent, a capture in
//! the target matches any path element it aligns with, and two verbs match
//! when the target's content types are a [sub-list](is_sub_list) of the
//! API's.

use crate::types::{Route, Verb};

/// Whether `target` is an element of `api`.
///
/// Rules are tried in order and the first applicable one decides:
///
/// 1. `api` is an alternative: either branch contains `target`. A target
///    that is itself an alternative is therefore never contained.
/// 2. Equal literal segments on both sides: the remainders match.
/// 3. A target capture aligned with an API segment or capture: the
///    remainders match. Capture names and types are not compared; a capture
///    stands for any single path segment.
/// 4. `api` is a modifier: if `target` carries the identical modifier the
///    remainders match, otherwise the modifier is dropped from `api`.
/// 5. Two verbs with the same method and response type: the target's
///    content types are a sub-list of the API's.
/// 6. Otherwise the trees must be structurally equal.
///
/// Every recursive call consumes at least one node, so this terminates.
pub fn is_elem(target: &Route, api: &Route) -> bool {
    match (target, api) {
        (_, Route::Alt { left, right }) => is_elem(target, left) || is_elem(target, right),

        (
            Route::Segment { literal: t, rest: t_rest },
            Route::Segment { literal: a, rest: a_rest },
        ) if t == a => is_elem(t_rest, a_rest),

        (
            Route::Capture { rest: t_rest, .. },
            Route::Segment { rest: a_rest, .. } | Route::Capture { rest: a_rest, .. },
        ) => is_elem(t_rest, a_rest),

        (_, modifier) if modifier.is_modifier() => match (target.rest(), modifier.rest()) {
            (Some(t_rest), Some(a_rest)) if same_head(target, modifier) => {
                is_elem(t_rest, a_rest)
            }
            (_, Some(a_rest)) => is_elem(target, a_rest),
            (_, None) => false,
        },

        (Route::Verb(t), Route::Verb(a)) if verbs_align(t, a) => {
            is_sub_list(&t.content_types, &a.content_types)
        }

        _ => target == api,
    }
}

/// Whether every element of `xs` occurs at least once in `ys`.
///
/// Order and duplicates are irrelevant; an empty `xs` is contained in
/// anything.
pub fn is_sub_list<T: PartialEq>(xs: &[T], ys: &[T]) -> bool {
    xs.iter().all(|x| ys.contains(x))
}

fn verbs_align(target: &Verb, api: &Verb) -> bool {
    target.method == api.method && target.response == api.response
}

/// Equality of two nodes ignoring their children.
fn same_head(a: &Route, b: &Route) -> bool {
    match (a, b) {
        (
            Route::ReqBody { content_types: ca, ty: ta, .. },
            Route::ReqBody { content_types: cb, ty: tb, .. },
        ) => ta == tb && ca == cb,
        (Route::QueryParam { name: na, ty: ta, .. }, Route::QueryParam { name: nb, ty: tb, .. })
        | (
            Route::QueryParams { name: na, ty: ta, .. },
            Route::QueryParams { name: nb, ty: tb, .. },
        )
        | (
            Route::MatrixParam { name: na, ty: ta, .. },
            Route::MatrixParam { name: nb, ty: tb, .. },
        )
        | (
            Route::MatrixParams { name: na, ty: ta, .. },
            Route::MatrixParams { name: nb, ty: tb, .. },
        ) => na == nb && ta == tb,
        (Route::QueryFlag { name: na, .. }, Route::QueryFlag { name: nb, .. })
        | (Route::MatrixFlag { name: na, .. }, Route::MatrixFlag { name: nb, .. }) => na == nb,
        _ => false,
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentType::{self, *};

    fn hello() -> Route {
        Route::path(["hello"], Verb::get([Json], "Int"))
    }

    fn bye() -> Route {
        Route::segment(
            "bye",
            Route::query_param("name", "String", Route::verb(Verb::post([Json], "Bool"))),
        )
    }

    fn api() -> Route {
        Route::alt(hello(), bye())
    }

    #[test]
    fn sub_list_basics() {
        assert!(is_sub_list::<ContentType>(&[], &[]));
        assert!(is_sub_list(&[], &[Json]));
        assert!(is_sub_list(&[Json], &[Json, Xml]));
        assert!(is_sub_list(&[Xml, Json, Json], &[Json, Xml]));
        assert!(!is_sub_list(&[Xml], &[Json]));
        assert!(!is_sub_list(&[Json], &[]));
    }

    #[test]
    fn finds_endpoint_through_alternative() {
        assert!(is_elem(&hello(), &api()));
        assert!(is_elem(&bye(), &api()));
    }

    #[test]
    fn method_mismatch_is_not_contained() {
        let target = Route::path(["hello"], Verb::delete());
        assert!(!is_elem(&target, &api()));
    }

    #[test]
    fn response_type_mismatch_is_not_contained() {
        let target = Route::path(["hello"], Verb::get([Json], "String"));
        assert!(!is_elem(&target, &api()));
    }

    #[test]
    fn segment_mismatch_is_not_contained() {
        let target = Route::path(["goodbye"], Verb::get([Json], "Int"));
        assert!(!is_elem(&target, &api()));
    }

    #[test]
    fn requested_content_types_must_be_offered() {
        let api = Route::path(["doc"], Verb::get([Json, Xml], "Doc"));
        assert!(is_elem(&Route::path(["doc"], Verb::get([Json], "Doc")), &api));
        assert!(is_elem(&Route::path(["doc"], Verb::get(Vec::<ContentType>::new(), "Doc")), &api));
        assert!(!is_elem(&Route::path(["doc"], Verb::get([Html], "Doc")), &api));

        let json_only = Route::path(["doc"], Verb::get([Json], "Doc"));
        assert!(!is_elem(&Route::path(["doc"], Verb::get([Xml], "Doc")), &json_only));
    }

    #[test]
    fn api_modifiers_are_transparent() {
        let api = Route::segment(
            "search",
            Route::query_param(
                "q",
                "String",
                Route::query_flag(
                    "exact",
                    Route::matrix_param(
                        "lang",
                        "Text",
                        Route::req_body([Json], "Filter", Route::verb(Verb::post([Json], "Hits"))),
                    ),
                ),
            ),
        );
        let target = Route::path(["search"], Verb::post([Json], "Hits"));
        assert!(is_elem(&target, &api));
    }

    #[test]
    fn mirrored_modifier_is_matched() {
        let api = bye();
        assert!(is_elem(&bye(), &api));

        let renamed = Route::segment(
            "bye",
            Route::query_param("who", "String", Route::verb(Verb::post([Json], "Bool"))),
        );
        assert!(!is_elem(&renamed, &api));
    }

    #[test]
    fn target_modifier_absent_from_api_is_not_contained() {
        let api = Route::path(["x"], Verb::get([Json], "X"));
        let target = Route::segment("x", Route::query_flag("f", Route::verb(Verb::get([Json], "X"))));
        assert!(!is_elem(&target, &api));
    }

    #[test]
    fn capture_matches_any_path_element() {
        let api = Route::segment(
            "users",
            Route::capture("id", "Int", Route::verb(Verb::get([Json], "User"))),
        );
        let by_capture = Route::segment(
            "users",
            Route::capture("other", "Text", Route::verb(Verb::get([Json], "User"))),
        );
        assert!(is_elem(&by_capture, &api));

        let over_literal = Route::capture("anything", "Text", Route::verb(Verb::get([Json], "User")));
        let literal_api = Route::path(["users"], Verb::get([Json], "User"));
        assert!(is_elem(&over_literal, &literal_api));
    }

    #[test]
    fn literal_does_not_match_api_capture() {
        let api = Route::capture("id", "Int", Route::verb(Verb::get([Json], "User")));
        let target = Route::path(["42"], Verb::get([Json], "User"));
        assert!(!is_elem(&target, &api));
    }

    #[test]
    fn alternative_nested_under_prefix() {
        let api = Route::segment(
            "v1",
            Route::alt(
                Route::path(["a"], Verb::delete()),
                Route::path(["b"], Verb::put([Json], "B")),
            ),
        );
        assert!(is_elem(&Route::path(["v1", "b"], Verb::put([Json], "B")), &api));
        assert!(is_elem(&Route::path(["v1", "a"], Verb::delete()), &api));
        assert!(!is_elem(&Route::path(["v1", "c"], Verb::delete()), &api));
        assert!(!is_elem(&Route::path(["a"], Verb::delete()), &api));
    }

    #[test]
    fn partial_path_is_not_contained() {
        let api = Route::path(["a", "b"], Verb::delete());
        assert!(!is_elem(&Route::path(["a"], Verb::delete()), &api));
        assert!(!is_elem(&Route::path(["a", "b", "c"], Verb::delete()), &api));
    }

    #[test]
    fn identical_linear_trees_are_contained() {
        assert!(is_elem(&hello(), &hello()));
        assert!(is_elem(&bye(), &bye()));
    }

    #[test]
    fn alternative_target_is_not_contained() {
        assert!(!is_elem(&api(), &api()));
    }
}
