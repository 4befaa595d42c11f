//! Shared fixtures and generators for the routelink conformance suite.
//!
//! Provides the JSON manifests under `fixtures/` via [`fixture`], the
//! hello/bye API used throughout the suite via [`greeting_api`], and
//! `proptest` strategies that produce well-formed route trees over a small
//! alphabet, so that generated targets are regularly contained in generated
//! APIs.

use proptest::prelude::*;
use routelink::{ContentType, LinkManifest, Method, Route, Verb};

/// Names of the bundled manifest fixtures.
pub const FIXTURES: [&str; 3] = ["greeting", "bookstore", "stale"];

/// Load a bundled manifest by name (`"greeting"`, `"bookstore"`, `"stale"`).
///
/// # Panics
///
/// Panics if the name is unknown or the fixture fails to load; fixtures are
/// part of the suite and must always parse.
pub fn fixture(name: &str) -> LinkManifest {
    let json = match name {
        "greeting" => include_str!("../fixtures/greeting.json"),
        "bookstore" => include_str!("../fixtures/bookstore.json"),
        "stale" => include_str!("../fixtures/stale.json"),
        other => panic!("unknown fixture {other:?}"),
    };
    LinkManifest::from_json(json).unwrap_or_else(|e| panic!("fixture {name} is invalid: {e}"))
}

/// `"hello" :> Get '[JSON] Int :<|> "bye" :> QueryParam "name" String :> Post '[JSON] Bool`
pub fn greeting_api() -> Route {
    Route::alt(
        Route::path(["hello"], Verb::get([ContentType::Json], "Int")),
        Route::segment(
            "bye",
            Route::query_param(
                "name",
                "String",
                Route::verb(Verb::post([ContentType::Json], "Bool")),
            ),
        ),
    )
}

// --- strategies --------------------------------------------------------------

pub fn arb_content_types() -> impl Strategy<Value = Vec<ContentType>> {
    prop::collection::vec(
        prop_oneof![
            Just(ContentType::Json),
            Just(ContentType::Xml),
            Just(ContentType::PlainText),
        ],
        0..3,
    )
}

pub fn arb_verb() -> impl Strategy<Value = Verb> {
    prop_oneof![
        1 => Just(Verb::delete()),
        3 => (
            prop_oneof![Just(Method::Get), Just(Method::Post), Just(Method::Put)],
            arb_content_types(),
            prop_oneof![Just("Int"), Just("Bool")],
        )
            .prop_map(|(method, cts, ty)| Verb::new(method, cts, ty)),
    ]
}

fn arb_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("a"), Just("b")]
}

/// Any well-formed route tree, alternatives and modifiers included.
pub fn arb_route() -> impl Strategy<Value = Route> {
    arb_verb()
        .prop_map(Route::Verb)
        .prop_recursive(5, 32, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Route::alt(l, r)),
                (arb_name(), inner.clone()).prop_map(|(s, r)| Route::segment(s, r)),
                (arb_name(), inner.clone()).prop_map(|(n, r)| Route::capture(n, "Int", r)),
                (arb_content_types(), inner.clone())
                    .prop_map(|(cts, r)| Route::req_body(cts, "Body", r)),
                (arb_name(), inner.clone()).prop_map(|(n, r)| Route::query_param(n, "Text", r)),
                (arb_name(), inner.clone()).prop_map(|(n, r)| Route::query_flag(n, r)),
                (arb_name(), inner.clone()).prop_map(|(n, r)| Route::matrix_param(n, "Text", r)),
                (arb_name(), inner).prop_map(|(n, r)| Route::matrix_flag(n, r)),
            ]
        })
}

/// A route with no alternatives anywhere in it.
pub fn arb_linear_route() -> impl Strategy<Value = Route> {
    arb_verb()
        .prop_map(Route::Verb)
        .prop_recursive(6, 6, 1, |inner| {
            prop_oneof![
                (arb_name(), inner.clone()).prop_map(|(s, r)| Route::segment(s, r)),
                (arb_name(), inner.clone()).prop_map(|(n, r)| Route::capture(n, "Int", r)),
                (arb_name(), inner.clone()).prop_map(|(n, r)| Route::query_param(n, "Text", r)),
                (arb_content_types(), inner).prop_map(|(cts, r)| Route::req_body(cts, "Body", r)),
            ]
        })
}

// Segment literals that render differently under any escaping.
fn arb_segment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        4 => arb_name(),
        1 => Just("a b"),
        1 => Just("café"),
        1 => Just("x:y"),
    ]
}

/// Literal segments followed by a verb: always an eligible link target.
pub fn arb_link_target() -> impl Strategy<Value = Route> {
    (prop::collection::vec(arb_segment(), 0..4), arb_verb())
        .prop_map(|(segments, verb)| Route::path(segments, verb))
}
