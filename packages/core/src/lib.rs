//! Statically verified links into a declared HTTP API.
//!
//! Hand-written links (`"/users/me"`) silently drift out of sync with the
//! routes a server actually serves. This crate checks a link target against
//! the API description before the link exists: a [`Link`] is only produced
//! when the target route is an endpoint of the API and is made purely of
//! literal path segments ending in a verb.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Route trees: [`Route`], [`Verb`], [`Method`], [`ContentType`] |
//! | [`containment`] | [`is_elem`] and the content-type [`is_sub_list`] check |
//! | [`validation`] | Tree well-formedness and link eligibility ([`is_link`]) |
//! | [`link`] | The opaque [`Link`], [`make_link`] and path rendering |
//! | [`api`] | [`Api`]: endpoint traversal over a validated tree |
//! | [`manifest`] | JSON link manifests checked as a build step |
//! | [`render`] | Text reports and generated Rust link constants |
//!
//! # Quick start
//!
//! ```rust
//! use routelink::{make_link, ContentType, Route, Verb};
//!
//! let api = Route::alt(
//!     Route::path(["hello"], Verb::get([ContentType::Json], "Int")),
//!     Route::segment(
//!         "bye",
//!         Route::query_param("name", "String", Route::verb(Verb::post([ContentType::Json], "Bool"))),
//!     ),
//! );
//!
//! let target = Route::path(["hello"], Verb::get([ContentType::Json], "Int"));
//! let link = make_link(&target, &api).expect("hello is served");
//! assert_eq!(link.as_str(), "/hello");
//! ```
//!
//! # Checking at build time
//!
//! Links can be declared in a JSON [`LinkManifest`] next to the API
//! description and verified by the `linkcheck` CLI or from a build script
//! with [`LinkManifest::verify`]. Any rejected link fails the build.

pub mod api;
pub mod containment;
pub mod link;
pub mod manifest;
pub mod render;
pub mod types;
pub mod validation;

pub use api::Api;
pub use containment::{is_elem, is_sub_list};
pub use link::{make_link, render_link, Link, LinkError};
pub use manifest::{LinkManifest, LinkTable, ManifestError, ManifestReport};
pub use types::{ContentType, Method, Route, Verb};
pub use validation::{first_ineligible, is_link, validate_route, RouteError};
