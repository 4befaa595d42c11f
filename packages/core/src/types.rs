//! Core data types for route trees.
//!
//! This module defines the closed set of nodes an API description is built
//! from: [`Route`], its terminal [`Verb`], the HTTP [`Method`] and the
//! [`ContentType`] tags attached to verbs and request bodies. All types
//! serialise to and from JSON so API descriptions and link targets can be
//! declared in manifest files (see [`crate::manifest`]).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An HTTP method a terminal [`Verb`] can carry.
///
/// Serialises as the upper-case method name (e.g. `"GET"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// The combinator spelling used when displaying routes (e.g. `Get`).
    fn combinator(self) -> &'static str {
        match self {
            Method::Get => "Get",
            Method::Post => "Post",
            Method::Put => "Put",
            Method::Delete => "Delete",
        }
    }
}

/// Formats the method as its upper-case HTTP name (e.g. `"GET"`).
impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Parses a [`Method`] from its HTTP name, ignoring case.
impl std::str::FromStr for Method {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(format!(
                "unknown method {:?}; expected one of: GET, POST, PUT, DELETE",
                s
            )),
        }
    }
}

/// A content-type tag attached to a [`Verb`] or a request body.
///
/// Serialises as its media type (e.g. `"application/json"`). Parsing also
/// accepts the short aliases `json`, `xml`, `text`, `html`, `form` and
/// `octet-stream`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContentType {
    Json,
    Xml,
    PlainText,
    Html,
    FormUrlEncoded,
    OctetStream,
    /// Any other `type/subtype` media type, stored lower-case.
    Other(String),
}

impl ContentType {
    /// The media type string, e.g. `"application/json"`.
    pub fn media_type(&self) -> &str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Xml => "application/xml",
            ContentType::PlainText => "text/plain",
            ContentType::Html => "text/html",
            ContentType::FormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::OctetStream => "application/octet-stream",
            ContentType::Other(m) => m,
        }
    }

    fn tag(&self) -> String {
        match self {
            ContentType::Json => "JSON".into(),
            ContentType::Xml => "XML".into(),
            ContentType::PlainText => "PlainText".into(),
            ContentType::Html => "HTML".into(),
            ContentType::FormUrlEncoded => "FormUrlEncoded".into(),
            ContentType::OctetStream => "OctetStream".into(),
            ContentType::Other(m) => format!("{:?}", m),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "json" | "application/json" => Ok(ContentType::Json),
            "xml" | "application/xml" => Ok(ContentType::Xml),
            "text" | "plaintext" | "text/plain" => Ok(ContentType::PlainText),
            "html" | "text/html" => Ok(ContentType::Html),
            "form" | "application/x-www-form-urlencoded" => Ok(ContentType::FormUrlEncoded),
            "octet-stream" | "application/octet-stream" => Ok(ContentType::OctetStream),
            other if MEDIA_TYPE_RE.is_match(other) => Ok(ContentType::Other(other.to_string())),
            _ => Err(format!(
                "invalid content type {:?}; expected a media type such as \
                 application/json or one of: json, xml, text, html, form, octet-stream",
                s
            )),
        }
    }
}

impl TryFrom<String> for ContentType {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ContentType> for String {
    fn from(ct: ContentType) -> Self {
        ct.media_type().to_string()
    }
}

/// `type/subtype` using RFC 6838 restricted-name characters.
static MEDIA_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9!#$&^_.+-]*/[a-z0-9][a-z0-9!#$&^_.+-]*$")
        .expect("invalid media type regex")
});

/// The terminal node of every route: a method, the content types it
/// negotiates, and the name of its response type.
///
/// `DELETE` carries neither content types nor a response; use
/// [`Verb::delete`] to build one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Verb {
    pub method: Method,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_types: Vec<ContentType>,

    /// Name of the response type, e.g. `"Int"`. Compared by equality only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl Verb {
    pub fn new(
        method: Method,
        content_types: impl IntoIterator<Item = ContentType>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            method,
            content_types: content_types.into_iter().collect(),
            response: Some(response.into()),
        }
    }

    pub fn get(
        content_types: impl IntoIterator<Item = ContentType>,
        response: impl Into<String>,
    ) -> Self {
        Self::new(Method::Get, content_types, response)
    }

    pub fn post(
        content_types: impl IntoIterator<Item = ContentType>,
        response: impl Into<String>,
    ) -> Self {
        Self::new(Method::Post, content_types, response)
    }

    pub fn put(
        content_types: impl IntoIterator<Item = ContentType>,
        response: impl Into<String>,
    ) -> Self {
        Self::new(Method::Put, content_types, response)
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            content_types: Vec::new(),
            response: None,
        }
    }
}

/// A route tree: one endpoint, or a composition of endpoints.
///
/// Every node except [`Route::Alt`] and [`Route::Verb`] has exactly one
/// `rest` child, and a [`Route::Verb`] is always a leaf. Children are owned,
/// so a tree is always finite and acyclic.
///
/// Serialises as an internally tagged object keyed by `"kind"`:
///
/// ```json
/// { "kind": "segment", "literal": "hello",
///   "rest": { "kind": "verb", "method": "GET",
///             "content_types": ["application/json"], "response": "Int" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    /// The API offers either branch.
    Alt { left: Box<Route>, right: Box<Route> },

    /// A fixed path segment that must appear verbatim.
    Segment { literal: String, rest: Box<Route> },

    /// A single dynamic path segment.
    Capture {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        rest: Box<Route>,
    },

    ReqBody {
        content_types: Vec<ContentType>,
        #[serde(rename = "type")]
        ty: String,
        rest: Box<Route>,
    },

    QueryParam {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        rest: Box<Route>,
    },

    QueryParams {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        rest: Box<Route>,
    },

    QueryFlag { name: String, rest: Box<Route> },

    MatrixParam {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        rest: Box<Route>,
    },

    MatrixParams {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        rest: Box<Route>,
    },

    MatrixFlag { name: String, rest: Box<Route> },

    Verb(Verb),
}

impl Route {
    pub fn alt(left: Route, right: Route) -> Self {
        Route::Alt {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Right-nested alternative over all `routes`; `None` when empty.
    pub fn choice(routes: impl IntoIterator<Item = Route>) -> Option<Self> {
        let mut routes: Vec<Route> = routes.into_iter().collect();
        let mut acc = routes.pop()?;
        while let Some(r) = routes.pop() {
            acc = Route::alt(r, acc);
        }
        Some(acc)
    }

    pub fn segment(literal: impl Into<String>, rest: Route) -> Self {
        Route::Segment {
            literal: literal.into(),
            rest: Box::new(rest),
        }
    }

    /// Literal `segments` in order, terminated by `verb`.
    pub fn path<I, S>(segments: I, verb: Verb) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        segments
            .into_iter()
            .rev()
            .fold(Route::Verb(verb), |rest, s| Route::segment(s, rest))
    }

    pub fn capture(name: impl Into<String>, ty: impl Into<String>, rest: Route) -> Self {
        Route::Capture {
            name: name.into(),
            ty: ty.into(),
            rest: Box::new(rest),
        }
    }

    pub fn req_body(
        content_types: impl IntoIterator<Item = ContentType>,
        ty: impl Into<String>,
        rest: Route,
    ) -> Self {
        Route::ReqBody {
            content_types: content_types.into_iter().collect(),
            ty: ty.into(),
            rest: Box::new(rest),
        }
    }

    pub fn query_param(name: impl Into<String>, ty: impl Into<String>, rest: Route) -> Self {
        Route::QueryParam {
            name: name.into(),
            ty: ty.into(),
            rest: Box::new(rest),
        }
    }

    pub fn query_params(name: impl Into<String>, ty: impl Into<String>, rest: Route) -> Self {
        Route::QueryParams {
            name: name.into(),
            ty: ty.into(),
            rest: Box::new(rest),
        }
    }

    pub fn query_flag(name: impl Into<String>, rest: Route) -> Self {
        Route::QueryFlag {
            name: name.into(),
            rest: Box::new(rest),
        }
    }

    pub fn matrix_param(name: impl Into<String>, ty: impl Into<String>, rest: Route) -> Self {
        Route::MatrixParam {
            name: name.into(),
            ty: ty.into(),
            rest: Box::new(rest),
        }
    }

    pub fn matrix_params(name: impl Into<String>, ty: impl Into<String>, rest: Route) -> Self {
        Route::MatrixParams {
            name: name.into(),
            ty: ty.into(),
            rest: Box::new(rest),
        }
    }

    pub fn matrix_flag(name: impl Into<String>, rest: Route) -> Self {
        Route::MatrixFlag {
            name: name.into(),
            rest: Box::new(rest),
        }
    }

    pub fn verb(verb: Verb) -> Self {
        Route::Verb(verb)
    }

    /// The single child of a linear node; `None` for [`Route::Alt`] and
    /// [`Route::Verb`].
    pub fn rest(&self) -> Option<&Route> {
        match self {
            Route::Segment { rest, .. }
            | Route::Capture { rest, .. }
            | Route::ReqBody { rest, .. }
            | Route::QueryParam { rest, .. }
            | Route::QueryParams { rest, .. }
            | Route::QueryFlag { rest, .. }
            | Route::MatrixParam { rest, .. }
            | Route::MatrixParams { rest, .. }
            | Route::MatrixFlag { rest, .. } => Some(rest),
            Route::Alt { .. } | Route::Verb(_) => None,
        }
    }

    /// Whether this node is a body, query or matrix modifier.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Route::ReqBody { .. }
                | Route::QueryParam { .. }
                | Route::QueryParams { .. }
                | Route::QueryFlag { .. }
                | Route::MatrixParam { .. }
                | Route::MatrixParams { .. }
                | Route::MatrixFlag { .. }
        )
    }

    /// The wire-format `kind` tag of this node (e.g. `"query_param"`).
    pub fn kind(&self) -> &'static str {
        match self {
            Route::Alt { .. } => "alt",
            Route::Segment { .. } => "segment",
            Route::Capture { .. } => "capture",
            Route::ReqBody { .. } => "req_body",
            Route::QueryParam { .. } => "query_param",
            Route::QueryParams { .. } => "query_params",
            Route::QueryFlag { .. } => "query_flag",
            Route::MatrixParam { .. } => "matrix_param",
            Route::MatrixParams { .. } => "matrix_params",
            Route::MatrixFlag { .. } => "matrix_flag",
            Route::Verb(_) => "verb",
        }
    }

    /// The node itself without its children, e.g. `QueryParam "name" String`.
    pub fn head(&self) -> String {
        match self {
            Route::Alt { .. } => ":<|>".to_string(),
            Route::Segment { literal, .. } => format!("{:?}", literal),
            Route::Capture { name, ty, .. } => format!("Capture {:?} {}", name, ty),
            Route::ReqBody { content_types, ty, .. } => {
                format!("ReqBody {} {}", tag_list(content_types), ty)
            }
            Route::QueryParam { name, ty, .. } => format!("QueryParam {:?} {}", name, ty),
            Route::QueryParams { name, ty, .. } => format!("QueryParams {:?} {}", name, ty),
            Route::QueryFlag { name, .. } => format!("QueryFlag {:?}", name),
            Route::MatrixParam { name, ty, .. } => format!("MatrixParam {:?} {}", name, ty),
            Route::MatrixParams { name, ty, .. } => format!("MatrixParams {:?} {}", name, ty),
            Route::MatrixFlag { name, .. } => format!("MatrixFlag {:?}", name),
            Route::Verb(v) => match v.method {
                Method::Delete => "Delete".to_string(),
                m => format!(
                    "{} {} {}",
                    m.combinator(),
                    tag_list(&v.content_types),
                    v.response.as_deref().unwrap_or("()")
                ),
            },
        }
    }
}

/// Formats the tree in combinator syntax, e.g.
/// `"hello" :> Get '[JSON] Int :<|> "bye" :> Delete`.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Alt { left, right } => {
                // :<|> is right-associative; only a left-nested Alt needs parens.
                if matches!(**left, Route::Alt { .. }) {
                    write!(f, "({}) :<|> {}", left, right)
                } else {
                    write!(f, "{} :<|> {}", left, right)
                }
            }
            Route::Verb(_) => f.write_str(&self.head()),
            linear => {
                write!(f, "{} :> ", linear.head())?;
                match linear.rest() {
                    Some(rest @ Route::Alt { .. }) => write!(f, "({})", rest),
                    Some(rest) => write!(f, "{}", rest),
                    None => Ok(()),
                }
            }
        }
    }
}

fn tag_list(content_types: &[ContentType]) -> String {
    let tags: Vec<String> = content_types.iter().map(ContentType::tag).collect();
    format!("'[{}]", tags.join(", "))
}

// --- tests -------------------------------------------------------------------
