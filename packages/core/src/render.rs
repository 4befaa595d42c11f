//! Human-readable rendering of manifest reports and API endpoint listings,
//! and generation of a Rust module holding verified links.
//!
//! The text output is stable plain text suitable for terminals and CI logs.
//! It is not a canonical format; only the JSON manifest is normative.

use crate::api::Api;
use crate::link::render_link;
use crate::manifest::{LinkTable, ManifestReport};
use crate::types::Route;
use crate::validation::is_link;

/// Render a [`ManifestReport`] as one line per link plus a summary.
///
/// ```text
/// ok   greet  /hello
/// err  leave  route "bye" :> Delete is not an endpoint of the API
///
/// 1 of 2 links verified
/// ```
pub fn render_report(report: &ManifestReport) -> String {
    let width = report
        .outcomes()
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (name, outcome) in report.outcomes() {
        match outcome {
            Ok(link) => out.push_str(&format!(
                "ok   {:<width$}  {}\n",
                name,
                display_path(link.as_str())
            )),
            Err(e) => out.push_str(&format!("err  {:<width$}  {}\n", name, e)),
        }
    }

    let verified = report.outcomes().iter().filter(|(_, o)| o.is_ok()).count();
    let total = report.len();
    if total > 0 {
        out.push('\n');
    }
    out.push_str(&format!(
        "{} of {} link{} verified\n",
        verified,
        total,
        if total == 1 { "" } else { "s" }
    ));
    out
}

/// Render every endpoint of an [`Api`], marking the ones usable as links.
///
/// ```text
/// API  3 endpoints
/// ────────────────
///   link  GET     /hello        "hello" :> Get '[JSON] Int
///         POST    /bye          "bye" :> QueryParam "name" String :> Post '[JSON] Bool
/// ```
pub fn render_endpoints(api: &Api) -> String {
    let endpoints = api.endpoints();
    let total = endpoints.len();
    let header = format!("API  {} endpoint{}", total, if total == 1 { "" } else { "s" });
    let rule = "─".repeat(header.chars().count());
    let mut out = format!("{}\n{}\n", header, rule);

    let rows: Vec<(bool, String, String, String)> = endpoints
        .iter()
        .map(|ep| {
            (
                is_link(ep),
                method_of(ep),
                display_path(&path_pattern(ep)).to_string(),
                ep.to_string(),
            )
        })
        .collect();
    let path_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(0);

    for (linkable, method, path, route) in rows {
        out.push_str(&format!(
            "  {}  {:<6}  {:<path_width$}  {}\n",
            if linkable { "link" } else { "    " },
            method,
            path,
            route
        ));
    }
    out
}

/// Generate Rust source declaring one `pub const` per verified link.
///
/// Names are converted to `UPPER_SNAKE_CASE`; any character that is not
/// ASCII alphanumeric becomes `_`, and a leading digit is prefixed with `_`.
///
/// ```text
/// // @generated by linkcheck. Do not edit.
///
/// /// `greet`
/// pub const GREET: &str = "/hello";
/// ```
pub fn render_rust_module(table: &LinkTable) -> String {
    let mut out = String::from("// @generated by linkcheck. Do not edit.\n");
    for (name, link) in table.iter() {
        out.push('\n');
        out.push_str(&format!("/// `{}`\n", name));
        out.push_str(&format!(
            "pub const {}: &str = {:?};\n",
            const_name(name),
            link.as_str()
        ));
    }
    out
}

// --- helpers -----------------------------------------------------------------

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

fn method_of(route: &Route) -> String {
    let mut node = route;
    loop {
        match node {
            Route::Verb(v) => return v.method.to_string(),
            other => match other.rest() {
                Some(rest) => node = rest,
                None => return String::new(),
            },
        }
    }
}

// Path with captures shown as `{name}`; modifiers are skipped.
fn path_pattern(route: &Route) -> String {
    if is_link(route) {
        return render_link(route);
    }
    let mut out = String::new();
    let mut node = route;
    while let Some(rest) = node.rest() {
        match node {
            Route::Segment { literal, .. } => {
                out.push('/');
                out.push_str(literal);
            }
            Route::Capture { name, .. } => out.push_str(&format!("/{{{}}}", name)),
            _ => {}
        }
        node = rest;
    }
    out
}

fn const_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('_');
        }
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push('_');
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::LinkManifest;
    use crate::types::{ContentType::*, Verb};

    fn manifest() -> LinkManifest {
        LinkManifest {
            api: Route::alt(
                Route::path(["hello"], Verb::get([Json], "Int")),
                Route::segment(
                    "users",
                    Route::capture("id", "Int", Route::verb(Verb::delete())),
                ),
            ),
            links: [
                ("greet".to_string(), Route::path(["hello"], Verb::get([Json], "Int"))),
                ("gone".to_string(), Route::path(["users"], Verb::delete())),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn report_lists_each_link() {
        let report = manifest().check().unwrap();
        let rendered = render_report(&report);
        assert!(rendered.contains("ok   greet  /hello"));
        assert!(rendered.contains("err  gone   route \"users\" :> Delete is not an endpoint"));
        assert!(rendered.ends_with("1 of 2 links verified\n"));
    }

    #[test]
    fn endpoints_listing_marks_links() {
        let api = manifest().api().unwrap();
        let rendered = render_endpoints(&api);
        assert!(rendered.starts_with("API  2 endpoints\n"));
        assert!(rendered.contains("link  GET     /hello"));
        assert!(rendered.contains("DELETE  /users/{id}"));
    }

    #[test]
    fn path_pattern_keeps_segments_verbatim() {
        let route = Route::segment(
            "café menu",
            Route::capture("id", "Int", Route::verb(Verb::delete())),
        );
        assert_eq!(path_pattern(&route), "/café menu/{id}");
    }

    #[test]
    fn rust_module_declares_consts() {
        let mut m = manifest();
        m.links.remove("gone");
        m.links.insert(
            "userIndex".into(),
            Route::path(["hello"], Verb::get([Json], "Int")),
        );
        let table = m.verify().unwrap();
        let src = render_rust_module(&table);
        assert!(src.starts_with("// @generated"));
        assert!(src.contains("pub const GREET: &str = \"/hello\";"));
        assert!(src.contains("pub const USER_INDEX: &str = \"/hello\";"));
    }

    #[test]
    fn const_names() {
        assert_eq!(const_name("home"), "HOME");
        assert_eq!(const_name("user-profile"), "USER_PROFILE");
        assert_eq!(const_name("userProfile"), "USER_PROFILE");
        assert_eq!(const_name("404"), "_404");
        assert_eq!(const_name(""), "_");
    }
}
