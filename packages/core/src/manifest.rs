//! Link manifests: one API description plus the named links an application
//! wants to emit into it.
//!
//! A manifest is checked ahead of time, from a build script or the
//! `linkcheck` CLI, so a link that drifts out of the API fails the build
//! instead of shipping.
//!
//! ```json
//! {
//!   "api": { "kind": "alt", "left": { ... }, "right": { ... } },
//!   "links": {
//!     "home": { "kind": "segment", "literal": "hello", "rest": { ... } }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::Api;
use crate::link::{Link, LinkError};
use crate::types::Route;
use crate::validation::{validate_route, RouteError};

/// Errors returned when loading or verifying a [`LinkManifest`].
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid API description: {0}")]
    InvalidApi(RouteError),

    #[error("invalid route for link {name:?}: {source}")]
    InvalidLink { name: String, source: RouteError },

    #[error(
        "{count} of {total} links rejected: {names}",
        count = .failures.len(),
        names = summarize(.failures)
    )]
    Rejected {
        total: usize,
        failures: Vec<(String, LinkError)>,
    },
}

/// An API description and the link targets declared against it, keyed by
/// name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkManifest {
    pub api: Route,

    #[serde(default)]
    pub links: BTreeMap<String, Route>,
}

impl LinkManifest {
    /// Parse a manifest from JSON and check every tree in it is well-formed.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: LinkManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check the API and every link target are well-formed trees.
    pub fn validate(&self) -> Result<(), ManifestError> {
        validate_route(&self.api).map_err(ManifestError::InvalidApi)?;
        for (name, route) in &self.links {
            validate_route(route).map_err(|source| ManifestError::InvalidLink {
                name: name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// The API as an [`Api`].
    pub fn api(&self) -> Result<Api, ManifestError> {
        Api::new(self.api.clone()).map_err(ManifestError::InvalidApi)
    }

    /// Try to build every link, collecting each outcome.
    pub fn check(&self) -> Result<ManifestReport, ManifestError> {
        let api = self.api()?;
        let outcomes = self
            .links
            .iter()
            .map(|(name, route)| {
                let outcome = api.link(route);
                match &outcome {
                    Ok(link) => tracing::trace!(%name, %link, "link verified"),
                    Err(e) => tracing::trace!(%name, error = %e, "link rejected"),
                }
                (name.clone(), outcome)
            })
            .collect();
        Ok(ManifestReport { outcomes })
    }

    /// Like [`check`](Self::check), but stops at the first rejected link.
    pub fn check_fail_fast(&self) -> Result<ManifestReport, ManifestError> {
        let api = self.api()?;
        let mut outcomes = Vec::with_capacity(self.links.len());
        for (name, route) in &self.links {
            let outcome = api.link(route);
            let failed = outcome.is_err();
            outcomes.push((name.clone(), outcome));
            if failed {
                tracing::debug!(%name, "stopping at first rejected link");
                break;
            }
        }
        Ok(ManifestReport { outcomes })
    }

    /// Build every link, succeeding only if all of them pass.
    pub fn verify(&self) -> Result<LinkTable, ManifestError> {
        self.check()?.into_table()
    }
}

/// Per-link outcomes of [`LinkManifest::check`], in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestReport {
    outcomes: Vec<(String, Result<Link, LinkError>)>,
}

impl ManifestReport {
    pub fn outcomes(&self) -> &[(String, Result<Link, LinkError>)] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Whether every checked link was built.
    pub fn is_ok(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| o.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &LinkError)> {
        self.outcomes
            .iter()
            .filter_map(|(name, o)| o.as_ref().err().map(|e| (name.as_str(), e)))
    }

    /// The verified links, or [`ManifestError::Rejected`] listing every
    /// failure.
    pub fn into_table(self) -> Result<LinkTable, ManifestError> {
        let total = self.outcomes.len();
        let mut links = BTreeMap::new();
        let mut failures = Vec::new();
        for (name, outcome) in self.outcomes {
            match outcome {
                Ok(link) => {
                    links.insert(name, link);
                }
                Err(e) => failures.push((name, e)),
            }
        }
        if failures.is_empty() {
            Ok(LinkTable { links })
        } else {
            Err(ManifestError::Rejected { total, failures })
        }
    }
}

/// Every link of a manifest, all verified. Only produced by
/// [`LinkManifest::verify`] / [`ManifestReport::into_table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkTable {
    links: BTreeMap<String, Link>,
}

impl LinkTable {
    pub fn get(&self, name: &str) -> Option<&Link> {
        self.links.get(name)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterate over `(name, link)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.links.iter().map(|(n, l)| (n.as_str(), l))
    }
}

fn summarize(failures: &[(String, LinkError)]) -> String {
    let names: Vec<&str> = failures.iter().map(|(n, _)| n.as_str()).collect();
    names.join(", ")
}

// --- tests -------------------------------------------------------------------
