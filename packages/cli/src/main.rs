//! `linkcheck`: verify link manifests against their API description.
//!
//! Provides four subcommands:
//!
//! - **`check`**: build every link in a manifest; exit 1 if any is rejected.
//! - **`render`**: print a per-link report without failing.
//! - **`routes`**: list every endpoint of the manifest's API.
//! - **`generate`**: verify, then emit a Rust module of link constants.
//!
//! All subcommands read a JSON manifest from a file path or from stdin (`-`).
//! Intended to run as a build step so that a link which no longer matches
//! the API breaks the build.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | every link verified |
//! | 1 | at least one link rejected |
//! | 2 | unreadable or malformed input |

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use routelink::render::{render_endpoints, render_report, render_rust_module};
use routelink::{LinkManifest, ManifestError, ManifestReport};
use tracing_subscriber::EnvFilter;

/// linkcheck: statically verified links
///
/// Check that every link an application emits is a real endpoint of its API.
#[derive(Parser)]
#[command(name = "linkcheck", version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(
        long,
        global = true,
        env = "LINKCHECK_LOG",
        default_value = "routelink=warn,linkcheck=info",
        value_name = "FILTER"
    )]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify every link in a manifest.
    ///
    /// Exits 0 if all links are endpoints of the API, 1 otherwise.
    /// Pass `-` as MANIFEST to read from stdin.
    Check {
        /// Path to a JSON manifest, or `-` for stdin.
        manifest: PathBuf,

        /// Stop at the first rejected link.
        #[arg(long, env = "LINKCHECK_FAIL_FAST")]
        fail_fast: bool,

        /// On success, print the verified links as a JSON object.
        #[arg(long)]
        json: bool,
    },

    /// Print a report of every link in a manifest.
    ///
    /// Always exits 0 unless the manifest itself is malformed.
    Render {
        /// Path to a JSON manifest, or `-` for stdin.
        manifest: PathBuf,
    },

    /// List every endpoint of the manifest's API.
    ///
    /// Endpoints that can be linked to directly are marked `link`.
    Routes {
        /// Path to a JSON manifest, or `-` for stdin.
        manifest: PathBuf,
    },

    /// Verify every link, then emit a Rust module with one constant per link.
    ///
    /// Examples:
    ///   linkcheck generate links.json -o src/links.rs
    ///   linkcheck generate links.json > "$OUT_DIR/links.rs"
    Generate {
        /// Path to a JSON manifest, or `-` for stdin.
        manifest: PathBuf,

        /// Write to FILE instead of stdout.
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Check {
            manifest,
            fail_fast,
            json,
        } => {
            let m = load_manifest(&manifest);
            let report = if fail_fast {
                m.check_fail_fast()
            } else {
                m.check()
            }
            .unwrap_or_else(|e| fatal(&e.to_string()));

            if !report.is_ok() {
                eprint!("{}", render_report(&report));
                process::exit(1);
            }

            let count = report.len();
            let table = report.into_table().unwrap_or_else(|e| fatal(&e.to_string()));
            if json {
                match serde_json::to_string_pretty(&table) {
                    Ok(s) => println!("{}", s),
                    Err(e) => fatal(&format!("failed to serialise links: {}", e)),
                }
            } else if count == 1 {
                println!("1 link verified");
            } else {
                println!("all {} links verified", count);
            }
        }

        Command::Render { manifest } => {
            let report = check_all(&load_manifest(&manifest));
            print!("{}", render_report(&report));
        }

        Command::Routes { manifest } => {
            let api = load_manifest(&manifest)
                .api()
                .unwrap_or_else(|e| fatal(&e.to_string()));
            print!("{}", render_endpoints(&api));
        }

        Command::Generate { manifest, output } => {
            let report = check_all(&load_manifest(&manifest));
            let table = match report.clone().into_table() {
                Ok(table) => table,
                Err(ManifestError::Rejected { .. }) => {
                    eprint!("{}", render_report(&report));
                    process::exit(1);
                }
                Err(e) => fatal(&e.to_string()),
            };
            let source = render_rust_module(&table);
            match output {
                Some(path) => {
                    fs::write(&path, source).unwrap_or_else(|e| {
                        fatal(&format!("failed to write {}: {}", path.display(), e))
                    });
                    tracing::info!("wrote {} links to {}", table.len(), path.display());
                }
                None => print!("{}", source),
            }
        }
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// Read and validate a manifest, exiting with an error message if it cannot
/// be parsed or contains a malformed route.
fn load_manifest(path: &PathBuf) -> LinkManifest {
    let json = read_input(path);
    let manifest = LinkManifest::from_json(&json).unwrap_or_else(|e| fatal(&e.to_string()));
    tracing::debug!(
        links = manifest.links.len(),
        "loaded manifest from {}",
        path.display()
    );
    manifest
}

fn check_all(manifest: &LinkManifest) -> ManifestReport {
    manifest.check().unwrap_or_else(|e| fatal(&e.to_string()))
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("linkcheck: {}", msg);
    process::exit(2);
}
