use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!(
        "{}/../conformance/fixtures/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

fn linkcheck() -> Command {
    let mut cmd = Command::cargo_bin("linkcheck").expect("failed to start bin");
    cmd.env_remove("LINKCHECK_FAIL_FAST").env_remove("RUST_LOG");
    cmd
}

#[test]
fn verified_manifest_exits_zero() {
    linkcheck()
        .arg("check")
        .arg(fixture("greeting"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 link verified"));
}

#[test]
fn json_output_lists_links() {
    linkcheck()
        .args(["check", "--json"])
        .arg(fixture("greeting"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hello\": \"/hello\""));
}

#[test]
fn rejected_link_exits_one() {
    linkcheck()
        .arg("check")
        .arg(fixture("stale"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("err  userById"));

    linkcheck()
        .arg("generate")
        .arg(fixture("stale"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn malformed_stdin_exits_two() {
    linkcheck()
        .args(["check", "-"])
        .write_stdin("{")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("linkcheck: failed to parse manifest"));
}

#[test]
fn missing_file_exits_two() {
    linkcheck()
        .args(["routes", "no-such-manifest.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read no-such-manifest.json"));
}

#[test]
fn generate_writes_constants() {
    linkcheck()
        .arg("generate")
        .arg(fixture("bookstore"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pub const ALL_BOOKS_XML: &str = \"/api/v1/books\";",
        ));
}
