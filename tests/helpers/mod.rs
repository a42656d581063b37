#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use snapbox::cmd::{cargo_bin, Command};

/// Every variable revlink might read. Tests start from a clean slate and set what they need.
const ENVIRONMENT: &[&str] = &[
    "ATLASSIAN_ID",
    "ATLASSIAN_TOKEN",
    "GITHUB_TOKEN",
    "ECODESAMSUNG_TOKEN",
    "REVLINK_CONFIG",
    "RUST_LOG",
];

pub const FIXTURE_CONFIG: &str = "tests/fixtures/revlink.toml";

/// A `revlink` command with no credentials in its environment, pointed at the fixture config so
/// that nothing from the developer's own config directory leaks in.
pub fn revlink() -> Command {
    let mut command = Command::new(cargo_bin!("revlink"));
    for key in ENVIRONMENT {
        command = command.env_remove(key);
    }
    command.env("REVLINK_CONFIG", FIXTURE_CONFIG)
}

/// Same as [`revlink`], with Atlassian credentials set.
pub fn revlink_with_atlassian() -> Command {
    revlink()
        .env("ATLASSIAN_ID", "me@example.com")
        .env("ATLASSIAN_TOKEN", "not-a-real-token")
}

/// The whole of stderr, for asserting on diagnostics whose layout depends on the terminal.
pub fn stderr_of(assert: &snapbox::cmd::OutputAssert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}
