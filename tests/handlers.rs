//! Test `revlink handlers`, which shows the order queries are matched in.

use std::{fs::write, path::Path};

use helpers::*;

mod helpers;

#[test]
fn default_order() {
    // Arrange
    let source_path = Path::new("tests/handlers");

    // Act
    let assert = revlink().arg("handlers").assert();

    // Assert
    assert
        .success()
        .stdout_eq_path(source_path.join("stdout.txt"));
}

/// Hosts are listed in config order, each with a pull request then an issue handler.
#[test]
fn configured_hosts() {
    // Arrange
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("revlink.toml");
    write(
        &config_path,
        r#"
[atlassian]
url = "https://example.atlassian.net"

[[github]]
name = "Internal"
url = "https://git.example.com"
token_env = "EXAMPLE_TOKEN"
"#,
    )
    .unwrap();

    // Act
    let assert = revlink()
        .arg("handlers")
        .arg("--config")
        .arg(&config_path)
        .assert();

    // Assert
    assert.success().stdout_eq(
        "1. Confluence page on Atlassian (example.atlassian.net)
2. Jira issue on Atlassian (example.atlassian.net)
3. pull request on Internal (git.example.com)
4. issue on Internal (git.example.com)
",
    );
}
