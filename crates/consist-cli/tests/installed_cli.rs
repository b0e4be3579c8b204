//! Integration tests for `npm-consist installed` and `npm-consist version`.

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

fn npm_consist(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_npm-consist"));
    cmd.arg("--cwd").arg(dir).env_remove("RUST_LOG");
    cmd
}

fn add_package(root: &Path, entry: &str, manifest: &str) {
    let pkg_dir = root.join("node_modules").join(entry);
    fs::create_dir_all(&pkg_dir).unwrap();
    fs::write(pkg_dir.join("package.json"), manifest).unwrap();
}

#[test]
fn test_installed_sorted_plain() {
    let dir = tempfile::tempdir().unwrap();
    add_package(dir.path(), "left-pad", r#"{"name":"left-pad","version":"1.0.0"}"#);
    add_package(dir.path(), "@types/node", r#"{"name":"@types/node","version":"20.1.0"}"#);
    add_package(dir.path(), "anon", "{}");
    fs::create_dir_all(dir.path().join("node_modules/.bin")).unwrap();

    let output = npm_consist(dir.path()).arg("installed").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        ["@types/node@20.1.0", "anon", "left-pad@1.0.0"]
    );
}

#[test]
fn test_installed_json() {
    let dir = tempfile::tempdir().unwrap();
    add_package(dir.path(), "renamed", r#"{"name":"chalk","version":"2.0.0"}"#);

    let output = npm_consist(dir.path())
        .args(["--json", "ls"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], true);
    let packages = json["packages"].as_array().unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0]["name"], "chalk");
    assert_eq!(packages[0]["dir"], "renamed");
    assert_eq!(packages[0]["version"], "2.0.0");
    assert!(packages[0].get("manifest").is_none());
}

#[test]
fn test_installed_without_node_modules() {
    let dir = tempfile::tempdir().unwrap();

    let output = npm_consist(dir.path()).arg("installed").output().unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_installed_malformed_manifest_json_error() {
    let dir = tempfile::tempdir().unwrap();
    add_package(dir.path(), "broken", "{ nope");

    let output = npm_consist(dir.path())
        .args(["--json", "installed"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "CONSIST_MANIFEST_INVALID");
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();

    let output = npm_consist(dir.path()).arg("version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("npm-consist "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
