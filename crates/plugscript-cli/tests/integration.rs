//! Integration tests for plugscript

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCRIPT: &str = r#"
plugin(() => {
    name("Greeter");
    version("1.0");
    package("dev.greeter");
});

command("hello", (sender) => {
    description("Say hello");
    sender.sendMessage(`Hello ${sender.getName()}`);
});

command("homes", (sender) => {
    let homes = data.getArray("homes");
    for (let i = 0; i < homes.length; i++) {
        sender.sendMessage(homes[i]);
    }
});

event("playerJoin", (event) => {
    console.log("joined");
});
"#;

fn fixture_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("plugscript.toml")
}

fn plugscript_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("plugscript");
    cmd.env("PLUGSCRIPT_CONFIG", fixture_config_path());
    cmd
}

fn write_script(dir: &Path, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("plugin.js");
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn test_version() {
    plugscript_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("plugscript"));
}

#[test]
fn test_help() {
    plugscript_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bukkit plugin translator"));
}

#[test]
fn test_invalid_command() {
    plugscript_cmd().arg("invalid").assert().failure();
}

#[test]
fn test_translate_writes_sources_and_manifest() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let script = write_script(temp_dir.path(), SCRIPT)?;
    let out_dir = temp_dir.path().join("out");

    plugscript_cmd()
        .arg("translate")
        .arg(&script)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success();

    let manifest = fs::read_to_string(out_dir.join("plugin.yml"))?;
    assert!(manifest.contains("main: dev.greeter.Main"));
    assert!(manifest.contains("usage: /homes"));

    let main = fs::read_to_string(out_dir.join("dev/greeter/Main.java"))?;
    assert!(main.contains("equalsIgnoreCase(\"hello\")"));
    assert!(main.contains("for (int i = 0; i < homes.size(); i++) {"));
    assert!(main.contains("sender.sendMessage(homes.get(i));"));
    assert!(main.contains("public static class DataHandler {"));

    assert!(out_dir.join("dev/greeter/Hello.java").exists());
    assert!(out_dir.join("dev/greeter/Homes.java").exists());
    Ok(())
}

#[test]
fn test_zero_commands_is_fatal_and_writes_nothing() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let script = write_script(temp_dir.path(), "event(\"playerJoin\", (e) => {});")?;
    let out_dir = temp_dir.path().join("out");

    plugscript_cmd()
        .arg("build")
        .arg(&script)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commands found"));

    assert!(!out_dir.exists());
    Ok(())
}

#[test]
fn test_missing_input_is_fatal() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    plugscript_cmd()
        .arg("translate")
        .arg(temp_dir.path().join("missing.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
    Ok(())
}

#[test]
fn test_build_with_missing_toolchain_still_completes() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let script = write_script(temp_dir.path(), SCRIPT)?;
    let out_dir = temp_dir.path().join("out");

    plugscript_cmd()
        .arg("build")
        .arg(&script)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished in"));

    // Sources are cleaned up before packaging; the manifest stays
    assert!(out_dir.join("plugin.yml").exists());
    assert!(!out_dir.join("dev/greeter/Main.java").exists());
    Ok(())
}

#[test]
fn test_build_no_package_keeps_sources() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let script = write_script(temp_dir.path(), SCRIPT)?;
    let out_dir = temp_dir.path().join("out");

    plugscript_cmd()
        .arg("build")
        .arg(&script)
        .arg("-o")
        .arg(&out_dir)
        .arg("--no-package")
        .assert()
        .success();

    assert!(out_dir.join("dev/greeter/Main.java").exists());
    Ok(())
}

#[test]
fn test_check_prints_summary() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let script = write_script(temp_dir.path(), SCRIPT)?;

    plugscript_cmd()
        .arg("check")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Say hello"))
        .stdout(predicate::str::contains(
            "org.bukkit.event.player.PlayerJoinEvent",
        ));
    Ok(())
}

#[test]
fn test_check_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let script = write_script(temp_dir.path(), SCRIPT)?;

    let output = plugscript_cmd()
        .arg("check")
        .arg(&script)
        .arg("--json")
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["plugin"]["name"], "Greeter");
    assert_eq!(value["commands"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["rewrite"]["symbols"]["lists"][0], "homes");
    Ok(())
}

#[test]
fn test_config_show() {
    plugscript_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("javac-path"));
}

#[test]
fn test_config_set_and_get() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("plugscript.toml");

    cargo_bin_cmd!("plugscript")
        .env("PLUGSCRIPT_CONFIG", &config_path)
        .args(["config", "set", "server-jar", "paper.jar"])
        .assert()
        .success();

    cargo_bin_cmd!("plugscript")
        .env("PLUGSCRIPT_CONFIG", &config_path)
        .args(["config", "get", "server-jar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("paper.jar"));

    assert!(fs::read_to_string(&config_path)?.contains("server-jar = \"paper.jar\""));
    Ok(())
}

#[test]
fn test_config_unknown_key() {
    plugscript_cmd()
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
