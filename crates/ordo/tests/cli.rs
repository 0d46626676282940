//! Tests driving the `ordo` binary over files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn ordo(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ordo"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run ordo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

#[test]
fn check_ordered_file() {
    let dir = workspace(&[("rta.rb", "class RTA\n  def self.a; end\n  def self.b; end\nend\n")]);
    let output = ordo(dir.path(), &["check", "rta.rb"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "1 file(s) inspected, no offenses detected");
}

#[test]
fn check_reports_offense() {
    let dir = workspace(&[("rta.rb", "class RTA\n  def self.b; end\n  def self.a; end\nend\n")]);
    let output = ordo(dir.path(), &["check", "rta.rb"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(
        stdout.contains(
            "rta.rb:3:3: [Correctable] [OrderedMethods] Methods should be sorted in alphabetical order."
        ),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("1 file(s) inspected, 1 offense(s) detected, 1 offense(s) correctable"));
}

#[test]
fn check_walks_directories_in_path_order() {
    let dir = workspace(&[
        ("lib/b.rb", "def d; end\ndef c; end\n"),
        ("lib/a.rb", "def b; end\ndef a; end\n"),
        ("lib/tasks/build.rake", "def f; end\ndef e; end\n"),
        ("lib/notes.txt", "def z; end\ndef y; end\n"),
    ]);
    let output = ordo(dir.path(), &["check", "lib"]);

    let stdout = stdout(&output);
    let a = stdout.find("a.rb:2:1").expect("a.rb offense");
    let b = stdout.find("b.rb:2:1").expect("b.rb offense");
    let rake = stdout.find("build.rake:2:1").expect("rake offense");
    assert!(a < b && b < rake);
    assert!(!stdout.contains("notes.txt"));
    assert!(stdout.contains("3 file(s) inspected, 3 offense(s) detected"));
}

#[test]
fn check_prints_alias_note() {
    let dir = workspace(&[("alias.rb", "def b; end\nalias x b\ndef a; end\n")]);
    let output = ordo(dir.path(), &["check", "alias.rb"]);

    let stdout = stdout(&output);
    assert!(stdout.contains("alias.rb:3:1: [OrderedMethods] Methods should be sorted"));
    assert!(stdout.contains(
        "Won't reorder b and a because alias for b would be declared before its method definition."
    ));
    assert!(stdout.contains("0 offense(s) correctable"));
}

#[test]
fn check_reports_syntax_errors() {
    let dir = workspace(&[("broken.rb", "class Foo\n  def a(\n")]);
    let output = ordo(dir.path(), &["check", "broken.rb"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("syntax error"));
}

#[test]
fn fix_rewrites_file() {
    let dir = workspace(&[("swap.rb", "class Foo\n  def c; end\n  def b; end\n  def a; end\nend\n")]);
    let output = ordo(dir.path(), &["fix", "swap.rb"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        fs::read_to_string(dir.path().join("swap.rb")).unwrap(),
        "class Foo\n  def a; end\n  def b; end\n  def c; end\nend\n"
    );
    assert!(stdout(&output).contains("fix(es) applied in 1 file(s)"));

    let output = ordo(dir.path(), &["check", "swap.rb"]);
    assert!(output.status.success());
}

#[test]
fn fix_diff_leaves_file_untouched() {
    let source = "def b; end\ndef a; end\n";
    let dir = workspace(&[("swap.rb", source)]);
    let output = ordo(dir.path(), &["fix", "swap.rb", "--diff"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("--- a/swap.rb"));
    assert!(stdout.contains("+++ b/swap.rb"));
    assert!(stdout.contains("-def b; end"));
    assert!(stdout.contains("+def a; end"));
    assert!(stdout.contains("1 fix(es) available in 1 file(s)"));
    assert_eq!(fs::read_to_string(dir.path().join("swap.rb")).unwrap(), source);
}

#[test]
fn fix_reports_remaining_offenses() {
    let source = "def b; end\nalias x b\ndef a; end\n";
    let dir = workspace(&[("alias.rb", source)]);
    let output = ordo(dir.path(), &["fix", "alias.rb"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("No fixes to apply"));
    assert!(stderr(&output).contains("1 offense(s) could not be fixed automatically"));
    assert_eq!(fs::read_to_string(dir.path().join("alias.rb")).unwrap(), source);
}

#[test]
fn discovered_config_is_used() {
    let dir = workspace(&[
        ("ordo.toml", "[OrderedMethods]\nIgnoredMethods = [\"initialize\"]\n"),
        ("init.rb", "def z; end\ndef initialize; end\n"),
    ]);
    let output = ordo(dir.path(), &["check", "init.rb"]);
    assert!(output.status.success(), "stdout: {}", stdout(&output));
}

#[test]
fn explicit_config_check_mode() {
    let dir = workspace(&[
        ("conf/strict.toml", "[fix.rules]\nOrderedMethods = \"check\"\n"),
        ("swap.rb", "def b; end\ndef a; end\n"),
    ]);
    let output = ordo(dir.path(), &["check", "swap.rb", "--config", "conf/strict.toml"]);

    let stdout = stdout(&output);
    assert!(stdout.contains("swap.rb:2:1: [OrderedMethods]"));
    assert!(!stdout.contains("[Correctable]"));
}

#[test]
fn disabled_rule_warns() {
    let dir = workspace(&[
        ("ordo.toml", "[OrderedMethods]\nEnabled = false\n"),
        ("swap.rb", "def b; end\ndef a; end\n"),
    ]);
    let output = ordo(dir.path(), &["check", "swap.rb"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("No rules enabled"));
}

#[test]
fn invalid_style_fails() {
    let dir = workspace(&[
        ("ordo.toml", "[OrderedMethods]\nEnforcedStyle = \"by_length\"\n"),
        ("swap.rb", "def b; end\ndef a; end\n"),
    ]);
    let output = ordo(dir.path(), &["check", "swap.rb"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains(
        "Invalid \"EnforcedStyle\" config for Layout/OrderedMethods. Expected one of: alphabetical"
    ));
}

#[test]
fn missing_config_file_fails() {
    let dir = workspace(&[("swap.rb", "def b; end\ndef a; end\n")]);
    let output = ordo(dir.path(), &["check", "swap.rb", "--config", "nope.toml"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load config from nope.toml"));
}
