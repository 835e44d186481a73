use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_docgen")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name))
        .unwrap_or_else(|e| panic!("missing output {}: {}", name, e))
}

// -- file mode --

#[test]
fn file_mode_creates_index_and_class_pages() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("widget.h"))
        .arg(fixture_path("widget.cc"))
        .assert()
        .success();

    let index = read(&dir, "index.html");
    assert!(index.contains("<title>Project widgets</title>"));
    assert!(index.contains("<a href=\"Widget.html\">Widget</a></td><td>Something that can be drawn.</td>"));
    assert!(index.contains("No Global functions or variables"));

    let widget = read(&dir, "Widget.html");
    assert!(widget.contains("<h1>Widget::draw()</h1>"));
    assert!(widget.contains("<a href=\"#paint\">draw()</a>"));
    assert!(widget.contains("Calls Canvas::flush when done."));
    assert!(widget.contains("<dt>SeeAlso:</dt>"));
    assert!(widget.contains("<dt>Note:</dt>"));
    assert!(widget.contains("<h3>Widget member variables</h3>"));
    assert!(widget.contains("static int count"));
    assert!(widget.contains("bool operator==( const Widget&amp; other ) const"));
}

#[test]
fn header_and_implementation_merge() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-f", "json"])
        .arg(fixture_path("widget.h"))
        .arg(fixture_path("widget.cc"))
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_str(&read(&dir, "index.json")).unwrap();
    let classes = doc["classes"].as_array().unwrap();
    assert_eq!(classes.len(), 1);
    let functions = classes[0]["functions"].as_array().unwrap();
    let draw: Vec<_> = functions.iter().filter(|f| f["name"] == "draw").collect();
    assert_eq!(draw.len(), 1);
    let prototypes = draw[0]["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["keyword"] == "*Prototype")
        .count();
    assert_eq!(prototypes, 2);
}

#[test]
fn globals_go_to_index() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("globals.cc"))
        .assert()
        .success();

    let index = read(&dir, "index.html");
    assert!(index.contains("<h3>Global functions</h3>"));
    assert!(index.contains("<h1>::version()</h1>"));
    assert!(index.contains("const char* version()"));
    assert!(index.contains("int debugLevel = 0"));
    assert!(!dir.path().join(".html").exists());
}

#[test]
fn directory_input_is_scanned() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path(""))
        .assert()
        .success();

    assert!(dir.path().join("Widget.html").exists());
    assert!(dir.path().join("Survivor.html").exists());
}

#[test]
fn file_mode_requires_output() {
    cmd()
        .arg(fixture_path("widget.h"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn invalid_format_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "xml"])
        .arg(fixture_path("widget.h"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// -- error policy --

#[test]
fn missing_input_is_skipped() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("does-not-exist.h"))
        .arg(fixture_path("widget.h"))
        .assert()
        .success()
        .stderr(predicate::str::contains("cannot read"));

    assert!(dir.path().join("Widget.html").exists());
}

#[test]
fn invalid_glob_input_is_skipped() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("a[b.h"))
        .arg(fixture_path("widget.h"))
        .assert()
        .success()
        .stderr(predicate::str::contains("cannot read"));

    assert!(dir.path().join("Widget.html").exists());
}

#[test]
fn class_named_index_does_not_replace_project_page() {
    let dir = TempDir::new().unwrap();
    let mut input = NamedTempFile::with_suffix(".h").unwrap();
    input
        .write_all(b"/*: Project: demo */\n/*: class index\n An index class.\n*/\n")
        .unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(input.path().to_str().unwrap())
        .assert()
        .success();

    assert!(read(&dir, "index.html").contains("<title>Project demo</title>"));
    assert!(read(&dir, "index_2.html").contains("An index class."));
}

#[test]
fn syntax_error_is_reported_and_recovered() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("broken.cc"))
        .assert()
        .success()
        .stderr(predicate::str::contains("expected MemberName"));

    assert!(dir.path().join("Survivor.html").exists());
}

#[test]
fn unwritable_output_is_fatal() {
    let not_a_dir = NamedTempFile::new().unwrap();

    cmd()
        .args(["-o", not_a_dir.path().to_str().unwrap()])
        .arg(fixture_path("widget.h"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write"));
}

#[test]
fn source_without_blocks_yields_empty_index() {
    let dir = TempDir::new().unwrap();
    let mut input = NamedTempFile::with_suffix(".cc").unwrap();
    input
        .write_all(b"/* plain comment */\nint main() { return 0; }\n")
        .unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(input.path().to_str().unwrap())
        .assert()
        .success();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(read(&dir, "index.html").contains("No Global functions or variables"));
}

// -- stdin mode --

#[test]
fn stdin_html_format() {
    let input = "/*: class Foo\n A foo.\n*/\n/*: Foo::bar */\nvoid bar();\n";

    let assert = cmd().write_stdin(input).assert().success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output.matches("<!DOCTYPE html>").count(), 2);
    assert!(output.contains("<h1>Foo::bar()</h1>"));
}

#[test]
fn stdin_json_format() {
    let input = "/*: Function: Foo::Bar\n Description: does X.\n*/\nvoid Bar();\n";

    let assert = cmd().args(["-f", "json"]).write_stdin(input).assert().success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
    let bar = &doc["classes"][0]["functions"][0];
    assert_eq!(bar["full_name"], "Foo::Bar()");
    assert_eq!(bar["attributes"][1]["keyword"], "Description");
    assert_eq!(bar["attributes"][1]["value"], "does X.");
    assert_eq!(bar["attributes"][2]["value"], "void Bar()");
}
