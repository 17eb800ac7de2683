//! Integration tests for the `ck` CLI.
//!
//! Each test creates a temp checklist directory, runs `ck` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Get the path to the built `ck` binary.
fn ck_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("ck");
    path
}

/// Create a checklist in the given directory with the given items.
fn create_test_checklist(root: &Path, items: &[&str]) {
    let dir = root.join("checklist");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("checklist.toml"),
        r#"# Checklist settings
[checklist]
name = "groceries"

[behavior]
confirm_clear = true
"#,
    )
    .unwrap();
    if !items.is_empty() {
        run_ck_ok(root, &["add", &items.join("\n")]);
    }
}

/// Run `ck` with the given args in the given directory, returning (stdout, stderr, success).
fn run_ck(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(ck_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run ck");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `ck` expecting success, return stdout.
fn run_ck_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_ck(dir, args);
    if !success {
        panic!(
            "ck {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `ck` expecting failure, return stderr.
fn run_ck_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_ck(dir, args);
    if success {
        panic!("ck {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

/// Run `ck` with `input` piped to stdin, returning (stdout, success).
fn run_ck_stdin(dir: &Path, args: &[&str], input: &str) -> (String, bool) {
    let mut child = Command::new(ck_bin())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run ck");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        output.status.success(),
    )
}

/// Item texts in list order, read through `ck list --json`.
fn list_texts(dir: &Path) -> Vec<String> {
    let out = run_ck_ok(dir, &["list", "--filter", "all", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    parsed["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["text"].as_str().unwrap().to_string())
        .collect()
}

fn list_json(dir: &Path) -> serde_json::Value {
    let out = run_ck_ok(dir, &["list", "--filter", "all", "--json"]);
    serde_json::from_str(&out).unwrap()
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let project = tmp.path().join("weekend-trip");
    fs::create_dir_all(&project).unwrap();

    let out = run_ck_ok(&project, &["init"]);
    assert!(out.contains("Initialized checklist: Weekend Trip"));
    let config = fs::read_to_string(project.join("checklist/checklist.toml")).unwrap();
    assert!(config.contains("name = \"Weekend Trip\""));

    // Second init refuses without --force
    let err = run_ck_err(&project, &["init"]);
    assert!(err.contains("already exists"));

    let out = run_ck_ok(&project, &["init", "--force", "--name", "Trip"]);
    assert!(out.contains("Initialized checklist: Trip"));
}

#[test]
fn test_commands_outside_checklist_fail() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_ck_err(tmp.path(), &["list"]);
    assert!(err.contains("error:"));
    assert!(err.contains("ck init"));
}

// ---------------------------------------------------------------------------
// Add / list
// ---------------------------------------------------------------------------

#[test]
fn test_add_skips_blank_lines() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);

    let out = run_ck_ok(
        tmp.path(),
        &["add", "Buy milk\n\nWalk dog\n  \nCall mom"],
    );
    assert_eq!(out.lines().count(), 3);
    assert_eq!(list_texts(tmp.path()), vec!["Buy milk", "Walk dog", "Call mom"]);

    // Later adds append after existing items
    run_ck_ok(tmp.path(), &["add", "  Feed cat  "]);
    assert_eq!(
        list_texts(tmp.path()),
        vec!["Buy milk", "Walk dog", "Call mom", "Feed cat"]
    );
}

#[test]
fn test_add_from_stdin() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);

    let (_, success) = run_ck_stdin(tmp.path(), &["add", "--stdin"], "eggs\n\nbread\n");
    assert!(success);
    assert_eq!(list_texts(tmp.path()), vec!["eggs", "bread"]);
}

#[test]
fn test_add_nothing_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);

    let err = run_ck_err(tmp.path(), &["add", "   \n\n"]);
    assert!(err.contains("nothing to add"));
    assert!(list_texts(tmp.path()).is_empty());
}

#[test]
fn test_list_text_output() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["Buy milk", "Walk dog"]);
    run_ck_ok(tmp.path(), &["check", "2"]);

    let out = run_ck_ok(tmp.path(), &["list"]);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("[ ]  1. Buy milk  ("));
    assert!(lines[1].starts_with("[x]  2. Walk dog  ("));
    assert!(out.contains("1/2 completed (50%)"));

    let out = run_ck_ok(tmp.path(), &["list", "--filter", "completed"]);
    assert!(out.contains("Walk dog"));
    assert!(!out.contains("Buy milk"));

    let out = run_ck_ok(tmp.path(), &["list", "--filter", "active"]);
    assert!(out.contains("Buy milk"));
    assert!(!out.contains("Walk dog"));
}

#[test]
fn test_list_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);
    let out = run_ck_ok(tmp.path(), &["list"]);
    assert_eq!(out.trim(), "(empty)");

    create_test_checklist(tmp.path(), &["a"]);
    let out = run_ck_ok(tmp.path(), &["list", "--filter", "completed"]);
    assert!(out.starts_with("(no completed items)"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["Buy milk", "Walk dog"]);
    run_ck_ok(tmp.path(), &["toggle", "1"]);

    let parsed = list_json(tmp.path());
    assert_eq!(parsed["name"], "groceries");
    assert_eq!(parsed["filter"], "all");
    assert_eq!(parsed["items"][0]["position"], 1);
    assert_eq!(parsed["items"][0]["checked"], true);
    assert_eq!(parsed["progress"]["completed"], 1);
    assert_eq!(parsed["progress"]["total"], 2);
    assert_eq!(parsed["progress"]["percent"], 50);
}

// ---------------------------------------------------------------------------
// Toggle / check / edit
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_twice_restores() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["Buy milk"]);

    let out = run_ck_ok(tmp.path(), &["toggle", "1"]);
    assert!(out.starts_with("[x]"));
    let out = run_ck_ok(tmp.path(), &["toggle", "1"]);
    assert!(out.starts_with("[ ]"));
}

#[test]
fn test_check_by_id() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["Buy milk", "Walk dog"]);

    let parsed = list_json(tmp.path());
    let id = parsed["items"][1]["id"].as_str().unwrap().to_string();

    // Full id, then the short suffix shown in listings
    run_ck_ok(tmp.path(), &["check", &id]);
    assert_eq!(list_json(tmp.path())["items"][1]["checked"], true);
    let short = &id[id.len() - 8..];
    run_ck_ok(tmp.path(), &["uncheck", short]);
    assert_eq!(list_json(tmp.path())["items"][1]["checked"], false);

    // Checking twice is idempotent
    run_ck_ok(tmp.path(), &["check", "2"]);
    run_ck_ok(tmp.path(), &["check", "2"]);
    assert_eq!(list_json(tmp.path())["items"][1]["checked"], true);
}

#[test]
fn test_unknown_ref_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["Buy milk"]);

    let err = run_ck_err(tmp.path(), &["toggle", "5"]);
    assert!(err.contains("no item at position 5"));
    let err = run_ck_err(tmp.path(), &["toggle", "zzzz"]);
    assert!(err.contains("item not found"));
}

#[test]
fn test_edit_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["Buy milk"]);

    let out = run_ck_ok(tmp.path(), &["edit", "1", "  Buy oat milk "]);
    assert!(out.contains("Buy oat milk"));
    assert_eq!(list_texts(tmp.path()), vec!["Buy oat milk"]);

    let err = run_ck_err(tmp.path(), &["edit", "1", "   "]);
    assert!(err.contains("error:"));
    assert_eq!(list_texts(tmp.path()), vec!["Buy oat milk"]);
}

// ---------------------------------------------------------------------------
// Delete / move / clear
// ---------------------------------------------------------------------------

#[test]
fn test_rm_logs_recovery() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a", "b", "c"]);

    // Positions refer to the list before any removal
    let out = run_ck_ok(tmp.path(), &["rm", "1", "3"]);
    assert!(out.contains("deleted: a"));
    assert!(out.contains("deleted: c"));
    assert_eq!(list_texts(tmp.path()), vec!["b"]);

    let out = run_ck_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("delete"));
    assert!(out.contains("\"text\": \"c\""));

    // Both removals are one write and one recovery entry
    let out = run_ck_ok(tmp.path(), &["recovery", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["category"], "delete");
    assert_eq!(parsed[0]["fields"]["Count"], "2");
}

#[test]
fn test_mv_within_filter_keeps_hidden_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a", "b", "c", "d"]);
    run_ck_ok(tmp.path(), &["check", "2"]);
    run_ck_ok(tmp.path(), &["check", "4"]);

    // Active view is [a, c]; move a below c
    run_ck_ok(tmp.path(), &["mv", "1", "2", "--filter", "active"]);
    assert_eq!(list_texts(tmp.path()), vec!["b", "c", "a", "d"]);

    let err = run_ck_err(tmp.path(), &["mv", "1", "3", "--filter", "active"]);
    assert!(err.contains("out of range"));
}

#[test]
fn test_mv_full_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a", "b", "c"]);

    run_ck_ok(tmp.path(), &["mv", "3", "1"]);
    assert_eq!(list_texts(tmp.path()), vec!["c", "a", "b"]);
}

#[test]
fn test_clear_needs_confirmation() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a", "b"]);

    // No stdin: the prompt reads nothing and cancels
    let out = run_ck_ok(tmp.path(), &["clear"]);
    assert!(out.contains("cancelled"));
    assert_eq!(list_texts(tmp.path()).len(), 2);

    let (out, success) = run_ck_stdin(tmp.path(), &["clear"], "y\n");
    assert!(success);
    assert!(out.contains("cleared 2 items"));
    assert!(list_texts(tmp.path()).is_empty());

    let out = run_ck_ok(tmp.path(), &["clear", "--yes"]);
    assert!(out.contains("nothing to clear"));
}

#[test]
fn test_clear_json_on_empty_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);

    let out = run_ck_ok(tmp.path(), &["clear", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["cleared"], 0);
}

#[test]
fn test_clear_prompt_does_not_hold_lock() {
    use std::io::Read;

    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a", "b"]);

    let mut child = Command::new(ck_bin())
        .arg("clear")
        .current_dir(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run ck");

    // Wait for the prompt
    let mut stderr = child.stderr.take().unwrap();
    let mut seen = Vec::new();
    let mut byte = [0u8; 1];
    while !String::from_utf8_lossy(&seen).contains("[y/N]") {
        assert_eq!(stderr.read(&mut byte).unwrap(), 1, "ck exited before prompting");
        seen.push(byte[0]);
    }

    // Another writer gets through while the prompt is open
    run_ck_ok(tmp.path(), &["add", "c"]);

    child.stdin.take().unwrap().write_all(b"y\n").unwrap();
    let mut rest = String::new();
    stderr.read_to_string(&mut rest).unwrap();
    let status = child.wait().unwrap();
    assert!(!status.success());
    assert!(rest.contains("list changed"));
    assert_eq!(list_texts(tmp.path()), vec!["a", "b", "c"]);
}

#[test]
fn test_clear_yes_persists_empty_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a", "b", "c"]);

    let out = run_ck_ok(tmp.path(), &["clear", "--yes"]);
    assert!(out.contains("cleared 3 items"));

    let doc = fs::read_to_string(tmp.path().join("checklist/checklist.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&doc).unwrap();
    assert_eq!(parsed["version"], 2);
    assert!(parsed["items"].as_array().unwrap().is_empty());

    let out = run_ck_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("clear"));
}

#[test]
fn test_clear_without_confirm_setting() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a"]);
    run_ck_ok(tmp.path(), &["config", "confirm_clear", "false"]);

    let out = run_ck_ok(tmp.path(), &["clear"]);
    assert!(out.contains("cleared 1 items"));
}

// ---------------------------------------------------------------------------
// Progress / search
// ---------------------------------------------------------------------------

#[test]
fn test_progress() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);
    let out = run_ck_ok(tmp.path(), &["progress"]);
    assert!(out.contains("0/0 completed (0%)"));

    run_ck_ok(tmp.path(), &["add", "a\nb\nc"]);
    run_ck_ok(tmp.path(), &["check", "1"]);
    let out = run_ck_ok(tmp.path(), &["progress"]);
    assert!(out.contains("1/3 completed (33%)"));

    let out = run_ck_ok(tmp.path(), &["progress", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["completed"], 1);
    assert_eq!(parsed["total"], 3);
    assert_eq!(parsed["percent"], 33);
}

#[test]
fn test_search() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["Buy milk", "Walk dog", "Oat milk"]);

    let out = run_ck_ok(tmp.path(), &["search", "MILK"]);
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains(" 1. Buy milk"));
    assert!(out.contains(" 3. Oat milk"));

    let out = run_ck_ok(tmp.path(), &["search", "^walk", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let hits = parsed.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["position"], 2);
    assert_eq!(hits[0]["matches"][0][0], 0);
    assert_eq!(hits[0]["matches"][0][1], 4);
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

#[test]
fn test_export_import_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    create_test_checklist(&src, &["Buy milk", "Walk dog"]);
    create_test_checklist(&dst, &["Old item"]);
    run_ck_ok(&src, &["check", "2"]);

    let out = run_ck_ok(&src, &["export", "-o", "out.json"]);
    assert!(out.contains("exported 2 items to out.json"));

    let file = src.join("out.json");
    let out = run_ck_ok(&dst, &["import", file.to_str().unwrap()]);
    assert!(out.contains("imported 2 items (replaced 1)"));
    assert_eq!(list_json(&dst)["items"], list_json(&src)["items"]);

    // The replaced item went to the recovery log
    let out = run_ck_ok(&dst, &["recovery"]);
    assert!(out.contains("import"));
    assert!(out.contains("Old item"));
}

#[test]
fn test_export_default_name_and_stdout() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a"]);

    run_ck_ok(tmp.path(), &["export"]);
    let exported: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with("checklist-") && n.ends_with(".json"))
        .collect();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].len(), "checklist-2026-01-01.json".len());

    let out = run_ck_ok(tmp.path(), &["export", "-o", "-"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["version"], 2);
    assert_eq!(parsed["items"][0]["text"], "a");
}

#[test]
fn test_import_invalid_leaves_list_unchanged() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["keep me"]);
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

    for name in ["invalid_item.json", "future_version.json", "duplicate_ids.json"] {
        let file = fixtures.join(name);
        let err = run_ck_err(tmp.path(), &["import", file.to_str().unwrap()]);
        assert!(err.contains("import rejected"), "{}: {}", name, err);
        assert_eq!(list_texts(tmp.path()), vec!["keep me"]);
    }

    let garbage = tmp.path().join("garbage.json");
    fs::write(&garbage, "not json at all").unwrap();
    let err = run_ck_err(tmp.path(), &["import", garbage.to_str().unwrap()]);
    assert!(err.contains("not valid JSON"));
    assert_eq!(list_texts(tmp.path()), vec!["keep me"]);
}

#[test]
fn test_import_legacy_document() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);
    let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/legacy.json");

    let out = run_ck_ok(tmp.path(), &["import", file.to_str().unwrap()]);
    assert!(out.contains("imported 3 items (replaced 0)"));
    assert!(out.contains("2 items had no id"));
    assert_eq!(list_texts(tmp.path()), vec!["Buy milk", "Walk dog", "Call mom"]);
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[test]
fn test_corrupt_store_is_backed_up() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);
    let doc = tmp.path().join("checklist/checklist.json");
    fs::write(&doc, "{ broken").unwrap();

    let (stdout, stderr, success) = run_ck(tmp.path(), &["list"]);
    assert!(success);
    assert!(stderr.contains("warning:"));
    assert_eq!(stdout.trim(), "(empty)");
    assert_eq!(
        fs::read_to_string(tmp.path().join("checklist/checklist.json.bak")).unwrap(),
        "{ broken"
    );

    let out = run_ck_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("load"));
}

#[test]
fn test_legacy_store_gets_ids_on_open() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);
    let doc = tmp.path().join("checklist/checklist.json");
    fs::write(&doc, r#"[{"text": "Buy milk", "checked": true}]"#).unwrap();

    let first = list_json(tmp.path());
    let second = list_json(tmp.path());
    assert_eq!(first["items"][0]["text"], "Buy milk");
    assert_eq!(first["items"][0]["checked"], true);
    // The assigned id was written back, so it is stable
    assert_eq!(first["items"][0]["id"], second["items"][0]["id"]);
    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&doc).unwrap()).unwrap();
    assert_eq!(stored["version"], 2);
}

#[test]
fn test_storage_key_changes_file_name() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);
    run_ck_ok(tmp.path(), &["config", "storage.key", "trip"]);
    run_ck_ok(tmp.path(), &["add", "passport"]);
    assert!(tmp.path().join("checklist/trip.json").exists());
}

// ---------------------------------------------------------------------------
// Config / discovery
// ---------------------------------------------------------------------------

#[test]
fn test_config_get_and_set() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a", "b"]);
    run_ck_ok(tmp.path(), &["check", "1"]);

    let out = run_ck_ok(tmp.path(), &["config"]);
    assert!(out.contains("name = groceries"));
    assert!(out.contains("default_filter = all"));

    let out = run_ck_ok(tmp.path(), &["config", "default_filter", "active"]);
    assert_eq!(out.trim(), "default_filter = active");
    assert_eq!(run_ck_ok(tmp.path(), &["config", "default_filter"]).trim(), "active");

    // `ck list` now defaults to the active view
    let out = run_ck_ok(tmp.path(), &["list"]);
    assert!(out.contains(" 2. b"));
    assert!(!out.contains(" 1. a"));

    // Comments in the config survive edits
    let config = fs::read_to_string(tmp.path().join("checklist/checklist.toml")).unwrap();
    assert!(config.contains("# Checklist settings"));
}

#[test]
fn test_config_rejects_bad_input() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &[]);

    let err = run_ck_err(tmp.path(), &["config", "colour", "red"]);
    assert!(err.contains("unknown config key"));
    let err = run_ck_err(tmp.path(), &["config", "default_filter", "someday"]);
    assert!(err.contains("invalid value"));
    let err = run_ck_err(tmp.path(), &["config", "storage.key", "../evil"]);
    assert!(err.contains("invalid value"));
}

#[test]
fn test_dir_flag_and_discovery_from_subdir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let project = tmp.path().join("project");
    let nested = project.join("a/b");
    fs::create_dir_all(&nested).unwrap();
    create_test_checklist(&project, &["from root"]);

    // Discovery walks up from a subdirectory
    assert_eq!(list_texts(&nested), vec!["from root"]);

    // -C points at another directory
    run_ck_ok(tmp.path(), &["-C", project.to_str().unwrap(), "add", "via -C"]);
    assert_eq!(list_texts(&project), vec!["from root", "via -C"]);
}

#[test]
fn test_recovery_prune_all() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_checklist(tmp.path(), &["a"]);
    run_ck_ok(tmp.path(), &["rm", "1"]);

    let out = run_ck_ok(tmp.path(), &["recovery", "prune", "--all"]);
    assert!(out.contains("pruned 1 entries"));
    let out = run_ck_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("recovery log is empty"));
}
