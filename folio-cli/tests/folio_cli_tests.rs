//! End-to-end tests for the folio binary
//!
//! Each test runs against its own temporary project passed with `--root`.
//! Stdin is never a terminal here, so every command runs non-interactively.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FOLIO_ENV: [&str; 6] = [
    "FOLIO_ROOT",
    "FOLIO_CONTENT_DIR",
    "FOLIO_FALLBACK_CONTENT_DIR",
    "FOLIO_RECORD_FILE",
    "FOLIO_MAX_SLUG_LENGTH",
    "FOLIO_DEFAULT_AUTHOR",
];

/// Project with an empty content directory
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("content")).unwrap();
    temp
}

fn folio(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    for key in FOLIO_ENV {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd.arg("--root").arg(root);
    cmd
}

fn create(root: &Path, date: &str, title: &str, extra: &[&str]) {
    folio(root)
        .args(["new", "--date", date, "--title", title])
        .args(extra)
        .assert()
        .success();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn test_new_writes_dated_record() {
    let temp = project();

    folio(temp.path())
        .args(["new", "--date", "2024-03-05", "--title", "Hello World"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "content/2024/03/05/01-hello-world",
        ));

    assert_eq!(
        read(temp.path(), "content/2024/03/05/01-hello-world/article.md"),
        "---\ntitle: \"Hello World\"\nstatus: draft\n---\n# Hello World\nBy Your Name\n\n"
    );
}

#[test]
fn test_new_same_day_gets_next_ordinal() {
    let temp = project();
    create(temp.path(), "2024-03-05", "Hello World", &[]);
    create(temp.path(), "2024-03-05", "Hello World", &[]);

    assert!(temp
        .path()
        .join("content/2024/03/05/02-hello-world/article.md")
        .is_file());
}

#[test]
fn test_new_with_all_fields_and_site_author() {
    let temp = project();
    fs::write(
        temp.path().join("content/site.json"),
        r#"{"author": "Ada Lovelace"}"#,
    )
    .unwrap();

    create(
        temp.path(),
        "2024-01-10",
        "Borrowing Basics",
        &[
            "--slug",
            "borrowing",
            "--status",
            "review",
            "--summary",
            "Ownership without tears.",
            "--series",
            "rust-101",
            "--tags",
            "Rust, Memory Safety, rust",
        ],
    );

    assert_eq!(
        read(temp.path(), "content/2024/01/10/01-borrowing/article.md"),
        "---\ntitle: \"Borrowing Basics\"\nstatus: review\nseries: rust-101\nsummary: \"Ownership without tears.\"\ntags:\n  - rust\n  - memory-safety\n---\n# Borrowing Basics\nBy Ada Lovelace\n\n"
    );
}

#[test]
fn test_new_invalid_date_writes_nothing() {
    let temp = project();

    folio(temp.path())
        .args(["new", "--date", "2024-02-30", "--title", "Leap"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid date"));

    assert_eq!(fs::read_dir(temp.path().join("content")).unwrap().count(), 0);
}

#[test]
fn test_new_without_title_fails_when_not_interactive() {
    let temp = project();

    folio(temp.path())
        .args(["new", "--date", "2024-03-05"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Title is required"));
}

#[test]
fn test_new_unknown_status_falls_back_to_draft() {
    let temp = project();

    folio(temp.path())
        .args([
            "new",
            "--date",
            "2024-03-05",
            "--title",
            "Pending",
            "--status",
            "pending",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid status 'pending'"));

    let text = read(temp.path(), "content/2024/03/05/01-pending/article.md");
    assert!(text.contains("\nstatus: draft\n"));
}

#[test]
fn test_new_without_content_directory_fails() {
    let temp = TempDir::new().unwrap();

    folio(temp.path())
        .args(["new", "--date", "2024-03-05", "--title", "Hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing content directory"));

    assert!(!temp.path().join("content").exists());
}

#[test]
fn test_edit_updates_fields_and_clears_tags() {
    let temp = project();
    create(
        temp.path(),
        "2024-03-05",
        "Hello World",
        &["--tags", "rust, web", "--series", "intro"],
    );

    folio(temp.path())
        .args([
            "edit",
            "content/2024/03/05/01-hello-world",
            "--status",
            "published",
            "--tags",
            "-",
            "--series",
            "-",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "content/2024/03/05/01-hello-world/article.md",
        ));

    assert_eq!(
        read(temp.path(), "content/2024/03/05/01-hello-world/article.md"),
        "---\ntitle: \"Hello World\"\nstatus: published\n---\n# Hello World\nBy Your Name\n\n"
    );
}

#[test]
fn test_edit_by_published_url() {
    let temp = project();
    create(temp.path(), "2024-03-05", "Hello World", &[]);

    folio(temp.path())
        .args([
            "edit",
            "https://my-blog.com/2024/03/05/01-hello-world/",
            "--title",
            "Hello Again",
        ])
        .assert()
        .success();

    let text = read(temp.path(), "content/2024/03/05/01-hello-world/article.md");
    assert!(text.starts_with("---\ntitle: \"Hello Again\"\n"));
}

#[test]
fn test_edit_replaces_body_from_stdin() {
    let temp = project();
    create(temp.path(), "2024-03-05", "Hello World", &[]);

    folio(temp.path())
        .args(["edit", "2024/03/05/01-hello-world"])
        .write_stdin("# Hello World\n\nRewritten from a pipe.\n\n\n")
        .assert()
        .success();

    assert_eq!(
        read(temp.path(), "content/2024/03/05/01-hello-world/article.md"),
        "---\ntitle: \"Hello World\"\nstatus: draft\n---\n# Hello World\n\nRewritten from a pipe.\n"
    );
}

#[test]
fn test_edit_missing_record_fails() {
    let temp = project();

    folio(temp.path())
        .args(["edit", "content/2024/01/01/01-nothing", "--status", "review"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Record not found"));
}

#[test]
fn test_edit_without_input_fails() {
    let temp = project();

    folio(temp.path())
        .arg("edit")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Provide a record path"));
}

#[test]
fn test_find_lists_newest_first_with_annotations() {
    let temp = project();
    create(
        temp.path(),
        "2024-01-10",
        "Borrowing Basics",
        &["--status", "published", "--tags", "rust"],
    );
    create(temp.path(), "2024-03-05", "Lifetimes and Borrowing", &[]);

    folio(temp.path())
        .args(["find", "borrowing"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Found 2 match(es):\nLifetimes and Borrowing\n  content/2024/03/05/01-lifetimes-and-borrowing/article.md | status: draft\nBorrowing Basics\n  content/2024/01/10/01-borrowing-basics/article.md | status: published | tags: rust\n",
        ));
}

#[test]
fn test_find_status_filter_and_limit() {
    let temp = project();
    create(temp.path(), "2024-01-01", "Rust One", &["--status", "published"]);
    create(temp.path(), "2024-01-02", "Rust Two", &["--status", "published"]);
    create(temp.path(), "2024-01-03", "Rust Three", &[]);

    folio(temp.path())
        .args(["find", "rust", "--status", "published", "--limit=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 match(es):"))
        .stdout(predicate::str::contains("Rust Two"))
        .stdout(predicate::str::contains("Rust One").not())
        .stdout(predicate::str::contains("Rust Three").not());
}

#[test]
fn test_find_json_output() {
    let temp = project();
    create(temp.path(), "2024-03-05", "Hello World", &["--tags", "rust"]);

    let output = folio(temp.path())
        .args(["find", "hello", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Hello World");
    assert_eq!(entries[0]["status"], "draft");
    assert_eq!(entries[0]["tags"][0], "rust");
    assert_eq!(
        entries[0]["path"],
        "content/2024/03/05/01-hello-world/article.md"
    );
}

#[test]
fn test_find_no_matches_is_success() {
    let temp = project();

    folio(temp.path())
        .args(["find", "zebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches for \"zebra\"."));
}

#[test]
fn test_find_without_query_fails() {
    let temp = project();

    folio(temp.path())
        .arg("find")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Provide a search term"));
}

#[test]
fn test_domain_updates_site_settings() {
    let temp = project();
    let site = temp.path().join("content/site.json");
    fs::write(&site, r#"{"author": "Ada", "title": "Notes"}"#).unwrap();

    folio(temp.path())
        .args(["domain", "https://my-blog.com/about"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- siteUrl: https://my-blog.com"))
        .stdout(predicate::str::contains("- customDomain: my-blog.com"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&site).unwrap()).unwrap();
    assert_eq!(json["customDomain"], "my-blog.com");
    assert_eq!(json["siteUrl"], "https://my-blog.com");
    assert_eq!(json["title"], "Notes");
    assert_eq!(json["author"], "Ada");
}

#[test]
fn test_domain_without_site_settings_fails() {
    let temp = project();

    folio(temp.path())
        .args(["domain", "my-blog.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("site.json"));
}

#[test]
fn test_root_from_environment() {
    let temp = project();

    let mut cmd = Command::cargo_bin("folio").unwrap();
    for key in FOLIO_ENV {
        cmd.env_remove(key);
    }
    cmd.env("FOLIO_ROOT", temp.path())
        .args(["new", "--date", "2024-03-05", "--title", "From Env"])
        .assert()
        .success();

    assert!(temp
        .path()
        .join("content/2024/03/05/01-from-env/article.md")
        .is_file());
}

#[test]
fn test_completion_generation() {
    let temp = project();

    folio(temp.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

#[test]
fn test_no_command_prints_help() {
    let temp = project();

    folio(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
