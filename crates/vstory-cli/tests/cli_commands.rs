//! End-to-end tests for the `vstory` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Create a temp directory with a small test corpus.
fn test_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "automotive/after_sales_service/1_warranty_repair_request_en.txt",
        "user: My screen keeps rebooting.\nassistant: Let me check your warranty.\n",
    );
    write(
        root,
        "automotive/after_sales_service/2_recall_notice_inquiry_english.txt",
        "user: Is my airbag recalled?\n",
    );
    write(
        root,
        "automotive/after_sales_service/abc_name_en.txt",
        "malformed",
    );
    write(root, "automotive/drafts/notes.txt", "no schema");
    write(root, "banking/card_services/1_lost_card_report_en.txt", "user: Lost card.\n");
    write(root, "_archive/old/1_old_story_en.txt", "archived");
    write(root, "{DOMAIN}/{TOPIC}/1_template_en.txt", "template");
    dir
}

/// A corpus with no malformed or ambiguous files.
fn clean_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "retail/returns/1_refund_request_en.txt",
        "user: I want a refund.\n",
    );
    write(
        dir.path(),
        "retail/returns/1_refund_request_de.txt",
        "user: Ich möchte mein Geld zurück.\n",
    );
    dir
}

fn vstory(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vstory").unwrap();
    cmd.env_remove("VSTORY_ROOT")
        .env_remove("RUST_LOG")
        .args(["--root", root.to_str().unwrap()]);
    cmd
}

// ---------------------------------------------------------------------------
// domains
// ---------------------------------------------------------------------------

#[test]
fn domains_lists_valid_domains() {
    let dir = test_corpus();
    vstory(dir.path())
        .arg("domains")
        .assert()
        .success()
        .stdout("automotive\nbanking\n");
}

#[test]
fn domains_reads_root_from_env() {
    let dir = test_corpus();
    Command::cargo_bin("vstory")
        .unwrap()
        .env("VSTORY_ROOT", dir.path())
        .arg("domains")
        .assert()
        .success()
        .stdout(predicate::str::contains("automotive"));
}

#[test]
fn domains_empty_corpus() {
    let dir = TempDir::new().unwrap();
    vstory(dir.path())
        .arg("domains")
        .assert()
        .success()
        .stdout(predicate::str::contains("No domains found"));
}

#[test]
fn domains_missing_root_fails() {
    let dir = TempDir::new().unwrap();
    vstory(&dir.path().join("missing"))
        .arg("domains")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corpus root not found"));
}

// ---------------------------------------------------------------------------
// topics
// ---------------------------------------------------------------------------

#[test]
fn topics_lists_valid_topics() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["topics", "automotive"])
        .assert()
        .success()
        .stdout("after_sales_service\n");
}

#[test]
fn topics_unknown_domain_is_empty() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["topics", "aerospace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No topics found"));
}

// ---------------------------------------------------------------------------
// dialogues
// ---------------------------------------------------------------------------

#[test]
fn dialogues_shows_table() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["dialogues", "automotive", "after_sales_service"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("warranty_repair_request")
                .and(predicate::str::contains("recall_notice_inquiry"))
                .and(predicate::str::contains("2_recall_notice_inquiry_english.txt"))
                .and(predicate::str::contains("2 stories"))
                .and(predicate::str::contains("abc_name").not()),
        );
}

#[test]
fn dialogues_missing_topic() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["dialogues", "automotive", "nonexistent_topic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No stories found"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_by_seq() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["show", "automotive", "after_sales_service", "--seq", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("warranty_repair_request")
                .and(predicate::str::contains("en (english)"))
                .and(predicate::str::contains("My screen keeps rebooting")),
        );
}

#[test]
fn show_by_name_meta_only() {
    let dir = test_corpus();
    vstory(dir.path())
        .args([
            "show",
            "automotive",
            "after_sales_service",
            "--name",
            "recall_notice_inquiry",
            "--meta-only",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("seq:      2")
                .and(predicate::str::contains(
                    "file:     2_recall_notice_inquiry_english.txt",
                ))
                .and(predicate::str::contains("airbag").not()),
        );
}

#[test]
fn show_json() {
    let dir = test_corpus();
    let output = vstory(dir.path())
        .args(["show", "automotive", "after_sales_service", "-s", "1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON output");
    assert_eq!(json["domain"], "automotive");
    assert_eq!(json["topic"], "after_sales_service");
    assert_eq!(json["seq_num"], 1);
    assert_eq!(json["dialogue_name"], "warranty_repair_request");
    assert_eq!(json["language_code"], "en");
    assert!(
        json["raw_text"]
            .as_str()
            .unwrap()
            .starts_with("user: My screen")
    );
}

#[test]
fn show_without_constraint_fails() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["show", "automotive", "after_sales_service"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "either a sequence number or a dialogue name must be provided",
        ));
}

#[test]
fn show_unknown_topic_fails() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["show", "automotive", "nonexistent_topic", "--seq", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("topic not found"));
}

#[test]
fn show_no_match_fails() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["show", "automotive", "after_sales_service", "--seq", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("9_*_*.txt"));
}

#[test]
fn show_malformed_target_fails() {
    let dir = test_corpus();
    vstory(dir.path())
        .args(["show", "automotive", "after_sales_service", "--name", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("abc_name_en.txt"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_clean_corpus() {
    let dir = clean_corpus();
    vstory(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("1 domain, 1 topic, 2 stories")),
        );
}

#[test]
fn check_reports_malformed_files() {
    let dir = test_corpus();
    vstory(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("abc_name_en.txt")
                .and(predicate::str::contains("1 issue found")),
        );
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_file_name() {
    let dir = TempDir::new().unwrap();
    vstory(dir.path())
        .args(["parse", "12_warranty_repair_request_english.txt"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("seq:      12")
                .and(predicate::str::contains("dialogue: warranty_repair_request"))
                .and(predicate::str::contains("file:     12_warranty_repair_request_en.txt")),
        );
}

#[test]
fn parse_stem_rejects_bad_sequence() {
    let dir = TempDir::new().unwrap();
    vstory(dir.path())
        .args(["parse", "abc_name_en"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sequence number"));
}
