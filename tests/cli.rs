#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn folio_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("folio"));
    cmd.env_remove("FOLIO_ROOT").arg("--root").arg(root);
    cmd
}

fn site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let certs = temp.path().join("content").join("certificates");
    fs::create_dir_all(&certs).unwrap();

    fs::write(
        certs.join("aws.mdx"),
        "---\ntitle: \"AWS Cloud Practitioner\"\npublishedAt: \"2024-01-01\"\nsummary: \"Cloud basics\"\nverificationLink: \"https://example.com/v/1\"\n---\n\nFirst line\nsecond line\n",
    )
    .unwrap();
    fs::write(
        certs.join("k8s.mdx"),
        "---\ntitle: \"CKA\"\npublishedAt: \"2024-06-01\"\nsummary: \"Kubernetes admin\"\n---\n\nBody\n",
    )
    .unwrap();
    fs::write(
        certs.join("broken.mdx"),
        "---\ntitle: Broken\nsummary: \"He said \"hi\"\"\n---\n",
    )
    .unwrap();
    temp
}

#[test]
fn list_prints_posts_newest_first() {
    let temp = site();
    let output = folio_cmd(temp.path()).arg("list").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let posts: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let slugs: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, ["k8s", "aws"]);
    assert_eq!(posts[1]["metadata"]["verificationLink"], "https://example.com/v/1");
    assert_eq!(posts[0]["metadata"]["image"], "");
}

#[test]
fn list_of_missing_collection_is_empty() {
    let temp = TempDir::new().unwrap();
    folio_cmd(temp.path())
        .args(["--collection", "nowhere", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn show_renders_body() {
    let temp = site();
    folio_cmd(temp.path())
        .args(["show", "aws", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>First line<br />"));
}

#[test]
fn show_unknown_slug_fails() {
    let temp = site();
    folio_cmd(temp.path())
        .args(["show", "broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no post found for slug"));
}

#[test]
fn check_reports_counts() {
    let temp = site();
    folio_cmd(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("ok    aws.mdx"))
        .stdout(predicate::str::contains("FAIL  broken.mdx"))
        .stdout(predicate::str::contains("Results: 2/3 files are valid"));
}

#[test]
fn check_passes_clean_collection() {
    let temp = site();
    fs::remove_file(temp.path().join("content/certificates/broken.mdx")).unwrap();
    folio_cmd(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Results: 2/2 files are valid"));
}

#[test]
fn report_totals_files() {
    let temp = site();
    fs::create_dir_all(temp.path().join("public")).unwrap();
    fs::write(temp.path().join("public/big.png"), vec![0u8; 2048]).unwrap();

    folio_cmd(temp.path())
        .args(["report", "--threshold", "1024"])
        .arg(temp.path().join("public"))
        .assert()
        .success()
        .stdout(predicate::str::contains("big.png: 2KB"))
        .stdout(predicate::str::contains("Total files: 1"));
}

#[test]
fn contact_validates_stdin() {
    let temp = TempDir::new().unwrap();
    folio_cmd(temp.path())
        .arg("contact")
        .write_stdin(r#"{"name":"Ada","email":"ada@example.com","message":"Hello"}"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("200\n"));

    folio_cmd(temp.path())
        .arg("contact")
        .write_stdin(r#"{"name":"Ada","email":"not-an-email","message":"Hello"}"#)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid email format"));
}
