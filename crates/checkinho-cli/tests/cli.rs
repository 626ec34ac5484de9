use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn checkinho(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("checkinho").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home).env("HOME", config_home);
    cmd
}

fn touch(dir: &Path, name: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), b"%PDF-1.4\n").unwrap();
}

#[test]
fn verify_rejects_missing_folder() {
    let tmp = TempDir::new().unwrap();
    checkinho(tmp.path())
        .args(["verify", "/nonexistent/lote"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input folder not found"));
}

#[test]
fn verify_requires_an_ap_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("lote");
    touch(&dir, "OS.pdf");
    touch(&dir, "SICAF.pdf");

    checkinho(tmp.path())
        .arg("verify")
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No AP file found"));
}

#[test]
fn verify_reports_missing_sicaf() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("lote");
    touch(&dir, "OS.pdf");
    touch(&dir, "AP.pdf");

    checkinho(tmp.path())
        .arg("verify")
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing mandatory document: SICAF"));
}

#[test]
fn verify_rejects_unknown_check_field() {
    let tmp = TempDir::new().unwrap();
    checkinho(tmp.path())
        .args(["verify", ".", "--only", "valor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown check field"));
}

#[test]
fn batch_without_ap_folders_fails() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("envio");
    touch(&root.join("lote1"), "OS.pdf");

    checkinho(tmp.path())
        .arg("batch")
        .arg(&root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No folder with an AP file"));
}

#[test]
fn batch_writes_summary_and_lists_ignored_folders() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("envio");
    let out = tmp.path().join("relatorios");
    touch(&root.join("lote1"), "OS.pdf");
    touch(&root.join("lote1"), "AP.pdf");
    touch(&root.join("lote2"), "SICAF.pdf");

    checkinho(tmp.path())
        .arg("batch")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Folders ignored:   1"))
        .stdout(predicate::str::contains("lote2"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("name,status,checks,non_conformities,errors,error"));
    assert!(summary.contains("lote1,error,,,,missing mandatory document: SICAF"));
}

#[test]
fn extract_needs_a_known_type() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "nota.pdf");

    checkinho(tmp.path())
        .arg("extract")
        .arg(tmp.path().join("nota.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot tell the document type"));

    checkinho(tmp.path())
        .arg("extract")
        .arg(tmp.path().join("nota.pdf"))
        .args(["--type", "fatura"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown document type"));
}

#[test]
fn config_path_points_to_user_config_dir() {
    let tmp = TempDir::new().unwrap();
    checkinho(tmp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("checkinho"))
        .stdout(predicate::str::contains("not created"));
}

#[test]
fn config_init_then_get() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");

    checkinho(tmp.path())
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    checkinho(tmp.path())
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    checkinho(tmp.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "extraction.excluded_cnpj_prefixes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("16.088.593"));

    checkinho(tmp.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "extraction.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn batch_records_failed_runs_and_keeps_going() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("envio");
    let out = tmp.path().join("relatorios");
    touch(&root.join("lote1"), "AP.pdf");
    touch(&root.join("lote2"), "AP.pdf");

    checkinho(tmp.path())
        .arg("batch")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed folders:"))
        .stdout(predicate::str::contains("lote2: missing mandatory document: OS"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().skip(1).collect();
    assert_eq!(
        rows,
        vec![
            "lote1,error,,,,missing mandatory document: OS",
            "lote2,error,,,,missing mandatory document: OS",
        ]
    );
}
