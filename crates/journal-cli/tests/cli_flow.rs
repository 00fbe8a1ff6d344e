use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::tempdir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_journal"))
}

#[test]
fn test_init_creates_minimal_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("general.jnl");

    let output = Command::new(bin())
        .args([
            "init",
            path.to_str().unwrap(),
            "--name",
            "General",
            "--abbreviation",
            "GEN",
            "--no-input",
        ])
        .output()
        .expect("run init");
    assert!(output.status.success(), "init failed: {:?}", output);

    assert_eq!(
        fs::read_to_string(&path).expect("read journal"),
        "General - GEN\nPage 1\n"
    );
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("general.jnl");
    fs::write(&path, "precious").expect("seed file");

    let output = Command::new(bin())
        .args([
            "init",
            path.to_str().unwrap(),
            "--name",
            "General",
            "--no-input",
        ])
        .output()
        .expect("run init");
    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "precious");
}

#[test]
fn test_add_appends_balanced_pair() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("general.jnl");
    fs::write(&path, "General - GEN\nPage 1\n").expect("seed journal");

    let output = Command::new(bin())
        .args([
            "add",
            "--journal",
            path.to_str().unwrap(),
            "--date",
            "01.01.2024",
            "--account",
            "Cash",
            "--offset-account",
            "Revenue",
            "--kind",
            "dr",
            "--amount",
            "100",
            "--currency",
            "usd",
            "--no-input",
        ])
        .output()
        .expect("run add");
    assert!(output.status.success(), "add failed: {:?}", output);

    assert_eq!(
        fs::read_to_string(&path).expect("read journal"),
        "General - GEN\n\
         Page 1\n\
         GEN-1-1 01.01.2024 Cash Dr 100 usd\n\
         GEN-1-2 01.01.2024 Revenue Cr 100 usd\n"
    );

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("GEN-1-1"));
    assert!(stdout.contains("GEN-1-2"));
}

#[test]
fn test_add_rejects_duplicate_account() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("general.jnl");
    fs::write(&path, "General - GEN\nPage 1\n").expect("seed journal");

    let output = Command::new(bin())
        .args([
            "add",
            "--journal",
            path.to_str().unwrap(),
            "--date",
            "01.01.2024",
            "--account",
            "Cash",
            "--offset-account",
            "CASH",
            "--kind",
            "dr",
            "--amount",
            "100",
            "--no-input",
        ])
        .output()
        .expect("run add");
    assert!(!output.status.success());

    // Failed append leaves the file untouched.
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "General - GEN\nPage 1\n"
    );
}

#[test]
fn test_show_plain_matches_canonical_encoding() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("general.jnl");
    let text = "General - GEN\n\
                Page 1\n\
                GEN-1-1 01.01.2024 Cash Dr 100 usd\n\
                GEN-1-2 01.01.2024 Revenue Cr 100 usd Pr:4 Description: sale\n";
    fs::write(&path, text).expect("seed journal");

    let output = Command::new(bin())
        .args([
            "show",
            "--journal",
            path.to_str().unwrap(),
            "--format",
            "plain",
        ])
        .output()
        .expect("run show");
    assert!(output.status.success(), "show failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), text);
}

#[test]
fn test_show_json_round_trips_the_model() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("general.jnl");
    fs::write(
        &path,
        "General - GEN\nPage 1\nGEN-1-1 01.01.2024 Cash Dr 100 usd\n",
    )
    .expect("seed journal");

    let output = Command::new(bin())
        .args(["show", "--journal", path.to_str().unwrap(), "--json"])
        .output()
        .expect("run show");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(value["abbreviation"], "GEN");
    assert_eq!(value["pages"][0][0]["account"], "Cash");
    assert_eq!(value["pages"][0][0]["kind"], "debit");
}

#[test]
fn test_check_reports_ok_and_failure() {
    let dir = tempdir().expect("create temp dir");
    let good = dir.path().join("good.jnl");
    fs::write(&good, "General - GEN\nPage 1\n").expect("seed journal");

    let output = Command::new(bin())
        .args(["check", "--journal", good.to_str().unwrap()])
        .output()
        .expect("run check");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Syntax check: OK"));

    let bad = dir.path().join("bad.jnl");
    fs::write(&bad, "General - GEN\nPage 1\nGEN-1-1 01.01.2024 Cash on hand\n")
        .expect("seed journal");

    let output = Command::new(bin())
        .args(["check", "--journal", bad.to_str().unwrap()])
        .output()
        .expect("run check");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Account name does not end"));
}

#[test]
fn test_journal_path_from_environment() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("general.jnl");
    fs::write(&path, "General - GEN\nPage 1\n").expect("seed journal");

    let output = Command::new(bin())
        .arg("check")
        .env("JOURNAL_PATH", path.to_str().unwrap())
        .output()
        .expect("run check");
    assert!(output.status.success(), "check failed: {:?}", output);
}
