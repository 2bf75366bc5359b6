use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn slotforge_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_slotforge"))
}

fn run(dir: &Path, input: &str, args: &[&str]) -> Output {
    let input_path = dir.join("input.csv");
    fs::write(&input_path, input).expect("write input");
    slotforge_cmd()
        .arg(&input_path)
        .arg(dir.join("output"))
        .args(args)
        .output()
        .expect("failed to run slotforge")
}

fn written(dir: &Path) -> String {
    fs::read_to_string(dir.join("output")).expect("output file")
}

const PLAIN: &str = "\
Assignment,A,B,C
entity1,1,2,3
entity2,2,1,3
entity3,3,3,1
";

const COUNTS: &str = "\
Assignment,Counts,Ada,Grace,Linus
Counts,,2,1,1
Morning,2,1,2,1
Evening,1,2,1,4
Night,1,1,3,2
";

#[test]
fn plain_layout_writes_csv() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), PLAIN, &["--no-custom-counts", "--quiet"]);

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(written(dir.path()), "entity1,A,1\nentity2,B,1\nentity3,C,1\n");
}

#[test]
fn report_lists_pairings() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), PLAIN, &["--no-custom-counts"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Person entity1 is assigned A with priority 1"));
    assert!(stdout.contains("3 pairings, total cost 3"));
}

#[test]
fn custom_counts_as_json() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), COUNTS, &["--format", "json", "--quiet"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&written(dir.path())).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    let morning = rows.iter().filter(|r| r["entity"] == "Morning").count();
    assert_eq!(morning, 2);
}

#[test]
fn infeasible_exits_2() {
    // Linus marks every shift unavailable.
    let sheet = "\
Assignment,Counts,Ada,Linus
Counts,,1,1
Morning,1,1,4
Night,1,2,4
";
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), sheet, &["--forbid-unavailable", "--quiet"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Linus"), "stderr={stderr}");
    assert!(!dir.path().join("output").exists());
}

#[test]
fn bad_cell_exits_1_with_position() {
    let sheet = "Assignment,A,B\nx,1,maybe\n";
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), sheet, &["--no-custom-counts", "--quiet"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("row 2, column 3"), "stderr={stderr}");
}

#[test]
fn config_file_sets_bounds() {
    let sheet = "\
Assignment,Counts,P1,P2,P3,P4,P5,P6
Counts,,1,1,1,1,1,1
Lab,4,1,2,3,1,2,4
";
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("solver.toml");
    fs::write(&config, "bound_mode = \"at_least\"\n").unwrap();

    let output = run(
        dir.path(),
        sheet,
        &["--config", config.to_str().unwrap(), "--quiet"],
    );
    assert!(output.status.success());
    assert_eq!(written(dir.path()).lines().count(), 6);

    // The flag wins over the file.
    let output = run(
        dir.path(),
        sheet,
        &["--config", config.to_str().unwrap(), "--bounds", "at-most", "--quiet"],
    );
    assert!(output.status.success());
    assert_eq!(written(dir.path()).lines().count(), 4);
}

#[test]
fn missing_input_exits_1() {
    let dir = TempDir::new().unwrap();
    let output = slotforge_cmd()
        .arg(dir.path().join("absent.csv"))
        .arg(dir.path().join("output"))
        .arg("--quiet")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
