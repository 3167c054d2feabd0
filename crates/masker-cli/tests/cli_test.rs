use std::path::{Path, PathBuf};
use std::process::{Command, Output};

struct Workspace {
    dir: tempfile::TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        // Keep any per-user config out of the tests
        let config = dir.path().join("masker.toml");
        std::fs::write(&config, "").unwrap();
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn masker(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_masker"))
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .env_remove("MASKER_CONFIG")
            .env("RUST_LOG", "warn")
            .output()
            .unwrap()
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help_exits_zero() {
    let ws = Workspace::new();
    let out = ws.masker(&["-h"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--fields"));
}

#[test]
fn test_missing_fields_is_config_error() {
    let ws = Workspace::new();
    let input = ws.write("people.csv", "name\nAlice\n");
    let out = ws.masker(&[arg(&input)]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_seeded_csv_to_stdout_is_reproducible() {
    let ws = Workspace::new();
    let input = ws.write("people.csv", "name,email\nAlice,alice@x.com\n");
    let args = [
        arg(&input),
        "--fields",
        "name",
        "--file_type",
        "csv",
        "--seed",
        "42",
    ];

    let first = ws.masker(&args);
    let second = ws.masker(&args);
    assert_eq!(first.status.code(), Some(0));
    assert_eq!(first.stdout, second.stdout);

    let stdout = String::from_utf8(first.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "name,email");
    assert!(lines[1].ends_with(",alice@x.com"));
    assert!(!lines[1].starts_with("Alice,"));
}

#[test]
fn test_unknown_extension_exits_3_without_output() {
    let ws = Workspace::new();
    let input = ws.write("people.xlsx", "name\nAlice\n");
    let output = ws.path("masked.xlsx");

    let out = ws.masker(&[arg(&input), arg(&output), "--fields", "name"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(!output.exists());
}

#[test]
fn test_unknown_column_exits_1() {
    let ws = Workspace::new();
    let input = ws.write("people.csv", "name,email\nAlice,alice@x.com\n");
    let output = ws.path("masked.csv");

    let out = ws.masker(&[arg(&input), arg(&output), "--fields", "ssn"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_exits_2() {
    let ws = Workspace::new();
    let input = ws.path("missing.csv");
    let out = ws.masker(&[arg(&input), "--fields", "name"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_invalid_locale_exits_1() {
    let ws = Workspace::new();
    let input = ws.write("people.csv", "name\nAlice\n");
    let out = ws.masker(&[arg(&input), "--fields", "name", "--locale", "xx_XX"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_short_row_reported_in_summary() {
    let ws = Workspace::new();
    let input = ws.write(
        "people.csv",
        "name,email\nAlice,alice@x.com\nBob\nCarol,carol@x.com\n",
    );
    let output = ws.path("masked.csv");

    let out = ws.masker(&[
        arg(&input),
        "-o",
        arg(&output),
        "--fields",
        "name",
        "--seed",
        "1",
        "--summary-json",
    ]);
    assert_eq!(out.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("\"skipped\":1"));
    assert!(stderr.contains("\"records\":2"));

    let masked = std::fs::read_to_string(&output).unwrap();
    assert_eq!(masked.lines().count(), 3);
    assert!(masked.contains("carol@x.com"));
}

#[test]
fn test_text_mode_with_locale() {
    let ws = Workspace::new();
    let input = ws.write("notes.txt", "Contact: alice@x.com\n");
    let output = ws.path("masked.txt");

    let out = ws.masker(&[
        arg(&input),
        arg(&output),
        "--fields",
        r"email=Contact: (\S+)",
        "--locale",
        "fr_FR",
        "--seed",
        "3",
    ]);
    assert_eq!(out.status.code(), Some(0));

    let masked = std::fs::read_to_string(&output).unwrap();
    assert!(masked.starts_with("Contact: "));
    assert!(!masked.contains("alice@x.com"));
    assert!(masked.ends_with('\n'));
}
