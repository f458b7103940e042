//! Integration tests for the structconv binary
//!
//! Each test runs the compiled binary against files in a temporary
//! directory and inspects its exit status, output and persisted reports.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

fn run_structconv(reports_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_structconv"))
        .arg("--reports-dir")
        .arg(reports_dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute structconv")
}

fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn read_report(path: PathBuf) -> Value {
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing report {}: {}", path.display(), e));
    serde_json::from_str(&text).unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

mod convert {
    use super::*;

    #[test]
    fn test_convert_writes_report_and_result() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let input = create_test_file(&dir, "note.xml", "<note><to>Ann</to></note>");

        let output = run_structconv(
            &reports,
            &["convert", "--src", "xml", "--dst", "json", path_str(&input)],
        );
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Successfully converted XML to JSON"));

        let report = read_report(reports.join("convert_1.json"));
        assert_eq!(report["status"], "success");
        assert_eq!(report["operation"], "convert");
        assert!(report["timestamp"].is_string());
        assert!(report["elapsed_ms"].is_u64());

        let result = fs::read_to_string(reports.join("result_convert_1.json")).unwrap();
        let result: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(result, serde_json::json!({"note": {"to": "Ann"}}));
    }

    #[test]
    fn test_reports_are_numbered() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let input = create_test_file(&dir, "a.xml", "<a>1</a>");
        let args = ["convert", "--src", "xml", "--dst", "json", path_str(&input)];

        assert!(run_structconv(&reports, &args).status.success());
        assert!(run_structconv(&reports, &args).status.success());

        assert!(reports.join("convert_1.json").exists());
        assert!(reports.join("convert_2.json").exists());
        assert!(reports.join("result_convert_2.json").exists());
        assert!(!reports.join("convert_3.json").exists());
    }

    #[test]
    fn test_malformed_input_fails_without_result() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let input = create_test_file(&dir, "bad.xml", "To nie jest nawet XML <tag");

        let output = run_structconv(
            &reports,
            &["convert", "--src", "xml", "--dst", "json", path_str(&input)],
        );
        assert!(!output.status.success());

        let report = read_report(reports.join("convert_1.json"));
        assert_eq!(report["status"], "error");
        assert!(report["details"]
            .as_str()
            .unwrap()
            .starts_with("XML Parsing Error"));
        assert!(!reports.join("result_convert_1.json").exists());
    }

    #[test]
    fn test_unsupported_pair_fails() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let input = create_test_file(&dir, "a.json", r#"{"a": 1}"#);

        let output = run_structconv(
            &reports,
            &["convert", "--src", "json", "--dst", "xml", path_str(&input)],
        );
        assert!(!output.status.success());

        let report = read_report(reports.join("convert_1.json"));
        assert_eq!(report["elapsed_ms"], 0);
        assert_eq!(report["details"], "Unsupported conversion pair: json->xml");
    }

    #[test]
    fn test_plain_output() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let input = create_test_file(&dir, "a.xml", "<a><b>1</b></a>");

        let output = run_structconv(
            &reports,
            &["--plain", "convert", "--src", "xml", "--dst", "json", path_str(&input)],
        );
        assert!(output.status.success());
        let result = fs::read_to_string(reports.join("result_convert_1.json")).unwrap();
        assert_eq!(result, r#"{"a":{"b":"1"}}"#);
    }

    #[test]
    fn test_missing_input_file_fails() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let missing = dir.path().join("nope.xml");

        let output = run_structconv(
            &reports,
            &["convert", "--src", "xml", "--dst", "json", path_str(&missing)],
        );
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read input file"));
    }

    #[test]
    fn test_invalid_configuration_fails() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let input = create_test_file(&dir, "a.xml", "<a>1</a>");

        let output = run_structconv(
            &reports,
            &["--indent", "9", "convert", "--src", "xml", "--dst", "json", path_str(&input)],
        );
        assert!(!output.status.success());
        assert!(!reports.exists());
    }
}

mod detect {
    use super::*;

    #[test]
    fn test_detect_xml() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let input = create_test_file(&dir, "hello.xml", "<root>Hello</root>");

        let output = run_structconv(&reports, &["detect", path_str(&input)]);
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("Detected format: XML"));

        let report = read_report(reports.join("detect_1.json"));
        assert_eq!(report["status"], "success");
        assert_eq!(report["elapsed_ms"], 0);
        assert_eq!(report["details"]["format"], "xml");
        assert_eq!(report["details"]["metadata"]["decoded_byte_length"], 18);
    }

    #[test]
    fn test_detect_unknown_is_error() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let input = create_test_file(&dir, "plain.txt", "just words");

        let output = run_structconv(&reports, &["detect", path_str(&input)]);
        assert!(!output.status.success());

        let report = read_report(reports.join("detect_1.json"));
        assert_eq!(report["status"], "error");
        assert_eq!(report["details"]["format"], "unknown");
    }
}

mod validate {
    use super::*;

    #[test]
    fn test_validate_equivalent_files() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let src = create_test_file(&dir, "note.xml", "<note>test</note>");
        let dst = create_test_file(&dir, "note.json", r#"{"note": "test"}"#);

        let output = run_structconv(
            &reports,
            &["validate", "--src", "xml", "--dst", "json", path_str(&src), path_str(&dst)],
        );
        assert!(output.status.success());

        let report = read_report(reports.join("validate_1.json"));
        assert_eq!(report["status"], "success");
        assert_eq!(report["details"]["is_valid"], true);
        assert_eq!(report["details"]["comparison_kind"], "structural_equality");
    }

    #[test]
    fn test_validate_mismatch_fails() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let src = create_test_file(&dir, "v.xml", "<root><val>1</val></root>");
        let dst = create_test_file(&dir, "v.json", r#"{"root": {"val": "2"}}"#);

        let output = run_structconv(
            &reports,
            &[
                "validate",
                "--src",
                "xml",
                "--dst",
                "json",
                path_str(&src),
                path_str(&dst),
                "--criteria",
                r#"{"strict": true}"#,
            ],
        );
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Validation failed"));

        let report = read_report(reports.join("validate_1.json"));
        assert_eq!(report["status"], "error");
        assert_eq!(report["details"]["is_valid"], false);
    }
}

#[test]
fn test_list_supported_conversions() {
    let dir = tempdir().unwrap();
    let output = run_structconv(&dir.path().join("reports"), &["list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("xml -> json"));
}

#[test]
fn test_quiet_suppresses_output() {
    let dir = tempdir().unwrap();
    let reports = dir.path().join("reports");
    let input = create_test_file(&dir, "a.xml", "<a>1</a>");

    let output = run_structconv(
        &reports,
        &["--quiet", "convert", "--src", "xml", "--dst", "json", path_str(&input)],
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(reports.join("convert_1.json").exists());
}
