//! CLI integration tests for md-form binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("md-form"))
}

// Helper to create a temp schema file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const MODEL: &str = r##"{
    "definitions": {
        "Count": { "type": "integer", "minimum": 0, "maximum": 10 }
    },
    "properties": {
        "count": { "$ref": "#/definitions/Count", "name": "Count", "field_type": "number" }
    },
    "output_dataset_type": "table"
}"##;

mod translate_command {
    use super::*;

    #[test]
    fn basic_translate() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);

        cmd()
            .args(["translate", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"{"count":{"name":"Count","field_type":"number","parameters":{"min":0,"max":10}}}"#,
            ));
    }

    #[test]
    fn translate_with_pretty() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);

        cmd()
            .args(["translate", schema.to_str().unwrap(), "--pretty"])
            .assert()
            .success()
            // Pretty output has newlines and indentation
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn translate_with_output_file() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);
        let output = dir.path().join("form.json");

        cmd()
            .args([
                "translate",
                schema.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#""field_type":"number""#));
        assert!(!content.contains("output_dataset_type"));
    }

    #[test]
    fn translate_stop_after() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);

        cmd()
            .args([
                "translate",
                schema.to_str().unwrap(),
                "--stop-after",
                "resolve-refs",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""maximum":10"#))
            .stdout(predicate::str::contains("definitions").not());
    }

    #[test]
    fn translate_unknown_pass() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);

        cmd()
            .args(["translate", schema.to_str().unwrap(), "--stop-after", "bogus"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown pass 'bogus'"));
    }

    #[test]
    fn translate_with_config() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);
        let config = write_temp_file(&dir, "options.json", r#"{"allowed-keys": ["name"]}"#);

        cmd()
            .args([
                "translate",
                schema.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"count":{"name":"Count"}}"#));
    }

    #[test]
    fn verbose_logs_to_stderr() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);

        cmd()
            .args(["--verbose", "translate", schema.to_str().unwrap()])
            .assert()
            .success()
            .stderr(predicate::str::contains("running pass"))
            .stdout(predicate::str::contains("running pass").not());
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_file_exit_code_3() {
        cmd()
            .args(["translate", "/nonexistent/model.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn invalid_json_exit_code_2() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", "not json");

        cmd()
            .args(["translate", schema.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn missing_definition_exit_code_2() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "model.json",
            r##"{"properties": {"f": {"$ref": "#/definitions/Gone"}}}"##,
        );

        cmd()
            .args(["translate", schema.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("definition not found: Gone"));
    }

    #[test]
    fn invalid_config_exit_code_2() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);
        let config = write_temp_file(&dir, "options.json", r#"{"whitelist": []}"#);

        cmd()
            .args([
                "translate",
                schema.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid options"));
    }

    #[test]
    fn unwritable_output_exit_code_3() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "model.json", MODEL);
        let output = dir.path().join("missing-dir").join("form.json");

        cmd()
            .args([
                "translate",
                schema.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("cannot write"));
    }
}

mod passes_command {
    use super::*;

    #[test]
    fn lists_passes_in_order() {
        let output = cmd().arg("passes").assert().success().get_output().stdout.clone();
        let text = String::from_utf8(output).unwrap();
        let names: Vec<&str> = text.lines().collect();
        assert_eq!(names.len(), 11);
        assert_eq!(names[0], "convert-enums");
        assert_eq!(names[2], "resolve-refs");
        assert_eq!(names[10], "filter-field-keys");
    }
}
