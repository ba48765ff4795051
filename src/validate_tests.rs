use super::*;
use std::fs;

#[test]
fn bundled_schema_is_valid_json_requiring_top_level_fields() {
    let schema: serde_json::Value = serde_json::from_str(BUNDLED_SCHEMA).expect("parse schema");
    let required: Vec<&str> = schema["required"]
        .as_array()
        .expect("required list")
        .iter()
        .filter_map(serde_json::Value::as_str)
        .collect();
    assert_eq!(
        required,
        vec!["id", "meta", "settings", "elements", "wedges", "templates"]
    );
}

#[test]
fn flag_wins_over_default_command_line() {
    assert_eq!(validator_command_line(Some("npx ajv")), "npx ajv");
}

#[test]
fn unknown_validator_program_is_reported() {
    let err = ValidatorCommand::parse("definitely-not-a-validator-7f3a --strict")
        .expect_err("missing program");
    assert!(err.to_string().contains("could not find schema validator"));
}

#[test]
fn unbalanced_quotes_are_rejected() {
    assert!(ValidatorCommand::parse("ajv 'unterminated").is_err());
    assert!(ValidatorCommand::parse("   ").is_err());
}

#[cfg(unix)]
mod stub {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn stub_validator(dir: &Path, body: &str) -> ValidatorCommand {
        let path = dir.join("validator.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
        let mut perms = fs::metadata(&path).expect("stat stub").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod stub");
        ValidatorCommand::parse(&path.display().to_string()).expect("resolve stub")
    }

    fn theme_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join(THEME_FILE), "{}").expect("write theme");
        dir
    }

    #[test]
    fn passes_bundled_schema_and_theme_path() {
        let dir = theme_dir();
        let validator = stub_validator(
            dir.path(),
            r#"[ "$1" = "-s" ] && [ -f "$2" ] && [ "$3" = "-d" ] || exit 3
case "$2" in *.json) ;; *) exit 4 ;; esac
echo "$4 valid""#,
        );
        let outcome = validate_theme(dir.path(), None, &validator).expect("validate");
        let expected = format!("{} valid", dir.path().join(THEME_FILE).display());
        assert_eq!(outcome, ValidationOutcome::Passed(expected));
    }

    #[test]
    fn non_zero_exit_fails_with_output() {
        let dir = theme_dir();
        let validator = stub_validator(dir.path(), "echo 'data/id must be string' >&2\nexit 1");
        let outcome = validate_theme(dir.path(), None, &validator).expect("validate");
        let ValidationOutcome::Failed(report) = outcome else {
            panic!("expected failure");
        };
        assert!(report.contains("data/id must be string"));
    }

    #[test]
    fn stderr_text_fails_even_with_zero_exit() {
        let dir = theme_dir();
        let validator = stub_validator(dir.path(), "echo 'schema warning' >&2");
        let outcome = validate_theme(dir.path(), None, &validator).expect("validate");
        assert_eq!(outcome, ValidationOutcome::Failed("schema warning".to_string()));
    }

    #[test]
    fn validator_output_keeps_leading_whitespace() {
        let dir = theme_dir();
        let validator = stub_validator(dir.path(), "printf '  data/meta\\n    must be object\\n\\n' >&2\nexit 1");
        let outcome = validate_theme(dir.path(), None, &validator).expect("validate");
        let ValidationOutcome::Failed(report) = outcome else {
            panic!("expected failure");
        };
        assert!(report.ends_with("\n  data/meta\n    must be object"));
    }

    #[test]
    fn explicit_schema_path_is_forwarded() {
        let dir = theme_dir();
        let schema = dir.path().join("custom.json");
        fs::write(&schema, "{}").expect("write schema");
        let validator = stub_validator(dir.path(), r#"echo "$2""#);
        let outcome = validate_theme(dir.path(), Some(&schema), &validator).expect("validate");
        assert_eq!(outcome, ValidationOutcome::Passed(schema.display().to_string()));
    }

    #[test]
    fn missing_theme_json_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let validator = stub_validator(dir.path(), "exit 0");
        let err = validate_theme(dir.path(), None, &validator).expect_err("missing theme");
        assert!(err.to_string().contains("Could not find theme.json"));
    }
}
