//! Integration tests for the contactsync CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "Given Name,Family Name,Company,Job Title,Work Email,Personal Email,Other Email,Work Phone,Mobile Phone,Home Phone,Notes,Website,Work Street,Work City,Work Region,Work Postal Code,Work Country";

/// Helper to get a contactsync command isolated from the user's environment
fn contactsync(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("contactsync").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("RUST_LOG");
    for var in [
        "CONTACTSYNC_SOURCE",
        "CONTACTSYNC_SHEET",
        "CONTACTSYNC_ACCESS_TOKEN",
        "CONTACTSYNC_API_URL",
        "CONTACTSYNC_LOG_FILE",
        "CONTACTSYNC_TIMEOUT_SECS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Helper to write a CSV source into the temp directory
fn write_source(tmp: &TempDir, name: &str, rows: &[&str]) {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(tmp.path().join(name), content).unwrap();
}

/// Helper to write a workbook whose "Contacts" header sits on sheet row 2
fn write_workbook(tmp: &TempDir, name: &str) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Contacts").unwrap();
    sheet.write_string(1, 0, "Given Name").unwrap();
    sheet.write_string(1, 1, "Family Name").unwrap();
    sheet.write_string(1, 2, "Job Title").unwrap();
    sheet.write_string(2, 0, "Jane").unwrap();
    sheet.write_string(2, 1, "Doe").unwrap();
    sheet.write_string(3, 2, "Intern").unwrap();
    workbook.save(tmp.path().join(name)).unwrap();
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("template"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("contactsync"));
}

#[test]
fn test_import_help_lists_dry_run() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--sheet"));
}

// ============================================================================
// Template Tests
// ============================================================================

#[test]
fn test_template_prints_default_headers() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(HEADER));
}

#[test]
fn test_template_honors_field_map() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("contactsync.yaml"),
        "field_map:\n  givenName: First Name\n  emailWork: E-mail\n",
    )
    .unwrap();

    contactsync(&tmp)
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("First Name,Family Name"))
        .stdout(predicate::str::contains(",E-mail,"));
}

#[test]
fn test_template_example_row_is_importable() {
    let tmp = TempDir::new().unwrap();
    let output = contactsync(&tmp)
        .args(["template", "--example"])
        .output()
        .unwrap();
    assert!(output.status.success());
    fs::write(tmp.path().join("example.csv"), &output.stdout).unwrap();

    contactsync(&tmp)
        .args(["import", "--source", "example.csv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create Jane Doe"))
        .stdout(predicate::str::contains("Would be added:   1"));
}

// ============================================================================
// Import Tests
// ============================================================================

#[test]
fn test_import_dry_run_reports_rows() {
    let tmp = TempDir::new().unwrap();
    write_source(
        &tmp,
        "contacts.csv",
        &[
            "Ada,Lovelace,,,ada@example.com,,,,,,,,,,,,",
            "Alan,Turing,,,,,,,,,,,,,,,",
        ],
    );

    contactsync(&tmp)
        .args(["import", "--source", "contacts.csv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Row 2: Would create Ada Lovelace"))
        .stdout(predicate::str::contains("Row 3: Would create Alan Turing"))
        .stdout(predicate::str::contains("Rows processed:   2"))
        .stdout(predicate::str::contains("Would be added:   2"))
        .stdout(predicate::str::contains("Dry run complete"));
}

#[test]
fn test_import_dry_run_does_not_need_token() {
    let tmp = TempDir::new().unwrap();
    write_source(&tmp, "contacts.csv", &["Ada,,,,,,,,,,,,,,,,"]);

    contactsync(&tmp)
        .env("CONTACTSYNC_SOURCE", "contacts.csv")
        .args(["import", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would be added:   1"));
}

#[test]
fn test_import_company_only_row_uses_company_name() {
    let tmp = TempDir::new().unwrap();
    write_source(&tmp, "contacts.csv", &[",,Acme Corp,,,,,,,,,,,,,,"]);

    contactsync(&tmp)
        .args(["import", "-s", "contacts.csv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create Acme Corp"));
}

#[test]
fn test_import_blank_row_counts_as_failed() {
    let tmp = TempDir::new().unwrap();
    write_source(
        &tmp,
        "contacts.csv",
        &["Ada,Lovelace,,,,,,,,,,,,,,,", ",,,,,,,,,,,,,,,,"],
    );

    contactsync(&tmp)
        .args(["import", "--source", "contacts.csv", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Row 3: Skipped"))
        .stdout(predicate::str::contains("Rows processed:   2"))
        .stdout(predicate::str::contains("Would be added:   1"))
        .stdout(predicate::str::contains("Failed/skipped:   1"))
        .stdout(predicate::str::contains("Failed rows:      3"));
}

#[test]
fn test_import_header_only_is_no_data() {
    let tmp = TempDir::new().unwrap();
    write_source(&tmp, "contacts.csv", &[]);

    contactsync(&tmp)
        .args(["import", "--source", "contacts.csv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data to import"))
        .stdout(predicate::str::contains("Import Summary").not());
}

#[test]
fn test_import_reads_tsv() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("contacts.tsv"),
        "Given Name\tFamily Name\tNotes\nGrace\tHopper\tCOBOL, compilers\n",
    )
    .unwrap();

    contactsync(&tmp)
        .args(["import", "--source", "contacts.tsv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create Grace Hopper"));
}

#[test]
fn test_import_reads_workbook_sheet() {
    let tmp = TempDir::new().unwrap();
    write_workbook(&tmp, "contacts.xlsx");

    contactsync(&tmp)
        .args(["import", "--source", "contacts.xlsx", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Row 3: Would create Jane Doe"))
        .stderr(predicate::str::contains("Row 4: Skipped"))
        .stdout(predicate::str::contains("Failed rows:      4"));
}

#[test]
fn test_import_missing_workbook_sheet_is_config_error() {
    let tmp = TempDir::new().unwrap();
    write_workbook(&tmp, "contacts.xlsx");

    contactsync(&tmp)
        .args([
            "import",
            "--source",
            "contacts.xlsx",
            "--sheet",
            "People",
            "--dry-run",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("Sheet 'People' not found"))
        .stderr(predicate::str::contains("Available sheets: Contacts"));
}

#[test]
fn test_import_without_source_is_config_error() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .args(["import", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_import_missing_file_is_config_error() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .args(["import", "--source", "nope.csv", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_import_unsupported_format() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("contacts.txt"), "Given Name\nAda\n").unwrap();

    contactsync(&tmp)
        .args(["import", "--source", "contacts.txt", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported source format"));
}

#[test]
fn test_import_without_token_fails_before_reading() {
    let tmp = TempDir::new().unwrap();
    write_source(&tmp, "contacts.csv", &["Ada,,,,,,,,,,,,,,,,"]);

    contactsync(&tmp)
        .args(["import", "--source", "contacts.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no access token"))
        .stdout(predicate::str::contains("Row 2").not());
}

#[test]
fn test_import_api_failure_does_not_change_exit_code() {
    let tmp = TempDir::new().unwrap();
    write_source(&tmp, "contacts.csv", &["Ada,Lovelace,,,,,,,,,,,,,,,"]);

    contactsync(&tmp)
        .env("CONTACTSYNC_ACCESS_TOKEN", "test-token")
        .env("CONTACTSYNC_API_URL", "http://127.0.0.1:9")
        .env("CONTACTSYNC_TIMEOUT_SECS", "2")
        .args(["import", "--source", "contacts.csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Row 2:"))
        .stdout(predicate::str::contains("Contacts added:   0"))
        .stdout(predicate::str::contains("Failed/skipped:   1"));
}

#[test]
fn test_import_writes_execution_log() {
    let tmp = TempDir::new().unwrap();
    write_source(&tmp, "contacts.csv", &["Ada,Lovelace,,,,,,,,,,,,,,,"]);

    contactsync(&tmp)
        .args([
            "import",
            "--source",
            "contacts.csv",
            "--dry-run",
            "--log-file",
            "run.log",
        ])
        .assert()
        .success();

    let log = fs::read_to_string(tmp.path().join("run.log")).unwrap();
    assert!(log.contains("INFO"));
}

#[test]
fn test_config_error_reaches_execution_log() {
    let tmp = TempDir::new().unwrap();

    contactsync(&tmp)
        .args(["import", "--log-file", "run.log"])
        .assert()
        .failure();

    let log = fs::read_to_string(tmp.path().join("run.log")).unwrap();
    assert!(log.contains("ERROR"));
    assert!(log.contains("No source spreadsheet configured"));
}

#[test]
fn test_missing_token_reaches_execution_log() {
    let tmp = TempDir::new().unwrap();
    write_source(&tmp, "contacts.csv", &["Ada,,,,,,,,,,,,,,,,"]);

    contactsync(&tmp)
        .args(["import", "--source", "contacts.csv", "--log-file", "run.log"])
        .assert()
        .failure();

    let log = fs::read_to_string(tmp.path().join("run.log")).unwrap();
    assert!(log.contains("no access token configured"));
}

// ============================================================================
// List Tests
// ============================================================================

#[test]
fn test_list_without_token_is_config_error() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_list_without_token_reaches_execution_log() {
    let tmp = TempDir::new().unwrap();

    contactsync(&tmp)
        .args(["list", "--log-file", "list.log"])
        .assert()
        .failure();

    let log = fs::read_to_string(tmp.path().join("list.log")).unwrap();
    assert!(log.contains("configuration error"));
}

#[test]
fn test_list_unreachable_api_fails() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .env("CONTACTSYNC_ACCESS_TOKEN", "test-token")
        .env("CONTACTSYNC_API_URL", "http://127.0.0.1:9")
        .env("CONTACTSYNC_TIMEOUT_SECS", "2")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list directory entries"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_keys() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("access_token"))
        .stdout(predicate::str::contains("field_map"));
}

#[test]
fn test_config_show_redacts_token() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .env("CONTACTSYNC_ACCESS_TOKEN", "super-secret")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("super-secret").not())
        .stdout(predicate::str::contains("********"));
}

#[test]
fn test_config_show_single_key() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("contactsync.yaml"), "sheet: People\n").unwrap();

    contactsync(&tmp)
        .args(["config", "show", "sheet"])
        .assert()
        .success()
        .stdout(predicate::str::diff("People\n"));
}

#[test]
fn test_config_env_overrides_project_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("contactsync.yaml"), "sheet: People\n").unwrap();

    contactsync(&tmp)
        .env("CONTACTSYNC_SHEET", "Staff")
        .args(["config", "show", "sheet"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Staff\n"));
}

#[test]
fn test_config_unknown_key_rejected() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .args(["config", "show", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_invalid_file_is_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("contactsync.yaml"), "not_a_key: 1\n").unwrap();

    contactsync(&tmp)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

// ============================================================================
// Completions Tests
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    contactsync(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contactsync"));
}
