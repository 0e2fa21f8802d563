//! Input loading and script writing against real files.

use std::fs;

use oxide_ddl_core::diff;
use oxide_ddl_core::DiffError;
use oxide_ddl_diff::{
    diff_inputs, load_snapshot, CliError, InputFormat, OutputFormat, ScriptHeader, ScriptWriter,
};
use tempfile::TempDir;

const V1: &str = "CREATE TABLE `users` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `name` varchar(50) NOT NULL,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";

const V2: &str = "CREATE TABLE `users` (
  `id` int NOT NULL AUTO_INCREMENT,
  `name` varchar(50) NOT NULL,
  `email` varchar(255) DEFAULT NULL,
  PRIMARY KEY (`id`),
  KEY `idx_email` (`email`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";

#[test]
fn diff_sql_files_into_script() {
    let dir = TempDir::new().unwrap();
    let old_path = dir.path().join("v1.sql");
    let new_path = dir.path().join("v2.sql");
    fs::write(&old_path, V1).unwrap();
    fs::write(&new_path, V2).unwrap();

    let old = load_snapshot(&old_path, None).unwrap();
    let new = load_snapshot(&new_path, None).unwrap();
    let statements = diff(&old, &new).unwrap();

    let out = dir.path().join("migrations").join("0002.sql");
    let content = ScriptWriter::new()
        .render(&statements, OutputFormat::Sql)
        .unwrap();
    ScriptWriter::write_to_file(&out, &content).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "ALTER TABLE `users` ADD COLUMN `email` VARCHAR(255) DEFAULT NULL AFTER `name`;\n\
         ALTER TABLE `users` ADD INDEX `idx_email` (`email`);\n"
    );
}

#[test]
fn json_snapshot_diffs_like_its_source() {
    let dir = TempDir::new().unwrap();
    let sql_path = dir.path().join("v1.sql");
    let json_path = dir.path().join("v1.json");
    fs::write(&sql_path, V1).unwrap();

    let snapshot = load_snapshot(&sql_path, None).unwrap();
    fs::write(&json_path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

    let reloaded = load_snapshot(&json_path, None).unwrap();
    assert_eq!(reloaded, snapshot);
    assert!(diff(&reloaded, &snapshot).unwrap().is_empty());
}

#[test]
fn explicit_format_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schema.dump");
    fs::write(&path, V1).unwrap();

    assert!(matches!(
        load_snapshot(&path, None),
        Err(CliError::UnsupportedInput(_))
    ));
    let snapshot = load_snapshot(&path, Some(InputFormat::Sql)).unwrap();
    assert!(snapshot.contains("users"));
}

#[test]
fn missing_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.sql");

    let err = load_snapshot(&path, None).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }));
    assert!(err.to_string().contains("absent.sql"));
}

#[test]
fn unchanged_schema_writes_no_changes_marker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("same.sql");
    fs::write(&path, V1).unwrap();
    let snapshot = load_snapshot(&path, None).unwrap();

    let statements = diff(&snapshot, &snapshot).unwrap();
    let script = ScriptWriter::new()
        .with_header(ScriptHeader::now("same.sql", "same.sql"))
        .render(&statements, OutputFormat::Sql)
        .unwrap();

    assert!(script.starts_with("-- Generated by oxide-ddl-diff\n-- Old schema: same.sql\n"));
    assert!(script.ends_with("-- no changes\n"));
}

#[test]
fn diff_inputs_reports_malformed_snapshot() {
    let dir = TempDir::new().unwrap();
    let sql_path = dir.path().join("v1.sql");
    let json_path = dir.path().join("v1.json");
    fs::write(&sql_path, V1).unwrap();

    let snapshot = load_snapshot(&sql_path, None).unwrap();
    let json = serde_json::to_string(&snapshot)
        .unwrap()
        .replacen("\"users\":", "\"accounts\":", 1);
    fs::write(&json_path, json).unwrap();

    let err = diff_inputs(&sql_path, &json_path, None).unwrap_err();
    assert!(matches!(
        err,
        CliError::Diff(DiffError::MalformedSchema { ref table, .. }) if table == "accounts"
    ));
    assert_eq!(
        diff_inputs(&sql_path, &sql_path, None).unwrap(),
        Vec::<String>::new()
    );
}
