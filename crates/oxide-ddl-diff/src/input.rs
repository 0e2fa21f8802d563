//! Loading schema snapshots from SQL scripts or JSON files.

use std::ffi::OsStr;
use std::fs;
use std::io::Read;
use std::path::Path;

use clap::ValueEnum;
use oxide_ddl_core::{diff, SchemaSnapshot};
use tracing::debug;

use crate::error::{CliError, Result};

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// How an input file is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// A SQL script with `CREATE TABLE` / `CREATE VIEW` statements.
    Sql,
    /// A snapshot previously written by `inspect`.
    Json,
}

impl InputFormat {
    /// Picks the format from a file extension.
    ///
    /// Standard input is read as SQL.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnsupportedInput`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.as_os_str() == STDIN_PATH {
            return Ok(Self::Sql);
        }
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("sql") => Ok(Self::Sql),
            Some("json") => Ok(Self::Json),
            _ => Err(CliError::UnsupportedInput(format!(
                "cannot tell the format of '{}', use --input-format",
                path.display()
            ))),
        }
    }
}

/// Builds a snapshot from input text.
///
/// SQL text never fails: statements that do not parse are skipped.
///
/// # Errors
///
/// Returns [`CliError::Serialization`] if JSON input is not a snapshot.
pub fn parse_snapshot(text: &str, format: InputFormat) -> Result<SchemaSnapshot> {
    match format {
        InputFormat::Sql => Ok(SchemaSnapshot::parse(text)),
        InputFormat::Json => Ok(serde_json::from_str(text)?),
    }
}

/// Reads a file, or standard input for `-`.
///
/// # Errors
///
/// Returns [`CliError::Read`] naming the path if the file cannot be read,
/// or [`CliError::Io`] if standard input fails.
pub fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a snapshot, taking the format from the extension unless given.
///
/// # Errors
///
/// See [`InputFormat::from_path`], [`read_input`] and [`parse_snapshot`].
pub fn load_snapshot(path: &Path, format: Option<InputFormat>) -> Result<SchemaSnapshot> {
    let format = match format {
        Some(format) => format,
        None => InputFormat::from_path(path)?,
    };
    let snapshot = parse_snapshot(&read_input(path)?, format)?;
    debug!(
        path = %path.display(),
        ?format,
        statements = snapshot.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Loads both schemas and returns the statements turning `old` into
/// `new`.
///
/// # Errors
///
/// Returns [`CliError::UnsupportedInput`] if both paths are `-`,
/// any error of [`load_snapshot`], or [`CliError::Diff`] if either schema
/// is malformed.
pub fn diff_inputs(old: &Path, new: &Path, format: Option<InputFormat>) -> Result<Vec<String>> {
    if is_stdin(old) && is_stdin(new) {
        return Err(CliError::UnsupportedInput(
            "only one schema can be read from stdin".into(),
        ));
    }
    let old_snapshot = load_snapshot(old, format)?;
    let new_snapshot = load_snapshot(new, format)?;
    Ok(diff(&old_snapshot, &new_snapshot)?)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}
