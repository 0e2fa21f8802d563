//! Migration script output.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Output format of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A SQL script, one terminated statement per line group.
    #[default]
    Sql,
    /// The statements as JSON.
    Json,
}

/// Where the statements came from, printed at the top of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptHeader {
    /// The current schema's source.
    pub old: String,
    /// The target schema's source.
    pub new: String,
    pub generated_at: DateTime<Utc>,
}

impl ScriptHeader {
    /// Creates a header stamped with the current time.
    #[must_use]
    pub fn now(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    header: &'a ScriptHeader,
    statements: &'a [String],
}

/// Formats diff statements as a script.
#[derive(Debug, Clone, Default)]
pub struct ScriptWriter {
    header: Option<ScriptHeader>,
}

impl ScriptWriter {
    /// Creates a writer without header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header.
    #[must_use]
    pub fn with_header(mut self, header: ScriptHeader) -> Self {
        self.header = Some(header);
        self
    }

    /// Renders statements as a SQL script.
    ///
    /// Every statement is terminated with `;`. A diff without statements
    /// renders as `-- no changes`.
    #[must_use]
    pub fn render_sql(&self, statements: &[String]) -> String {
        let mut script = String::new();
        if let Some(header) = &self.header {
            script.push_str("-- Generated by oxide-ddl-diff\n");
            script.push_str(&format!("-- Old schema: {}\n", header.old));
            script.push_str(&format!("-- New schema: {}\n", header.new));
            script.push_str(&format!(
                "-- Generated at: {}\n\n",
                header.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        if statements.is_empty() {
            script.push_str("-- no changes\n");
            return script;
        }
        for statement in statements {
            script.push_str(statement);
            script.push_str(";\n");
        }
        script
    }

    /// Renders statements as pretty JSON.
    ///
    /// With a header the statements are wrapped in an object carrying the
    /// header fields; without one they are a plain array.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Serialization`](crate::CliError::Serialization) if the statements cannot be
    /// serialized.
    pub fn render_json(&self, statements: &[String]) -> Result<String> {
        let json = match &self.header {
            Some(header) => serde_json::to_string_pretty(&JsonReport {
                header,
                statements,
            })?,
            None => serde_json::to_string_pretty(statements)?,
        };
        Ok(json + "\n")
    }

    /// Renders statements in the given format.
    ///
    /// # Errors
    ///
    /// See [`ScriptWriter::render_json`].
    pub fn render(&self, statements: &[String], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Sql => Ok(self.render_sql(statements)),
            OutputFormat::Json => self.render_json(statements),
        }
    }

    /// Writes rendered output to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`](crate::CliError::Io) if a directory or the file cannot be
    /// written.
    pub fn write_to_file(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!(path = %path.display(), bytes = content.len(), "wrote migration script");
        Ok(())
    }
}
