//! Input validation.
//!
//! The differs rely on each table being well formed. Anything they could
//! not render or match is reported as [`DiffError::MalformedSchema`]
//! before a single statement is planned.

use std::collections::HashSet;

use super::keys::{duplicate_identity, foreign_keys, index_namespace};
use crate::error::{DiffError, Result};
use crate::schema::{KeyKind, SchemaSnapshot, TableDefinition, TableStatement, ViewDefinition};

/// Checks every statement of a snapshot.
pub fn validate_snapshot(snapshot: &SchemaSnapshot) -> Result<()> {
    for (name, statement) in &snapshot.statements {
        if name != statement.name() {
            return Err(DiffError::malformed(
                name,
                format!("stored under `{name}` but named `{}`", statement.name()),
            ));
        }
        match statement {
            TableStatement::Table(table) => validate_table(table)?,
            TableStatement::View(view) => validate_view(view)?,
        }
    }
    Ok(())
}

fn validate_view(view: &ViewDefinition) -> Result<()> {
    if view.query.trim().is_empty() {
        return Err(DiffError::malformed(&view.name, "view has no query"));
    }
    Ok(())
}

fn validate_table(table: &TableDefinition) -> Result<()> {
    let malformed = |reason: String| DiffError::malformed(&table.name, reason);

    let mut names = HashSet::new();
    for field in table.fields() {
        if field.name.is_empty() {
            return Err(malformed("field with an empty name".into()));
        }
        if field.data_type.name.is_empty() {
            return Err(malformed(format!("field `{}` has no type", field.name)));
        }
        if !names.insert(field.name.as_str()) {
            return Err(malformed(format!("duplicate field `{}`", field.name)));
        }
    }
    if names.is_empty() {
        return Err(malformed("table has no fields".into()));
    }

    for entry in table.keys() {
        let key = &entry.key;
        let label = entry
            .constraint
            .as_deref()
            .or(key.name.as_deref())
            .unwrap_or("<unnamed>");

        if key.kind == KeyKind::Check {
            if !matches!(key.expression.as_deref(), Some(e) if !e.trim().is_empty()) {
                return Err(malformed(format!("check `{label}` has no expression")));
            }
            continue;
        }
        if key.columns.is_empty() {
            return Err(malformed(format!(
                "{} `{label}` has no columns",
                key.kind.as_str()
            )));
        }
        if key.kind == KeyKind::ForeignKey {
            let Some(reference) = &key.reference else {
                return Err(malformed(format!("foreign key `{label}` has no reference")));
            };
            if reference.table.is_empty() || reference.columns.is_empty() {
                return Err(malformed(format!(
                    "foreign key `{label}` has an incomplete reference"
                )));
            }
            if reference.columns.len() != key.columns.len() {
                return Err(malformed(format!(
                    "foreign key `{label}` references {} columns with {}",
                    reference.columns.len(),
                    key.columns.len()
                )));
            }
        }
    }

    if let Some(name) = duplicate_identity(&index_namespace(table)) {
        return Err(malformed(format!("duplicate index `{name}`")));
    }
    if let Some(name) = duplicate_identity(&foreign_keys(table)) {
        return Err(malformed(format!("duplicate foreign key `{name}`")));
    }
    Ok(())
}
