//! Table and view statements.

use serde::{Deserialize, Serialize};

use super::column::{Column, Field};
use super::key::KeyEntry;
use super::options::OptionSet;
use super::partition::PartitionSpec;

/// A `CREATE TABLE` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    /// Modifiers of the statement head (`TEMPORARY`, `IF NOT EXISTS`).
    #[serde(default)]
    pub create_options: OptionSet,
    /// Table options (`ENGINE=InnoDB`, `COMMENT='...'`).
    #[serde(default)]
    pub options: OptionSet,
    /// Fields and keys in declaration order.
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitioning: Option<PartitionSpec>,
}

impl TableDefinition {
    /// Creates an empty table definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            create_options: OptionSet::new(),
            options: OptionSet::new(),
            columns: Vec::new(),
            partitioning: None,
        }
    }

    /// Iterates the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.columns.iter().filter_map(Column::as_field)
    }

    /// Iterates the key entries in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyEntry> {
        self.columns.iter().filter_map(Column::as_key)
    }

    /// Returns the field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|field| field.name == name)
    }
}

/// A `CREATE VIEW` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDefinition {
    pub name: String,
    /// `OR REPLACE`, `ALGORITHM=...`, `DEFINER=...`, `SQL SECURITY ...`.
    #[serde(default)]
    pub options: OptionSet,
    /// Explicit column list.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Query text after `AS`.
    pub query: String,
}

impl ViewDefinition {
    /// Creates a view with no options.
    #[must_use]
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: OptionSet::new(),
            columns: Vec::new(),
            query: query.into(),
        }
    }
}

/// A statement kept in a schema snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableStatement {
    Table(TableDefinition),
    View(ViewDefinition),
}

impl TableStatement {
    /// Returns the table or view name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Table(table) => &table.name,
            Self::View(view) => &view.name,
        }
    }

    /// Returns true for views.
    #[must_use]
    pub const fn is_view(&self) -> bool {
        matches!(self, Self::View(_))
    }
}

impl From<TableDefinition> for TableStatement {
    fn from(table: TableDefinition) -> Self {
        Self::Table(table)
    }
}

impl From<ViewDefinition> for TableStatement {
    fn from(view: ViewDefinition) -> Self {
        Self::View(view)
    }
}
