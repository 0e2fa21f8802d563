//! Schema snapshots: every table and view of one schema version.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::statement::TableStatement;

/// A snapshot of an entire schema, keyed by table/view name.
///
/// Iteration follows insertion order. Re-inserting a name replaces the
/// statement but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Statements keyed by name.
    pub statements: IndexMap<String, TableStatement>,
}

impl SchemaSnapshot {
    /// Creates an empty schema snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from statements; later duplicates win.
    #[must_use]
    pub fn from_statements<I>(statements: I) -> Self
    where
        I: IntoIterator<Item = TableStatement>,
    {
        let mut snapshot = Self::new();
        for statement in statements {
            snapshot.insert(statement);
        }
        snapshot
    }

    /// Parses a SQL script into a snapshot.
    ///
    /// Statements other than `CREATE TABLE` and `CREATE VIEW` are ignored,
    /// and malformed ones are skipped with a warning.
    #[must_use]
    pub fn parse(sql: &str) -> Self {
        Self::from_statements(crate::parser::parse_statements(sql))
    }

    /// Adds a statement, replacing any statement of the same name.
    pub fn insert(&mut self, statement: TableStatement) -> Option<TableStatement> {
        self.statements
            .insert(statement.name().to_string(), statement)
    }

    /// Looks up a statement by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TableStatement> {
        self.statements.get(name)
    }

    /// Returns true if a statement with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.statements.contains_key(name)
    }

    /// Iterates statements in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &TableStatement> {
        self.statements.values()
    }

    /// Returns the number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{TableDefinition, ViewDefinition};

    #[test]
    fn test_insert_keeps_first_position() {
        let mut snapshot = SchemaSnapshot::new();
        snapshot.insert(TableDefinition::new("a").into());
        snapshot.insert(TableDefinition::new("b").into());
        let replaced = snapshot.insert(ViewDefinition::new("a", "SELECT 1").into());

        assert!(replaced.is_some_and(|s| !s.is_view()));
        let names: Vec<_> = snapshot.iter().map(TableStatement::name).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(snapshot.get("a").is_some_and(TableStatement::is_view));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let snapshot = SchemaSnapshot::from_statements([
            TableDefinition::new("Users").into(),
            TableDefinition::new("users").into(),
        ]);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("Users"));
        assert!(!snapshot.contains("USERS"));
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = SchemaSnapshot::parse(
            "CREATE TABLE `t` (`id` int NOT NULL, PRIMARY KEY (`id`)) ENGINE=InnoDB;\n\
             CREATE VIEW `v` AS SELECT 1;",
        );
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SchemaSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.len(), 2);
    }
}
