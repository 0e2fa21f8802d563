//! Schema differ.
//!
//! Compares two [`SchemaSnapshot`]s and plans the statements that turn the
//! old schema into the new one:
//!
//! 1. `DROP TABLE` / `DROP VIEW` for every name only in the old schema,
//!    in old order.
//! 2. The full `CREATE` statement for every name only in the new schema,
//!    in new order.
//! 3. For every name in both, in old order, either a view replacement or
//!    the table alter block: options, foreign key drops, index drops,
//!    column changes, index adds, foreign key adds, partitioning.
//!
//! ```rust
//! use oxide_ddl_core::diff_sql;
//!
//! let statements = diff_sql(
//!     "CREATE TABLE t (id INT(11) NOT NULL, a INT, b INT)",
//!     "CREATE TABLE t (id INT(11) NOT NULL, b INT, a INT)",
//! )
//! .unwrap();
//!
//! assert_eq!(statements, ["ALTER TABLE `t` MODIFY COLUMN `a` INT AFTER `b`"]);
//! ```

mod columns;
mod foreign_keys;
mod indexes;
mod keys;
mod operation;
mod options;
mod partitions;
mod validate;
mod views;

pub use keys::PRIMARY_KEY_NAME;
pub use operation::{
    AddColumnOp, AddKeyOp, AlterTableOptionsOp, ColumnPosition, CreateTableOp, CreateViewOp,
    DropColumnOp, DropForeignKeyOp, DropIndexOp, DropTableOp, DropViewOp, ModifyColumnOp,
    Operation, RemovePartitioningOp, RepartitionOp,
};

use tracing::{debug, info};

use crate::error::Result;
use crate::render::{MySqlRenderer, Renderer};
use crate::schema::{SchemaSnapshot, TableDefinition, TableStatement};

/// An ordered list of planned operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    /// Operations in execution order.
    pub operations: Vec<Operation>,
}

impl SchemaDiff {
    /// Renders every operation to a statement without terminator.
    #[must_use]
    pub fn to_sql<R: Renderer + ?Sized>(&self, renderer: &R) -> Vec<String> {
        self.operations
            .iter()
            .map(|op| renderer.render_operation(op))
            .collect()
    }

    /// Returns true if the schemas are equivalent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Iterates over the operations in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }
}

/// Plans and renders schema diffs.
#[derive(Debug, Clone)]
pub struct SchemaDiffer<R = MySqlRenderer> {
    renderer: R,
}

impl Default for SchemaDiffer<MySqlRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaDiffer<MySqlRenderer> {
    /// Creates a differ rendering MySQL.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            renderer: MySqlRenderer::new(),
        }
    }
}

impl<R: Renderer> SchemaDiffer<R> {
    /// Creates a differ with a custom renderer.
    #[must_use]
    pub const fn with_renderer(renderer: R) -> Self {
        Self { renderer }
    }

    /// Plans the operations turning `old` into `new`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::MalformedSchema`](crate::DiffError::MalformedSchema)
    /// if either snapshot contains a definition that cannot be diffed.
    pub fn plan(&self, old: &SchemaSnapshot, new: &SchemaSnapshot) -> Result<SchemaDiff> {
        validate::validate_snapshot(old)?;
        validate::validate_snapshot(new)?;

        let mut operations = Vec::new();

        let mut dropped = 0;
        for statement in old.iter().filter(|s| !new.contains(s.name())) {
            debug!(name = statement.name(), view = statement.is_view(), "dropping");
            operations.push(drop_operation(statement));
            dropped += 1;
        }

        let mut created = 0;
        for statement in new.iter().filter(|s| !old.contains(s.name())) {
            debug!(name = statement.name(), view = statement.is_view(), "creating");
            operations.push(create_operation(statement));
            created += 1;
        }

        let mut altered = 0;
        for old_statement in old.iter() {
            let Some(new_statement) = new.get(old_statement.name()) else {
                continue;
            };
            let changes = self.alter(old_statement, new_statement);
            if !changes.is_empty() {
                debug!(
                    name = old_statement.name(),
                    operations = changes.len(),
                    "altering"
                );
                altered += 1;
            }
            operations.extend(changes);
        }

        info!(
            renderer = self.renderer.name(),
            dropped,
            created,
            altered,
            operations = operations.len(),
            "schema diff planned"
        );
        Ok(SchemaDiff { operations })
    }

    /// Plans and renders the statements turning `old` into `new`.
    ///
    /// # Errors
    ///
    /// See [`SchemaDiffer::plan`].
    pub fn diff(&self, old: &SchemaSnapshot, new: &SchemaSnapshot) -> Result<Vec<String>> {
        Ok(self.plan(old, new)?.to_sql(&self.renderer))
    }

    fn alter(&self, old: &TableStatement, new: &TableStatement) -> Vec<Operation> {
        match (old, new) {
            (TableStatement::Table(old), TableStatement::Table(new)) => alter_table(old, new),
            (TableStatement::View(old), TableStatement::View(new)) => {
                views::diff_view(&self.renderer, old, new).into_iter().collect()
            }
            (old, new) => {
                debug!(name = new.name(), "statement kind changed, recreating");
                vec![drop_operation(old), create_operation(new)]
            }
        }
    }
}

fn drop_operation(statement: &TableStatement) -> Operation {
    let name = statement.name().to_string();
    match statement {
        TableStatement::Table(_) => DropTableOp { name }.into(),
        TableStatement::View(_) => DropViewOp { name }.into(),
    }
}

fn create_operation(statement: &TableStatement) -> Operation {
    match statement {
        TableStatement::Table(table) => CreateTableOp {
            table: table.clone(),
        }
        .into(),
        TableStatement::View(view) => CreateViewOp { view: view.clone() }.into(),
    }
}

fn alter_table(old: &TableDefinition, new: &TableDefinition) -> Vec<Operation> {
    let foreign_keys = foreign_keys::diff_foreign_keys(old, new);
    let indexes = indexes::diff_indexes(old, new);

    let mut operations = Vec::new();
    operations.extend(options::diff_options(old, new));
    operations.extend(foreign_keys.drops);
    operations.extend(indexes.drops);
    operations.extend(columns::diff_columns(old, new));
    operations.extend(indexes.adds);
    operations.extend(foreign_keys.adds);
    operations.extend(partitions::diff_partitioning(old, new));
    operations
}

/// Diffs two snapshots and renders MySQL statements.
///
/// # Errors
///
/// Returns [`DiffError::MalformedSchema`](crate::DiffError::MalformedSchema)
/// if either snapshot contains a definition that cannot be diffed.
pub fn diff(old: &SchemaSnapshot, new: &SchemaSnapshot) -> Result<Vec<String>> {
    SchemaDiffer::new().diff(old, new)
}

/// Parses two SQL scripts and diffs them.
///
/// # Errors
///
/// See [`diff`].
pub fn diff_sql(old_sql: &str, new_sql: &str) -> Result<Vec<String>> {
    diff(&SchemaSnapshot::parse(old_sql), &SchemaSnapshot::parse(new_sql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;
    use crate::schema::{Column, ColumnType, Field, ViewDefinition};

    fn sql(old: &str, new: &str) -> Vec<String> {
        diff_sql(old, new).unwrap()
    }

    #[test]
    fn test_identical_schemas() {
        let schema = "CREATE TABLE a (id INT NOT NULL, PRIMARY KEY (id));
                      CREATE VIEW v AS SELECT id FROM a;";
        assert!(sql(schema, schema).is_empty());
    }

    #[test]
    fn test_block_order() {
        let old = "CREATE TABLE keep (id INT);
                   CREATE TABLE gone (id INT);
                   CREATE VIEW old_view AS SELECT 1;";
        let new = "CREATE TABLE fresh (id INT);
                   CREATE TABLE keep (id INT, name VARCHAR(10))";

        assert_eq!(
            sql(old, new),
            [
                "DROP TABLE `gone`",
                "DROP VIEW `old_view`",
                "CREATE TABLE `fresh` (\n  `id` INT\n)",
                "ALTER TABLE `keep` ADD COLUMN `name` VARCHAR(10) AFTER `id`",
            ]
        );
    }

    #[test]
    fn test_alter_phase_order() {
        let old = "CREATE TABLE t (
            id INT NOT NULL,
            parent_id INT,
            legacy INT,
            PRIMARY KEY (id),
            KEY idx_legacy (legacy),
            CONSTRAINT fk_parent FOREIGN KEY (parent_id) REFERENCES p (id)
        ) ENGINE=InnoDB";
        let new = "CREATE TABLE t (
            id INT NOT NULL,
            parent_id INT,
            code INT,
            PRIMARY KEY (id),
            KEY idx_code (code),
            CONSTRAINT fk_parent FOREIGN KEY (parent_id) REFERENCES p (id) ON DELETE CASCADE
        ) ENGINE=MyISAM
        PARTITION BY HASH(id) PARTITIONS 2";

        assert_eq!(
            sql(old, new),
            [
                "ALTER TABLE `t` ENGINE=MyISAM",
                "ALTER TABLE `t` DROP FOREIGN KEY `fk_parent`",
                "ALTER TABLE `t` DROP INDEX `idx_legacy`",
                "ALTER TABLE `t` DROP COLUMN `legacy`",
                "ALTER TABLE `t` ADD COLUMN `code` INT AFTER `parent_id`",
                "ALTER TABLE `t` ADD INDEX `idx_code` (`code`)",
                "ALTER TABLE `t` ADD CONSTRAINT `fk_parent` FOREIGN KEY (`parent_id`) REFERENCES `p` (`id`) ON DELETE CASCADE",
                "ALTER TABLE `t`\nPARTITION BY HASH (id)\nPARTITIONS 2",
            ]
        );
    }

    #[test]
    fn test_table_replaced_by_view() {
        let old = SchemaSnapshot::parse("CREATE TABLE x (id INT)");
        let new = SchemaSnapshot::parse("CREATE VIEW x AS SELECT 1 AS id");

        let plan = SchemaDiffer::new().plan(&old, &new).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(matches!(plan.operations[0], Operation::DropTable(_)));
        assert!(matches!(plan.operations[1], Operation::CreateView(_)));
    }

    #[test]
    fn test_malformed_schema_is_an_error() {
        let mut table = TableDefinition::new("broken");
        let field = Field::new("id", ColumnType::new("INT"));
        table.columns.push(Column::Field(field.clone()));
        table.columns.push(Column::Field(field));

        let old = SchemaSnapshot::new();
        let new = SchemaSnapshot::from_statements([TableStatement::Table(table)]);

        let err = diff(&old, &new).unwrap_err();
        assert!(matches!(err, DiffError::MalformedSchema { ref table, .. } if table == "broken"));
    }

    #[test]
    fn test_custom_renderer() {
        #[derive(Debug)]
        struct Plain;

        impl Renderer for Plain {
            fn name(&self) -> &'static str {
                "plain"
            }

            fn quote_identifier(&self, name: &str) -> String {
                name.to_string()
            }
        }

        let old = SchemaSnapshot::from_statements([TableStatement::View(ViewDefinition::new(
            "v", "SELECT 1",
        ))]);
        let new = SchemaSnapshot::from_statements([TableStatement::View(ViewDefinition::new(
            "v", "SELECT 2",
        ))]);

        let differ = SchemaDiffer::with_renderer(Plain);
        assert_eq!(
            differ.diff(&old, &new).unwrap(),
            ["CREATE OR REPLACE VIEW v AS SELECT 2"]
        );
    }
}
