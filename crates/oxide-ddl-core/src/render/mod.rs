//! Canonical SQL rendering.
//!
//! A [`Renderer`] turns schema structures and planned operations back into
//! SQL text. Rendered definitions parse back to the same structures, so a
//! rendered `CREATE TABLE` can be fed to the parser again unchanged.

mod mysql;

pub use mysql::MySqlRenderer;

use crate::diff::{
    AddColumnOp, AddKeyOp, AlterTableOptionsOp, ColumnPosition, DropColumnOp, DropForeignKeyOp,
    DropIndexOp, ModifyColumnOp, Operation, RepartitionOp,
};
use crate::schema::{
    Column, ColumnType, Field, KeyEntry, KeyKind, KeyPart, OptionSet, PartitionDefinition,
    PartitionSpec, Reference, SqlOption, TableDefinition, TableStatement, ViewDefinition,
};

/// Trait for dialect-specific SQL rendering.
pub trait Renderer {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String;

    // ================================================================
    // Definitions
    // ================================================================

    /// Renders one option as `NAME`, `NAME value` or `NAME=value`.
    fn render_option(&self, option: &SqlOption) -> String {
        match (&option.value, option.assign) {
            (None, _) => option.name.clone(),
            (Some(value), true) => format!("{}={value}", option.name),
            (Some(value), false) => format!("{} {value}", option.name),
        }
    }

    /// Renders options separated by spaces.
    fn render_option_set(&self, options: &OptionSet) -> String {
        options
            .iter()
            .map(|opt| self.render_option(opt))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders a column type with its parameters and attributes.
    fn render_column_type(&self, data_type: &ColumnType) -> String {
        let mut sql = data_type.name.clone();
        if !data_type.parameters.is_empty() {
            sql.push('(');
            sql.push_str(&data_type.parameters.join(","));
            sql.push(')');
        }
        if !data_type.options.is_empty() {
            sql.push(' ');
            sql.push_str(&self.render_option_set(&data_type.options));
        }
        sql
    }

    /// Renders a field definition.
    fn render_field(&self, field: &Field) -> String {
        format!(
            "{} {}",
            self.quote_identifier(&field.name),
            self.render_column_type(&field.data_type)
        )
    }

    /// Renders a key part list such as `(`a`(10) DESC,`b`)`.
    fn render_key_parts(&self, parts: &[KeyPart]) -> String {
        let parts: Vec<String> = parts
            .iter()
            .map(|part| {
                let mut sql = if part.is_expression {
                    part.column.clone()
                } else {
                    self.quote_identifier(&part.column)
                };
                if let Some(length) = &part.length {
                    sql.push_str(&format!("({length})"));
                }
                if let Some(order) = &part.order {
                    sql.push(' ');
                    sql.push_str(order);
                }
                sql
            })
            .collect();
        format!("({})", parts.join(","))
    }

    /// Renders a `REFERENCES` clause.
    fn render_reference(&self, reference: &Reference) -> String {
        let columns: Vec<String> = reference
            .columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect();
        let mut sql = format!(
            "REFERENCES {} ({})",
            self.quote_identifier(&reference.table),
            columns.join(",")
        );
        if let Some(action) = &reference.on_delete {
            sql.push_str(&format!(" ON DELETE {action}"));
        }
        if let Some(action) = &reference.on_update {
            sql.push_str(&format!(" ON UPDATE {action}"));
        }
        sql
    }

    /// Renders a key or constraint definition.
    fn render_key(&self, entry: &KeyEntry) -> String {
        let key = &entry.key;
        let mut parts: Vec<String> = Vec::new();

        if let Some(constraint) = &entry.constraint {
            parts.push(format!("CONSTRAINT {}", self.quote_identifier(constraint)));
        }
        parts.push(key.kind.as_str().to_string());

        if key.kind == KeyKind::Check {
            parts.push(format!("({})", key.expression.as_deref().unwrap_or_default()));
        } else {
            if let Some(name) = &key.name {
                parts.push(self.quote_identifier(name));
            }
            parts.push(self.render_key_parts(&key.columns));
            if let Some(reference) = &key.reference {
                parts.push(self.render_reference(reference));
            }
            if let Some(using) = &key.using {
                parts.push(format!("USING {using}"));
            }
        }

        if !key.options.is_empty() {
            parts.push(self.render_option_set(&key.options));
        }
        parts.join(" ")
    }

    /// Renders one entry of a table's definition list.
    fn render_column(&self, column: &Column) -> String {
        match column {
            Column::Field(field) => self.render_field(field),
            Column::Key(entry) => self.render_key(entry),
        }
    }

    /// Renders a single partition or subpartition definition.
    fn render_partition_definition(&self, definition: &PartitionDefinition) -> String {
        let keyword = if definition.is_subpartition {
            "SUBPARTITION"
        } else {
            "PARTITION"
        };
        let mut sql = format!("{keyword} {}", self.quote_identifier(&definition.name));
        if let Some(values) = &definition.values {
            sql.push_str(" VALUES ");
            sql.push_str(values);
        }
        if !definition.options.is_empty() {
            sql.push(' ');
            sql.push_str(&self.render_option_set(&definition.options));
        }
        if !definition.subpartitions.is_empty() {
            let subs: Vec<String> = definition
                .subpartitions
                .iter()
                .map(|sub| self.render_partition_definition(sub))
                .collect();
            sql.push_str(&format!(" ({})", subs.join(", ")));
        }
        sql
    }

    /// Renders the partition definition list, one partition per line.
    fn render_partition_definitions(&self, definitions: &[PartitionDefinition]) -> String {
        let lines: Vec<String> = definitions
            .iter()
            .map(|d| self.render_partition_definition(d))
            .collect();
        format!("(\n{}\n)", lines.join(",\n"))
    }

    /// Renders a partition clause, one sub-clause per line. Absent
    /// sub-clauses are omitted.
    fn render_partition_spec(&self, spec: &PartitionSpec) -> String {
        let mut lines = Vec::new();
        if let Some(by) = &spec.partition_by {
            lines.push(format!("PARTITION BY {by}"));
        }
        if let Some(num) = spec.partitions_num {
            lines.push(format!("PARTITIONS {num}"));
        }
        if let Some(by) = &spec.subpartition_by {
            lines.push(format!("SUBPARTITION BY {by}"));
        }
        if let Some(num) = spec.subpartitions_num {
            lines.push(format!("SUBPARTITIONS {num}"));
        }
        if !spec.partitions.is_empty() {
            lines.push(self.render_partition_definitions(&spec.partitions));
        }
        lines.join("\n")
    }

    /// Renders a complete `CREATE TABLE` statement.
    fn render_table(&self, table: &TableDefinition) -> String {
        let mut sql = String::from("CREATE ");
        for option in table.create_options.iter().filter(|o| !o.is_named("IF NOT EXISTS")) {
            sql.push_str(&self.render_option(option));
            sql.push(' ');
        }
        sql.push_str("TABLE ");
        if table.create_options.has("IF NOT EXISTS") {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.quote_identifier(&table.name));
        sql.push_str(" (\n");

        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("  {}", self.render_column(c)))
            .collect();
        sql.push_str(&columns.join(",\n"));
        sql.push_str("\n)");

        if !table.options.is_empty() {
            sql.push(' ');
            sql.push_str(&self.render_option_set(&table.options));
        }
        if let Some(spec) = table.partitioning.as_ref().filter(|s| !s.is_empty()) {
            sql.push('\n');
            sql.push_str(&self.render_partition_spec(spec));
        }
        sql
    }

    /// Renders a complete `CREATE VIEW` statement.
    fn render_view(&self, view: &ViewDefinition) -> String {
        let mut sql = String::from("CREATE ");
        if !view.options.is_empty() {
            sql.push_str(&self.render_option_set(&view.options));
            sql.push(' ');
        }
        sql.push_str("VIEW ");
        sql.push_str(&self.quote_identifier(&view.name));
        if !view.columns.is_empty() {
            let columns: Vec<String> = view
                .columns
                .iter()
                .map(|c| self.quote_identifier(c))
                .collect();
            sql.push_str(&format!(" ({})", columns.join(",")));
        }
        sql.push_str(" AS ");
        sql.push_str(&view.query);
        sql
    }

    /// Renders a table or view statement.
    fn render_statement(&self, statement: &TableStatement) -> String {
        match statement {
            TableStatement::Table(table) => self.render_table(table),
            TableStatement::View(view) => self.render_view(view),
        }
    }

    // ================================================================
    // Operations
    // ================================================================

    /// Generates SQL for an operation.
    fn render_operation(&self, operation: &Operation) -> String {
        match operation {
            Operation::DropTable(op) => format!("DROP TABLE {}", self.quote_identifier(&op.name)),
            Operation::DropView(op) => format!("DROP VIEW {}", self.quote_identifier(&op.name)),
            Operation::CreateTable(op) => self.render_table(&op.table),
            Operation::CreateView(op) => self.render_view(&op.view),
            Operation::AlterTableOptions(op) => self.alter_table_options(op),
            Operation::DropForeignKey(op) => self.drop_foreign_key(op),
            Operation::DropIndex(op) => self.drop_index(op),
            Operation::DropColumn(op) => self.drop_column(op),
            Operation::ModifyColumn(op) => self.modify_column(op),
            Operation::AddColumn(op) => self.add_column(op),
            Operation::AddIndex(op) | Operation::AddForeignKey(op) => self.add_key(op),
            Operation::Repartition(op) => self.repartition(op),
            Operation::RemovePartitioning(op) => format!(
                "ALTER TABLE {} REMOVE PARTITIONING",
                self.quote_identifier(&op.table)
            ),
        }
    }

    /// Generates SQL for a table options change.
    fn alter_table_options(&self, op: &AlterTableOptionsOp) -> String {
        format!(
            "ALTER TABLE {} {}",
            self.quote_identifier(&op.table),
            self.render_option_set(&op.options)
        )
    }

    /// Generates SQL for DROP FOREIGN KEY.
    fn drop_foreign_key(&self, op: &DropForeignKeyOp) -> String {
        format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            self.quote_identifier(&op.table),
            self.quote_identifier(&op.name)
        )
    }

    /// Generates SQL for DROP INDEX / DROP PRIMARY KEY.
    fn drop_index(&self, op: &DropIndexOp) -> String {
        if op.primary {
            format!(
                "ALTER TABLE {} DROP PRIMARY KEY",
                self.quote_identifier(&op.table)
            )
        } else {
            format!(
                "ALTER TABLE {} DROP INDEX {}",
                self.quote_identifier(&op.table),
                self.quote_identifier(&op.name)
            )
        }
    }

    /// Generates SQL for DROP COLUMN.
    fn drop_column(&self, op: &DropColumnOp) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quote_identifier(&op.table),
            self.quote_identifier(&op.column)
        )
    }

    /// Renders a `FIRST` / `AFTER` directive.
    fn column_position(&self, position: &ColumnPosition) -> String {
        match position {
            ColumnPosition::First => "FIRST".to_string(),
            ColumnPosition::After(column) => format!("AFTER {}", self.quote_identifier(column)),
        }
    }

    /// Generates SQL for MODIFY COLUMN.
    fn modify_column(&self, op: &ModifyColumnOp) -> String {
        let mut sql = format!(
            "ALTER TABLE {} MODIFY COLUMN {}",
            self.quote_identifier(&op.table),
            self.render_field(&op.field)
        );
        if let Some(position) = &op.position {
            sql.push(' ');
            sql.push_str(&self.column_position(position));
        }
        sql
    }

    /// Generates SQL for ADD COLUMN.
    fn add_column(&self, op: &AddColumnOp) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            self.quote_identifier(&op.table),
            self.render_field(&op.field),
            self.column_position(&op.position)
        )
    }

    /// Generates SQL for adding an index or constraint.
    fn add_key(&self, op: &AddKeyOp) -> String {
        format!(
            "ALTER TABLE {} ADD {}",
            self.quote_identifier(&op.table),
            self.render_key(&op.entry)
        )
    }

    /// Generates SQL restating a partition clause.
    fn repartition(&self, op: &RepartitionOp) -> String {
        format!(
            "ALTER TABLE {}\n{}",
            self.quote_identifier(&op.table),
            self.render_partition_spec(&op.spec)
        )
    }
}
