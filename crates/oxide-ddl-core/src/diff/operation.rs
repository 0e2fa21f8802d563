//! Migration operations.
//!
//! Every statement the differ emits is first planned as an [`Operation`];
//! a [`Renderer`](crate::render::Renderer) turns it into SQL text.

use crate::schema::{Field, KeyEntry, OptionSet, PartitionSpec, TableDefinition, ViewDefinition};

/// All operations the differ can plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Drop a table that only exists in the old schema.
    DropTable(DropTableOp),
    /// Drop a view that only exists in the old schema.
    DropView(DropViewOp),
    /// Create a table that only exists in the new schema.
    CreateTable(CreateTableOp),
    /// Create a new view, or replace a changed one.
    CreateView(CreateViewOp),
    /// Change table options.
    AlterTableOptions(AlterTableOptionsOp),
    /// Drop a foreign key constraint.
    DropForeignKey(DropForeignKeyOp),
    /// Drop an index or the primary key.
    DropIndex(DropIndexOp),
    /// Drop a column.
    DropColumn(DropColumnOp),
    /// Redefine and/or move a column.
    ModifyColumn(ModifyColumnOp),
    /// Add a column.
    AddColumn(AddColumnOp),
    /// Add an index or the primary key.
    AddIndex(AddKeyOp),
    /// Add a foreign key constraint.
    AddForeignKey(AddKeyOp),
    /// Restate the whole partition clause.
    Repartition(RepartitionOp),
    /// Remove partitioning from a table.
    RemovePartitioning(RemovePartitioningOp),
}

impl Operation {
    /// Returns the table or view the operation applies to.
    #[must_use]
    pub fn object_name(&self) -> &str {
        match self {
            Self::DropTable(op) => &op.name,
            Self::DropView(op) => &op.name,
            Self::CreateTable(op) => &op.table.name,
            Self::CreateView(op) => &op.view.name,
            Self::AlterTableOptions(op) => &op.table,
            Self::DropForeignKey(op) => &op.table,
            Self::DropIndex(op) => &op.table,
            Self::DropColumn(op) => &op.table,
            Self::ModifyColumn(op) => &op.table,
            Self::AddColumn(op) => &op.table,
            Self::AddIndex(op) | Self::AddForeignKey(op) => &op.table,
            Self::Repartition(op) => &op.table,
            Self::RemovePartitioning(op) => &op.table,
        }
    }
}

/// Where a column is placed by `ADD COLUMN` / `MODIFY COLUMN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPosition {
    /// `FIRST`
    First,
    /// `AFTER <column>`
    After(String),
}

/// DROP TABLE operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTableOp {
    pub name: String,
}

impl From<DropTableOp> for Operation {
    fn from(op: DropTableOp) -> Self {
        Self::DropTable(op)
    }
}

/// DROP VIEW operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropViewOp {
    pub name: String,
}

impl From<DropViewOp> for Operation {
    fn from(op: DropViewOp) -> Self {
        Self::DropView(op)
    }
}

/// CREATE TABLE operation, carrying the full new definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableOp {
    pub table: TableDefinition,
}

impl From<CreateTableOp> for Operation {
    fn from(op: CreateTableOp) -> Self {
        Self::CreateTable(op)
    }
}

/// CREATE [OR REPLACE] VIEW operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateViewOp {
    pub view: ViewDefinition,
}

impl From<CreateViewOp> for Operation {
    fn from(op: CreateViewOp) -> Self {
        Self::CreateView(op)
    }
}

/// `ALTER TABLE t OPT=V ...` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTableOptionsOp {
    pub table: String,
    /// Options to set, in new-definition order.
    pub options: OptionSet,
}

impl From<AlterTableOptionsOp> for Operation {
    fn from(op: AlterTableOptionsOp) -> Self {
        Self::AlterTableOptions(op)
    }
}

/// `DROP FOREIGN KEY` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropForeignKeyOp {
    pub table: String,
    pub name: String,
}

impl From<DropForeignKeyOp> for Operation {
    fn from(op: DropForeignKeyOp) -> Self {
        Self::DropForeignKey(op)
    }
}

/// `DROP INDEX` / `DROP PRIMARY KEY` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndexOp {
    pub table: String,
    pub name: String,
    pub primary: bool,
}

impl From<DropIndexOp> for Operation {
    fn from(op: DropIndexOp) -> Self {
        Self::DropIndex(op)
    }
}

/// `DROP COLUMN` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropColumnOp {
    pub table: String,
    pub column: String,
}

impl From<DropColumnOp> for Operation {
    fn from(op: DropColumnOp) -> Self {
        Self::DropColumn(op)
    }
}

/// `MODIFY COLUMN` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyColumnOp {
    pub table: String,
    /// The new definition.
    pub field: Field,
    /// Set when the column also moves.
    pub position: Option<ColumnPosition>,
}

impl From<ModifyColumnOp> for Operation {
    fn from(op: ModifyColumnOp) -> Self {
        Self::ModifyColumn(op)
    }
}

/// `ADD COLUMN` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddColumnOp {
    pub table: String,
    pub field: Field,
    pub position: ColumnPosition,
}

impl From<AddColumnOp> for Operation {
    fn from(op: AddColumnOp) -> Self {
        Self::AddColumn(op)
    }
}

/// `ADD <key>` operation for indexes and foreign keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddKeyOp {
    pub table: String,
    pub entry: KeyEntry,
}

/// Partition clause restatement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepartitionOp {
    pub table: String,
    pub spec: PartitionSpec,
}

impl From<RepartitionOp> for Operation {
    fn from(op: RepartitionOp) -> Self {
        Self::Repartition(op)
    }
}

/// `REMOVE PARTITIONING` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovePartitioningOp {
    pub table: String,
}

impl From<RemovePartitioningOp> for Operation {
    fn from(op: RemovePartitioningOp) -> Self {
        Self::RemovePartitioning(op)
    }
}
