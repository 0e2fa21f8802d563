//! Schema model.
//!
//! Structured form of `CREATE TABLE` / `CREATE VIEW` statements as produced
//! by the [parser](crate::parser) and consumed by the [differ](crate::diff).
//! Every type serializes with serde so a snapshot can be stored as JSON.

mod column;
mod key;
mod options;
mod partition;
mod snapshot;
mod statement;

pub use column::{Column, ColumnType, Field};
pub use key::{Key, KeyEntry, KeyKind, KeyPart, Reference};
pub use options::{OptionSet, SqlOption};
pub use partition::{PartitionDefinition, PartitionSpec};
pub use snapshot::SchemaSnapshot;
pub use statement::{TableDefinition, TableStatement, ViewDefinition};
