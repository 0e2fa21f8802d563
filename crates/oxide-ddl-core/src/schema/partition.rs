//! Table partitioning clauses.

use serde::{Deserialize, Serialize};

use super::options::OptionSet;

/// A complete partition clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSpec {
    /// Text after `PARTITION BY` (`HASH (id)`, `RANGE COLUMNS (a,b)`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions_num: Option<u32>,
    /// Text after `SUBPARTITION BY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpartition_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpartitions_num: Option<u32>,
    #[serde(default)]
    pub partitions: Vec<PartitionDefinition>,
}

impl PartitionSpec {
    /// Returns true if no sub-clause is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partition_by.is_none()
            && self.partitions_num.is_none()
            && self.subpartition_by.is_none()
            && self.subpartitions_num.is_none()
            && self.partitions.is_empty()
    }
}

/// A `PARTITION` or `SUBPARTITION` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionDefinition {
    pub name: String,
    #[serde(default)]
    pub is_subpartition: bool,
    /// Text after `VALUES` (`LESS THAN (10)`, `IN (1,2)`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
    /// `ENGINE`, `COMMENT`, `MAX_ROWS`, ... as `NAME=value`.
    #[serde(default)]
    pub options: OptionSet,
    #[serde(default)]
    pub subpartitions: Vec<PartitionDefinition>,
}

impl PartitionDefinition {
    /// Creates a partition with no values clause or options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_subpartition: false,
            values: None,
            options: OptionSet::new(),
            subpartitions: Vec::new(),
        }
    }
}
