//! Partition differ.
//!
//! The partition clause is compared as a whole. Any difference restates
//! the complete new clause; MySQL accepts nothing less.

use tracing::debug;

use crate::diff::{Operation, RemovePartitioningOp, RepartitionOp};
use crate::schema::{PartitionSpec, TableDefinition};

fn partitioning(table: &TableDefinition) -> Option<&PartitionSpec> {
    table.partitioning.as_ref().filter(|spec| !spec.is_empty())
}

/// Plans the partition statement for a table present in both schemas.
pub fn diff_partitioning(old: &TableDefinition, new: &TableDefinition) -> Option<Operation> {
    match (partitioning(old), partitioning(new)) {
        (old_spec, Some(new_spec)) if old_spec != Some(new_spec) => {
            debug!(table = %old.name, "partitioning changed");
            Some(
                RepartitionOp {
                    table: old.name.clone(),
                    spec: new_spec.clone(),
                }
                .into(),
            )
        }
        (Some(_), None) => {
            debug!(table = %old.name, "partitioning removed");
            Some(
                RemovePartitioningOp {
                    table: old.name.clone(),
                }
                .into(),
            )
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{MySqlRenderer, Renderer};
    use crate::schema::PartitionDefinition;

    fn table(spec: Option<PartitionSpec>) -> TableDefinition {
        let mut table = TableDefinition::new("t");
        table.partitioning = spec;
        table
    }

    fn hash(count: u32) -> PartitionSpec {
        PartitionSpec {
            partition_by: Some("HASH (id)".into()),
            partitions_num: Some(count),
            ..PartitionSpec::default()
        }
    }

    #[test]
    fn test_new_partitioning() {
        let op = diff_partitioning(&table(None), &table(Some(hash(4)))).unwrap();
        assert_eq!(
            MySqlRenderer.render_operation(&op),
            "ALTER TABLE `t`\nPARTITION BY HASH (id)\nPARTITIONS 4"
        );
    }

    #[test]
    fn test_unchanged_partitioning() {
        assert!(diff_partitioning(&table(Some(hash(4))), &table(Some(hash(4)))).is_none());
        assert!(diff_partitioning(&table(None), &table(Some(PartitionSpec::default()))).is_none());
    }

    #[test]
    fn test_partial_change_restates_whole_clause() {
        let mut old = PartitionSpec {
            partition_by: Some("RANGE (id)".into()),
            ..PartitionSpec::default()
        };
        let mut p0 = PartitionDefinition::new("p0");
        p0.values = Some("LESS THAN (100)".into());
        old.partitions.push(p0.clone());

        let mut new = old.clone();
        let mut p1 = PartitionDefinition::new("p1");
        p1.values = Some("LESS THAN MAXVALUE".into());
        new.partitions.push(p1);

        let op = diff_partitioning(&table(Some(old)), &table(Some(new))).unwrap();
        assert_eq!(
            MySqlRenderer.render_operation(&op),
            "ALTER TABLE `t`\nPARTITION BY RANGE (id)\n(\nPARTITION `p0` VALUES LESS THAN (100),\nPARTITION `p1` VALUES LESS THAN MAXVALUE\n)"
        );
    }

    #[test]
    fn test_removed_partitioning() {
        let op = diff_partitioning(&table(Some(hash(2))), &table(None)).unwrap();
        assert_eq!(
            MySqlRenderer.render_operation(&op),
            "ALTER TABLE `t` REMOVE PARTITIONING"
        );
    }
}
