//! Foreign key differ.

use tracing::debug;

use super::keys::{foreign_keys, match_keys, IdentifiedKey, PhasedOperations};
use crate::diff::{AddKeyOp, DropForeignKeyOp, Operation};
use crate::schema::TableDefinition;

fn drop_op(table: &str, key: &IdentifiedKey) -> Operation {
    DropForeignKeyOp {
        table: table.to_string(),
        name: key.identity.clone(),
    }
    .into()
}

fn add_op(table: &str, key: &IdentifiedKey) -> Operation {
    Operation::AddForeignKey(AddKeyOp {
        table: table.to_string(),
        entry: key.entry.clone(),
    })
}

/// Plans foreign key drops and adds for a table present in both schemas.
///
/// Keys are matched by constraint name. A changed constraint is dropped
/// and re-added under its name.
pub fn diff_foreign_keys(old: &TableDefinition, new: &TableDefinition) -> PhasedOperations {
    let old_keys = foreign_keys(old);
    let new_keys = foreign_keys(new);
    let matched = match_keys(&old_keys, &new_keys);
    let table = old.name.as_str();

    let mut ops = PhasedOperations::default();
    for key in &matched.removed {
        debug!(table, constraint = %key.identity, "foreign key removed");
        ops.drops.push(drop_op(table, key));
    }
    for (old_key, new_key) in &matched.changed {
        debug!(table, constraint = %new_key.identity, "foreign key changed");
        ops.drops.push(drop_op(table, old_key));
        ops.adds.push(add_op(table, new_key));
    }
    for key in &matched.added {
        debug!(table, constraint = %key.identity, "foreign key added");
        ops.adds.push(add_op(table, key));
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{MySqlRenderer, Renderer};
    use crate::schema::{Column, Key, KeyEntry, KeyKind, Reference};

    fn fk(constraint: Option<&str>, column: &str, on_delete: &str) -> KeyEntry {
        let mut key = Key::new(KeyKind::ForeignKey, None, [column]);
        key.reference = Some(Reference {
            table: "parent".into(),
            columns: vec!["id".into()],
            on_delete: Some(on_delete.into()),
            on_update: None,
        });
        match constraint {
            Some(name) => KeyEntry::named(name, key),
            None => KeyEntry::new(key),
        }
    }

    fn table(keys: Vec<KeyEntry>) -> TableDefinition {
        let mut table = TableDefinition::new("child");
        table.columns.extend(keys.into_iter().map(Column::Key));
        table
    }

    fn render(ops: &[Operation]) -> Vec<String> {
        ops.iter().map(|op| MySqlRenderer.render_operation(op)).collect()
    }

    #[test]
    fn test_changed_constraint_is_recreated() {
        let old = table(vec![fk(Some("fk_parent"), "parent_id", "RESTRICT")]);
        let new = table(vec![fk(Some("fk_parent"), "parent_id", "CASCADE")]);

        let ops = diff_foreign_keys(&old, &new);
        assert_eq!(
            render(&ops.drops),
            ["ALTER TABLE `child` DROP FOREIGN KEY `fk_parent`"]
        );
        assert_eq!(
            render(&ops.adds),
            ["ALTER TABLE `child` ADD CONSTRAINT `fk_parent` FOREIGN KEY (`parent_id`) REFERENCES `parent` (`id`) ON DELETE CASCADE"]
        );
    }

    #[test]
    fn test_unnamed_constraint_gets_generated_name() {
        let old = table(vec![]);
        let new = table(vec![fk(None, "parent_id", "CASCADE")]);

        let ops = diff_foreign_keys(&old, &new);
        assert!(ops.drops.is_empty());
        assert_eq!(
            render(&ops.adds),
            ["ALTER TABLE `child` ADD CONSTRAINT `child_ibfk_1` FOREIGN KEY (`parent_id`) REFERENCES `parent` (`id`) ON DELETE CASCADE"]
        );
    }

    #[test]
    fn test_generated_and_written_names_match() {
        let old = table(vec![fk(None, "parent_id", "CASCADE")]);
        let new = table(vec![fk(Some("child_ibfk_1"), "parent_id", "CASCADE")]);
        let ops = diff_foreign_keys(&old, &new);
        assert!(ops.drops.is_empty());
        assert!(ops.adds.is_empty());
    }

    #[test]
    fn test_removed_constraint() {
        let old = table(vec![fk(Some("fk_parent"), "parent_id", "CASCADE")]);
        let ops = diff_foreign_keys(&old, &table(vec![]));
        assert_eq!(
            render(&ops.drops),
            ["ALTER TABLE `child` DROP FOREIGN KEY `fk_parent`"]
        );
        assert!(ops.adds.is_empty());
    }
}
