//! Index and primary key differ.
//!
//! Only plain indexes and the primary key are compared. A changed index is
//! always dropped and re-added; MySQL has no in-place index alter.

use tracing::debug;

use super::keys::{index_keys, match_keys, IdentifiedKey, PhasedOperations};
use crate::diff::{AddKeyOp, DropIndexOp, Operation};
use crate::schema::{KeyKind, TableDefinition};

fn drop_op(table: &str, key: &IdentifiedKey) -> Operation {
    DropIndexOp {
        table: table.to_string(),
        name: key.identity.clone(),
        primary: key.entry.key.kind == KeyKind::Primary,
    }
    .into()
}

fn add_op(table: &str, key: &IdentifiedKey) -> Operation {
    Operation::AddIndex(AddKeyOp {
        table: table.to_string(),
        entry: key.entry.clone(),
    })
}

/// Plans index drops and adds for a table present in both schemas.
pub fn diff_indexes(old: &TableDefinition, new: &TableDefinition) -> PhasedOperations {
    let old_keys = index_keys(old);
    let new_keys = index_keys(new);
    let matched = match_keys(&old_keys, &new_keys);
    let table = old.name.as_str();

    let mut ops = PhasedOperations::default();
    for key in &matched.removed {
        debug!(table, index = %key.identity, "index removed");
        ops.drops.push(drop_op(table, key));
    }
    for (old_key, new_key) in &matched.changed {
        debug!(table, index = %new_key.identity, "index changed");
        ops.drops.push(drop_op(table, old_key));
        ops.adds.push(add_op(table, new_key));
    }
    for key in &matched.added {
        debug!(table, index = %key.identity, "index added");
        ops.adds.push(add_op(table, key));
    }
    ops
}
