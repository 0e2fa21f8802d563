//! Table options differ.

use tracing::debug;

use crate::diff::{AlterTableOptionsOp, Operation};
use crate::schema::{OptionSet, TableDefinition};

/// Collects the new options whose value differs from the old one.
///
/// Comparison runs one way only: an option dropped from the new
/// definition is left as it is on the server.
pub fn diff_options(old: &TableDefinition, new: &TableDefinition) -> Option<Operation> {
    let changed: OptionSet = new
        .options
        .iter()
        .filter(|option| {
            old.options
                .get(&option.name)
                .is_none_or(|previous| previous.value != option.value)
        })
        .cloned()
        .collect();

    if changed.is_empty() {
        return None;
    }

    debug!(table = %old.name, count = changed.len(), "table options changed");
    Some(
        AlterTableOptionsOp {
            table: old.name.clone(),
            options: changed,
        }
        .into(),
    )
}
