//! Column differ.
//!
//! Fields are matched by name. Removed fields are dropped in old order;
//! fields present on both sides are modified when their type differs
//! under [`ColumnType::is_compatible_with`](crate::schema::ColumnType::is_compatible_with)
//! or when they have to move; new fields are added at their position.
//!
//! Repositioning keeps the longest run of shared columns whose old order
//! is already right and moves only the rest, so swapping two neighbours
//! costs a single `MODIFY`.

use std::collections::HashMap;

use tracing::debug;

use crate::diff::{AddColumnOp, ColumnPosition, DropColumnOp, ModifyColumnOp, Operation};
use crate::schema::{Field, TableDefinition};

/// Plans column drops, modifies and adds for a table present in both
/// schemas.
pub fn diff_columns(old: &TableDefinition, new: &TableDefinition) -> Vec<Operation> {
    let table = old.name.as_str();
    let old_fields: Vec<&Field> = old.fields().collect();
    let new_fields: Vec<&Field> = new.fields().collect();

    let old_positions: HashMap<&str, usize> = old_fields
        .iter()
        .enumerate()
        .map(|(i, field)| (field.name.as_str(), i))
        .collect();
    let new_positions: HashMap<&str, usize> = new_fields
        .iter()
        .enumerate()
        .map(|(i, field)| (field.name.as_str(), i))
        .collect();

    let mut ops = Vec::new();

    for field in &old_fields {
        if !new_positions.contains_key(field.name.as_str()) {
            debug!(table, column = %field.name, "column removed");
            ops.push(
                DropColumnOp {
                    table: table.to_string(),
                    column: field.name.clone(),
                }
                .into(),
            );
        }
    }

    // (new index, old index) of every shared column, in new order.
    let shared: Vec<(usize, usize)> = new_fields
        .iter()
        .enumerate()
        .filter_map(|(i, field)| old_positions.get(field.name.as_str()).map(|&j| (i, j)))
        .collect();
    let old_order: Vec<usize> = shared.iter().map(|&(_, j)| j).collect();
    let stable = stable_columns(&old_order);

    let mut anchor: Option<&str> = None;
    for (&(i, j), &in_place) in shared.iter().zip(&stable) {
        let new_field = new_fields[i];
        let changed = !old_fields[j]
            .data_type
            .is_compatible_with(&new_field.data_type);
        let position = if in_place {
            None
        } else {
            Some(anchor.map_or(ColumnPosition::First, |previous| {
                ColumnPosition::After(previous.to_string())
            }))
        };

        if changed || position.is_some() {
            debug!(table, column = %new_field.name, changed, moved = !in_place, "column modified");
            ops.push(
                ModifyColumnOp {
                    table: table.to_string(),
                    field: new_field.clone(),
                    position,
                }
                .into(),
            );
        }
        anchor = Some(new_field.name.as_str());
    }

    for (i, field) in new_fields.iter().enumerate() {
        if old_positions.contains_key(field.name.as_str()) {
            continue;
        }
        let position = i.checked_sub(1).map_or(ColumnPosition::First, |previous| {
            ColumnPosition::After(new_fields[previous].name.clone())
        });
        debug!(table, column = %field.name, "column added");
        ops.push(
            AddColumnOp {
                table: table.to_string(),
                field: (*field).clone(),
                position,
            }
            .into(),
        );
    }

    ops
}

/// Marks the shared columns that can stay where they are.
///
/// `old_order` lists the old position of each shared column in new order.
/// The kept columns form a longest increasing subsequence; among equally
/// long ones the columns that come earliest in new order are preferred.
fn stable_columns(old_order: &[usize]) -> Vec<bool> {
    let n = old_order.len();

    // Length of the longest increasing run starting at each position.
    let mut longest = vec![1usize; n];
    for i in (0..n).rev() {
        for j in i + 1..n {
            if old_order[j] > old_order[i] && longest[j] + 1 > longest[i] {
                longest[i] = longest[j] + 1;
            }
        }
    }

    let mut keep = vec![false; n];
    let mut remaining = longest.iter().copied().max().unwrap_or(0);
    let mut last: Option<usize> = None;
    for i in 0..n {
        if remaining == 0 {
            break;
        }
        let follows = last.is_none_or(|previous| old_order[i] > previous);
        if follows && longest[i] == remaining {
            keep[i] = true;
            last = Some(old_order[i]);
            remaining -= 1;
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{MySqlRenderer, Renderer};
    use crate::schema::{Column, ColumnType, SqlOption};

    fn field(name: &str, ty: &str, params: &[&str]) -> Field {
        let mut data_type = ColumnType::new(ty);
        data_type
            .parameters
            .extend(params.iter().map(ToString::to_string));
        Field::new(name, data_type)
    }

    fn int(name: &str) -> Field {
        field(name, "INT", &["11"])
    }

    fn table(fields: Vec<Field>) -> TableDefinition {
        let mut table = TableDefinition::new("t");
        table.columns.extend(fields.into_iter().map(Column::Field));
        table
    }

    fn diff(old: Vec<Field>, new: Vec<Field>) -> Vec<String> {
        diff_columns(&table(old), &table(new))
            .iter()
            .map(|op| MySqlRenderer.render_operation(op))
            .collect()
    }

    #[test]
    fn test_stable_columns() {
        assert_eq!(stable_columns(&[]), Vec::<bool>::new());
        assert_eq!(stable_columns(&[0, 1, 2]), [true, true, true]);
        assert_eq!(stable_columns(&[0, 2, 1]), [true, true, false]);
        assert_eq!(stable_columns(&[2, 0, 1]), [false, true, true]);
        assert_eq!(stable_columns(&[1, 0]), [true, false]);
        assert_eq!(stable_columns(&[3, 0, 1, 2, 4]), [false, true, true, true, true]);
    }

    #[test]
    fn test_unchanged_columns() {
        assert!(diff(vec![int("a"), int("b")], vec![int("a"), int("b")]).is_empty());
    }

    #[test]
    fn test_swap_is_a_single_modify() {
        let ops = diff(
            vec![int("a"), int("b"), int("c")],
            vec![int("a"), int("c"), int("b")],
        );
        assert_eq!(ops, ["ALTER TABLE `t` MODIFY COLUMN `b` INT(11) AFTER `c`"]);
    }

    #[test]
    fn test_move_to_front() {
        let ops = diff(
            vec![int("a"), int("b"), int("c")],
            vec![int("c"), int("a"), int("b")],
        );
        assert_eq!(ops, ["ALTER TABLE `t` MODIFY COLUMN `c` INT(11) FIRST"]);
    }

    #[test]
    fn test_display_width_is_ignored() {
        let ops = diff(
            vec![field("id", "BIGINT", &["20"])],
            vec![field("id", "BIGINT", &[])],
        );
        assert!(ops.is_empty());
    }

    #[test]
    fn test_changed_type() {
        let ops = diff(
            vec![int("a"), field("b", "VARCHAR", &["10"])],
            vec![int("a"), field("b", "VARCHAR", &["20"])],
        );
        assert_eq!(ops, ["ALTER TABLE `t` MODIFY COLUMN `b` VARCHAR(20)"]);
    }

    #[test]
    fn test_drop_then_add() {
        let mut email = field("email", "VARCHAR", &["255"]);
        email.data_type.options.push(SqlOption::flag("NOT NULL"));

        let ops = diff(
            vec![int("id"), int("legacy"), int("age")],
            vec![email, int("id"), int("age"), int("score")],
        );
        assert_eq!(
            ops,
            [
                "ALTER TABLE `t` DROP COLUMN `legacy`",
                "ALTER TABLE `t` ADD COLUMN `email` VARCHAR(255) NOT NULL FIRST",
                "ALTER TABLE `t` ADD COLUMN `score` INT(11) AFTER `age`",
            ]
        );
    }

    #[test]
    fn test_added_column_anchors_on_previous_field() {
        let ops = diff(
            vec![int("a"), int("b")],
            vec![int("a"), int("x"), int("y"), int("b")],
        );
        assert_eq!(
            ops,
            [
                "ALTER TABLE `t` ADD COLUMN `x` INT(11) AFTER `a`",
                "ALTER TABLE `t` ADD COLUMN `y` INT(11) AFTER `x`",
            ]
        );
    }

    #[test]
    fn test_moved_column_anchors_on_shared_column() {
        // `a` moves behind `b`; the new column `x` in between is not an anchor.
        let ops = diff(
            vec![int("a"), int("b")],
            vec![int("b"), int("x"), int("a")],
        );
        assert_eq!(
            ops,
            [
                "ALTER TABLE `t` MODIFY COLUMN `a` INT(11) AFTER `b`",
                "ALTER TABLE `t` ADD COLUMN `x` INT(11) AFTER `b`",
            ]
        );
    }
}
