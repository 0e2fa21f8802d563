//! Key identities and three-way key matching.
//!
//! MySQL identifies indexes and foreign keys by name, generating one when
//! the definition leaves it out. The helpers here assign those names the
//! same way so that both sides of a diff are matched on what the server
//! would actually call each key.

use std::collections::{HashMap, HashSet};

use crate::diff::Operation;
use crate::schema::{KeyEntry, KeyKind, TableDefinition};

/// Name MySQL reserves for the primary key.
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// Name MySQL gives an unnamed index whose first part is an expression.
const FUNCTIONAL_INDEX_NAME: &str = "functional_index";

/// A key entry together with the name it is known by.
///
/// `entry` is normalized so that the identity is spelled out explicitly:
/// two definitions that differ only in whether the name was written are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedKey {
    pub identity: String,
    pub entry: KeyEntry,
}

/// Statements split into the phases the table alter runs them in.
#[derive(Debug, Default)]
pub struct PhasedOperations {
    pub drops: Vec<Operation>,
    pub adds: Vec<Operation>,
}

/// Outcome of matching old keys against new keys by identity.
#[derive(Debug)]
pub struct KeyMatch<'a> {
    /// Only in old, in old order.
    pub removed: Vec<&'a IdentifiedKey>,
    /// In both with different definitions, in old order.
    pub changed: Vec<(&'a IdentifiedKey, &'a IdentifiedKey)>,
    /// Only in new, in new order.
    pub added: Vec<&'a IdentifiedKey>,
}

const fn shares_index_namespace(kind: KeyKind) -> bool {
    matches!(
        kind,
        KeyKind::Primary | KeyKind::Index | KeyKind::Unique | KeyKind::Fulltext | KeyKind::Spatial
    )
}

fn explicit_index_name(entry: &KeyEntry) -> Option<String> {
    if entry.key.kind == KeyKind::Primary {
        return Some(PRIMARY_KEY_NAME.to_string());
    }
    entry.key.name.clone().or_else(|| entry.constraint.clone())
}

fn generated_name(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Every key sharing the index namespace (primary, plain, unique,
/// fulltext and spatial), in declaration order.
///
/// Unnamed keys are named after their first column, suffixed `_2`, `_3`,
/// … on collision.
pub fn index_namespace(table: &TableDefinition) -> Vec<IdentifiedKey> {
    let entries: Vec<&KeyEntry> = table
        .keys()
        .filter(|entry| shares_index_namespace(entry.key.kind))
        .collect();
    let mut taken: HashSet<String> = entries
        .iter()
        .filter_map(|entry| explicit_index_name(entry))
        .collect();

    entries
        .into_iter()
        .map(|entry| {
            let identity = explicit_index_name(entry).unwrap_or_else(|| {
                let base = match entry.key.columns.first() {
                    Some(part) if part.is_expression => FUNCTIONAL_INDEX_NAME,
                    Some(part) => part.column.as_str(),
                    None => "",
                };
                let name = generated_name(base, &taken);
                taken.insert(name.clone());
                name
            });

            let mut entry = entry.clone();
            entry.constraint = None;
            entry.key.name = if entry.key.kind == KeyKind::Primary {
                None
            } else {
                Some(identity.clone())
            };
            IdentifiedKey { identity, entry }
        })
        .collect()
}

/// The primary key and plain indexes, in declaration order.
pub fn index_keys(table: &TableDefinition) -> Vec<IdentifiedKey> {
    index_namespace(table)
        .into_iter()
        .filter(|key| matches!(key.entry.key.kind, KeyKind::Primary | KeyKind::Index))
        .collect()
}

/// Foreign keys in declaration order.
///
/// Identity is the constraint symbol, else the index name, else the
/// generated `<table>_ibfk_<n>`. The normalized entry always carries its
/// identity as constraint symbol.
pub fn foreign_keys(table: &TableDefinition) -> Vec<IdentifiedKey> {
    let entries: Vec<&KeyEntry> = table
        .keys()
        .filter(|entry| entry.key.kind == KeyKind::ForeignKey)
        .collect();
    let mut taken: HashSet<String> = entries
        .iter()
        .filter_map(|entry| entry.constraint.clone().or_else(|| entry.key.name.clone()))
        .collect();
    let mut counter = 0usize;

    entries
        .into_iter()
        .map(|entry| {
            let identity = entry
                .constraint
                .clone()
                .or_else(|| entry.key.name.clone())
                .unwrap_or_else(|| loop {
                    counter += 1;
                    let candidate = format!("{}_ibfk_{counter}", table.name);
                    if taken.insert(candidate.clone()) {
                        break candidate;
                    }
                });

            let mut entry = entry.clone();
            entry.constraint = Some(identity.clone());
            IdentifiedKey { identity, entry }
        })
        .collect()
}

/// Returns the first identity that occurs more than once.
pub fn duplicate_identity(keys: &[IdentifiedKey]) -> Option<&str> {
    let mut seen = HashSet::new();
    keys.iter()
        .map(|key| key.identity.as_str())
        .find(|identity| !seen.insert(*identity))
}

/// Matches keys by identity.
pub fn match_keys<'a>(old: &'a [IdentifiedKey], new: &'a [IdentifiedKey]) -> KeyMatch<'a> {
    let new_by_identity: HashMap<&str, &IdentifiedKey> =
        new.iter().map(|key| (key.identity.as_str(), key)).collect();
    let old_identities: HashSet<&str> = old.iter().map(|key| key.identity.as_str()).collect();

    let mut removed = Vec::new();
    let mut changed = Vec::new();
    for old_key in old {
        match new_by_identity.get(old_key.identity.as_str()) {
            None => removed.push(old_key),
            Some(&new_key) if new_key.entry != old_key.entry => changed.push((old_key, new_key)),
            Some(_) => {}
        }
    }

    let added = new
        .iter()
        .filter(|key| !old_identities.contains(key.identity.as_str()))
        .collect();

    KeyMatch {
        removed,
        changed,
        added,
    }
}
