//! Ordered option lists shared by tables, columns, keys and views.

use serde::{Deserialize, Serialize};

/// A single `NAME`, `NAME value` or `NAME=value` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlOption {
    /// Canonical upper-case option name (`ENGINE`, `NOT NULL`, `CHARACTER SET`).
    pub name: String,
    /// Raw value text, `None` for flag options.
    pub value: Option<String>,
    /// Whether the option renders as `NAME=value` rather than `NAME value`.
    #[serde(default)]
    pub assign: bool,
}

impl SqlOption {
    /// Creates a flag option such as `NOT NULL` or `UNSIGNED`.
    #[must_use]
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            assign: false,
        }
    }

    /// Creates a `NAME value` option.
    #[must_use]
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            assign: false,
        }
    }

    /// Creates a `NAME=value` option.
    #[must_use]
    pub fn assigned(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            assign: true,
        }
    }

    /// Returns true if the option name matches, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An ordered list of options.
///
/// Order is kept for rendering only; lookups go by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(Vec<SqlOption>);

impl OptionSet {
    /// Creates an empty option set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the option with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlOption> {
        self.0.iter().find(|opt| opt.is_named(name))
    }

    /// Returns true if an option with the given name is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the value of the named option, if present and valued.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|opt| opt.value.as_deref())
    }

    /// Removes the named option and returns it.
    pub fn remove(&mut self, name: &str) -> Option<SqlOption> {
        let idx = self.0.iter().position(|opt| opt.is_named(name))?;
        Some(self.0.remove(idx))
    }

    /// Inserts an option at the front.
    pub fn prepend(&mut self, option: SqlOption) {
        self.0.insert(0, option);
    }

    /// Appends an option.
    pub fn push(&mut self, option: SqlOption) {
        self.0.push(option);
    }

    /// Iterates the options in order.
    pub fn iter(&self) -> impl Iterator<Item = &SqlOption> {
        self.0.iter()
    }

    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SqlOption> for OptionSet {
    fn from_iter<I: IntoIterator<Item = SqlOption>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a SqlOption;
    type IntoIter = std::slice::Iter<'a, SqlOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
