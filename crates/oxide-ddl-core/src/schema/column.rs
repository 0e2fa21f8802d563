//! Column entries of a table definition.

use serde::{Deserialize, Serialize};

use super::key::KeyEntry;
use super::options::OptionSet;

/// Integer types whose display width carries no meaning.
const INTEGER_TYPES: [&str; 5] = ["INT", "SMALLINT", "TINYINT", "MEDIUMINT", "BIGINT"];

/// The type of a field: name, parameters and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnType {
    /// Upper-cased type name (`INT`, `VARCHAR`, `ENUM`).
    pub name: String,
    /// Raw parameter texts (`11`, `10`, `2`, `'a'`).
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Attributes in declaration order (`UNSIGNED`, `NOT NULL`, `DEFAULT 0`).
    #[serde(default)]
    pub options: OptionSet,
}

impl ColumnType {
    /// Creates a type with no parameters or attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            options: OptionSet::new(),
        }
    }

    /// Returns true for the integer family.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        INTEGER_TYPES
            .iter()
            .any(|name| self.name.eq_ignore_ascii_case(name))
    }

    /// Returns comparison copies of `self` and `other` with cross-version
    /// noise removed.
    ///
    /// Integer display widths are dropped when both sides are integers.
    /// `CHARACTER SET` is dropped from both when they agree on the presence
    /// of `COLLATE` and at least one side omits the charset.
    #[must_use]
    pub fn compat_key(&self, other: &Self) -> (Self, Self) {
        let mut left = self.clone();
        let mut right = other.clone();

        if left.is_integer() && right.is_integer() {
            left.parameters.clear();
            right.parameters.clear();
        }

        let collate_agrees = left.options.has("COLLATE") == right.options.has("COLLATE");
        let charset_on_both =
            left.options.has("CHARACTER SET") && right.options.has("CHARACTER SET");
        if collate_agrees && !charset_on_both {
            left.options.remove("CHARACTER SET");
            right.options.remove("CHARACTER SET");
        }

        (left, right)
    }

    /// Compares two types under [`ColumnType::compat_key`].
    #[must_use]
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        let (left, right) = self.compat_key(other);
        left == right
    }
}

/// A named field of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Column type and attributes.
    pub data_type: ColumnType,
}

impl Field {
    /// Creates a new field.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// One entry of a table's definition list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum Column {
    /// A typed field.
    Field(Field),
    /// A standalone key or constraint.
    Key(KeyEntry),
}

impl Column {
    /// Returns the field if this entry is one.
    #[must_use]
    pub const fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            Self::Key(_) => None,
        }
    }

    /// Returns the key entry if this entry is one.
    #[must_use]
    pub const fn as_key(&self) -> Option<&KeyEntry> {
        match self {
            Self::Key(entry) => Some(entry),
            Self::Field(_) => None,
        }
    }
}
