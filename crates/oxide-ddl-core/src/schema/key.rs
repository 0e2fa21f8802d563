//! Keys, indexes and constraints.

use serde::{Deserialize, Serialize};

use super::options::OptionSet;

/// The kind of a key definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// `PRIMARY KEY`
    Primary,
    /// `INDEX` / `KEY`
    Index,
    /// `UNIQUE INDEX`
    Unique,
    /// `FULLTEXT INDEX`
    Fulltext,
    /// `SPATIAL INDEX`
    Spatial,
    /// `FOREIGN KEY`
    ForeignKey,
    /// `CHECK`
    Check,
}

impl KeyKind {
    /// Returns the SQL spelling of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY KEY",
            Self::Index => "INDEX",
            Self::Unique => "UNIQUE INDEX",
            Self::Fulltext => "FULLTEXT INDEX",
            Self::Spatial => "SPATIAL INDEX",
            Self::ForeignKey => "FOREIGN KEY",
            Self::Check => "CHECK",
        }
    }
}

/// One column (or expression) of a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPart {
    /// Column name, or the raw expression for functional key parts.
    pub column: String,
    /// Prefix length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    /// `ASC` or `DESC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// True for `((expr))` key parts.
    #[serde(default)]
    pub is_expression: bool,
}

impl KeyPart {
    /// Creates a plain column key part.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            column: name.into(),
            length: None,
            order: None,
            is_expression: false,
        }
    }
}

/// The target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced table.
    pub table: String,
    /// Referenced columns.
    pub columns: Vec<String>,
    /// `ON DELETE` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    /// `ON UPDATE` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

/// A key definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub kind: KeyKind,
    /// Index name (`None` for the primary key and unnamed indexes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub columns: Vec<KeyPart>,
    /// Index method (`BTREE`, `HASH`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using: Option<String>,
    /// Index options (`COMMENT`, `KEY_BLOCK_SIZE`, `INVISIBLE`, `NOT ENFORCED`).
    #[serde(default)]
    pub options: OptionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Body of a `CHECK` constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl Key {
    /// Creates a key of the given kind over plain columns.
    #[must_use]
    pub fn new<I, S>(kind: KeyKind, name: Option<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            name,
            columns: columns.into_iter().map(KeyPart::column).collect(),
            using: None,
            options: OptionSet::new(),
            reference: None,
            expression: None,
        }
    }
}

/// A key entry in a table's definition list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// `CONSTRAINT <symbol>` prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
    pub key: Key,
}

impl KeyEntry {
    /// Wraps a key without a constraint symbol.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            constraint: None,
            key,
        }
    }

    /// Wraps a key with a constraint symbol.
    #[must_use]
    pub fn named(constraint: impl Into<String>, key: Key) -> Self {
        Self {
            constraint: Some(constraint.into()),
            key,
        }
    }
}
