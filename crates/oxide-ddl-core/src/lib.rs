//! # oxide-ddl-core
//!
//! Computes the ordered `DROP` / `CREATE` / `ALTER` statements that turn
//! one MySQL schema into another, without touching a database.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent parser for `CREATE TABLE`
//!   and `CREATE VIEW` as printed by `mysqldump` and `SHOW CREATE TABLE`
//! - A serde-friendly schema model so snapshots can be stored as JSON
//! - A canonical renderer whose output parses back unchanged
//! - The differ itself, tolerant of the spelling differences between
//!   MySQL 5.7 and 8.0 dumps
//!
//! ## Diffing two scripts
//!
//! ```rust
//! use oxide_ddl_core::diff_sql;
//!
//! let old = "CREATE TABLE `users` (
//!   `id` int(11) NOT NULL,
//!   `name` varchar(50) CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci NOT NULL,
//!   PRIMARY KEY (`id`)
//! ) ENGINE=InnoDB";
//!
//! // A MySQL 8.0 dump of the same table plus one column.
//! let new = "CREATE TABLE `users` (
//!   `id` int NOT NULL,
//!   `name` varchar(50) COLLATE utf8mb4_unicode_ci NOT NULL,
//!   `email` varchar(255) DEFAULT NULL,
//!   PRIMARY KEY (`id`)
//! ) ENGINE=InnoDB";
//!
//! let statements = diff_sql(old, new).unwrap();
//! assert_eq!(
//!     statements,
//!     ["ALTER TABLE `users` ADD COLUMN `email` VARCHAR(255) DEFAULT NULL AFTER `name`"]
//! );
//! ```
//!
//! ## Working with snapshots
//!
//! ```rust
//! use oxide_ddl_core::{SchemaDiffer, SchemaSnapshot};
//!
//! let old = SchemaSnapshot::parse("CREATE TABLE t (id INT)");
//! let new = SchemaSnapshot::parse("CREATE TABLE u (id INT)");
//!
//! let plan = SchemaDiffer::new().plan(&old, &new).unwrap();
//! assert_eq!(plan.len(), 2);
//! ```

pub mod diff;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod schema;

pub use diff::{diff, diff_sql, Operation, SchemaDiff, SchemaDiffer};
pub use error::{DiffError, Result};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_statements, ParseError, Parser};
pub use render::{MySqlRenderer, Renderer};
pub use schema::{SchemaSnapshot, TableDefinition, TableStatement, ViewDefinition};
