//! Command-line front end for `oxide-ddl-core`.
//!
//! Loads two schema versions, diffs them and writes the resulting
//! migration script:
//!
//! ```text
//! oxide-ddl-diff diff schema-v1.sql schema-v2.sql -o migrations/0002.sql
//! oxide-ddl-diff inspect schema-v2.sql > schema-v2.json
//! ```
//!
//! Inputs are SQL scripts (anything `mysqldump --no-data` or
//! `SHOW CREATE TABLE` prints) or JSON snapshots written by `inspect`.

pub mod error;
pub mod input;
pub mod writer;

pub use error::{CliError, Result};
pub use input::{diff_inputs, load_snapshot, parse_snapshot, InputFormat};
pub use writer::{OutputFormat, ScriptHeader, ScriptWriter};
