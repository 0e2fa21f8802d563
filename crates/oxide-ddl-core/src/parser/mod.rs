//! MySQL DDL Parser
//!
//! A hand-written recursive descent parser for `CREATE TABLE` and
//! `CREATE VIEW`. Expressions (defaults, checks, partition functions, view
//! queries) are not parsed further; their source text is kept with
//! whitespace collapsed.

mod error;
mod fragment;
mod parser;

pub use error::ParseError;
pub use fragment::normalize_fragment;
pub use parser::{parse_statements, Parser};
