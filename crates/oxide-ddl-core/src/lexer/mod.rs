//! MySQL DDL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for the subset of MySQL that
//! `SHOW CREATE TABLE` and `SHOW CREATE VIEW` produce.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
