//! MySQL DDL tokenizer.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes MySQL DDL input.
///
/// Executable version comments (`/*!50100 ... */`) are transparent: their
/// body is lexed as ordinary input and the closing `*/` is dropped.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Nesting depth of open version comments.
    version_depth: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            version_depth: 0,
        }
    }

    /// Returns the input being tokenized.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or("")
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Skips whitespace, comments and version-comment delimiters.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            let rest = self.rest();

            // `-- ` needs trailing whitespace in MySQL; `--1` is two minuses.
            if rest.starts_with("--")
                && rest[2..].chars().next().is_none_or(char::is_whitespace)
            {
                self.skip_line();
                continue;
            }

            if rest.starts_with('#') {
                self.skip_line();
                continue;
            }

            if rest.starts_with("/*!") {
                self.pos += 3;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
                self.version_depth += 1;
                continue;
            }

            if self.version_depth > 0 && rest.starts_with("*/") {
                self.pos += 2;
                self.version_depth -= 1;
                continue;
            }

            if rest.starts_with("/*") {
                self.pos += 2;
                self.pos = self
                    .rest()
                    .find("*/")
                    .map_or(self.input.len(), |end| self.pos + end + 2);
                continue;
            }

            break;
        }
    }

    /// Creates a span from start to current position.
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(text.to_string()))
        }
    }

    /// Scans a back-quoted identifier.
    fn scan_quoted_identifier(&mut self) -> Token {
        self.advance(); // `
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('`') if self.peek() == Some('`') => {
                    self.advance();
                    value.push('`');
                }
                Some('`') => break,
                Some(c) => value.push(c),
                None => {
                    return self.make_token(TokenKind::Error(
                        "Unterminated quoted identifier".to_string(),
                    ));
                }
            }
        }

        self.make_token(TokenKind::Identifier(value))
    }

    /// Scans a number, including `0x` and `0b` forms.
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('0') && matches!(self.peek_next(), Some('x' | 'X' | 'b' | 'B')) {
            self.advance();
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            return self.make_token(TokenKind::Number(
                self.input[self.start..self.pos].to_string(),
            ));
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E')
            && self
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number(
            self.input[self.start..self.pos].to_string(),
        ))
    }

    /// Scans a string literal quoted with `quote`.
    ///
    /// Doubled quotes and backslash escapes are resolved. `\%` and `\_`
    /// keep their backslash, as MySQL does.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                Some('\\') => match self.advance() {
                    Some('0') => value.push('\0'),
                    Some('b') => value.push('\u{8}'),
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    Some('Z') => value.push('\u{1a}'),
                    Some(c @ ('%' | '_')) => {
                        value.push('\\');
                        value.push(c);
                    }
                    Some(c) => value.push(c),
                    None => break,
                },
                Some(c) => value.push(c),
                None => {
                    return self.make_token(TokenKind::Error(
                        "Unterminated string literal".to_string(),
                    ));
                }
            }
        }

        self.make_token(TokenKind::String(value))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '\'' | '"' => self.scan_string(c),
            '`' => self.scan_quoted_identifier(),

            // Hex, bit and national string literals: X'0F', b'101', N'abc'
            'x' | 'X' | 'b' | 'B' | 'n' | 'N' if self.peek_next() == Some('\'') => {
                self.advance();
                let token = self.scan_string('\'');
                Token::new(token.kind, self.make_span())
            }

            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' || c == '$' => self.scan_identifier(),

            _ => {
                self.advance();
                let kind = match c {
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    '.' => TokenKind::Dot,
                    '=' => TokenKind::Eq,
                    '@' => TokenKind::At,
                    '-' => TokenKind::Minus,
                    '+' => TokenKind::Plus,
                    c if c.is_ascii_punctuation() => TokenKind::Symbol(c),
                    c => TokenKind::Error(format!("Unexpected character: {c}")),
                };
                self.make_token(kind)
            }
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Identifier(s.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(token_kinds("  \n\t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_create_table_head() {
        assert_eq!(
            token_kinds("CREATE TABLE `user` (id int);"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                ident("user"),
                TokenKind::LeftParen,
                ident("id"),
                ident("int"),
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            token_kinds("-- header\nCREATE # trailing\n/* block */ TABLE"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_double_minus_without_space() {
        assert_eq!(
            token_kinds("--1"),
            vec![
                TokenKind::Minus,
                TokenKind::Minus,
                TokenKind::Number("1".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_version_comment_is_transparent() {
        assert_eq!(
            token_kinds("/*!50100 PARTITION BY HASH (id) */;"),
            vec![
                TokenKind::Keyword(Keyword::Partition),
                TokenKind::Keyword(Keyword::By),
                ident("HASH"),
                TokenKind::LeftParen,
                ident("id"),
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_identifier_escapes() {
        assert_eq!(token_kinds("`a``b`"), vec![ident("a`b"), TokenKind::Eof]);
        assert!(matches!(
            token_kinds("`open")[0],
            TokenKind::Error(ref msg) if msg.contains("Unterminated")
        ));
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            token_kinds(r"'it''s' 'a\'b' 'x\_y'"),
            vec![
                TokenKind::String("it's".into()),
                TokenKind::String("a'b".into()),
                TokenKind::String(r"x\_y".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            token_kinds("\"dq\""),
            vec![TokenKind::String("dq".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 3.14 1e5 0x1F 0b101"),
            vec![
                TokenKind::Number("42".into()),
                TokenKind::Number("3.14".into()),
                TokenKind::Number("1e5".into()),
                TokenKind::Number("0x1F".into()),
                TokenKind::Number("0b101".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_prefixed_string_span_covers_prefix() {
        let tokens = Lexer::new("X'0F'").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::String("0F".into()));
        assert_eq!(tokens[0].span, Span::new(0, 5));
    }

    #[test]
    fn test_definer_symbols() {
        assert_eq!(
            token_kinds("`root`@`%`"),
            vec![ident("root"), TokenKind::At, ident("%"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_operators_become_symbols() {
        assert_eq!(
            token_kinds("a > 0"),
            vec![
                ident("a"),
                TokenKind::Symbol('>'),
                TokenKind::Number("0".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new("CREATE  VIEW").tokenize();
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(8, 12));
    }
}
