//! Token types for the MySQL DDL lexer.

use super::Span;

/// Keywords the DDL grammar dispatches on.
///
/// Any other bare word is lexed as [`TokenKind::Identifier`]; the parser
/// accepts keywords in name positions where the grammar is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Statement heads
    Create,
    Table,
    View,
    Temporary,
    If,
    Not,
    Exists,
    Or,
    Replace,
    Like,
    Select,

    // Keys and constraints
    Primary,
    Key,
    Index,
    Unique,
    Fulltext,
    Spatial,
    Foreign,
    References,
    Constraint,
    Check,
    On,
    Delete,
    Update,
    Match,
    Using,
    Asc,
    Desc,
    Enforced,

    // Column attributes
    Null,
    Default,
    Collate,
    Character,
    Charset,
    Set,
    Comment,
    AutoIncrement,
    Unsigned,
    Signed,
    Zerofill,
    Generated,
    Always,
    As,
    Virtual,
    Stored,
    Visible,
    Invisible,

    // Partitioning
    Partition,
    Partitions,
    Subpartition,
    Subpartitions,
    By,
    Values,
    Less,
    Than,
    Maxvalue,
    In,

    // View clauses
    Algorithm,
    Definer,
    Sql,
    Security,
    With,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "TABLE" => Some(Self::Table),
            "VIEW" => Some(Self::View),
            "TEMPORARY" => Some(Self::Temporary),
            "IF" => Some(Self::If),
            "NOT" => Some(Self::Not),
            "EXISTS" => Some(Self::Exists),
            "OR" => Some(Self::Or),
            "REPLACE" => Some(Self::Replace),
            "LIKE" => Some(Self::Like),
            "SELECT" => Some(Self::Select),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "INDEX" => Some(Self::Index),
            "UNIQUE" => Some(Self::Unique),
            "FULLTEXT" => Some(Self::Fulltext),
            "SPATIAL" => Some(Self::Spatial),
            "FOREIGN" => Some(Self::Foreign),
            "REFERENCES" => Some(Self::References),
            "CONSTRAINT" => Some(Self::Constraint),
            "CHECK" => Some(Self::Check),
            "ON" => Some(Self::On),
            "DELETE" => Some(Self::Delete),
            "UPDATE" => Some(Self::Update),
            "MATCH" => Some(Self::Match),
            "USING" => Some(Self::Using),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "ENFORCED" => Some(Self::Enforced),
            "NULL" => Some(Self::Null),
            "DEFAULT" => Some(Self::Default),
            "COLLATE" => Some(Self::Collate),
            "CHARACTER" => Some(Self::Character),
            "CHARSET" => Some(Self::Charset),
            "SET" => Some(Self::Set),
            "COMMENT" => Some(Self::Comment),
            "AUTO_INCREMENT" => Some(Self::AutoIncrement),
            "UNSIGNED" => Some(Self::Unsigned),
            "SIGNED" => Some(Self::Signed),
            "ZEROFILL" => Some(Self::Zerofill),
            "GENERATED" => Some(Self::Generated),
            "ALWAYS" => Some(Self::Always),
            "AS" => Some(Self::As),
            "VIRTUAL" => Some(Self::Virtual),
            "STORED" => Some(Self::Stored),
            "VISIBLE" => Some(Self::Visible),
            "INVISIBLE" => Some(Self::Invisible),
            "PARTITION" => Some(Self::Partition),
            "PARTITIONS" => Some(Self::Partitions),
            "SUBPARTITION" => Some(Self::Subpartition),
            "SUBPARTITIONS" => Some(Self::Subpartitions),
            "BY" => Some(Self::By),
            "VALUES" => Some(Self::Values),
            "LESS" => Some(Self::Less),
            "THAN" => Some(Self::Than),
            "MAXVALUE" => Some(Self::Maxvalue),
            "IN" => Some(Self::In),
            "ALGORITHM" => Some(Self::Algorithm),
            "DEFINER" => Some(Self::Definer),
            "SQL" => Some(Self::Sql),
            "SECURITY" => Some(Self::Security),
            "WITH" => Some(Self::With),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Temporary => "TEMPORARY",
            Self::If => "IF",
            Self::Not => "NOT",
            Self::Exists => "EXISTS",
            Self::Or => "OR",
            Self::Replace => "REPLACE",
            Self::Like => "LIKE",
            Self::Select => "SELECT",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Index => "INDEX",
            Self::Unique => "UNIQUE",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Constraint => "CONSTRAINT",
            Self::Check => "CHECK",
            Self::On => "ON",
            Self::Delete => "DELETE",
            Self::Update => "UPDATE",
            Self::Match => "MATCH",
            Self::Using => "USING",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Enforced => "ENFORCED",
            Self::Null => "NULL",
            Self::Default => "DEFAULT",
            Self::Collate => "COLLATE",
            Self::Character => "CHARACTER",
            Self::Charset => "CHARSET",
            Self::Set => "SET",
            Self::Comment => "COMMENT",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::Unsigned => "UNSIGNED",
            Self::Signed => "SIGNED",
            Self::Zerofill => "ZEROFILL",
            Self::Generated => "GENERATED",
            Self::Always => "ALWAYS",
            Self::As => "AS",
            Self::Virtual => "VIRTUAL",
            Self::Stored => "STORED",
            Self::Visible => "VISIBLE",
            Self::Invisible => "INVISIBLE",
            Self::Partition => "PARTITION",
            Self::Partitions => "PARTITIONS",
            Self::Subpartition => "SUBPARTITION",
            Self::Subpartitions => "SUBPARTITIONS",
            Self::By => "BY",
            Self::Values => "VALUES",
            Self::Less => "LESS",
            Self::Than => "THAN",
            Self::Maxvalue => "MAXVALUE",
            Self::In => "IN",
            Self::Algorithm => "ALGORITHM",
            Self::Definer => "DEFINER",
            Self::Sql => "SQL",
            Self::Security => "SECURITY",
            Self::With => "WITH",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, kept as written (e.g. `42`, `-`-less `3.14`, `0x1F`).
    Number(String),
    /// String literal with quotes removed and escapes resolved.
    String(String),

    // Identifiers and keywords
    /// Bare or back-quoted identifier (quotes removed).
    Identifier(String),
    /// DDL keyword.
    Keyword(Keyword),

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// =
    Eq,
    /// @
    At,
    /// -
    Minus,
    /// +
    Plus,
    /// Any other punctuation; only ever copied verbatim into fragments.
    Symbol(char),

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if the token can stand for a name: an identifier or
    /// any keyword.
    #[must_use]
    pub const fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier(_) | TokenKind::Keyword(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("CREATE"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("create"), Some(Keyword::Create));
        assert_eq!(
            Keyword::from_str("auto_increment"),
            Some(Keyword::AutoIncrement)
        );
        assert_eq!(Keyword::from_str("engine"), None);
    }

    #[test]
    fn test_keyword_round_trip() {
        for kw in [
            Keyword::Primary,
            Keyword::Subpartitions,
            Keyword::AutoIncrement,
            Keyword::Definer,
        ] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_token_helpers() {
        let eof = Token::new(TokenKind::Eof, Span::new(0, 0));
        let table = Token::new(TokenKind::Keyword(Keyword::Table), Span::new(0, 5));
        let name = Token::new(TokenKind::Identifier("users".into()), Span::new(0, 5));
        let comma = Token::new(TokenKind::Comma, Span::new(0, 1));

        assert!(eof.is_eof());
        assert_eq!(table.as_keyword(), Some(Keyword::Table));
        assert!(table.is_word());
        assert!(name.is_word());
        assert!(!comma.is_word());
        assert_eq!(comma.as_keyword(), None);
    }
}
