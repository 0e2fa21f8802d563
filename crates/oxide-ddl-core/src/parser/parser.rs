//! MySQL DDL parser implementation.

use tracing::{debug, warn};

use super::error::ParseError;
use super::fragment::normalize_fragment;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::schema::{
    Column, ColumnType, Field, Key, KeyEntry, KeyKind, KeyPart, OptionSet, PartitionDefinition,
    PartitionSpec, Reference, SqlOption, TableDefinition, TableStatement, ViewDefinition,
};

/// Parses every `CREATE TABLE` / `CREATE VIEW` statement of a script.
///
/// Other statement kinds are skipped. A malformed `CREATE` is logged and
/// skipped; parsing resumes after its terminating `;`.
#[must_use]
pub fn parse_statements(sql: &str) -> Vec<TableStatement> {
    let mut parser = Parser::new(sql);
    let mut statements = Vec::new();

    while !parser.is_at_end() {
        match parser.parse_statement() {
            Ok(Some(statement)) => {
                debug!(
                    name = statement.name(),
                    view = statement.is_view(),
                    "parsed statement"
                );
                statements.push(statement);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "skipping malformed CREATE statement");
                parser.skip_statement();
            }
        }
    }

    statements
}

/// MySQL DDL parser.
pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            input,
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
        }
    }

    /// Skips empty statements and returns true at end of input.
    pub fn is_at_end(&mut self) -> bool {
        while self.eat(&TokenKind::Semicolon) {}
        self.current.is_eof()
    }

    /// Parses a single statement.
    ///
    /// Returns `Ok(None)` for statement kinds other than `CREATE TABLE` and
    /// `CREATE VIEW`; those are consumed up to their terminating `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if a `CREATE TABLE` or `CREATE VIEW`
    /// statement is malformed.
    pub fn parse_statement(&mut self) -> Result<Option<TableStatement>, ParseError> {
        if self.is_at_end() {
            return Ok(None);
        }

        if !self.eat_keyword(Keyword::Create) {
            self.skip_statement();
            return Ok(None);
        }

        match self.parse_create()? {
            Some(statement) => {
                self.finish_statement()?;
                Ok(Some(statement))
            }
            None => {
                self.skip_statement();
                Ok(None)
            }
        }
    }

    /// Advances past the next top-level `;` (or to end of input).
    pub fn skip_statement(&mut self) {
        while !self.current.is_eof() {
            let done = self.check(&TokenKind::Semicolon);
            self.advance();
            if done {
                break;
            }
        }
    }

    fn finish_statement(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon) || self.current.is_eof() {
            Ok(())
        } else {
            Err(self.unexpected("end of statement"))
        }
    }

    /// Parses what follows `CREATE`.
    fn parse_create(&mut self) -> Result<Option<TableStatement>, ParseError> {
        let mut head = OptionSet::new();

        loop {
            match self.current.as_keyword() {
                Some(Keyword::Or) => {
                    self.advance();
                    self.expect_keyword(Keyword::Replace)?;
                    head.push(SqlOption::flag("OR REPLACE"));
                }
                Some(Keyword::Temporary) => {
                    self.advance();
                    head.push(SqlOption::flag("TEMPORARY"));
                }
                Some(Keyword::Algorithm) => {
                    self.advance();
                    self.expect(&TokenKind::Eq)?;
                    let value = self.parse_upper_word()?;
                    head.push(SqlOption::assigned("ALGORITHM", value));
                }
                Some(Keyword::Definer) => {
                    self.advance();
                    self.expect(&TokenKind::Eq)?;
                    let value = self.parse_definer()?;
                    head.push(SqlOption::assigned("DEFINER", value));
                }
                Some(Keyword::Sql) => {
                    self.advance();
                    self.expect_keyword(Keyword::Security)?;
                    let value = self.parse_upper_word()?;
                    head.push(SqlOption::with_value("SQL SECURITY", value));
                }
                Some(Keyword::Table) => {
                    self.advance();
                    return self.parse_table(head).map(|t| Some(t.into()));
                }
                Some(Keyword::View) => {
                    self.advance();
                    return self.parse_view(head).map(|v| Some(v.into()));
                }
                _ => {
                    debug!(found = ?self.current.kind, "skipping unsupported CREATE statement");
                    return Ok(None);
                }
            }
        }
    }

    /// Parses `user@host` or `CURRENT_USER[()]`.
    fn parse_definer(&mut self) -> Result<String, ParseError> {
        let start = self.current.span;
        self.parse_user_part()?;
        if self.eat(&TokenKind::At) {
            self.parse_user_part()?;
        } else if self.check(&TokenKind::LeftParen) {
            self.skip_group()?;
        }
        Ok(self.source_from(start))
    }

    fn parse_user_part(&mut self) -> Result<(), ParseError> {
        if self.current.is_word() || matches!(self.current.kind, TokenKind::String(_)) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected("user or host name"))
        }
    }

    // ---------------------------------------------------------------------
    // CREATE TABLE
    // ---------------------------------------------------------------------

    fn parse_table(&mut self, mut create_options: OptionSet) -> Result<TableDefinition, ParseError> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            create_options.push(SqlOption::flag("IF NOT EXISTS"));
        }

        let name = self.parse_qualified_name()?;
        if self.check_keyword(Keyword::Like) {
            return Err(ParseError::new(
                "CREATE TABLE ... LIKE is not supported",
                self.current.span,
            ));
        }

        let mut table = TableDefinition::new(name);
        table.create_options = create_options;

        self.expect(&TokenKind::LeftParen)?;
        let mut inline_keys = Vec::new();
        loop {
            let entry = if self.is_key_start() {
                Column::Key(self.parse_key_entry()?)
            } else {
                Column::Field(self.parse_field(&mut inline_keys)?)
            };
            table.columns.push(entry);

            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RightParen)?;
            break;
        }
        table
            .columns
            .extend(inline_keys.into_iter().map(Column::Key));

        self.parse_table_options(&mut table.options)?;

        if self.check_keyword(Keyword::Partition) {
            table.partitioning = Some(self.parse_partition_spec()?);
        }

        Ok(table)
    }

    fn is_key_start(&self) -> bool {
        matches!(
            self.current.as_keyword(),
            Some(
                Keyword::Primary
                    | Keyword::Key
                    | Keyword::Index
                    | Keyword::Unique
                    | Keyword::Fulltext
                    | Keyword::Spatial
                    | Keyword::Foreign
                    | Keyword::Constraint
                    | Keyword::Check
            )
        )
    }

    /// Parses a field definition. Keys declared inline are pushed onto
    /// `inline_keys`.
    fn parse_field(&mut self, inline_keys: &mut Vec<KeyEntry>) -> Result<Field, ParseError> {
        let name = self.parse_name()?;
        let mut data_type = self.parse_data_type()?;
        let options = &mut data_type.options;

        loop {
            if matches!(self.current.kind, TokenKind::Comma | TokenKind::RightParen) {
                break;
            }

            if let Some(kw) = self.current.as_keyword() {
                match kw {
                    Keyword::Unsigned | Keyword::Signed | Keyword::Zerofill => {
                        options.push(SqlOption::flag(kw.as_str()));
                        self.advance();
                    }
                    Keyword::Character | Keyword::Charset => {
                        if self.eat_keyword(Keyword::Character) {
                            self.expect_keyword(Keyword::Set)?;
                        } else {
                            self.advance();
                        }
                        let charset = self.parse_name()?;
                        options.push(SqlOption::with_value("CHARACTER SET", charset));
                    }
                    Keyword::Collate => {
                        self.advance();
                        let collation = self.parse_name()?;
                        options.push(SqlOption::with_value("COLLATE", collation));
                    }
                    Keyword::Not => {
                        self.advance();
                        self.expect_keyword(Keyword::Null)?;
                        options.push(SqlOption::flag("NOT NULL"));
                    }
                    Keyword::Null => {
                        self.advance();
                        options.push(SqlOption::flag("NULL"));
                    }
                    Keyword::Default => {
                        self.advance();
                        let value = self.parse_value_term()?;
                        options.push(SqlOption::with_value("DEFAULT", value));
                    }
                    Keyword::AutoIncrement => {
                        self.advance();
                        options.push(SqlOption::flag("AUTO_INCREMENT"));
                    }
                    Keyword::On => {
                        self.advance();
                        self.expect_keyword(Keyword::Update)?;
                        let value = self.parse_value_term()?;
                        options.push(SqlOption::with_value("ON UPDATE", value));
                    }
                    Keyword::Comment => {
                        self.advance();
                        let value = self.parse_value_term()?;
                        options.push(SqlOption::with_value("COMMENT", value));
                    }
                    Keyword::Generated | Keyword::As => {
                        if self.eat_keyword(Keyword::Generated) {
                            self.expect_keyword(Keyword::Always)?;
                        }
                        self.expect_keyword(Keyword::As)?;
                        let expr = self.parse_group_text()?;
                        options.push(SqlOption::with_value("GENERATED ALWAYS AS", expr));
                    }
                    Keyword::Virtual | Keyword::Stored | Keyword::Visible | Keyword::Invisible => {
                        options.push(SqlOption::flag(kw.as_str()));
                        self.advance();
                    }
                    Keyword::Primary | Keyword::Key => {
                        if self.eat_keyword(Keyword::Primary) {
                            self.expect_keyword(Keyword::Key)?;
                        } else {
                            self.advance();
                        }
                        inline_keys.push(KeyEntry::new(Key::new(
                            KeyKind::Primary,
                            None,
                            [name.clone()],
                        )));
                    }
                    Keyword::Unique => {
                        self.advance();
                        self.eat_keyword(Keyword::Key);
                        inline_keys.push(KeyEntry::new(Key::new(
                            KeyKind::Unique,
                            Some(name.clone()),
                            [name.clone()],
                        )));
                    }
                    Keyword::Constraint | Keyword::Check => {
                        let mut constraint = None;
                        if self.eat_keyword(Keyword::Constraint) && !self.check_keyword(Keyword::Check)
                        {
                            constraint = Some(self.parse_name()?);
                        }
                        self.expect_keyword(Keyword::Check)?;
                        let key = self.parse_check_body()?;
                        inline_keys.push(KeyEntry { constraint, key });
                    }
                    Keyword::References => {
                        // MySQL accepts and ignores inline references.
                        self.advance();
                        let reference = self.parse_reference()?;
                        debug!(column = %name, table = %reference.table, "ignoring inline REFERENCES");
                    }
                    _ => return Err(self.unexpected("column attribute")),
                }
                continue;
            }

            let Some(word) = self.bare_word() else {
                return Err(self.unexpected("column attribute"));
            };
            match word.as_str() {
                "BINARY" => {
                    self.advance();
                    options.push(SqlOption::flag("BINARY"));
                }
                "COLUMN_FORMAT" | "STORAGE" | "SRID" => {
                    self.advance();
                    let value = self.parse_value_term()?.to_ascii_uppercase();
                    options.push(SqlOption::with_value(word.clone(), value));
                }
                _ => return Err(self.unexpected("column attribute")),
            }
        }

        Ok(Field::new(name, data_type))
    }

    /// Parses a type name and its parameter list.
    fn parse_data_type(&mut self) -> Result<ColumnType, ParseError> {
        let mut name = self.parse_upper_word()?;
        if name == "DOUBLE" && self.eat_word("PRECISION") {
            name.push_str(" PRECISION");
        }

        let mut data_type = ColumnType::new(name);
        if self.check(&TokenKind::LeftParen) {
            data_type.parameters = self.parse_parameter_list()?;
        }
        Ok(data_type)
    }

    /// Parses `(p1, p2, ...)` keeping each parameter's source text.
    fn parse_parameter_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut params = Vec::new();
        if self.eat(&TokenKind::RightParen) {
            return Ok(params);
        }

        loop {
            let start = self.current.span;
            loop {
                match self.current.kind {
                    TokenKind::Comma | TokenKind::RightParen => break,
                    TokenKind::LeftParen => self.skip_group()?,
                    TokenKind::Eof => return Err(self.unexpected(")")),
                    _ => self.advance(),
                }
            }
            if self.previous.span.end <= start.start {
                return Err(self.unexpected("type parameter"));
            }
            params.push(self.source_from(start));

            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(params);
        }
    }

    /// Parses a standalone key or constraint definition.
    fn parse_key_entry(&mut self) -> Result<KeyEntry, ParseError> {
        let mut constraint = None;
        if self.eat_keyword(Keyword::Constraint)
            && !matches!(
                self.current.as_keyword(),
                Some(Keyword::Primary | Keyword::Unique | Keyword::Foreign | Keyword::Check)
            )
        {
            constraint = Some(self.parse_name()?);
        }

        let key = match self.current.as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.parse_index(KeyKind::Primary, None)?
            }
            Some(Keyword::Key | Keyword::Index) => {
                self.advance();
                let name = self.parse_optional_index_name()?;
                self.parse_index(KeyKind::Index, name)?
            }
            Some(Keyword::Unique) => {
                self.advance();
                let _ = self.eat_keyword(Keyword::Key) || self.eat_keyword(Keyword::Index);
                let name = self.parse_optional_index_name()?;
                self.parse_index(KeyKind::Unique, name)?
            }
            Some(kw @ (Keyword::Fulltext | Keyword::Spatial)) => {
                self.advance();
                let _ = self.eat_keyword(Keyword::Key) || self.eat_keyword(Keyword::Index);
                let name = self.parse_optional_index_name()?;
                let kind = if kw == Keyword::Fulltext {
                    KeyKind::Fulltext
                } else {
                    KeyKind::Spatial
                };
                self.parse_index(kind, name)?
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let name = self.parse_optional_index_name()?;
                let mut key = Key::new(KeyKind::ForeignKey, name, Vec::<String>::new());
                key.columns = self.parse_key_parts()?;
                self.expect_keyword(Keyword::References)?;
                key.reference = Some(self.parse_reference()?);
                key
            }
            Some(Keyword::Check) => {
                self.advance();
                self.parse_check_body()?
            }
            _ => return Err(self.unexpected("key definition")),
        };

        Ok(KeyEntry { constraint, key })
    }

    fn parse_optional_index_name(&mut self) -> Result<Option<String>, ParseError> {
        if self.current.is_word() && !self.check_keyword(Keyword::Using) {
            Ok(Some(self.parse_name()?))
        } else {
            Ok(None)
        }
    }

    /// Parses `[USING m] (parts) [index options]`.
    fn parse_index(&mut self, kind: KeyKind, name: Option<String>) -> Result<Key, ParseError> {
        let mut key = Key::new(kind, name, Vec::<String>::new());
        if self.eat_keyword(Keyword::Using) {
            key.using = Some(self.parse_upper_word()?);
        }
        key.columns = self.parse_key_parts()?;

        loop {
            if self.eat_keyword(Keyword::Using) {
                key.using = Some(self.parse_upper_word()?);
            } else if self.eat_keyword(Keyword::Comment) {
                let value = self.parse_value_term()?;
                key.options.push(SqlOption::with_value("COMMENT", value));
            } else if let Some(kw @ (Keyword::Visible | Keyword::Invisible)) =
                self.current.as_keyword()
            {
                self.advance();
                key.options.push(SqlOption::flag(kw.as_str()));
            } else if self.eat_keyword(Keyword::With) {
                if !self.eat_word("PARSER") {
                    return Err(self.unexpected("PARSER"));
                }
                let parser = self.parse_name()?;
                key.options.push(SqlOption::with_value("WITH PARSER", parser));
            } else if let Some(word) = self
                .bare_word()
                .filter(|w| matches!(w.as_str(), "KEY_BLOCK_SIZE" | "ENGINE_ATTRIBUTE"))
            {
                self.advance();
                self.eat(&TokenKind::Eq);
                let value = self.parse_value_term()?;
                key.options.push(SqlOption::assigned(word, value));
            } else {
                break;
            }
        }

        Ok(key)
    }

    /// Parses `(col[(len)] [ASC|DESC], ((expr)) ...)`.
    fn parse_key_parts(&mut self) -> Result<Vec<KeyPart>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut parts = Vec::new();

        loop {
            let mut part = if self.check(&TokenKind::LeftParen) {
                KeyPart {
                    column: self.parse_group_text()?,
                    length: None,
                    order: None,
                    is_expression: true,
                }
            } else {
                let mut part = KeyPart::column(self.parse_name()?);
                if self.eat(&TokenKind::LeftParen) {
                    part.length = Some(self.parse_number_text()?);
                    self.expect(&TokenKind::RightParen)?;
                }
                part
            };

            if self.eat_keyword(Keyword::Desc) {
                part.order = Some("DESC".to_string());
            } else {
                // Ascending is the default and is never spelled out.
                self.eat_keyword(Keyword::Asc);
            }
            parts.push(part);

            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(parts);
        }
    }

    /// Parses what follows `REFERENCES`.
    fn parse_reference(&mut self) -> Result<Reference, ParseError> {
        let table = self.parse_qualified_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = vec![self.parse_name()?];
        while self.eat(&TokenKind::Comma) {
            columns.push(self.parse_name()?);
        }
        self.expect(&TokenKind::RightParen)?;

        let mut reference = Reference {
            table,
            columns,
            on_delete: None,
            on_update: None,
        };

        loop {
            if self.eat_keyword(Keyword::Match) {
                let _ = self.parse_upper_word()?;
            } else if self.eat_keyword(Keyword::On) {
                if self.eat_keyword(Keyword::Delete) {
                    reference.on_delete = Some(self.parse_reference_action()?);
                } else {
                    self.expect_keyword(Keyword::Update)?;
                    reference.on_update = Some(self.parse_reference_action()?);
                }
            } else {
                return Ok(reference);
            }
        }
    }

    fn parse_reference_action(&mut self) -> Result<String, ParseError> {
        if self.eat_keyword(Keyword::Set) {
            if self.eat_keyword(Keyword::Null) {
                return Ok("SET NULL".to_string());
            }
            self.expect_keyword(Keyword::Default)?;
            return Ok("SET DEFAULT".to_string());
        }
        if self.eat_word("NO") {
            if !self.eat_word("ACTION") {
                return Err(self.unexpected("ACTION"));
            }
            return Ok("NO ACTION".to_string());
        }
        match self.bare_word().as_deref() {
            Some("RESTRICT" | "CASCADE") => self.parse_upper_word(),
            _ => Err(self.unexpected("referential action")),
        }
    }

    /// Parses `(expr) [[NOT] ENFORCED]` after `CHECK`.
    fn parse_check_body(&mut self) -> Result<Key, ParseError> {
        let mut key = Key::new(KeyKind::Check, None, Vec::<String>::new());
        key.expression = Some(self.parse_group_inner()?);

        if self.eat_keyword(Keyword::Not) {
            self.expect_keyword(Keyword::Enforced)?;
            key.options.push(SqlOption::flag("NOT ENFORCED"));
        } else if self.eat_keyword(Keyword::Enforced) {
            key.options.push(SqlOption::flag("ENFORCED"));
        }
        Ok(key)
    }

    /// Parses the option list after the definition list.
    fn parse_table_options(&mut self, options: &mut OptionSet) -> Result<(), ParseError> {
        loop {
            self.eat(&TokenKind::Comma);
            if self.current.is_eof()
                || self.check(&TokenKind::Semicolon)
                || self.check_keyword(Keyword::Partition)
            {
                return Ok(());
            }

            let has_default = self.eat_keyword(Keyword::Default);
            let name = if self.eat_keyword(Keyword::Character) {
                self.expect_keyword(Keyword::Set)?;
                "CHARACTER SET".to_string()
            } else if self.eat_keyword(Keyword::Charset) {
                "CHARACTER SET".to_string()
            } else if self.eat_keyword(Keyword::Collate) {
                "COLLATE".to_string()
            } else if has_default {
                return Err(self.unexpected("CHARACTER SET or COLLATE"));
            } else {
                self.parse_option_name()?
            };

            self.eat(&TokenKind::Eq);
            let value = self.parse_value_term()?;
            options.push(SqlOption::assigned(name, value));
        }
    }

    /// Parses a table or partition option name, joining `DATA DIRECTORY`
    /// and `INDEX DIRECTORY`.
    fn parse_option_name(&mut self) -> Result<String, ParseError> {
        let Some(word) = self.bare_word() else {
            return Err(self.unexpected("option name"));
        };
        self.advance();
        if matches!(word.as_str(), "DATA" | "INDEX") && self.eat_word("DIRECTORY") {
            return Ok(format!("{word} DIRECTORY"));
        }
        Ok(word)
    }

    // ---------------------------------------------------------------------
    // PARTITION BY
    // ---------------------------------------------------------------------

    fn parse_partition_spec(&mut self) -> Result<PartitionSpec, ParseError> {
        self.expect_keyword(Keyword::Partition)?;
        self.expect_keyword(Keyword::By)?;

        let mut spec = PartitionSpec {
            partition_by: Some(self.parse_partition_function()?),
            ..PartitionSpec::default()
        };

        if self.eat_keyword(Keyword::Partitions) {
            spec.partitions_num = Some(self.parse_count()?);
        }

        if self.eat_keyword(Keyword::Subpartition) {
            self.expect_keyword(Keyword::By)?;
            spec.subpartition_by = Some(self.parse_partition_function()?);
            if self.eat_keyword(Keyword::Subpartitions) {
                spec.subpartitions_num = Some(self.parse_count()?);
            }
        }

        if self.check(&TokenKind::LeftParen) {
            spec.partitions = self.parse_partition_definitions(false)?;
        }

        Ok(spec)
    }

    /// Collects the partitioning function text (`HASH (id)`, `RANGE COLUMNS (a)`).
    ///
    /// The argument list is always separated from the method by one space,
    /// the way `SHOW CREATE TABLE` prints it.
    fn parse_partition_function(&mut self) -> Result<String, ParseError> {
        let start = self.current.span;
        let mut arguments = None;
        let mut consumed = false;

        loop {
            match &self.current.kind {
                TokenKind::Eof | TokenKind::Semicolon => break,
                TokenKind::Keyword(
                    Keyword::Partitions | Keyword::Subpartition | Keyword::Subpartitions,
                ) => break,
                TokenKind::LeftParen => {
                    if matches!(
                        self.peek_token().as_keyword(),
                        Some(Keyword::Partition | Keyword::Subpartition)
                    ) {
                        break;
                    }
                    if arguments.is_none() {
                        arguments = Some(self.current.span);
                    }
                    self.skip_group()?;
                }
                _ => self.advance(),
            }
            consumed = true;
        }

        if !consumed {
            return Err(self.unexpected("partitioning function"));
        }
        match arguments {
            Some(open) if open.start > start.start => {
                let method = Span::new(start.start, open.start).text(self.input);
                Ok(format!(
                    "{} {}",
                    normalize_fragment(method),
                    self.source_from(open)
                ))
            }
            _ => Ok(self.source_from(start)),
        }
    }

    fn parse_partition_definitions(
        &mut self,
        subpartitions: bool,
    ) -> Result<Vec<PartitionDefinition>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut definitions = Vec::new();
        loop {
            definitions.push(self.parse_partition_definition(subpartitions)?);
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(definitions);
        }
    }

    fn parse_partition_definition(
        &mut self,
        is_subpartition: bool,
    ) -> Result<PartitionDefinition, ParseError> {
        if is_subpartition {
            self.expect_keyword(Keyword::Subpartition)?;
        } else {
            self.expect_keyword(Keyword::Partition)?;
        }

        let mut definition = PartitionDefinition::new(self.parse_name()?);
        definition.is_subpartition = is_subpartition;

        if self.eat_keyword(Keyword::Values) {
            let start = self.current.span;
            if self.eat_keyword(Keyword::Less) {
                self.expect_keyword(Keyword::Than)?;
                if !self.eat_keyword(Keyword::Maxvalue) {
                    self.skip_group()?;
                }
            } else {
                self.expect_keyword(Keyword::In)?;
                self.skip_group()?;
            }
            definition.values = Some(self.source_from(start));
        }

        loop {
            if self.check(&TokenKind::LeftParen) && !is_subpartition {
                definition.subpartitions = self.parse_partition_definitions(true)?;
                break;
            }
            if !self.current.is_word() {
                break;
            }
            if self.eat_word("STORAGE") && !self.check_word("ENGINE") {
                return Err(self.unexpected("ENGINE"));
            }
            let name = self.parse_option_name()?;
            self.eat(&TokenKind::Eq);
            let value = self.parse_value_term()?;
            definition.options.push(SqlOption::assigned(name, value));
        }

        Ok(definition)
    }

    fn parse_count(&mut self) -> Result<u32, ParseError> {
        let span = self.current.span;
        let text = self.parse_number_text()?;
        text.parse::<u32>()
            .map_err(|e| ParseError::new(format!("Invalid count {text}: {e}"), span))
    }

    // ---------------------------------------------------------------------
    // CREATE VIEW
    // ---------------------------------------------------------------------

    fn parse_view(&mut self, options: OptionSet) -> Result<ViewDefinition, ParseError> {
        let name = self.parse_qualified_name()?;
        let mut columns = Vec::new();
        if self.eat(&TokenKind::LeftParen) {
            columns.push(self.parse_name()?);
            while self.eat(&TokenKind::Comma) {
                columns.push(self.parse_name()?);
            }
            self.expect(&TokenKind::RightParen)?;
        }

        self.expect_keyword(Keyword::As)?;
        let start = self.current.span;
        while !self.current.is_eof() && !self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if self.previous.span.end <= start.start {
            return Err(self.unexpected("view query"));
        }

        Ok(ViewDefinition {
            name,
            options,
            columns,
            query: self.source_from(start),
        })
    }

    // ---------------------------------------------------------------------
    // Values and fragments
    // ---------------------------------------------------------------------

    /// Parses a single value: literal, word, function call or parenthesized
    /// expression, with an optional sign. Returns its source text.
    fn parse_value_term(&mut self) -> Result<String, ParseError> {
        let start = self.current.span;
        if matches!(self.current.kind, TokenKind::Minus | TokenKind::Plus) {
            self.advance();
        }

        match &self.current.kind {
            TokenKind::LeftParen => self.skip_group()?,
            TokenKind::String(_) | TokenKind::Number(_) => self.advance(),
            TokenKind::Identifier(word) if word.starts_with('_') => {
                // Charset introducer: _utf8mb4'text'
                let introduced = matches!(self.peek_token().kind, TokenKind::String(_));
                self.advance();
                if introduced {
                    self.advance();
                }
            }
            TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                self.advance();
                if self.check(&TokenKind::LeftParen)
                    && self.peek_token().as_keyword() != Some(Keyword::Subpartition)
                {
                    self.skip_group()?;
                }
            }
            _ => return Err(self.unexpected("value")),
        }

        Ok(self.source_from(start))
    }

    /// Consumes a balanced parenthesized group starting at the current `(`.
    fn skip_group(&mut self) -> Result<(), ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Eof => return Err(self.unexpected(")")),
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Parses a parenthesized group and returns its text, parentheses
    /// included.
    fn parse_group_text(&mut self) -> Result<String, ParseError> {
        let start = self.current.span;
        self.skip_group()?;
        Ok(self.source_from(start))
    }

    /// Parses a parenthesized group and returns the text between the
    /// parentheses.
    fn parse_group_inner(&mut self) -> Result<String, ParseError> {
        let open = self.current.span;
        self.skip_group()?;
        let close = self.previous.span;
        let inner = Span::new(open.end, close.start).text(self.input);
        Ok(normalize_fragment(inner))
    }

    fn parse_number_text(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Number(text) => {
                let text = text.clone();
                self.advance();
                Ok(text)
            }
            _ => Err(self.unexpected("number")),
        }
    }

    /// Normalized source text from `start` through the previous token.
    fn source_from(&self, start: Span) -> String {
        let span = Span::new(start.start, self.previous.span.end.max(start.start));
        normalize_fragment(span.text(self.input))
    }

    // ---------------------------------------------------------------------
    // Names and token helpers
    // ---------------------------------------------------------------------

    /// Parses an identifier. Bare keywords are accepted as names.
    fn parse_name(&mut self) -> Result<String, ParseError> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(_) => self.current.span.text(self.input).to_string(),
            _ => return Err(self.unexpected("identifier")),
        };
        self.advance();
        Ok(name)
    }

    /// Parses `[schema.]name`, keeping only the object name.
    fn parse_qualified_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.parse_name()?;
        if self.eat(&TokenKind::Dot) {
            name = self.parse_name()?;
        }
        Ok(name)
    }

    fn parse_upper_word(&mut self) -> Result<String, ParseError> {
        Ok(self.parse_name()?.to_ascii_uppercase())
    }

    /// Upper-cased text of the current token if it is an unquoted word.
    fn bare_word(&self) -> Option<String> {
        match &self.current.kind {
            TokenKind::Keyword(kw) => Some(kw.as_str().to_string()),
            TokenKind::Identifier(_) => {
                let text = self.current.span.text(self.input);
                (!text.starts_with('`')).then(|| text.to_ascii_uppercase())
            }
            _ => None,
        }
    }

    fn check_word(&self, word: &str) -> bool {
        self.bare_word().is_some_and(|w| w == word)
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek_token(&self) -> Token {
        self.lexer.clone().next_token()
    }

    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token());
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_keyword() == Some(keyword)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(format!("{kind:?}")))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected(expected, self.current.kind.clone(), self.current.span)
    }
}
