//! Canonical spelling of raw SQL fragments.

/// Collapses whitespace runs outside quotes to a single space and trims
/// both ends.
///
/// Quoted text (`'…'`, `"…"`, `` `…` ``) is copied unchanged, including
/// backslash escapes inside string literals.
#[must_use]
pub fn normalize_fragment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' && q != '`' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;

        if matches!(c, '\'' | '"' | '`') {
            quote = Some(c);
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            normalize_fragment("  SELECT\n\t1   AS  `a` "),
            "SELECT 1 AS `a`"
        );
    }

    #[test]
    fn test_quoted_text_untouched() {
        assert_eq!(
            normalize_fragment("concat('a   b',  \"c\\\"  d\")"),
            "concat('a   b', \"c\\\"  d\")"
        );
    }

    #[test]
    fn test_doubled_quotes() {
        assert_eq!(normalize_fragment("'it''s  ok'"), "'it''s  ok'");
    }
}
