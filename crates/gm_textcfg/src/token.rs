//! Whitespace-delimited tokens with record boundary detection.
//!
//! The text format is a sequence of records. Each record starts with a
//! keyword token beginning with `.` and owns every token up to the next
//! keyword or the end of input. `#` starts a comment that runs to the end
//! of the line.

use crate::error::TextError;

/// A single token and the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text.
    pub text: &'a str,
    /// 1-based line number.
    pub line: usize,
}

impl Token<'_> {
    /// Returns whether this token starts a new record.
    pub fn is_keyword(&self) -> bool {
        self.text.starts_with('.')
    }
}

/// A cursor over the tokens of a document.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Tokenizes `input`, dropping whitespace and comments.
    pub fn new(input: &'a str) -> Self {
        let tokens = input
            .lines()
            .enumerate()
            .flat_map(|(idx, line)| {
                let content = match line.find('#') {
                    Some(pos) => &line[..pos],
                    None => line,
                };
                content
                    .split_whitespace()
                    .map(move |text| Token { text, line: idx + 1 })
            })
            .collect();
        Self { tokens, pos: 0 }
    }

    /// Returns whether any tokens remain.
    pub fn more_input(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Returns whether the next token belongs to the current record.
    pub fn more_in_record(&self) -> bool {
        self.peek().is_some_and(|t| !t.is_keyword())
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let tok = self.tokens.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Line of the most recently consumed token, or 1 at the start.
    pub fn line(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(1, |t| t.line)
    }

    /// Consumes the next token of the current record.
    pub fn expect(&mut self, expected: &'static str) -> Result<Token<'a>, TextError> {
        if !self.more_in_record() {
            return Err(TextError::UnexpectedEnd {
                expected,
                line: self.line(),
            });
        }
        self.next_token().ok_or(TextError::UnexpectedEnd {
            expected,
            line: self.line(),
        })
    }

    /// Consumes the next token of the current record as a decimal `u32`.
    pub fn expect_u32(&mut self, what: &'static str) -> Result<u32, TextError> {
        let tok = self.expect(what)?;
        tok.text.parse().map_err(|_| TextError::InvalidNumber {
            what,
            token: tok.text.to_string(),
            line: tok.line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_carry_line_numbers() {
        let mut cur = TokenCursor::new(".device X\n\n.tile 0 1 2\n");
        let texts: Vec<_> = std::iter::from_fn(|| cur.next_token())
            .map(|t| (t.text, t.line))
            .collect();
        assert_eq!(
            texts,
            vec![
                (".device", 1),
                ("X", 1),
                (".tile", 3),
                ("0", 3),
                ("1", 3),
                ("2", 3)
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let mut cur = TokenCursor::new("# header\n.device A # trailing\n#.tile 1 2 3\n");
        assert_eq!(cur.next_token().unwrap().text, ".device");
        assert_eq!(cur.next_token().unwrap().text, "A");
        assert!(!cur.more_input());
    }

    #[test]
    fn record_ends_at_keyword() {
        let mut cur = TokenCursor::new(".bram_init 0 0 0\n01 02\n.device X");
        cur.next_token();
        for _ in 0..5 {
            assert!(cur.more_in_record());
            cur.next_token();
        }
        assert!(!cur.more_in_record());
        assert!(cur.more_input());
    }

    #[test]
    fn record_ends_at_eof() {
        let mut cur = TokenCursor::new("  \n\t ");
        assert!(!cur.more_input());
        assert!(!cur.more_in_record());
        assert!(cur.next_token().is_none());
        assert_eq!(cur.line(), 1);
    }

    #[test]
    fn expect_stops_at_keyword() {
        let mut cur = TokenCursor::new(".config\n.serdes 0");
        cur.next_token();
        let err = cur.expect_u32("die index").unwrap_err();
        assert_eq!(
            err,
            TextError::UnexpectedEnd {
                expected: "die index",
                line: 1
            }
        );
    }

    #[test]
    fn expect_u32_rejects_garbage() {
        let mut cur = TokenCursor::new("-1 x7");
        assert!(matches!(
            cur.expect_u32("column"),
            Err(TextError::InvalidNumber { what: "column", .. })
        ));
        assert!(cur.expect_u32("row").is_err());
    }
}
