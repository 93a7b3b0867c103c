//! Splits an intent sentence into positioned tokens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A maximal run of characters that are neither whitespace nor `>`.
    Word,
    /// The `>` comparator.
    Gt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset into the lexed input.
    pub offset: usize,
}

pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        if c.is_whitespace() || c == '>' {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    kind: TokenKind::Word,
                    text: &input[s..i],
                    offset: s,
                });
            }
            if c == '>' {
                tokens.push(Token {
                    kind: TokenKind::Gt,
                    text: &input[i..i + 1],
                    offset: i,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            kind: TokenKind::Word,
            text: &input[s..],
            offset: s,
        });
    }
    tokens
}
