use std::fmt;

use crate::lexer::LexErrorKind;

/// Source location of a token start.
///
/// `line` and `column` are 1-based and count code points; `offset` is
/// the byte offset into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    /// Location of the first code point of a text.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::start()
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Input no lexical rule accepts.
    Illegal(LexErrorKind),
    /// End of input. Returned again on every further call.
    EndOfFile,
    /// `// ...`, `{ ... }` or `(* ... *)`, compiler directives included.
    Comment,
    /// Maximal run of white space.
    Whitespace,
    /// Identifier or keyword, case preserved.
    Word,
    /// Single punctuation character (`;` or `.`).
    Punct(char),
}

impl TokenKind {
    /// Short category name, used by the CLI token dump.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Illegal(_) => "illegal",
            Self::EndOfFile => "eof",
            Self::Comment => "comment",
            Self::Whitespace => "whitespace",
            Self::Word => "word",
            Self::Punct(_) => "punct",
        }
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Fixed text carried by end-of-file tokens.
    pub const END_OF_FILE: &'static str = "end of file";

    /// Whether the grammar looks at this token at all.
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        !matches!(self.kind, TokenKind::Comment | TokenKind::Whitespace)
    }

    /// Case-insensitive match against a lowercase word.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text.to_lowercase() == word
    }

    #[must_use]
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punct(ch)
    }
}

/// Renders the token the way error messages quote it.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Punct(ch) => write!(f, "'{ch}'"),
            TokenKind::Word => write!(f, "'{}'", self.text),
            TokenKind::EndOfFile => f.write_str(Self::END_OF_FILE),
            TokenKind::Comment => f.write_str("comment"),
            TokenKind::Whitespace => f.write_str("white space"),
            TokenKind::Illegal(kind) => write!(f, "illegal token ({kind})"),
        }
    }
}
