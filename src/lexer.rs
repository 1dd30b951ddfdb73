use std::fmt;
use std::iter::FusedIterator;

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::token::{Span, Token, TokenKind};

/// Classifies input the lexer cannot turn into a regular token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Code point that cannot start any token.
    UnexpectedCharacter(char),
    /// `{` or `(*` comment without its closing delimiter.
    UnterminatedComment,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character '{ch}'")
            }
            Self::UnterminatedComment => {
                write!(f, "unterminated comment")
            }
        }
    }
}

/// Scan a whole source string into tokens, end of file excluded.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Pull-based scanner over decoded source text.
///
/// The lexer never fails: unrecognized input comes back as an
/// [`TokenKind::Illegal`] token and the cursor still moves forward.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let pos = if input.starts_with('\u{FEFF}') {
            '\u{FEFF}'.len_utf8()
        } else {
            0
        };
        Self {
            input,
            pos,
            line: 1,
            col: 1,
        }
    }

    /// Current cursor location.
    #[must_use]
    pub const fn location(&self) -> Span {
        Span {
            offset: self.pos,
            line: self.line,
            column: self.col,
        }
    }

    /// Scan the token at the cursor and move past it.
    pub fn next_token(&mut self) -> Token {
        let span = self.location();

        let Some(ch) = self.peek() else {
            return Token {
                kind: TokenKind::EndOfFile,
                text: Token::END_OF_FILE.to_string(),
                span,
            };
        };

        let kind = match ch {
            ';' | '.' => {
                self.advance();
                TokenKind::Punct(ch)
            }
            '/' if self.peek_at(1) == Some('/') => self.read_line_comment(),
            '{' => self.read_block_comment("{", "}"),
            '(' if self.peek_at(1) == Some('*') => self.read_block_comment("(*", "*)"),
            c if c.is_whitespace() => {
                self.advance_while(char::is_whitespace);
                TokenKind::Whitespace
            }
            c if is_word_start(c) => {
                self.advance();
                self.advance_while(is_word_continue);
                TokenKind::Word
            }
            _ => {
                self.advance();
                TokenKind::Illegal(LexErrorKind::UnexpectedCharacter(ch))
            }
        };

        Token {
            kind,
            text: self.input[span.offset..self.pos].to_string(),
            span,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        // a lone '\r' is a line break too; "\r\n" counts once, at the '\n'
        if ch == '\n' || (ch == '\r' && self.peek() != Some('\n')) {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn advance_while(&mut self, accept: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&accept) {
            self.advance();
        }
    }

    fn read_line_comment(&mut self) -> TokenKind {
        // the line break stays for the whitespace token
        self.advance_while(|ch| ch != '\n' && ch != '\r');
        TokenKind::Comment
    }

    fn read_block_comment(&mut self, open: &str, close: &str) -> TokenKind {
        for _ in open.chars() {
            self.advance();
        }

        loop {
            if self.input[self.pos..].starts_with(close) {
                for _ in close.chars() {
                    self.advance();
                }
                return TokenKind::Comment;
            }
            if self.advance().is_none() {
                return TokenKind::Illegal(LexErrorKind::UnterminatedComment);
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::EndOfFile).then_some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Letter in the Unicode sense: general category L.
fn is_letter(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

fn is_word_start(ch: char) -> bool {
    ch == '_' || is_letter(ch)
}

/// Letters, `_` and decimal digits (Nd); `²` or `Ⅻ` end a word.
fn is_word_continue(ch: char) -> bool {
    is_word_start(ch) || get_general_category(ch) == GeneralCategory::DecimalNumber
}
