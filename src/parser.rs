use std::fmt;
use std::path::Path;

use log::trace;

use crate::ast::{File, FileKind};
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

/// Keywords a file was allowed to start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKeyword {
    /// `.dpr` files: `program` or `library`.
    ProgramOrLibrary,
    /// Any of the four file kind keywords.
    AnyFileKind,
}

impl ExpectedKeyword {
    /// Pick the expectation from the extension of a source name.
    #[must_use]
    pub fn for_source(source_name: &str) -> Self {
        let is_project = Path::new(source_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(FileKind::Program.extension()));
        if is_project {
            Self::ProgramOrLibrary
        } else {
            Self::AnyFileKind
        }
    }
}

/// Classifies a syntax error. `found` fields hold the rendered token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// First token is not a file kind keyword.
    MissingKeyword {
        expected: ExpectedKeyword,
        found: String,
    },
    /// Keyword recognized, but its body grammar does not exist yet.
    UnsupportedFileKind(FileKind),
    /// No identifier after the keyword.
    MissingName { kind: FileKind, found: String },
    /// No `;` after the name.
    MissingTerminator { kind: FileKind, found: String },
    MissingBegin { kind: FileKind, found: String },
    MissingEnd { kind: FileKind, found: String },
    MissingFinalDot { kind: FileKind, found: String },
    /// Solid token after the final `.` with [`TrailingContent::Reject`].
    UnexpectedTrailingContent { kind: FileKind, found: String },
}

impl SyntaxErrorKind {
    /// Rendered form of the offending token, if the kind keeps one.
    #[must_use]
    pub fn found(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFileKind(_) => None,
            Self::MissingKeyword { found, .. }
            | Self::MissingName { found, .. }
            | Self::MissingTerminator { found, .. }
            | Self::MissingBegin { found, .. }
            | Self::MissingEnd { found, .. }
            | Self::MissingFinalDot { found, .. }
            | Self::UnexpectedTrailingContent { found, .. } => Some(found),
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKeyword {
                expected: ExpectedKeyword::ProgramOrLibrary,
                ..
            } => {
                write!(f, "DPR file must start with 'program' or 'library' keyword")
            }
            Self::MissingKeyword {
                expected: ExpectedKeyword::AnyFileKind,
                ..
            } => {
                write!(
                    f,
                    "Delphi files must start with one of these keywords: \
                     'program', 'library', 'unit', 'package'"
                )
            }
            Self::UnsupportedFileKind(kind) => {
                write!(f, "parsing {kind} files is not yet supported")
            }
            Self::MissingName { kind, .. } => {
                write!(f, "missing {kind} name")
            }
            Self::MissingTerminator { kind, found } => {
                write!(f, "missing ';' after {kind} name, found {found}")
            }
            Self::MissingBegin { kind, found } => {
                write!(f, "missing 'begin' at {kind} start, found {found}")
            }
            Self::MissingEnd { kind, found } => {
                write!(f, "missing 'end' at end of {kind}, found {found}")
            }
            Self::MissingFinalDot { kind, found } => {
                write!(f, "missing '.' at end of {kind}, found {found}")
            }
            Self::UnexpectedTrailingContent { kind, found } => {
                write!(f, "unexpected {found} after end of {kind}")
            }
        }
    }
}

/// Error produced while matching the file skeleton.
///
/// The message carries no location; `span` points at the offending
/// token for callers that want one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

/// What to do with tokens after the final `end.`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingContent {
    /// Stop reading at the final `.`.
    #[default]
    Ignore,
    /// Require end of file (comments and white space allowed).
    Reject,
}

/// Parser settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub trailing: TrailingContent,
}

impl ParseOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            trailing: TrailingContent::Ignore,
        }
    }

    #[must_use]
    pub const fn trailing(mut self, trailing: TrailingContent) -> Self {
        self.trailing = trailing;
        self
    }
}

/// Match the skeleton of decoded source text.
///
/// `source_name` is only consulted for its extension, to word the
/// error for a missing keyword.
///
/// # Errors
///
/// Returns `SyntaxError` at the first token that breaks the skeleton
/// grammar.
pub fn parse(source_name: &str, input: &str, options: &ParseOptions) -> Result<File, SyntaxError> {
    Parser::new(source_name, input, options).parse()
}

struct Parser<'a> {
    source_name: &'a str,
    tokens: Lexer<'a>,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(source_name: &'a str, input: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            source_name,
            tokens: Lexer::new(input),
            options,
        }
    }

    fn parse(mut self) -> Result<File, SyntaxError> {
        let keyword = self.next_solid_token();
        let kind = self.file_kind(&keyword)?;
        trace!(
            "{}: {kind} keyword at {}:{}",
            self.source_name, keyword.span.line, keyword.span.column
        );

        match kind {
            FileKind::Program => self.parse_program(),
            // one arm per kind once their section grammars exist
            FileKind::Library | FileKind::Unit | FileKind::Package => Err(SyntaxError {
                kind: SyntaxErrorKind::UnsupportedFileKind(kind),
                span: keyword.span,
            }),
        }
    }

    fn file_kind(&self, token: &Token) -> Result<FileKind, SyntaxError> {
        FileKind::ALL
            .into_iter()
            .find(|kind| token.is_word(kind.keyword()))
            .ok_or_else(|| SyntaxError {
                kind: SyntaxErrorKind::MissingKeyword {
                    expected: ExpectedKeyword::for_source(self.source_name),
                    found: token.to_string(),
                },
                span: token.span,
            })
    }

    fn parse_program(&mut self) -> Result<File, SyntaxError> {
        let kind = FileKind::Program;

        let name = self.expect(
            |t| t.kind == TokenKind::Word,
            |found| SyntaxErrorKind::MissingName { kind, found },
        )?;
        trace!("{}: {kind} name '{}'", self.source_name, name.text);

        self.expect(
            |t| t.is_punct(';'),
            |found| SyntaxErrorKind::MissingTerminator { kind, found },
        )?;
        self.expect(
            |t| t.is_word("begin"),
            |found| SyntaxErrorKind::MissingBegin { kind, found },
        )?;
        self.expect(
            |t| t.is_word("end"),
            |found| SyntaxErrorKind::MissingEnd { kind, found },
        )?;
        self.expect(
            |t| t.is_punct('.'),
            |found| SyntaxErrorKind::MissingFinalDot { kind, found },
        )?;
        self.expect_end_of_file(kind)?;

        Ok(File::new(kind, name.text))
    }

    fn expect_end_of_file(&mut self, kind: FileKind) -> Result<(), SyntaxError> {
        match self.options.trailing {
            TrailingContent::Ignore => Ok(()),
            TrailingContent::Reject => self
                .expect(
                    |t| t.kind == TokenKind::EndOfFile,
                    |found| SyntaxErrorKind::UnexpectedTrailingContent { kind, found },
                )
                .map(drop),
        }
    }

    /// Take the next solid token if `accept` holds, else fail with the
    /// kind `error` builds from the rendered token.
    fn expect(
        &mut self,
        accept: impl FnOnce(&Token) -> bool,
        error: impl FnOnce(String) -> SyntaxErrorKind,
    ) -> Result<Token, SyntaxError> {
        let token = self.next_solid_token();
        if accept(&token) {
            return Ok(token);
        }
        Err(SyntaxError {
            kind: error(token.to_string()),
            span: token.span,
        })
    }

    fn next_solid_token(&mut self) -> Token {
        loop {
            let token = self.tokens.next_token();
            if token.is_solid() {
                return token;
            }
        }
    }
}
