//! Scanner and skeleton parser for Delphi source files.
//!
//! Reads just enough of a `.dpr`, `.pas` or `.dpk` file to tell what it
//! declares itself to be (program, library, unit or package) and under
//! which name, or to say precisely where its outer structure breaks.
//!
//! # Quick start
//!
//! ```
//! use delphi_skeleton::{FileKind, parse_code};
//!
//! let file = parse_code("Empty.dpr", b"program Empty;\nbegin\nend.\n").unwrap();
//! assert_eq!(file.kind(), FileKind::Program);
//! assert_eq!(file.name(), "Empty");
//! ```
//!
//! Errors name what was expected and what was found:
//!
//! ```
//! let err = delphi_skeleton::parse_str("Empty.dpr", "program Empty\nbegin\nend.\n").unwrap_err();
//! assert_eq!(err.to_string(), "missing ';' after program name, found 'begin'");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod source;
pub mod token;

use std::io;
use std::path::{Path, PathBuf};

pub use ast::{File, FileKind};
pub use lexer::{LexErrorKind, Lexer, tokenize};
pub use parser::{ExpectedKeyword, ParseOptions, SyntaxError, SyntaxErrorKind, TrailingContent};
pub use reader::SourceReader;
pub use source::{BomDecoder, ByteOrder, Decode, EncodingError, Utf8Decoder};
pub use token::{Span, Token, TokenKind};

/// Unified error type covering reading, decoding and parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be read.
    #[error("cannot read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The bytes are not text in an encoding the decoder knows.
    #[error("unknown file encoding: {0}")]
    Encoding(#[from] EncodingError),
    /// The text does not have the skeleton of a Delphi file.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// The syntax error, if parsing got that far.
    #[must_use]
    pub const fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

/// Read a source file from disk and parse its skeleton.
pub fn parse_file(path: impl AsRef<Path>) -> Result<File, Error> {
    SourceReader::new().parse_file(path)
}

/// Parse raw source bytes. `source_name` is used for its extension only.
pub fn parse_code(source_name: &str, code: &[u8]) -> Result<File, Error> {
    SourceReader::new().parse_code(source_name, code)
}

/// Parse already decoded source text with default options.
pub fn parse_str(source_name: &str, input: &str) -> Result<File, SyntaxError> {
    parser::parse(source_name, input, &ParseOptions::default())
}
