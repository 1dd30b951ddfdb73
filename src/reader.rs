use std::fs;
use std::path::Path;

use log::debug;

use crate::Error;
use crate::ast::File;
use crate::parser::{self, ParseOptions};
use crate::source::{BomDecoder, Decode};

/// Reads source files with a chosen decoder and parser settings.
///
/// ```
/// use delphi_skeleton::{FileKind, ParseOptions, SourceReader, TrailingContent, Utf8Decoder};
///
/// let reader = SourceReader::with_decoder(Utf8Decoder)
///     .options(ParseOptions::new().trailing(TrailingContent::Reject));
/// let file = reader.parse_code("hello.dpr", b"program Hello; begin end.").unwrap();
/// assert_eq!(file.kind(), FileKind::Program);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceReader<D = BomDecoder> {
    decoder: D,
    options: ParseOptions,
}

impl SourceReader<BomDecoder> {
    /// Reader with byte-order-mark detection and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Decode> SourceReader<D> {
    #[must_use]
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            decoder,
            options: ParseOptions::default(),
        }
    }

    #[must_use]
    pub const fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Read and parse the file at `path`. The path doubles as the
    /// source name.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<File, Error> {
        let path = path.as_ref();
        debug!("reading {}", path.display());
        let code = fs::read(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_code(&path.to_string_lossy(), &code)
    }

    /// Decode and parse raw source bytes.
    pub fn parse_code(&self, source_name: &str, code: &[u8]) -> Result<File, Error> {
        let text = self.decoder.decode(code)?;
        let file = parser::parse(source_name, &text, &self.options)?;
        debug!("{source_name}: {} {}", file.kind(), file.name());
        Ok(file)
    }
}
