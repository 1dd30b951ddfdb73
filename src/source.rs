//! Turning raw file bytes into text the lexer can scan.

use std::borrow::Cow;
use std::fmt;

use log::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Byte order of UTF-16 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LittleEndian => f.write_str("UTF-16LE"),
            Self::BigEndian => f.write_str("UTF-16BE"),
        }
    }
}

/// Error produced when source bytes are not text in a known encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// Not UTF-8; `valid_up_to` is the offset of the first bad byte.
    #[error("invalid UTF-8 at byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
    /// Unpaired surrogate in UTF-16 text.
    #[error("invalid {byte_order} text")]
    InvalidUtf16 { byte_order: ByteOrder },
    #[error("{byte_order} text with an odd number of bytes")]
    OddUtf16Length { byte_order: ByteOrder },
}

/// Decodes raw source bytes to text.
pub trait Decode {
    /// # Errors
    ///
    /// Returns `EncodingError` when the bytes are not text this decoder
    /// understands.
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, EncodingError>;
}

impl<D: Decode + ?Sized> Decode for &D {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, EncodingError> {
        (**self).decode(bytes)
    }
}

impl<D: Decode + ?Sized> Decode for Box<D> {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, EncodingError> {
        (**self).decode(bytes)
    }
}

/// Accepts UTF-8 only, with or without a byte-order mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Decoder;

impl Decode for Utf8Decoder {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, EncodingError> {
        let (skipped, text) = bytes
            .strip_prefix(UTF8_BOM)
            .map_or((0, bytes), |rest| (UTF8_BOM.len(), rest));
        std::str::from_utf8(text)
            .map(Cow::Borrowed)
            .map_err(|e| EncodingError::InvalidUtf8 {
                valid_up_to: skipped + e.valid_up_to(),
            })
    }
}

/// Picks the encoding from a byte-order mark: UTF-16 in either byte
/// order, otherwise UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BomDecoder;

impl Decode for BomDecoder {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, EncodingError> {
        if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
            debug!("decoding UTF-16LE source ({} bytes)", bytes.len());
            return decode_utf16(rest, ByteOrder::LittleEndian).map(Cow::Owned);
        }
        if let Some(rest) = bytes.strip_prefix(UTF16BE_BOM) {
            debug!("decoding UTF-16BE source ({} bytes)", bytes.len());
            return decode_utf16(rest, ByteOrder::BigEndian).map(Cow::Owned);
        }
        Utf8Decoder.decode(bytes)
    }
}

fn decode_utf16(bytes: &[u8], byte_order: ByteOrder) -> Result<String, EncodingError> {
    if bytes.len() % 2 != 0 {
        return Err(EncodingError::OddUtf16Length { byte_order });
    }
    let units = bytes.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        match byte_order {
            ByteOrder::LittleEndian => u16::from_le_bytes(pair),
            ByteOrder::BigEndian => u16::from_be_bytes(pair),
        }
    });
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| EncodingError::InvalidUtf16 { byte_order })
}
