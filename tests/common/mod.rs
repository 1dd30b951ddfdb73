#![allow(dead_code)]

use std::path::PathBuf;

use delphi_skeleton::{File, SyntaxError, parse_str};

/// Path of a file under `tests/testdata`.
pub fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

/// Parse `input` as if it came from a `.dpr` file.
pub fn parse_dpr(input: &str) -> Result<File, SyntaxError> {
    parse_str("test.dpr", input)
}

/// Parse `input` and return the error message.
pub fn error_message(source_name: &str, input: &str) -> String {
    match parse_str(source_name, input) {
        Ok(file) => panic!("expected an error for {input:?}, got {file:?}"),
        Err(e) => e.to_string(),
    }
}
