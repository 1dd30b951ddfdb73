//! Skeleton grammar cases and error messages.

mod common;

use common::{error_message, parse_dpr};
use delphi_skeleton::{
    ExpectedKeyword, FileKind, ParseOptions, SyntaxErrorKind, TrailingContent, parse_str,
    parser::parse,
};

// -----------------------------------------------------------
// Accepted programs.
// -----------------------------------------------------------

#[test]
fn parse_empty_program() {
    let file = parse_dpr("program Empty;\nbegin\nend.\n").expect("parse failed");
    assert_eq!(file.kind(), FileKind::Program);
    assert_eq!(file.name(), "Empty");
}

#[test]
fn parse_keywords_ignore_case() {
    for keyword in ["PROGRAM", "Program", "program", "PrOgRaM"] {
        let input = format!("{keyword} P; BEGIN End.");
        let file = parse_dpr(&input).expect("parse failed");
        assert_eq!(file.kind(), FileKind::Program, "{keyword}");
        assert_eq!(file.name(), "P");
    }
}

#[test]
fn parse_name_keeps_spelling() {
    let file = parse_dpr("program my_App2;begin end.").expect("parse failed");
    assert_eq!(file.name(), "my_App2");
}

#[test]
fn parse_skips_comments_everywhere() {
    let input = "{a}program(*b*)Empty//c\n;{$D+}begin{d}end(*e*).";
    let file = parse_dpr(input).expect("parse failed");
    assert_eq!(file.name(), "Empty");
}

#[test]
fn parse_single_line() {
    assert!(parse_dpr("program P; begin end.").is_ok());
}

#[test]
fn parse_leading_bom() {
    let file = parse_dpr("\u{FEFF}program P; begin end.").expect("parse failed");
    assert_eq!(file.name(), "P");
}

// -----------------------------------------------------------
// Keyword errors.
// -----------------------------------------------------------

#[test]
fn error_missing_keyword_dpr() {
    assert_eq!(
        error_message("Empty.dpr", "Empty;\nbegin\nend.\n"),
        "DPR file must start with 'program' or 'library' keyword"
    );
}

#[test]
fn error_missing_keyword_other_extensions() {
    for name in ["Unit1.pas", "Pkg.dpk", "snippet", "archive.dpr.bak"] {
        assert_eq!(
            error_message(name, "Empty;\nbegin\nend.\n"),
            "Delphi files must start with one of these keywords: \
             'program', 'library', 'unit', 'package'",
            "{name}"
        );
    }
}

#[test]
fn error_empty_input() {
    let err = parse_dpr("").unwrap_err();
    assert_eq!(
        err.kind,
        SyntaxErrorKind::MissingKeyword {
            expected: ExpectedKeyword::ProgramOrLibrary,
            found: "end of file".to_string(),
        }
    );
}

#[test]
fn error_keyword_must_be_whole_word() {
    let err = parse_dpr("programs P; begin end.").unwrap_err();
    assert_eq!(err.kind.found(), Some("'programs'"));
}

#[test]
fn error_unsupported_kinds() {
    for (input, kind) in [
        ("library Lib;\nbegin\nend.\n", FileKind::Library),
        ("UNIT Unit1;\ninterface\nimplementation\nend.\n", FileKind::Unit),
        ("package Pkg;\nend.\n", FileKind::Package),
    ] {
        let err = parse_dpr(input).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnsupportedFileKind(kind));
    }
    assert_eq!(
        error_message("Unit1.pas", "unit Unit1;"),
        "parsing unit files is not yet supported"
    );
}

// -----------------------------------------------------------
// Errors after the keyword.
// -----------------------------------------------------------

#[test]
fn error_missing_name() {
    assert_eq!(
        error_message("x.dpr", "program ;\nbegin\nend.\n"),
        "missing program name"
    );
    assert_eq!(error_message("x.dpr", "program"), "missing program name");
}

#[test]
fn error_missing_terminator() {
    assert_eq!(
        error_message("x.dpr", "program Empty\nbegin\nend.\n"),
        "missing ';' after program name, found 'begin'"
    );
}

#[test]
fn error_missing_begin() {
    assert_eq!(
        error_message("x.dpr", "program Empty;\nend.\n"),
        "missing 'begin' at program start, found 'end'"
    );
}

#[test]
fn error_missing_end() {
    assert_eq!(
        error_message("x.dpr", "program Empty;\nbegin\n.\n"),
        "missing 'end' at end of program, found '.'"
    );
}

#[test]
fn error_missing_final_dot() {
    assert_eq!(
        error_message("x.dpr", "program Empty;\nbegin\nend\n"),
        "missing '.' at end of program, found end of file"
    );
}

#[test]
fn error_found_illegal_token() {
    assert_eq!(
        error_message("x.dpr", "program Empty:"),
        "missing ';' after program name, found illegal token (unexpected character ':')"
    );
}

#[test]
fn error_name_ends_before_superscript_digit() {
    assert_eq!(
        error_message("x.dpr", "program x\u{B2}; begin end."),
        "missing ';' after program name, found illegal token (unexpected character '\u{B2}')"
    );
}

#[test]
fn error_letter_number_is_not_a_name() {
    let err = parse_dpr("program \u{216B}; begin end.").unwrap_err();
    assert!(matches!(err.kind, SyntaxErrorKind::MissingName { .. }));
}

#[test]
fn error_found_unterminated_comment() {
    assert_eq!(
        error_message("x.dpr", "program Empty; begin (* end."),
        "missing 'end' at end of program, found illegal token (unterminated comment)"
    );
}

#[test]
fn error_stops_at_first_problem() {
    let err = parse_dpr("program ; begin").unwrap_err();
    assert!(matches!(err.kind, SyntaxErrorKind::MissingName { .. }));
    assert_eq!(err.span.column, 9);
}

// -----------------------------------------------------------
// Trailing content.
// -----------------------------------------------------------

#[test]
fn trailing_content_ignored() {
    let file = parse_dpr("program P; begin end.\nthis is not checked { at all").expect("parse");
    assert_eq!(file.name(), "P");
}

#[test]
fn trailing_content_rejected() {
    let options = ParseOptions::new().trailing(TrailingContent::Reject);
    assert!(parse("p.dpr", "program P; begin end.\n// bye\n", &options).is_ok());

    let err = parse("p.dpr", "program P; begin end.\nend.", &options).unwrap_err();
    assert_eq!(
        err.kind,
        SyntaxErrorKind::UnexpectedTrailingContent {
            kind: FileKind::Program,
            found: "'end'".to_string(),
        }
    );
    assert_eq!((err.span.line, err.span.column), (2, 1));
}

#[test]
fn parse_str_uses_default_options() {
    assert!(parse_str("p.dpr", "program P; begin end. ;").is_ok());
}
