//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::{ErrColor, Position};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        Position::new(10, 1, 11),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::InvalidToken {
            found: TokenKind::RBrace,
        },
        Position::new(42, 3, 7),
    );

    assert_eq!(error.get_position().offset, 42);
    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_invalid_token_error() {
    let error = Error::new(
        ErrorImpl::InvalidToken {
            found: TokenKind::RBrace,
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "InvalidToken");
    assert_eq!(error.get_tip().to_string(), "invalid token: '}'");
    assert_eq!(error.to_string(), "1:1: invalid token: '}'");
}

#[test]
fn test_expected_token_error() {
    let error = Error::new(
        ErrorImpl::ExpectedToken {
            expected: TokenKind::RParen,
            found: TokenKind::LBrace,
        },
        Position::new(8, 1, 9),
    );

    assert_eq!(error.get_error_name(), "ExpectedToken");
    assert_eq!(
        error.kind(),
        &ErrorImpl::ExpectedToken {
            expected: TokenKind::RParen,
            found: TokenKind::LBrace,
        }
    );
    assert_eq!(
        error.get_tip().to_string(),
        "expected token ')', found '{'"
    );
}

#[test]
fn test_expected_body_error() {
    let error = Error::new(
        ErrorImpl::ExpectedBody {
            construct: "loop",
            found: TokenKind::Semicolon,
        },
        Position::null(),
    );

    assert_eq!(error.get_tip().to_string(), "expected loop body, found ';'");
}

#[test]
fn test_error_without_tip() {
    let error = Error::new(ErrorImpl::UnterminatedLiteral, Position::null());

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_error_color_defaults_to_auto() {
    let error = Error::new(ErrorImpl::PubWithoutDecl, Position::null());
    assert_eq!(error.color(), ErrColor::Auto);

    let error = error.with_color(ErrColor::Off);
    assert_eq!(error.color(), ErrColor::Off);
    assert!(!error.color().enabled());
}

#[test]
fn test_declaration_errors() {
    let errors = [
        (ErrorImpl::ExternFnWithBody, "ExternFnWithBody"),
        (ErrorImpl::PubWithoutDecl, "PubWithoutDecl"),
        (ErrorImpl::VarArgsNotLast, "VarArgsNotLast"),
        (ErrorImpl::UnattachedDocComment, "UnattachedDocComment"),
    ];

    for (error_impl, name) in errors {
        let error = Error::new(error_impl, Position::null());
        assert_eq!(error.get_error_name(), name);
    }
}
