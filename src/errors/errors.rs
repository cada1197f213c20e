use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, ErrColor, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    color: ErrColor,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            color: ErrColor::default(),
        }
    }

    /// Sets the color mode used when this error is rendered.
    pub fn with_color(mut self, color: ErrColor) -> Self {
        self.color = color;
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn color(&self) -> ErrColor {
        self.color
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnterminatedLiteral => "UnterminatedLiteral",
            ErrorImpl::InvalidToken { .. } => "InvalidToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedBody { .. } => "ExpectedBody",
            ErrorImpl::ExternFnWithBody => "ExternFnWithBody",
            ErrorImpl::PubWithoutDecl => "PubWithoutDecl",
            ErrorImpl::VarArgsNotLast => "VarArgsNotLast",
            ErrorImpl::UnattachedDocComment => "UnattachedDocComment",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { token } => {
                ErrorTip::Suggestion(format!("Unrecognised character `{}`", token))
            }
            ErrorImpl::InvalidEscape { sequence } => {
                ErrorTip::Suggestion(format!("Invalid escape sequence `{}`", sequence))
            }
            ErrorImpl::UnterminatedLiteral => ErrorTip::None,
            ErrorImpl::InvalidToken { found } => {
                ErrorTip::Suggestion(format!("invalid token: '{}'", found.name()))
            }
            ErrorImpl::ExpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "expected token '{}', found '{}'",
                expected.name(),
                found.name()
            )),
            ErrorImpl::ExpectedBody { construct, found } => ErrorTip::Suggestion(format!(
                "expected {} body, found '{}'",
                construct,
                found.name()
            )),
            ErrorImpl::ExternFnWithBody => {
                ErrorTip::Suggestion(String::from("extern functions have no body"))
            }
            ErrorImpl::PubWithoutDecl => ErrorTip::Suggestion(String::from(
                "expected function or variable declaration after pub",
            )),
            ErrorImpl::VarArgsNotLast => ErrorTip::Suggestion(String::from(
                "only the last parameter of a function prototype may be varargs",
            )),
            ErrorImpl::UnattachedDocComment => ErrorTip::Suggestion(String::from(
                "doc comments must be followed by a declaration, field or parameter",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid escape sequence: {sequence:?}")]
    InvalidEscape { sequence: String },
    #[error("unterminated literal")]
    UnterminatedLiteral,
    #[error("invalid token: '{}'", found.name())]
    InvalidToken { found: TokenKind },
    #[error("expected token '{}', found '{}'", expected.name(), found.name())]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    #[error("expected {construct} body, found '{}'", found.name())]
    ExpectedBody {
        construct: &'static str,
        found: TokenKind,
    },
    #[error("extern functions have no body")]
    ExternFnWithBody,
    #[error("expected function or variable declaration after pub")]
    PubWithoutDecl,
    #[error("varargs parameter must be last")]
    VarArgsNotLast,
    #[error("doc comment is not attached to anything")]
    UnattachedDocComment,
}
