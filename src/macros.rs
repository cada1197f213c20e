//! Utility macros for the tokenizer.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for punctuation
//! - `MK_PUNCT!` - Creates a `RegexPattern` for a punctuation token
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$span` - The source span
/// * `$payload` - The decoded TokenPayload
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Comma, span, TokenPayload::None);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $span:expr, $payload:expr) => {
        Token {
            kind: $kind,
            span: $span,
            payload: $payload,
        }
    };
}

/// Creates a default lexer handler for tokens without a payload.
///
/// Generates a handler that pushes a token of the given kind covering the
/// whole match.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer<'_>, matched: &str| -> Result<(), Error> {
            lexer.push($kind, matched.len(), TokenPayload::None);
            Ok(())
        }
    };
}

/// Creates an anchored pattern for a literal punctuation string.
#[macro_export]
macro_rules! MK_PUNCT {
    ($value:literal, $kind:expr) => {
        RegexPattern {
            regex: Regex::new(&format!("^{}", regex::escape($value)))
                .expect("punctuation pattern is a valid regex"),
            handler: $crate::MK_DEFAULT_HANDLER!($kind),
        }
    };
}
