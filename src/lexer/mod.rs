//! Lexical analysis module.
//!
//! The parser consumes a finished token sequence; this module defines that
//! token model and ships a reference tokenizer used by the CLI and tests.
//! It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, builtins, literals and operators
//! - Decoding of string, character and numeric literal payloads
//! - Doc comments, plain comments and whitespace

pub mod lexer;
pub mod tokens;
