//! Error types and error handling for the parser.
//!
//! This module defines the error values produced while tokenizing and
//! parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the tokenizer and the grammar
//! - Error names and suggestions used by `render_error`

pub mod errors;

#[cfg(test)]
mod tests;
