//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module turns a finished token sequence into the root container of a
//! compilation unit. It is a hand-written recursive descent parser with one
//! function per grammar rule, split by area:
//!
//! - `stmt`: the root, container members, declarations, statements and loops
//! - `expr`: the binary precedence chain, prefix/suffix expressions and primaries
//! - `types`: type expressions, pointer and array qualifiers, containers and prototypes
//! - `asm`: inline assembly
//!
//! Binary operators are recognised through dense lookup tables in `lookups`.
//! Lookahead never exceeds two tokens of put-back.

pub mod asm;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
