/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: `Node`, the `NodeKind` sum type and operator tags
/// - expressions: payloads of expression variants
/// - statements: payloads of declaration, statement and control-flow variants
/// - types: payloads of container and type-expression variants
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
