use crate::lexer::tokens::BigInt;

use super::ast::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Struct,
    Enum,
    Union,
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerLayout {
    #[default]
    Auto,
    Extern,
    Packed,
}

/// A `struct`, `enum`, `union` or `opaque` declaration.
///
/// The root of every parsed unit is an implicit struct with `is_root` set.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerDecl {
    pub kind: ContainerKind,
    pub layout: ContainerLayout,
    /// `enum(T)`, `union(T)` or the tag type of `union(enum(T))`.
    pub init_arg: Option<Box<Node>>,
    /// Set for `union(enum)` and `union(enum(T))`.
    pub auto_enum: bool,
    pub fields: Vec<Node>,
    pub decls: Vec<Node>,
    /// `//!` lines at the top of the container.
    pub doc_comments: Option<String>,
    pub is_root: bool,
}

impl ContainerDecl {
    pub fn root() -> Self {
        ContainerDecl {
            kind: ContainerKind::Struct,
            layout: ContainerLayout::Auto,
            init_arg: None,
            auto_enum: false,
            fields: Vec::new(),
            decls: Vec::new(),
            doc_comments: None,
            is_root: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// `*T`
    Single,
    /// `[*]T`
    Many,
    /// `[*c]T`
    C,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerType {
    pub kind: PointerKind,
    pub sentinel: Option<Box<Node>>,
    pub align: Option<Box<Node>>,
    pub bit_offset_start: Option<BigInt>,
    pub host_int_bytes: Option<BigInt>,
    pub is_const: bool,
    pub is_volatile: bool,
    pub allow_zero: bool,
    pub child: Box<Node>,
}

/// `[N]T`, `[N:s]T`, or a slice `[]T` when `size` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub size: Option<Box<Node>>,
    pub sentinel: Option<Box<Node>>,
    pub align: Option<Box<Node>>,
    pub is_const: bool,
    pub is_volatile: bool,
    pub allow_zero: bool,
    pub child: Box<Node>,
}

/// `[_]T`
#[derive(Debug, Clone, PartialEq)]
pub struct InferredArrayType {
    pub sentinel: Option<Box<Node>>,
    pub child: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSetDecl {
    pub fields: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSetField {
    /// A `Symbol` node.
    pub name: Box<Node>,
    pub doc_comments: Option<String>,
}
