use super::ast::{BinaryOperator, Node, PrefixOperator};

/// `lhs op rhs` for every binary operator except `catch`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOpExpr {
    pub lhs: Box<Node>,
    pub op: BinaryOperator,
    pub rhs: Box<Node>,
}

/// `lhs catch |err| rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchExpr {
    pub lhs: Box<Node>,
    pub payload: Option<String>,
    pub rhs: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixOpExpr {
    pub op: PrefixOperator,
    pub operand: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallModifier {
    #[default]
    None,
    Async,
    /// `@name(...)`; the callee is a `Symbol` holding the builtin name.
    Builtin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnCallExpr {
    pub callee: Box<Node>,
    pub args: Vec<Node>,
    pub modifier: CallModifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccessExpr {
    pub array: Box<Node>,
    pub subscript: Box<Node>,
}

/// `array[start..end :sentinel]`
#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub array: Box<Node>,
    pub start: Box<Node>,
    pub end: Option<Box<Node>>,
    pub sentinel: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccessExpr {
    pub container: Box<Node>,
    pub field: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerInitKind {
    /// `T{ .a = 1 }`, entries are `StructValueField` nodes.
    Struct,
    /// `T{ 1, 2 }` and `T{}`.
    Array,
}

/// An initializer list, with an explicit type (`T{...}`) or anonymous
/// (`.{...}`, `ty` is `None`).
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerInitExpr {
    pub kind: ContainerInitKind,
    pub ty: Option<Box<Node>>,
    pub entries: Vec<Node>,
}

/// `.name = value` inside an initializer list.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValueField {
    pub name: String,
    pub value: Box<Node>,
}
