use crate::Position;

use super::ast::{Node, VisibMod};

/// A field of a struct, union or enum, including the fields of the root.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerField {
    pub name: String,
    /// `None` for bare enum fields. `anytype` is stored as `AnyTypeField`.
    pub ty: Option<Box<Node>>,
    pub align: Option<Box<Node>>,
    pub value: Option<Box<Node>>,
    pub is_comptime: bool,
    pub doc_comments: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FnInline {
    #[default]
    Auto,
    Always,
    Never,
}

/// A function prototype, with or without a body.
#[derive(Debug, Clone, PartialEq)]
pub struct FnProto {
    pub name: Option<String>,
    pub params: Vec<Node>,
    pub align: Option<Box<Node>>,
    pub section: Option<Box<Node>>,
    pub callconv: Option<Box<Node>>,
    /// `None` when the return type is `anytype`.
    pub return_type: Option<Box<Node>>,
    pub return_anytype: bool,
    /// Set by a leading `!` on the return type.
    pub auto_err_set: bool,
    pub is_var_args: bool,
    pub is_export: bool,
    pub is_extern: bool,
    pub lib_name: Option<String>,
    pub fn_inline: FnInline,
    pub visib_mod: VisibMod,
    pub doc_comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    /// Always a `FnProto` node.
    pub proto: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: Option<String>,
    /// `None` for `anytype` and `...` parameters.
    pub ty: Option<Box<Node>>,
    pub is_noalias: bool,
    pub is_comptime: bool,
    pub is_anytype: bool,
    pub is_var_args: bool,
    pub doc_comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub ty: Option<Box<Node>>,
    pub align: Option<Box<Node>>,
    pub section: Option<Box<Node>>,
    pub init: Option<Box<Node>>,
    pub is_const: bool,
    pub is_comptime: bool,
    pub is_export: bool,
    pub is_extern: bool,
    pub is_threadlocal: bool,
    pub lib_name: Option<String>,
    pub visib_mod: VisibMod,
    pub doc_comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestDecl {
    pub name: Option<String>,
    pub body: Box<Node>,
    pub doc_comments: Option<String>,
}

/// A `comptime` block at container level.
#[derive(Debug, Clone, PartialEq)]
pub struct ComptimeDecl {
    pub block: Box<Node>,
    pub doc_comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsingNamespace {
    pub expr: Box<Node>,
    pub visib_mod: VisibMod,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub label: Option<String>,
    pub statements: Vec<Node>,
}

/// Distinguishes `return`/`defer` from `try`/`errdefer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Unconditional,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Defer {
    pub kind: ReturnKind,
    /// Only `errdefer |err|` carries a payload.
    pub payload: Option<String>,
    pub expr: Box<Node>,
}

/// `return expr` or `try expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub kind: ReturnKind,
    pub expr: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    pub label: Option<String>,
    pub expr: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Continue {
    pub label: Option<String>,
}

/// `|name|` or `|*name|`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtrPayload {
    pub name: String,
    pub is_ptr: bool,
}

/// Which kind of `if` a node is, derived from its captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfKind {
    Bool,
    Optional,
    ErrorUnion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Node>,
    pub then_payload: Option<PtrPayload>,
    pub then_body: Box<Node>,
    pub else_payload: Option<String>,
    pub else_body: Option<Box<Node>>,
}

impl IfExpr {
    pub fn kind(&self) -> IfKind {
        if self.else_payload.is_some() {
            IfKind::ErrorUnion
        } else if self.then_payload.is_some() {
            IfKind::Optional
        } else {
            IfKind::Bool
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileExpr {
    pub label: Option<String>,
    pub is_inline: bool,
    pub condition: Box<Node>,
    pub payload: Option<PtrPayload>,
    pub continue_expr: Option<Box<Node>>,
    pub body: Box<Node>,
    pub else_payload: Option<String>,
    pub else_body: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForExpr {
    pub label: Option<String>,
    pub is_inline: bool,
    pub array: Box<Node>,
    pub elem: PtrPayload,
    pub index: Option<String>,
    pub body: Box<Node>,
    pub else_body: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExpr {
    pub expr: Box<Node>,
    pub prongs: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchProng {
    /// Empty for the `else` prong.
    pub items: Vec<Node>,
    pub is_else: bool,
    pub any_items_are_range: bool,
    pub payload: Option<PtrPayload>,
    pub expr: Box<Node>,
}

/// `start...end` as a switch item.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchRange {
    pub start: Box<Node>,
    pub end: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsmExpr {
    pub is_volatile: bool,
    pub template: Box<Node>,
    pub outputs: Vec<AsmOutput>,
    pub inputs: Vec<AsmInput>,
    pub clobbers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AsmOutputTarget {
    Variable(String),
    ReturnType(Box<Node>),
}

/// `[name] "constraint" (-> T)` or `[name] "constraint" (var)`
#[derive(Debug, Clone, PartialEq)]
pub struct AsmOutput {
    pub symbolic_name: String,
    pub constraint: String,
    pub target: AsmOutputTarget,
    pub position: Position,
}

/// `[name] "constraint" (expr)`
#[derive(Debug, Clone, PartialEq)]
pub struct AsmInput {
    pub symbolic_name: String,
    pub constraint: String,
    pub expr: Box<Node>,
    pub position: Position,
}
