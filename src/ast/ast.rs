use std::fmt::Display;

use crate::{
    lexer::tokens::{BigFloat, BigInt},
    Position, UnitId,
};

use super::{
    expressions::{
        ArrayAccessExpr, BinOpExpr, CatchExpr, ContainerInitExpr, FieldAccessExpr, FnCallExpr,
        PrefixOpExpr, SliceExpr, StructValueField,
    },
    statements::{
        AsmExpr, AsmOutputTarget, Block, Break, ComptimeDecl, Continue, ContainerField, Defer,
        FnDef, FnProto, ForExpr, IfExpr, ParamDecl, Return, SwitchExpr, SwitchProng, SwitchRange,
        TestDecl, UsingNamespace, VarDecl, WhileExpr,
    },
    types::{ArrayType, ContainerDecl, ErrorSetDecl, ErrorSetField, InferredArrayType, PointerType},
};

/// A syntax tree node.
///
/// Every node records where it starts and which compilation unit it belongs
/// to. Children are owned by their parent, so the tree never shares a
/// subtree and can be dropped as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
    pub owner: UnitId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Declarations
    ContainerDecl(ContainerDecl),
    StructField(ContainerField),
    FnProto(FnProto),
    FnDef(FnDef),
    ParamDecl(ParamDecl),
    VariableDeclaration(VarDecl),
    TestDecl(TestDecl),
    ComptimeDecl(ComptimeDecl),
    UsingNamespace(UsingNamespace),
    ErrorSetDecl(ErrorSetDecl),
    ErrorSetField(ErrorSetField),

    // Statements and control flow
    Block(Block),
    Defer(Defer),
    Return(Return),
    Break(Break),
    Continue(Continue),
    CompTime(Box<Node>),
    NoSuspend(Box<Node>),
    Suspend(Option<Box<Node>>),
    Resume(Box<Node>),
    Await(Box<Node>),
    If(IfExpr),
    While(WhileExpr),
    For(ForExpr),
    Switch(SwitchExpr),
    SwitchProng(SwitchProng),
    SwitchRange(SwitchRange),
    Asm(AsmExpr),

    // Expressions
    BinOp(BinOpExpr),
    Catch(CatchExpr),
    PrefixOp(PrefixOpExpr),
    FnCall(FnCallExpr),
    ArrayAccess(ArrayAccessExpr),
    Slice(SliceExpr),
    FieldAccess(FieldAccessExpr),
    PtrDeref(Box<Node>),
    UnwrapOptional(Box<Node>),
    GroupedExpr(Box<Node>),
    ContainerInit(ContainerInitExpr),
    StructValueField(StructValueField),
    EnumLiteral(String),
    Symbol(String),
    IntLiteral(BigInt),
    FloatLiteral(BigFloat),
    StringLiteral(String),
    CharLiteral(u32),
    BoolLiteral(bool),
    NullLiteral,
    UndefinedLiteral,
    Unreachable,
    /// The `error` in `error.Name`.
    ErrorType,
    /// `anytype` as the type of a container field.
    AnyTypeField,

    // Type expressions
    PointerType(PointerType),
    ArrayType(ArrayType),
    InferredArrayType(InferredArrayType),
    /// `anyframe` or `anyframe->T`.
    AnyFrameType(Option<Box<Node>>),
}

impl Node {
    pub fn new(kind: NodeKind, position: Position, owner: UnitId) -> Self {
        Node {
            kind,
            position,
            owner,
        }
    }

    pub fn boxed(self) -> Box<Node> {
        Box::new(self)
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        fn push<'a>(out: &mut Vec<&'a Node>, node: &'a Option<Box<Node>>) {
            if let Some(node) = node {
                out.push(node);
            }
        }

        let mut out: Vec<&Node> = Vec::new();
        match &self.kind {
            NodeKind::ContainerDecl(decl) => {
                push(&mut out, &decl.init_arg);
                out.extend(decl.fields.iter());
                out.extend(decl.decls.iter());
            }
            NodeKind::StructField(field) => {
                push(&mut out, &field.ty);
                push(&mut out, &field.align);
                push(&mut out, &field.value);
            }
            NodeKind::FnProto(proto) => {
                out.extend(proto.params.iter());
                push(&mut out, &proto.align);
                push(&mut out, &proto.section);
                push(&mut out, &proto.callconv);
                push(&mut out, &proto.return_type);
            }
            NodeKind::FnDef(def) => {
                out.push(&def.proto);
                out.push(&def.body);
            }
            NodeKind::ParamDecl(param) => push(&mut out, &param.ty),
            NodeKind::VariableDeclaration(var) => {
                push(&mut out, &var.ty);
                push(&mut out, &var.align);
                push(&mut out, &var.section);
                push(&mut out, &var.init);
            }
            NodeKind::TestDecl(test) => out.push(&test.body),
            NodeKind::ComptimeDecl(decl) => out.push(&decl.block),
            NodeKind::UsingNamespace(using) => out.push(&using.expr),
            NodeKind::ErrorSetDecl(set) => out.extend(set.fields.iter()),
            NodeKind::ErrorSetField(field) => out.push(&field.name),
            NodeKind::Block(block) => out.extend(block.statements.iter()),
            NodeKind::Defer(defer) => out.push(&defer.expr),
            NodeKind::Return(ret) => push(&mut out, &ret.expr),
            NodeKind::Break(brk) => push(&mut out, &brk.expr),
            NodeKind::Continue(_) => {}
            NodeKind::CompTime(expr)
            | NodeKind::NoSuspend(expr)
            | NodeKind::Resume(expr)
            | NodeKind::Await(expr)
            | NodeKind::PtrDeref(expr)
            | NodeKind::UnwrapOptional(expr)
            | NodeKind::GroupedExpr(expr) => out.push(expr),
            NodeKind::Suspend(body) | NodeKind::AnyFrameType(body) => push(&mut out, body),
            NodeKind::If(expr) => {
                out.push(&expr.condition);
                out.push(&expr.then_body);
                push(&mut out, &expr.else_body);
            }
            NodeKind::While(expr) => {
                out.push(&expr.condition);
                push(&mut out, &expr.continue_expr);
                out.push(&expr.body);
                push(&mut out, &expr.else_body);
            }
            NodeKind::For(expr) => {
                out.push(&expr.array);
                out.push(&expr.body);
                push(&mut out, &expr.else_body);
            }
            NodeKind::Switch(expr) => {
                out.push(&expr.expr);
                out.extend(expr.prongs.iter());
            }
            NodeKind::SwitchProng(prong) => {
                out.extend(prong.items.iter());
                out.push(&prong.expr);
            }
            NodeKind::SwitchRange(range) => {
                out.push(&range.start);
                out.push(&range.end);
            }
            NodeKind::Asm(asm) => {
                out.push(&asm.template);
                for output in &asm.outputs {
                    if let AsmOutputTarget::ReturnType(ty) = &output.target {
                        out.push(ty);
                    }
                }
                out.extend(asm.inputs.iter().map(|input| input.expr.as_ref()));
            }
            NodeKind::BinOp(expr) => {
                out.push(&expr.lhs);
                out.push(&expr.rhs);
            }
            NodeKind::Catch(expr) => {
                out.push(&expr.lhs);
                out.push(&expr.rhs);
            }
            NodeKind::PrefixOp(expr) => out.push(&expr.operand),
            NodeKind::FnCall(call) => {
                out.push(&call.callee);
                out.extend(call.args.iter());
            }
            NodeKind::ArrayAccess(access) => {
                out.push(&access.array);
                out.push(&access.subscript);
            }
            NodeKind::Slice(slice) => {
                out.push(&slice.array);
                out.push(&slice.start);
                push(&mut out, &slice.end);
                push(&mut out, &slice.sentinel);
            }
            NodeKind::FieldAccess(access) => out.push(&access.container),
            NodeKind::ContainerInit(init) => {
                push(&mut out, &init.ty);
                out.extend(init.entries.iter());
            }
            NodeKind::StructValueField(field) => out.push(&field.value),
            NodeKind::PointerType(ptr) => {
                push(&mut out, &ptr.sentinel);
                push(&mut out, &ptr.align);
                out.push(&ptr.child);
            }
            NodeKind::ArrayType(array) => {
                push(&mut out, &array.size);
                push(&mut out, &array.sentinel);
                push(&mut out, &array.align);
                out.push(&array.child);
            }
            NodeKind::InferredArrayType(array) => {
                push(&mut out, &array.sentinel);
                out.push(&array.child);
            }
            NodeKind::EnumLiteral(_)
            | NodeKind::Symbol(_)
            | NodeKind::IntLiteral(_)
            | NodeKind::FloatLiteral(_)
            | NodeKind::StringLiteral(_)
            | NodeKind::CharLiteral(_)
            | NodeKind::BoolLiteral(_)
            | NodeKind::NullLiteral
            | NodeKind::UndefinedLiteral
            | NodeKind::Unreachable
            | NodeKind::ErrorType
            | NodeKind::AnyTypeField => {}
        }
        out
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::node_count)
            .sum::<usize>()
    }

    /// Name of the variant, used in logs and test failure messages.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::ContainerDecl(_) => "ContainerDecl",
            NodeKind::StructField(_) => "StructField",
            NodeKind::FnProto(_) => "FnProto",
            NodeKind::FnDef(_) => "FnDef",
            NodeKind::ParamDecl(_) => "ParamDecl",
            NodeKind::VariableDeclaration(_) => "VariableDeclaration",
            NodeKind::TestDecl(_) => "TestDecl",
            NodeKind::ComptimeDecl(_) => "ComptimeDecl",
            NodeKind::UsingNamespace(_) => "UsingNamespace",
            NodeKind::ErrorSetDecl(_) => "ErrorSetDecl",
            NodeKind::ErrorSetField(_) => "ErrorSetField",
            NodeKind::Block(_) => "Block",
            NodeKind::Defer(_) => "Defer",
            NodeKind::Return(_) => "Return",
            NodeKind::Break(_) => "Break",
            NodeKind::Continue(_) => "Continue",
            NodeKind::CompTime(_) => "CompTime",
            NodeKind::NoSuspend(_) => "NoSuspend",
            NodeKind::Suspend(_) => "Suspend",
            NodeKind::Resume(_) => "Resume",
            NodeKind::Await(_) => "Await",
            NodeKind::If(_) => "If",
            NodeKind::While(_) => "While",
            NodeKind::For(_) => "For",
            NodeKind::Switch(_) => "Switch",
            NodeKind::SwitchProng(_) => "SwitchProng",
            NodeKind::SwitchRange(_) => "SwitchRange",
            NodeKind::Asm(_) => "Asm",
            NodeKind::BinOp(_) => "BinOp",
            NodeKind::Catch(_) => "Catch",
            NodeKind::PrefixOp(_) => "PrefixOp",
            NodeKind::FnCall(_) => "FnCall",
            NodeKind::ArrayAccess(_) => "ArrayAccess",
            NodeKind::Slice(_) => "Slice",
            NodeKind::FieldAccess(_) => "FieldAccess",
            NodeKind::PtrDeref(_) => "PtrDeref",
            NodeKind::UnwrapOptional(_) => "UnwrapOptional",
            NodeKind::GroupedExpr(_) => "GroupedExpr",
            NodeKind::ContainerInit(_) => "ContainerInit",
            NodeKind::StructValueField(_) => "StructValueField",
            NodeKind::EnumLiteral(_) => "EnumLiteral",
            NodeKind::Symbol(_) => "Symbol",
            NodeKind::IntLiteral(_) => "IntLiteral",
            NodeKind::FloatLiteral(_) => "FloatLiteral",
            NodeKind::StringLiteral(_) => "StringLiteral",
            NodeKind::CharLiteral(_) => "CharLiteral",
            NodeKind::BoolLiteral(_) => "BoolLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::UndefinedLiteral => "UndefinedLiteral",
            NodeKind::Unreachable => "Unreachable",
            NodeKind::ErrorType => "ErrorType",
            NodeKind::AnyTypeField => "AnyTypeField",
            NodeKind::PointerType(_) => "PointerType",
            NodeKind::ArrayType(_) => "ArrayType",
            NodeKind::InferredArrayType(_) => "InferredArrayType",
            NodeKind::AnyFrameType(_) => "AnyFrameType",
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.kind_name(), self.position)
    }
}

/// Binary operators, grouped by the precedence level that parses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // AssignExpr
    Assign,
    AssignTimes,
    AssignTimesWrap,
    AssignDiv,
    AssignMod,
    AssignPlus,
    AssignPlusWrap,
    AssignMinus,
    AssignMinusWrap,
    AssignBitShiftLeft,
    AssignBitShiftRight,
    AssignBitAnd,
    AssignBitXor,
    AssignBitOr,

    // Expr / BoolAndExpr
    BoolOr,
    BoolAnd,

    // CompareExpr
    CmpEq,
    CmpNotEq,
    CmpLessThan,
    CmpGreaterThan,
    CmpLessOrEq,
    CmpGreaterOrEq,

    // BitwiseExpr
    BinAnd,
    BinXor,
    BinOr,
    UnwrapOptional,

    // BitShiftExpr
    BitShiftLeft,
    BitShiftRight,

    // AdditionExpr
    Add,
    AddWrap,
    Sub,
    SubWrap,
    ArrayCat,

    // MultiplyExpr
    MergeErrorSets,
    Mult,
    MultWrap,
    Div,
    Mod,
    ArrayMult,

    // ErrorUnionExpr
    ErrorUnion,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Assign => "=",
            BinaryOperator::AssignTimes => "*=",
            BinaryOperator::AssignTimesWrap => "*%=",
            BinaryOperator::AssignDiv => "/=",
            BinaryOperator::AssignMod => "%=",
            BinaryOperator::AssignPlus => "+=",
            BinaryOperator::AssignPlusWrap => "+%=",
            BinaryOperator::AssignMinus => "-=",
            BinaryOperator::AssignMinusWrap => "-%=",
            BinaryOperator::AssignBitShiftLeft => "<<=",
            BinaryOperator::AssignBitShiftRight => ">>=",
            BinaryOperator::AssignBitAnd => "&=",
            BinaryOperator::AssignBitXor => "^=",
            BinaryOperator::AssignBitOr => "|=",
            BinaryOperator::BoolOr => "or",
            BinaryOperator::BoolAnd => "and",
            BinaryOperator::CmpEq => "==",
            BinaryOperator::CmpNotEq => "!=",
            BinaryOperator::CmpLessThan => "<",
            BinaryOperator::CmpGreaterThan => ">",
            BinaryOperator::CmpLessOrEq => "<=",
            BinaryOperator::CmpGreaterOrEq => ">=",
            BinaryOperator::BinAnd => "&",
            BinaryOperator::BinXor => "^",
            BinaryOperator::BinOr => "|",
            BinaryOperator::UnwrapOptional => "orelse",
            BinaryOperator::BitShiftLeft => "<<",
            BinaryOperator::BitShiftRight => ">>",
            BinaryOperator::Add => "+",
            BinaryOperator::AddWrap => "+%",
            BinaryOperator::Sub => "-",
            BinaryOperator::SubWrap => "-%",
            BinaryOperator::ArrayCat => "++",
            BinaryOperator::MergeErrorSets => "||",
            BinaryOperator::Mult => "*",
            BinaryOperator::MultWrap => "*%",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::ArrayMult => "**",
            BinaryOperator::ErrorUnion => "!",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    BoolNot,
    Negation,
    NegationWrap,
    BinNot,
    AddrOf,
    OptionalType,
}

/// Declaration visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibMod {
    #[default]
    Private,
    Public,
}
