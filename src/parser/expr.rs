use crate::{
    ast::{
        ast::{Node, NodeKind, PrefixOperator},
        expressions::{
            ArrayAccessExpr, BinOpExpr, CallModifier, CatchExpr, ContainerInitExpr,
            ContainerInitKind, FieldAccessExpr, FnCallExpr, PrefixOpExpr, SliceExpr,
            StructValueField,
        },
        statements::{Break, Continue, Return, ReturnKind, SwitchExpr, SwitchProng, SwitchRange},
        types::{ArrayType, InferredArrayType, PointerKind, PointerType},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{BigFloat, BigInt, Token, TokenKind, TokenPayload},
    Position,
};

use super::{
    asm::parse_asm_expr,
    lookups::{
        BinOpChain, BinOpLookup, InfixOp, OpParser, Production, ADDITION_OPS, ASSIGN_OPS,
        BITWISE_OPS, BIT_SHIFT_OPS, BOOL_AND_OPS, BOOL_OR_OPS, COMPARE_OPS, MULTIPLY_OPS,
        PREFIX_OPS,
    },
    parser::{ParseResult, Parser},
    stmt::{
        parse_block, parse_block_label, parse_break_label, parse_if, parse_labeled_block,
        parse_loop, parse_payload, parse_ptr_payload, BodyForm,
    },
    types::{
        parse_container_decl, parse_error_set_decl, parse_fn_proto, parse_type_expr,
        TypeModifiers,
    },
};

/// Folds a left-associative chain of operators from one precedence level.
///
/// # Arguments
///
/// * `chain` - `Once` for comparison and assignment, `Infinite` otherwise
/// * `op_parser` - Recognises an operator of this level
/// * `child` - Production for the next tighter level
///
/// # Returns
///
/// `Ok(None)` only when the first operand is absent. Once an operator has
/// been consumed the right operand is required.
pub fn parse_bin_op_expr(
    parser: &mut Parser,
    chain: BinOpChain,
    op_parser: OpParser,
    child: Production,
) -> ParseResult {
    let mut res = match child(parser)? {
        Some(node) => node,
        None => return Ok(None),
    };

    while let Some((token, op)) = op_parser(parser)? {
        let rhs = parser.expect_node(child)?;
        let kind = match op {
            InfixOp::Bin(op) => NodeKind::BinOp(BinOpExpr {
                lhs: res.boxed(),
                op,
                rhs: rhs.boxed(),
            }),
            InfixOp::Catch(payload) => NodeKind::Catch(CatchExpr {
                lhs: res.boxed(),
                payload,
                rhs: rhs.boxed(),
            }),
        };
        res = parser.node(&token, kind);

        if chain == BinOpChain::Once {
            break;
        }
    }

    Ok(Some(res))
}

fn parse_bin_op_simple(parser: &mut Parser, lookup: &BinOpLookup) -> ParseResult<(Token, InfixOp)> {
    match lookup[parser.current_token_kind() as usize] {
        Some(op) => Ok(Some((parser.eat(), InfixOp::Bin(op)))),
        None => Ok(None),
    }
}

fn parse_assign_op(parser: &mut Parser) -> ParseResult<(Token, InfixOp)> {
    parse_bin_op_simple(parser, &ASSIGN_OPS)
}

fn parse_bool_or_op(parser: &mut Parser) -> ParseResult<(Token, InfixOp)> {
    parse_bin_op_simple(parser, &BOOL_OR_OPS)
}

fn parse_bool_and_op(parser: &mut Parser) -> ParseResult<(Token, InfixOp)> {
    parse_bin_op_simple(parser, &BOOL_AND_OPS)
}

fn parse_compare_op(parser: &mut Parser) -> ParseResult<(Token, InfixOp)> {
    parse_bin_op_simple(parser, &COMPARE_OPS)
}

fn parse_bitwise_op(parser: &mut Parser) -> ParseResult<(Token, InfixOp)> {
    if let Some(op) = parse_bin_op_simple(parser, &BITWISE_OPS)? {
        return Ok(Some(op));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordCatch) {
        let payload = parse_payload(parser)?;
        return Ok(Some((token, InfixOp::Catch(payload))));
    }

    Ok(None)
}

fn parse_bit_shift_op(parser: &mut Parser) -> ParseResult<(Token, InfixOp)> {
    parse_bin_op_simple(parser, &BIT_SHIFT_OPS)
}

fn parse_addition_op(parser: &mut Parser) -> ParseResult<(Token, InfixOp)> {
    parse_bin_op_simple(parser, &ADDITION_OPS)
}

fn parse_multiply_op(parser: &mut Parser) -> ParseResult<(Token, InfixOp)> {
    parse_bin_op_simple(parser, &MULTIPLY_OPS)
}

/// AssignExpr <- Expr (AssignOp Expr)?
pub fn parse_assign_expr(parser: &mut Parser) -> ParseResult {
    parse_bin_op_expr(parser, BinOpChain::Once, parse_assign_op, parse_expr)
}

/// Expr <- BoolAndExpr (KEYWORD_or BoolAndExpr)*
pub fn parse_expr(parser: &mut Parser) -> ParseResult {
    parse_bin_op_expr(parser, BinOpChain::Infinite, parse_bool_or_op, parse_bool_and_expr)
}

fn parse_bool_and_expr(parser: &mut Parser) -> ParseResult {
    parse_bin_op_expr(parser, BinOpChain::Infinite, parse_bool_and_op, parse_compare_expr)
}

fn parse_compare_expr(parser: &mut Parser) -> ParseResult {
    parse_bin_op_expr(parser, BinOpChain::Once, parse_compare_op, parse_bitwise_expr)
}

fn parse_bitwise_expr(parser: &mut Parser) -> ParseResult {
    parse_bin_op_expr(parser, BinOpChain::Infinite, parse_bitwise_op, parse_bit_shift_expr)
}

fn parse_bit_shift_expr(parser: &mut Parser) -> ParseResult {
    parse_bin_op_expr(parser, BinOpChain::Infinite, parse_bit_shift_op, parse_addition_expr)
}

fn parse_addition_expr(parser: &mut Parser) -> ParseResult {
    parse_bin_op_expr(parser, BinOpChain::Infinite, parse_addition_op, parse_multiply_expr)
}

fn parse_multiply_expr(parser: &mut Parser) -> ParseResult {
    parse_bin_op_expr(parser, BinOpChain::Infinite, parse_multiply_op, parse_prefix_expr)
}

/// A prefix operator waiting for its operand.
///
/// Prefix chains are collected first and folded around the operand
/// afterwards, innermost (last parsed) first.
#[derive(Debug)]
pub enum PrefixFrame {
    Op {
        position: Position,
        op: PrefixOperator,
    },
    Try(Position),
    Await(Position),
    /// `anyframe->`
    AnyFrame(Position),
    Array {
        position: Position,
        size: Option<Node>,
        sentinel: Option<Node>,
        modifiers: TypeModifiers,
    },
    InferredArray {
        position: Position,
        sentinel: Option<Node>,
    },
    Pointer {
        position: Position,
        kind: PointerKind,
        sentinel: Option<Node>,
        modifiers: TypeModifiers,
        /// `**` stands for two single pointers; sentinel and modifiers
        /// belong to the inner one.
        double: bool,
    },
}

impl PrefixFrame {
    fn wrap(self, parser: &Parser, operand: Node) -> Node {
        match self {
            PrefixFrame::Op { position, op } => parser.node_at(
                position,
                NodeKind::PrefixOp(PrefixOpExpr {
                    op,
                    operand: operand.boxed(),
                }),
            ),
            PrefixFrame::Try(position) => parser.node_at(
                position,
                NodeKind::Return(Return {
                    kind: ReturnKind::Error,
                    expr: Some(operand.boxed()),
                }),
            ),
            PrefixFrame::Await(position) => {
                parser.node_at(position, NodeKind::Await(operand.boxed()))
            }
            PrefixFrame::AnyFrame(position) => {
                parser.node_at(position, NodeKind::AnyFrameType(Some(operand.boxed())))
            }
            PrefixFrame::Array {
                position,
                size,
                sentinel,
                modifiers,
            } => parser.node_at(
                position,
                NodeKind::ArrayType(ArrayType {
                    size: size.map(Node::boxed),
                    sentinel: sentinel.map(Node::boxed),
                    align: modifiers.align.map(Node::boxed),
                    is_const: modifiers.is_const,
                    is_volatile: modifiers.is_volatile,
                    allow_zero: modifiers.allow_zero,
                    child: operand.boxed(),
                }),
            ),
            PrefixFrame::InferredArray { position, sentinel } => parser.node_at(
                position,
                NodeKind::InferredArrayType(InferredArrayType {
                    sentinel: sentinel.map(Node::boxed),
                    child: operand.boxed(),
                }),
            ),
            PrefixFrame::Pointer {
                position,
                kind,
                sentinel,
                modifiers,
                double,
            } => {
                let inner = parser.node_at(
                    position,
                    NodeKind::PointerType(PointerType {
                        kind,
                        sentinel: sentinel.map(Node::boxed),
                        align: modifiers.align.map(Node::boxed),
                        bit_offset_start: modifiers.bit_offset_start,
                        host_int_bytes: modifiers.host_int_bytes,
                        is_const: modifiers.is_const,
                        is_volatile: modifiers.is_volatile,
                        allow_zero: modifiers.allow_zero,
                        child: operand.boxed(),
                    }),
                );
                if !double {
                    return inner;
                }
                parser.node_at(
                    position,
                    NodeKind::PointerType(PointerType {
                        kind: PointerKind::Single,
                        sentinel: None,
                        align: None,
                        bit_offset_start: None,
                        host_int_bytes: None,
                        is_const: false,
                        is_volatile: false,
                        allow_zero: false,
                        child: inner.boxed(),
                    }),
                )
            }
        }
    }
}

/// Parses `op_parser* child`.
///
/// With no prefix operator the absence of `child` propagates. After at least
/// one operator the chain has committed and `child` is required.
pub fn parse_prefix_op_expr(
    parser: &mut Parser,
    op_parser: fn(&mut Parser) -> ParseResult<PrefixFrame>,
    child: Production,
) -> ParseResult {
    let mut pending = Vec::new();
    while let Some(frame) = op_parser(parser)? {
        pending.push(frame);
    }

    let mut res = if pending.is_empty() {
        match child(parser)? {
            Some(node) => node,
            None => return Ok(None),
        }
    } else {
        parser.expect_node(child)?
    };

    for frame in pending.into_iter().rev() {
        res = frame.wrap(parser, res);
    }
    Ok(Some(res))
}

/// PrefixExpr <- PrefixOp* PrimaryExpr
pub fn parse_prefix_expr(parser: &mut Parser) -> ParseResult {
    parse_prefix_op_expr(parser, parse_prefix_op, parse_primary_expr)
}

fn parse_prefix_op(parser: &mut Parser) -> ParseResult<PrefixFrame> {
    if let Some(op) = PREFIX_OPS[parser.current_token_kind() as usize] {
        let token = parser.eat();
        return Ok(Some(PrefixFrame::Op {
            position: token.span.start,
            op,
        }));
    }
    if let Some(token) = parser.eat_if(TokenKind::KeywordTry) {
        return Ok(Some(PrefixFrame::Try(token.span.start)));
    }
    if let Some(token) = parser.eat_if(TokenKind::KeywordAwait) {
        return Ok(Some(PrefixFrame::Await(token.span.start)));
    }
    Ok(None)
}

/// PrimaryExpr
///     <- AsmExpr / IfExpr / KEYWORD_break BreakLabel? Expr?
///      / KEYWORD_comptime Expr / KEYWORD_nosuspend Expr
///      / KEYWORD_continue BreakLabel? / KEYWORD_resume Expr
///      / KEYWORD_return Expr? / BlockLabel? LoopExpr / Block / CurlySuffixExpr
pub fn parse_primary_expr(parser: &mut Parser) -> ParseResult {
    if let Some(node) = parse_asm_expr(parser)? {
        return Ok(Some(node));
    }
    if let Some(node) = parse_if(parser, BodyForm::Expr)? {
        return Ok(Some(node));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordBreak) {
        let label = parse_break_label(parser)?;
        let expr = parse_expr(parser)?;
        return Ok(Some(parser.node(
            &token,
            NodeKind::Break(Break {
                label,
                expr: expr.map(Node::boxed),
            }),
        )));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordCompTime) {
        let expr = parser.expect_node(parse_expr)?;
        return Ok(Some(parser.node(&token, NodeKind::CompTime(expr.boxed()))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordNoSuspend) {
        let expr = parser.expect_node(parse_expr)?;
        return Ok(Some(parser.node(&token, NodeKind::NoSuspend(expr.boxed()))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordContinue) {
        let label = parse_break_label(parser)?;
        return Ok(Some(parser.node(&token, NodeKind::Continue(Continue { label }))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordResume) {
        let expr = parser.expect_node(parse_expr)?;
        return Ok(Some(parser.node(&token, NodeKind::Resume(expr.boxed()))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordReturn) {
        let expr = parse_expr(parser)?;
        return Ok(Some(parser.node(
            &token,
            NodeKind::Return(Return {
                kind: ReturnKind::Unconditional,
                expr: expr.map(Node::boxed),
            }),
        )));
    }

    let label = parse_block_label(parser);
    if let Some(node) = parse_loop(parser, BodyForm::Expr, label.clone())? {
        return Ok(Some(node));
    }
    if label.is_some() {
        // `IDENT ':'` not followed by a loop: undo both.
        parser.put_back();
        parser.put_back();
    }

    if let Some(block) = parse_block(parser)? {
        return Ok(Some(block));
    }

    parse_curly_suffix_expr(parser)
}

/// CurlySuffixExpr <- TypeExpr InitList?
fn parse_curly_suffix_expr(parser: &mut Parser) -> ParseResult {
    let ty = match parse_type_expr(parser)? {
        Some(ty) => ty,
        None => return Ok(None),
    };

    match parse_init_list(parser)? {
        Some(init_list) => Ok(Some(init_list.into_node(parser, Some(ty)))),
        None => Ok(Some(ty)),
    }
}

/// The contents of `{ ... }` after a type or an anonymous `.`.
pub struct InitList {
    lbrace: Token,
    kind: ContainerInitKind,
    entries: Vec<Node>,
}

impl InitList {
    fn into_node(self, parser: &Parser, ty: Option<Node>) -> Node {
        parser.node(
            &self.lbrace,
            NodeKind::ContainerInit(ContainerInitExpr {
                kind: self.kind,
                ty: ty.map(Node::boxed),
                entries: self.entries,
            }),
        )
    }
}

/// InitList
///     <- LBRACE FieldInit (COMMA FieldInit)* COMMA? RBRACE
///      / LBRACE Expr (COMMA Expr)* COMMA? RBRACE
///      / LBRACE RBRACE
fn parse_init_list(parser: &mut Parser) -> ParseResult<InitList> {
    let lbrace = match parser.eat_if(TokenKind::LBrace) {
        Some(token) => token,
        None => return Ok(None),
    };

    if let Some(first) = parse_field_init(parser)? {
        let mut entries = vec![first];
        while parser.eat_if(TokenKind::Comma).is_some() {
            match parse_field_init(parser)? {
                Some(entry) => entries.push(entry),
                None => break,
            }
        }
        parser.expect(TokenKind::RBrace)?;
        return Ok(Some(InitList {
            lbrace,
            kind: ContainerInitKind::Struct,
            entries,
        }));
    }

    let mut entries = Vec::new();
    if let Some(first) = parse_expr(parser)? {
        entries.push(first);
        while parser.eat_if(TokenKind::Comma).is_some() {
            match parse_expr(parser)? {
                Some(entry) => entries.push(entry),
                None => break,
            }
        }
    }
    parser.expect(TokenKind::RBrace)?;

    Ok(Some(InitList {
        lbrace,
        kind: ContainerInitKind::Array,
        entries,
    }))
}

/// FieldInit <- DOT IDENTIFIER EQUAL Expr
fn parse_field_init(parser: &mut Parser) -> ParseResult {
    let dot = match parser.eat_if(TokenKind::Dot) {
        Some(token) => token,
        None => return Ok(None),
    };

    let name = match parser.eat_if(TokenKind::Identifier) {
        Some(token) => token,
        None => {
            // `.{` is an anonymous literal used as an array element.
            parser.put_back();
            return Ok(None);
        }
    };

    if parser.eat_if(TokenKind::Eq).is_none() {
        // `.name` alone is an enum literal; undo the dot and the name.
        parser.put_back();
        parser.put_back();
        return Ok(None);
    }

    let value = parser.expect_node(parse_expr)?;
    Ok(Some(parser.node(
        &dot,
        NodeKind::StructValueField(StructValueField {
            name: name.text().to_string(),
            value: value.boxed(),
        }),
    )))
}

/// `DOT IDENTIFIER` (enum literal) or `DOT InitList` (anonymous literal).
fn parse_anon_lit(parser: &mut Parser) -> ParseResult {
    let dot = match parser.eat_if(TokenKind::Dot) {
        Some(token) => token,
        None => return Ok(None),
    };

    if let Some(name) = parser.eat_if(TokenKind::Identifier) {
        return Ok(Some(
            parser.node(&dot, NodeKind::EnumLiteral(name.text().to_string())),
        ));
    }

    if let Some(init_list) = parse_init_list(parser)? {
        return Ok(Some(init_list.into_node(parser, None)));
    }

    parser.put_back();
    Ok(None)
}

enum SuffixOp {
    ArrayAccess {
        lbracket: Token,
        subscript: Node,
    },
    Slice {
        lbracket: Token,
        start: Node,
        end: Option<Node>,
        sentinel: Option<Node>,
    },
    Deref(Token),
    Field {
        dot: Token,
        name: String,
    },
    Unwrap(Token),
}

impl SuffixOp {
    fn apply(self, parser: &Parser, lhs: Node) -> Node {
        match self {
            SuffixOp::ArrayAccess {
                lbracket,
                subscript,
            } => parser.node(
                &lbracket,
                NodeKind::ArrayAccess(ArrayAccessExpr {
                    array: lhs.boxed(),
                    subscript: subscript.boxed(),
                }),
            ),
            SuffixOp::Slice {
                lbracket,
                start,
                end,
                sentinel,
            } => parser.node(
                &lbracket,
                NodeKind::Slice(SliceExpr {
                    array: lhs.boxed(),
                    start: start.boxed(),
                    end: end.map(Node::boxed),
                    sentinel: sentinel.map(Node::boxed),
                }),
            ),
            SuffixOp::Deref(token) => parser.node(&token, NodeKind::PtrDeref(lhs.boxed())),
            SuffixOp::Field { dot, name } => parser.node(
                &dot,
                NodeKind::FieldAccess(FieldAccessExpr {
                    container: lhs.boxed(),
                    field: name,
                }),
            ),
            SuffixOp::Unwrap(token) => {
                parser.node(&token, NodeKind::UnwrapOptional(lhs.boxed()))
            }
        }
    }
}

/// SuffixExpr
///     <- KEYWORD_async PrimaryTypeExpr SuffixOp* FnCallArguments
///      / PrimaryTypeExpr (SuffixOp / FnCallArguments)*
pub fn parse_suffix_expr(parser: &mut Parser) -> ParseResult {
    if let Some(async_token) = parser.eat_if(TokenKind::KeywordAsync) {
        let mut callee = parser.expect_node(parse_primary_type_expr)?;
        while let Some(suffix) = parse_suffix_op(parser)? {
            callee = suffix.apply(parser, callee);
        }

        let (_, args) = parser.expect_node(parse_fn_call_arguments)?;
        return Ok(Some(parser.node(
            &async_token,
            NodeKind::FnCall(FnCallExpr {
                callee: callee.boxed(),
                args,
                modifier: CallModifier::Async,
            }),
        )));
    }

    let mut res = match parse_primary_type_expr(parser)? {
        Some(node) => node,
        None => return Ok(None),
    };

    loop {
        if let Some(suffix) = parse_suffix_op(parser)? {
            res = suffix.apply(parser, res);
            continue;
        }

        if let Some((lparen, args)) = parse_fn_call_arguments(parser)? {
            res = parser.node(
                &lparen,
                NodeKind::FnCall(FnCallExpr {
                    callee: res.boxed(),
                    args,
                    modifier: CallModifier::None,
                }),
            );
            continue;
        }

        break;
    }

    Ok(Some(res))
}

/// SuffixOp
///     <- LBRACKET Expr (DOT2 Expr? (COLON Expr)?)? RBRACKET
///      / DOT IDENTIFIER / DOTASTERISK / DOTQUESTIONMARK
fn parse_suffix_op(parser: &mut Parser) -> ParseResult<SuffixOp> {
    if let Some(lbracket) = parser.eat_if(TokenKind::LBracket) {
        let start = parser.expect_node(parse_expr)?;

        if parser.eat_if(TokenKind::Ellipsis2).is_some() {
            let end = parse_expr(parser)?;
            let sentinel = match parser.eat_if(TokenKind::Colon) {
                Some(_) => Some(parser.expect_node(parse_expr)?),
                None => None,
            };
            parser.expect(TokenKind::RBracket)?;
            return Ok(Some(SuffixOp::Slice {
                lbracket,
                start,
                end,
                sentinel,
            }));
        }

        parser.expect(TokenKind::RBracket)?;
        return Ok(Some(SuffixOp::ArrayAccess {
            lbracket,
            subscript: start,
        }));
    }

    if let Some(token) = parser.eat_if(TokenKind::DotStar) {
        return Ok(Some(SuffixOp::Deref(token)));
    }

    if let Some(dot) = parser.eat_if(TokenKind::Dot) {
        if let Some(name) = parser.eat_if(TokenKind::Identifier) {
            return Ok(Some(SuffixOp::Field {
                dot,
                name: name.text().to_string(),
            }));
        }
        if let Some(token) = parser.eat_if(TokenKind::QuestionMark) {
            return Ok(Some(SuffixOp::Unwrap(token)));
        }
        return Err(parser.invalid_token());
    }

    Ok(None)
}

/// FnCallArguments <- LPAREN ExprList RPAREN
fn parse_fn_call_arguments(parser: &mut Parser) -> ParseResult<(Token, Vec<Node>)> {
    let lparen = match parser.eat_if(TokenKind::LParen) {
        Some(token) => token,
        None => return Ok(None),
    };

    let args = parser.parse_list(TokenKind::Comma, parse_expr)?;
    parser.expect(TokenKind::RParen)?;
    Ok(Some((lparen, args)))
}

fn literal_error(parser: &Parser, token: &Token) -> Error {
    parser.error(
        ErrorImpl::InvalidToken { found: token.kind },
        token.span.start,
    )
}

fn int_value(parser: &Parser, token: &Token) -> Result<BigInt, Error> {
    match &token.payload {
        TokenPayload::Int(value) => Ok(value.clone()),
        _ => Err(literal_error(parser, token)),
    }
}

fn float_value(parser: &Parser, token: &Token) -> Result<BigFloat, Error> {
    match &token.payload {
        TokenPayload::Float(value) => Ok(value.clone()),
        _ => Err(literal_error(parser, token)),
    }
}

fn char_value(parser: &Parser, token: &Token) -> Result<u32, Error> {
    match &token.payload {
        TokenPayload::Char(value) => Ok(*value),
        _ => Err(literal_error(parser, token)),
    }
}

/// Reads the integer payload of an `IntLiteral` token.
pub fn expect_int_literal(parser: &mut Parser) -> Result<BigInt, Error> {
    let token = parser.expect(TokenKind::IntLiteral)?;
    int_value(parser, &token)
}

/// PrimaryTypeExpr
///     <- BUILTINIDENTIFIER FnCallArguments / CHAR_LITERAL / ContainerDecl
///      / DOT IDENTIFIER / DOT InitList / ErrorSetDecl / FLOAT / FnProto
///      / GroupedExpr / LabeledTypeExpr / IDENTIFIER / IfTypeExpr / INTEGER
///      / KEYWORD_comptime TypeExpr / KEYWORD_error DOT IDENTIFIER
///      / KEYWORD_false / KEYWORD_null / KEYWORD_anyframe / KEYWORD_true
///      / KEYWORD_undefined / KEYWORD_unreachable / STRINGLITERAL / SwitchExpr
pub fn parse_primary_type_expr(parser: &mut Parser) -> ParseResult {
    if let Some(token) = parser.eat_if(TokenKind::Builtin) {
        let (_, args) = parser.expect_node(parse_fn_call_arguments)?;
        let callee = parser.node(&token, NodeKind::Symbol(token.text().to_string()));
        return Ok(Some(parser.node(
            &token,
            NodeKind::FnCall(FnCallExpr {
                callee: callee.boxed(),
                args,
                modifier: CallModifier::Builtin,
            }),
        )));
    }

    if let Some(token) = parser.eat_if(TokenKind::CharLiteral) {
        let value = char_value(parser, &token)?;
        return Ok(Some(parser.node(&token, NodeKind::CharLiteral(value))));
    }

    if let Some(node) = parse_container_decl(parser)? {
        return Ok(Some(node));
    }

    if let Some(node) = parse_anon_lit(parser)? {
        return Ok(Some(node));
    }

    if let Some(node) = parse_error_set_decl(parser)? {
        return Ok(Some(node));
    }

    if let Some(token) = parser.eat_if(TokenKind::FloatLiteral) {
        let value = float_value(parser, &token)?;
        return Ok(Some(parser.node(&token, NodeKind::FloatLiteral(value))));
    }

    if let Some(node) = parse_fn_proto(parser)? {
        return Ok(Some(node));
    }

    if let Some(node) = parse_grouped_expr(parser)? {
        return Ok(Some(node));
    }

    if let Some(node) = parse_labeled_type_expr(parser)? {
        return Ok(Some(node));
    }

    if let Some(token) = parser.eat_if(TokenKind::Identifier) {
        return Ok(Some(
            parser.node(&token, NodeKind::Symbol(token.text().to_string())),
        ));
    }

    if let Some(node) = parse_if(parser, BodyForm::TypeExpr)? {
        return Ok(Some(node));
    }

    if let Some(token) = parser.eat_if(TokenKind::IntLiteral) {
        let value = int_value(parser, &token)?;
        return Ok(Some(parser.node(&token, NodeKind::IntLiteral(value))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordCompTime) {
        let expr = parser.expect_node(parse_type_expr)?;
        return Ok(Some(parser.node(&token, NodeKind::CompTime(expr.boxed()))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordError) {
        let dot = parser.expect(TokenKind::Dot)?;
        let name = parser.expect(TokenKind::Identifier)?;
        let container = parser.node(&token, NodeKind::ErrorType);
        return Ok(Some(parser.node(
            &dot,
            NodeKind::FieldAccess(FieldAccessExpr {
                container: container.boxed(),
                field: name.text().to_string(),
            }),
        )));
    }

    let kind = match parser.current_token_kind() {
        TokenKind::KeywordFalse => Some(NodeKind::BoolLiteral(false)),
        TokenKind::KeywordTrue => Some(NodeKind::BoolLiteral(true)),
        TokenKind::KeywordNull => Some(NodeKind::NullLiteral),
        TokenKind::KeywordAnyFrame => Some(NodeKind::AnyFrameType(None)),
        TokenKind::KeywordUndefined => Some(NodeKind::UndefinedLiteral),
        TokenKind::KeywordUnreachable => Some(NodeKind::Unreachable),
        TokenKind::StringLiteral | TokenKind::MultilineStringLiteral => {
            Some(NodeKind::StringLiteral(parser.current_token().text().to_string()))
        }
        _ => None,
    };
    if let Some(kind) = kind {
        let token = parser.eat();
        return Ok(Some(parser.node(&token, kind)));
    }

    parse_switch_expr(parser)
}

/// GroupedExpr <- LPAREN Expr RPAREN
fn parse_grouped_expr(parser: &mut Parser) -> ParseResult {
    let lparen = match parser.eat_if(TokenKind::LParen) {
        Some(token) => token,
        None => return Ok(None),
    };

    let expr = parser.expect_node(parse_expr)?;
    parser.expect(TokenKind::RParen)?;
    Ok(Some(parser.node(&lparen, NodeKind::GroupedExpr(expr.boxed()))))
}

/// LabeledTypeExpr <- BlockLabel Block / BlockLabel? LoopTypeExpr
fn parse_labeled_type_expr(parser: &mut Parser) -> ParseResult {
    let label = parse_block_label(parser);
    if label.is_some() {
        if let Some(block) = parse_labeled_block(parser, label.clone())? {
            return Ok(Some(block));
        }
    }

    if let Some(node) = parse_loop(parser, BodyForm::TypeExpr, label.clone())? {
        return Ok(Some(node));
    }

    if label.is_some() {
        // Neither a block nor a loop: undo `IDENT ':'`.
        parser.put_back();
        parser.put_back();
    }
    Ok(None)
}

/// SwitchExpr <- KEYWORD_switch LPAREN Expr RPAREN LBRACE SwitchProngList RBRACE
pub fn parse_switch_expr(parser: &mut Parser) -> ParseResult {
    let token = match parser.eat_if(TokenKind::KeywordSwitch) {
        Some(token) => token,
        None => return Ok(None),
    };

    parser.expect(TokenKind::LParen)?;
    let expr = parser.expect_node(parse_expr)?;
    parser.expect(TokenKind::RParen)?;
    parser.expect(TokenKind::LBrace)?;
    let prongs = parser.parse_list(TokenKind::Comma, parse_switch_prong)?;
    parser.expect(TokenKind::RBrace)?;

    Ok(Some(parser.node(
        &token,
        NodeKind::Switch(SwitchExpr {
            expr: expr.boxed(),
            prongs,
        }),
    )))
}

struct SwitchCase {
    position: Position,
    items: Vec<Node>,
    is_else: bool,
}

/// SwitchProng <- SwitchCase EQUALRARROW PtrPayload? AssignExpr
fn parse_switch_prong(parser: &mut Parser) -> ParseResult {
    let case = match parse_switch_case(parser)? {
        Some(case) => case,
        None => return Ok(None),
    };

    parser.expect(TokenKind::FatArrow)?;
    let payload = parse_ptr_payload(parser)?;
    let expr = parser.expect_node(parse_assign_expr)?;

    let any_items_are_range = case
        .items
        .iter()
        .any(|item| matches!(item.kind, NodeKind::SwitchRange(_)));

    Ok(Some(parser.node_at(
        case.position,
        NodeKind::SwitchProng(SwitchProng {
            items: case.items,
            is_else: case.is_else,
            any_items_are_range,
            payload,
            expr: expr.boxed(),
        }),
    )))
}

/// SwitchCase <- SwitchItem (COMMA SwitchItem)* COMMA? / KEYWORD_else
fn parse_switch_case(parser: &mut Parser) -> ParseResult<SwitchCase> {
    if let Some(first) = parse_switch_item(parser)? {
        let position = first.position;
        let mut items = vec![first];
        while parser.eat_if(TokenKind::Comma).is_some() {
            match parse_switch_item(parser)? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        return Ok(Some(SwitchCase {
            position,
            items,
            is_else: false,
        }));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordElse) {
        return Ok(Some(SwitchCase {
            position: token.span.start,
            items: Vec::new(),
            is_else: true,
        }));
    }

    Ok(None)
}

/// SwitchItem <- Expr (DOT3 Expr)?
fn parse_switch_item(parser: &mut Parser) -> ParseResult {
    let start = match parse_expr(parser)? {
        Some(expr) => expr,
        None => return Ok(None),
    };

    if let Some(token) = parser.eat_if(TokenKind::Ellipsis3) {
        let end = parser.expect_node(parse_expr)?;
        return Ok(Some(parser.node(
            &token,
            NodeKind::SwitchRange(SwitchRange {
                start: start.boxed(),
                end: end.boxed(),
            }),
        )));
    }

    Ok(Some(start))
}
