//! Type expressions, container declarations and function prototypes.

use crate::{
    ast::{
        ast::{BinaryOperator, Node, NodeKind, PrefixOperator, VisibMod},
        expressions::BinOpExpr,
        statements::{FnInline, FnProto, ParamDecl},
        types::{
            ContainerDecl, ContainerKind, ContainerLayout, ErrorSetDecl, ErrorSetField, PointerKind,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{BigInt, Token, TokenKind},
    Position,
};

use super::{
    expr::{expect_int_literal, parse_expr, parse_prefix_op_expr, parse_suffix_expr, PrefixFrame},
    parser::{ParseResult, Parser},
    stmt::{parse_container_members, parse_doc_comments},
};

/// Qualifiers collected after a pointer or array type start.
#[derive(Debug, Default)]
pub struct TypeModifiers {
    pub align: Option<Node>,
    pub bit_offset_start: Option<BigInt>,
    pub host_int_bytes: Option<BigInt>,
    pub is_const: bool,
    pub is_volatile: bool,
    pub allow_zero: bool,
}

/// TypeExpr <- PrefixTypeOp* ErrorUnionExpr
pub fn parse_type_expr(parser: &mut Parser) -> ParseResult {
    parse_prefix_op_expr(parser, parse_prefix_type_op, parse_error_union_expr)
}

/// ErrorUnionExpr <- SuffixExpr (EXCLAMATIONMARK TypeExpr)?
fn parse_error_union_expr(parser: &mut Parser) -> ParseResult {
    let res = match parse_suffix_expr(parser)? {
        Some(node) => node,
        None => return Ok(None),
    };

    let bang = match parser.eat_if(TokenKind::Bang) {
        Some(token) => token,
        None => return Ok(Some(res)),
    };

    let rhs = parser.expect_node(parse_type_expr)?;
    Ok(Some(parser.node(
        &bang,
        NodeKind::BinOp(BinOpExpr {
            lhs: res.boxed(),
            op: BinaryOperator::ErrorUnion,
            rhs: rhs.boxed(),
        }),
    )))
}

/// PrefixTypeOp
///     <- QUESTIONMARK
///      / KEYWORD_anyframe MINUSRARROW
///      / LBRACKET '_' (COLON Expr)? RBRACKET
///      / PtrTypeStart (KEYWORD_align LPAREN Expr (COLON INTEGER COLON INTEGER)? RPAREN
///                      / KEYWORD_const / KEYWORD_volatile / KEYWORD_allowzero)*
///      / ArrayTypeStart (ByteAlign / KEYWORD_const / KEYWORD_volatile / KEYWORD_allowzero)*
fn parse_prefix_type_op(parser: &mut Parser) -> ParseResult<PrefixFrame> {
    if let Some(token) = parser.eat_if(TokenKind::QuestionMark) {
        return Ok(Some(PrefixFrame::Op {
            position: token.span.start,
            op: PrefixOperator::OptionalType,
        }));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordAnyFrame) {
        if parser.eat_if(TokenKind::Arrow).is_some() {
            return Ok(Some(PrefixFrame::AnyFrame(token.span.start)));
        }
        // Bare `anyframe` is a primary type.
        parser.put_back();
    }

    if let Some(lbracket) = parser.eat_if(TokenKind::LBracket) {
        match parser.eat_if(TokenKind::Identifier) {
            None => parser.put_back(),
            Some(ident) if ident.text() != "_" => {
                // `[name` starts an array type or a many-pointer; undo both.
                parser.put_back();
                parser.put_back();
            }
            Some(_) => {
                let sentinel = match parser.eat_if(TokenKind::Colon) {
                    Some(_) => Some(parser.expect_node(parse_expr)?),
                    None => None,
                };
                parser.expect(TokenKind::RBracket)?;
                return Ok(Some(PrefixFrame::InferredArray {
                    position: lbracket.span.start,
                    sentinel,
                }));
            }
        }
    }

    if let Some(start) = parse_ptr_type_start(parser)? {
        let modifiers = parse_pointer_modifiers(parser)?;
        return Ok(Some(PrefixFrame::Pointer {
            position: start.position,
            kind: start.kind,
            sentinel: start.sentinel,
            modifiers,
            double: start.double,
        }));
    }

    if let Some(start) = parse_array_type_start(parser)? {
        let modifiers = parse_array_modifiers(parser)?;
        return Ok(Some(PrefixFrame::Array {
            position: start.position,
            size: start.size,
            sentinel: start.sentinel,
            modifiers,
        }));
    }

    Ok(None)
}

fn parse_pointer_modifiers(parser: &mut Parser) -> Result<TypeModifiers, Error> {
    let mut modifiers = TypeModifiers::default();
    loop {
        if parser.eat_if(TokenKind::KeywordAlign).is_some() {
            parser.expect(TokenKind::LParen)?;
            modifiers.align = Some(parser.expect_node(parse_expr)?);
            if parser.eat_if(TokenKind::Colon).is_some() {
                modifiers.bit_offset_start = Some(expect_int_literal(parser)?);
                parser.expect(TokenKind::Colon)?;
                modifiers.host_int_bytes = Some(expect_int_literal(parser)?);
            }
            parser.expect(TokenKind::RParen)?;
            continue;
        }
        if parser.eat_if(TokenKind::KeywordConst).is_some() {
            modifiers.is_const = true;
            continue;
        }
        if parser.eat_if(TokenKind::KeywordVolatile).is_some() {
            modifiers.is_volatile = true;
            continue;
        }
        if parser.eat_if(TokenKind::KeywordAllowZero).is_some() {
            modifiers.allow_zero = true;
            continue;
        }
        break;
    }
    Ok(modifiers)
}

fn parse_array_modifiers(parser: &mut Parser) -> Result<TypeModifiers, Error> {
    let mut modifiers = TypeModifiers::default();
    loop {
        if parser.eat_if(TokenKind::KeywordAllowZero).is_some() {
            modifiers.allow_zero = true;
            continue;
        }
        if let Some(align) = parse_byte_align(parser)? {
            modifiers.align = Some(align);
            continue;
        }
        if parser.eat_if(TokenKind::KeywordConst).is_some() {
            modifiers.is_const = true;
            continue;
        }
        if parser.eat_if(TokenKind::KeywordVolatile).is_some() {
            modifiers.is_volatile = true;
            continue;
        }
        break;
    }
    Ok(modifiers)
}

struct PtrTypeStart {
    position: Position,
    kind: PointerKind,
    sentinel: Option<Node>,
    double: bool,
}

/// PtrTypeStart
///     <- ASTERISK (COLON Expr)?
///      / ASTERISK2 (COLON Expr)?
///      / LBRACKET ASTERISK (LETTERC / COLON Expr)? RBRACKET
fn parse_ptr_type_start(parser: &mut Parser) -> ParseResult<PtrTypeStart> {
    for (kind, double) in [(TokenKind::Star, false), (TokenKind::StarStar, true)] {
        if let Some(token) = parser.eat_if(kind) {
            let sentinel = match parser.eat_if(TokenKind::Colon) {
                Some(_) => Some(parser.expect_node(parse_expr)?),
                None => None,
            };
            return Ok(Some(PtrTypeStart {
                position: token.span.start,
                kind: PointerKind::Single,
                sentinel,
                double,
            }));
        }
    }

    let lbracket = match parser.eat_if(TokenKind::LBracket) {
        Some(token) => token,
        None => return Ok(None),
    };

    if parser.eat_if(TokenKind::Star).is_none() {
        parser.put_back();
        return Ok(None);
    }

    if let Some(ident) = parser.eat_if(TokenKind::Identifier) {
        if ident.text() == "c" {
            parser.expect(TokenKind::RBracket)?;
            return Ok(Some(PtrTypeStart {
                position: lbracket.span.start,
                kind: PointerKind::C,
                sentinel: None,
                double: false,
            }));
        }
        // Only `c` may follow `[*`; leave the identifier for the error below.
        parser.put_back();
    }

    let sentinel = match parser.eat_if(TokenKind::Colon) {
        Some(_) => Some(parser.expect_node(parse_expr)?),
        None => None,
    };
    parser.expect(TokenKind::RBracket)?;

    Ok(Some(PtrTypeStart {
        position: lbracket.span.start,
        kind: PointerKind::Many,
        sentinel,
        double: false,
    }))
}

struct ArrayTypeStart {
    position: Position,
    size: Option<Node>,
    sentinel: Option<Node>,
}

/// ArrayTypeStart <- LBRACKET Expr? (COLON Expr)? RBRACKET
fn parse_array_type_start(parser: &mut Parser) -> ParseResult<ArrayTypeStart> {
    let lbracket = match parser.eat_if(TokenKind::LBracket) {
        Some(token) => token,
        None => return Ok(None),
    };

    let size = parse_expr(parser)?;
    let sentinel = match parser.eat_if(TokenKind::Colon) {
        Some(_) => Some(parser.expect_node(parse_expr)?),
        None => None,
    };
    parser.expect(TokenKind::RBracket)?;

    Ok(Some(ArrayTypeStart {
        position: lbracket.span.start,
        size,
        sentinel,
    }))
}

/// ContainerDecl <- (KEYWORD_extern / KEYWORD_packed)? ContainerDeclAuto
pub fn parse_container_decl(parser: &mut Parser) -> ParseResult {
    let layout_token = parser
        .eat_if(TokenKind::KeywordExtern)
        .or_else(|| parser.eat_if(TokenKind::KeywordPacked));

    let (token, mut decl) = match parse_container_decl_type(parser)? {
        Some(res) => res,
        None => {
            if layout_token.is_some() {
                // `extern` / `packed` belongs to a declaration instead.
                parser.put_back();
            }
            return Ok(None);
        }
    };

    let position = match &layout_token {
        Some(layout) => layout.span.start,
        None => token.span.start,
    };
    decl.layout = match layout_token.map(|token| token.kind) {
        Some(TokenKind::KeywordExtern) => ContainerLayout::Extern,
        Some(TokenKind::KeywordPacked) => ContainerLayout::Packed,
        _ => ContainerLayout::Auto,
    };

    parser.expect(TokenKind::LBrace)?;
    let members = parse_container_members(parser)?;
    parser.expect(TokenKind::RBrace)?;

    decl.fields = members.fields;
    decl.decls = members.decls;
    decl.doc_comments = members.doc_comments;

    Ok(Some(parser.node_at(position, NodeKind::ContainerDecl(decl))))
}

fn empty_container(kind: ContainerKind, init_arg: Option<Node>, auto_enum: bool) -> ContainerDecl {
    ContainerDecl {
        kind,
        layout: ContainerLayout::Auto,
        init_arg: init_arg.map(Node::boxed),
        auto_enum,
        fields: Vec::new(),
        decls: Vec::new(),
        doc_comments: None,
        is_root: false,
    }
}

/// ContainerDeclType
///     <- KEYWORD_struct
///      / KEYWORD_opaque
///      / KEYWORD_enum (LPAREN Expr RPAREN)?
///      / KEYWORD_union (LPAREN (KEYWORD_enum (LPAREN Expr RPAREN)? / Expr) RPAREN)?
fn parse_container_decl_type(parser: &mut Parser) -> ParseResult<(Token, ContainerDecl)> {
    if let Some(token) = parser.eat_if(TokenKind::KeywordStruct) {
        return Ok(Some((token, empty_container(ContainerKind::Struct, None, false))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordOpaque) {
        return Ok(Some((token, empty_container(ContainerKind::Opaque, None, false))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordEnum) {
        let init_arg = match parser.eat_if(TokenKind::LParen) {
            Some(_) => {
                let expr = parser.expect_node(parse_expr)?;
                parser.expect(TokenKind::RParen)?;
                Some(expr)
            }
            None => None,
        };
        return Ok(Some((token, empty_container(ContainerKind::Enum, init_arg, false))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordUnion) {
        let mut init_arg = None;
        let mut auto_enum = false;
        if parser.eat_if(TokenKind::LParen).is_some() {
            if parser.eat_if(TokenKind::KeywordEnum).is_some() {
                auto_enum = true;
                if parser.eat_if(TokenKind::LParen).is_some() {
                    init_arg = Some(parser.expect_node(parse_expr)?);
                    parser.expect(TokenKind::RParen)?;
                }
            } else {
                init_arg = Some(parser.expect_node(parse_expr)?);
            }
            parser.expect(TokenKind::RParen)?;
        }
        return Ok(Some((
            token,
            empty_container(ContainerKind::Union, init_arg, auto_enum),
        )));
    }

    Ok(None)
}

/// ErrorSetDecl <- KEYWORD_error LBRACE IdentifierList RBRACE
pub fn parse_error_set_decl(parser: &mut Parser) -> ParseResult {
    let token = match parser.eat_if(TokenKind::KeywordError) {
        Some(token) => token,
        None => return Ok(None),
    };

    if parser.eat_if(TokenKind::LBrace).is_none() {
        // `error.Name` is handled by the primary type expression.
        parser.put_back();
        return Ok(None);
    }

    let fields = parser.parse_list(TokenKind::Comma, parse_error_set_field)?;
    parser.expect(TokenKind::RBrace)?;

    Ok(Some(parser.node(&token, NodeKind::ErrorSetDecl(ErrorSetDecl { fields }))))
}

fn parse_error_set_field(parser: &mut Parser) -> ParseResult {
    let doc = parse_doc_comments(parser);
    let ident = match (parser.eat_if(TokenKind::Identifier), &doc) {
        (Some(token), _) => token,
        (None, Some((position, _))) => {
            return Err(parser.error(ErrorImpl::UnattachedDocComment, *position));
        }
        (None, None) => return Ok(None),
    };

    let name = parser.node(&ident, NodeKind::Symbol(ident.text().to_string()));
    let position = doc
        .as_ref()
        .map_or(ident.span.start, |(position, _)| *position);

    Ok(Some(parser.node_at(
        position,
        NodeKind::ErrorSetField(ErrorSetField {
            name: name.boxed(),
            doc_comments: doc.map(|(_, text)| text),
        }),
    )))
}

/// FnProto <- KEYWORD_fn IDENTIFIER? LPAREN ParamDeclList RPAREN ByteAlign?
///            LinkSection? CallConv? EXCLAMATIONMARK? (KEYWORD_anytype / TypeExpr)
///
/// Returns the prototype with default visibility and linkage so that the
/// declaration parser can fill them in.
pub fn parse_fn_proto_decl(parser: &mut Parser) -> ParseResult<(Position, FnProto)> {
    let fn_token = match parser.eat_if(TokenKind::KeywordFn) {
        Some(token) => token,
        None => return Ok(None),
    };

    let name = parser
        .eat_if(TokenKind::Identifier)
        .map(|token| token.text().to_string());
    parser.expect(TokenKind::LParen)?;
    let params = parser.parse_list(TokenKind::Comma, parse_param_decl)?;
    parser.expect(TokenKind::RParen)?;

    let align = parse_byte_align(parser)?;
    let section = parse_link_section(parser)?;
    let callconv = parse_callconv(parser)?;
    let auto_err_set = parser.eat_if(TokenKind::Bang).is_some();
    let return_anytype = parser.eat_if(TokenKind::KeywordAnyType).is_some();
    let return_type = if return_anytype {
        None
    } else {
        Some(parser.expect_node(parse_type_expr)?)
    };

    let mut is_var_args = false;
    for (i, param) in params.iter().enumerate() {
        if let NodeKind::ParamDecl(decl) = &param.kind {
            is_var_args |= decl.is_var_args;
        }
        if is_var_args && i != params.len() - 1 {
            return Err(parser.error(ErrorImpl::VarArgsNotLast, fn_token.span.start));
        }
    }

    Ok(Some((
        fn_token.span.start,
        FnProto {
            name,
            params,
            align: align.map(Node::boxed),
            section: section.map(Node::boxed),
            callconv: callconv.map(Node::boxed),
            return_type: return_type.map(Node::boxed),
            return_anytype,
            auto_err_set,
            is_var_args,
            is_export: false,
            is_extern: false,
            lib_name: None,
            fn_inline: FnInline::Auto,
            visib_mod: VisibMod::Private,
            doc_comments: None,
        },
    )))
}

/// A function prototype used as a type, e.g. `fn (u8) void`.
pub fn parse_fn_proto(parser: &mut Parser) -> ParseResult {
    Ok(parse_fn_proto_decl(parser)?
        .map(|(position, proto)| parser.node_at(position, NodeKind::FnProto(proto))))
}

enum ParamType {
    AnyType,
    VarArgs,
    Type(Node),
}

/// ParamDecl <- doc_comment? (KEYWORD_noalias / KEYWORD_comptime)? (IDENTIFIER COLON)? ParamType
fn parse_param_decl(parser: &mut Parser) -> ParseResult {
    let doc = parse_doc_comments(parser);
    let first = parser
        .eat_if(TokenKind::KeywordNoAlias)
        .or_else(|| parser.eat_if(TokenKind::KeywordCompTime));

    let mut position = first.as_ref().map(|token| token.span.start);
    let mut name = None;
    if let Some(ident) = parser.eat_if(TokenKind::Identifier) {
        if parser.eat_if(TokenKind::Colon).is_some() {
            position.get_or_insert(ident.span.start);
            name = Some(ident.text().to_string());
        } else {
            // No `:`, so the identifier is the parameter type.
            parser.put_back();
        }
    }

    let committed = position.is_some();
    let position = position.unwrap_or_else(|| parser.get_position());
    let param_type = if committed {
        parser.expect_node(parse_param_type)?
    } else {
        match (parse_param_type(parser)?, &doc) {
            (Some(param_type), _) => param_type,
            (None, Some((doc_position, _))) => {
                return Err(parser.error(ErrorImpl::UnattachedDocComment, *doc_position));
            }
            (None, None) => return Ok(None),
        }
    };

    let mut decl = ParamDecl {
        name,
        ty: None,
        is_noalias: first.as_ref().map(|token| token.kind) == Some(TokenKind::KeywordNoAlias),
        is_comptime: first.as_ref().map(|token| token.kind) == Some(TokenKind::KeywordCompTime),
        is_anytype: false,
        is_var_args: false,
        doc_comments: doc.map(|(_, text)| text),
    };
    match param_type {
        ParamType::AnyType => decl.is_anytype = true,
        ParamType::VarArgs => decl.is_var_args = true,
        ParamType::Type(ty) => decl.ty = Some(ty.boxed()),
    }

    Ok(Some(parser.node_at(position, NodeKind::ParamDecl(decl))))
}

/// ParamType <- KEYWORD_anytype / DOT3 / TypeExpr
fn parse_param_type(parser: &mut Parser) -> ParseResult<ParamType> {
    if parser.eat_if(TokenKind::KeywordAnyType).is_some() {
        return Ok(Some(ParamType::AnyType));
    }
    if parser.eat_if(TokenKind::Ellipsis3).is_some() {
        return Ok(Some(ParamType::VarArgs));
    }
    Ok(parse_type_expr(parser)?.map(ParamType::Type))
}

fn parse_keyword_paren_expr(parser: &mut Parser, keyword: TokenKind) -> ParseResult {
    if parser.eat_if(keyword).is_none() {
        return Ok(None);
    }
    parser.expect(TokenKind::LParen)?;
    let expr = parser.expect_node(parse_expr)?;
    parser.expect(TokenKind::RParen)?;
    Ok(Some(expr))
}

/// ByteAlign <- KEYWORD_align LPAREN Expr RPAREN
pub fn parse_byte_align(parser: &mut Parser) -> ParseResult {
    parse_keyword_paren_expr(parser, TokenKind::KeywordAlign)
}

/// LinkSection <- KEYWORD_linksection LPAREN Expr RPAREN
pub fn parse_link_section(parser: &mut Parser) -> ParseResult {
    parse_keyword_paren_expr(parser, TokenKind::KeywordLinkSection)
}

/// CallConv <- KEYWORD_callconv LPAREN Expr RPAREN
fn parse_callconv(parser: &mut Parser) -> ParseResult {
    parse_keyword_paren_expr(parser, TokenKind::KeywordCallconv)
}
