//! Declarations, container members, statements and control flow.

use crate::{
    ast::{
        ast::{Node, NodeKind, VisibMod},
        statements::{
            Block, ComptimeDecl, ContainerField, Defer, FnDef, FnInline, FnProto, ForExpr, IfExpr,
            PtrPayload, ReturnKind, TestDecl, UsingNamespace, VarDecl, WhileExpr,
        },
        types::ContainerDecl,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    expr::{parse_assign_expr, parse_expr, parse_switch_expr},
    parser::{ParseResult, Parser},
    types::{parse_byte_align, parse_fn_proto_decl, parse_link_section, parse_type_expr},
};

/// Members of a container body or of the root.
pub struct ContainerMembers {
    pub fields: Vec<Node>,
    pub decls: Vec<Node>,
    pub doc_comments: Option<String>,
}

/// Root <- skip ContainerMembers eof
pub fn parse_root(parser: &mut Parser) -> Result<Node, Error> {
    let position = parser.get_position();
    let members = parse_container_members(parser)?;

    if parser.current_token_kind() != TokenKind::Eof {
        return Err(parser.invalid_token());
    }

    let mut root = ContainerDecl::root();
    root.fields = members.fields;
    root.decls = members.decls;
    root.doc_comments = members.doc_comments;
    Ok(parser.node_at(position, NodeKind::ContainerDecl(root)))
}

/// ContainerMembers
///     <- container_doc_comment?
///        (doc_comment? (TestDecl / TopLevelComptime / KEYWORD_pub? TopLevelDecl
///         / KEYWORD_comptime? ContainerField COMMA))*
///        (doc_comment? KEYWORD_comptime? ContainerField)?
pub fn parse_container_members(parser: &mut Parser) -> Result<ContainerMembers, Error> {
    let mut fields = Vec::new();
    let mut decls = Vec::new();
    let mut container_docs: Vec<String> = Vec::new();

    loop {
        if let Some(token) = parser.eat_if(TokenKind::ContainerDocComment) {
            container_docs.push(token.text().to_string());
            continue;
        }

        let doc = parse_doc_comments(parser);
        let doc_comments = doc.as_ref().map(|(_, text)| text.clone());

        if let Some(test) = parse_test_decl(parser, doc_comments.clone())? {
            decls.push(test);
            continue;
        }

        if let Some(comptime) = parse_top_level_comptime(parser, doc_comments.clone())? {
            decls.push(comptime);
            continue;
        }

        let visib_token = parser.eat_if(TokenKind::KeywordPub);
        let visib_mod = match visib_token {
            Some(_) => VisibMod::Public,
            None => VisibMod::Private,
        };

        if let Some(decl) = parse_top_level_decl(parser, visib_mod, doc_comments.clone())? {
            decls.push(decl);
            continue;
        }

        if visib_token.is_some() {
            return Err(parser.error(ErrorImpl::PubWithoutDecl, parser.get_position()));
        }

        let comptime_token = parser.eat_if(TokenKind::KeywordCompTime);
        if let Some((position, mut field)) = parse_container_field(parser)? {
            field.is_comptime = comptime_token.is_some();
            field.doc_comments = doc_comments;
            fields.push(parser.node_at(position, NodeKind::StructField(field)));

            if parser.eat_if(TokenKind::Comma).is_none() {
                break;
            }
            continue;
        }

        if comptime_token.is_some() {
            return Err(parser.invalid_token());
        }
        if let Some((position, _)) = doc {
            return Err(parser.error(ErrorImpl::UnattachedDocComment, position));
        }

        break;
    }

    let doc_comments = if container_docs.is_empty() {
        None
    } else {
        Some(container_docs.join("\n"))
    };

    Ok(ContainerMembers {
        fields,
        decls,
        doc_comments,
    })
}

/// Collects consecutive `///` lines, returning the position of the first.
pub fn parse_doc_comments(parser: &mut Parser) -> Option<(Position, String)> {
    let first = parser.eat_if(TokenKind::DocComment)?;
    let mut text = first.text().to_string();
    while let Some(token) = parser.eat_if(TokenKind::DocComment) {
        text.push('\n');
        text.push_str(token.text());
    }
    Some((first.span.start, text))
}

/// TestDecl <- KEYWORD_test STRINGLITERALSINGLE? Block
fn parse_test_decl(parser: &mut Parser, doc_comments: Option<String>) -> ParseResult {
    let token = match parser.eat_if(TokenKind::KeywordTest) {
        Some(token) => token,
        None => return Ok(None),
    };

    let name = parser
        .eat_if(TokenKind::StringLiteral)
        .map(|token| token.text().to_string());
    let body = parser.expect_node(parse_block)?;

    Ok(Some(parser.node(
        &token,
        NodeKind::TestDecl(TestDecl {
            name,
            body: body.boxed(),
            doc_comments,
        }),
    )))
}

/// TopLevelComptime <- KEYWORD_comptime BlockExpr
fn parse_top_level_comptime(parser: &mut Parser, doc_comments: Option<String>) -> ParseResult {
    let token = match parser.eat_if(TokenKind::KeywordCompTime) {
        Some(token) => token,
        None => return Ok(None),
    };

    if parser.current_token_kind() != TokenKind::LBrace {
        // `comptime` before a container field.
        parser.put_back();
        return Ok(None);
    }

    let block = parser.expect_node(parse_block_expr)?;
    Ok(Some(parser.node(
        &token,
        NodeKind::ComptimeDecl(ComptimeDecl {
            block: block.boxed(),
            doc_comments,
        }),
    )))
}

/// TopLevelDecl
///     <- (KEYWORD_export / KEYWORD_extern STRINGLITERALSINGLE? / KEYWORD_inline / KEYWORD_noinline)? FnProto (SEMICOLON / Block)
///      / (KEYWORD_export / KEYWORD_extern STRINGLITERALSINGLE?)? KEYWORD_threadlocal? VarDecl
///      / KEYWORD_usingnamespace Expr SEMICOLON
fn parse_top_level_decl(
    parser: &mut Parser,
    visib_mod: VisibMod,
    doc_comments: Option<String>,
) -> ParseResult {
    let first = [
        TokenKind::KeywordExport,
        TokenKind::KeywordExtern,
        TokenKind::KeywordInline,
        TokenKind::KeywordNoInline,
    ]
    .iter()
    .find_map(|kind| parser.eat_if(*kind));

    if let Some(first) = first {
        let is_export = first.kind == TokenKind::KeywordExport;
        let is_extern = first.kind == TokenKind::KeywordExtern;
        let lib_name = if is_extern {
            parser
                .eat_if(TokenKind::StringLiteral)
                .map(|token| token.text().to_string())
        } else {
            None
        };

        if is_export || is_extern {
            if let Some((_, mut var)) = parse_threadlocal_var_decl(parser)? {
                var.visib_mod = visib_mod;
                var.doc_comments = doc_comments;
                var.is_export = is_export;
                var.is_extern = is_extern;
                var.lib_name = lib_name;
                return Ok(Some(parser.node(&first, NodeKind::VariableDeclaration(var))));
            }
        }

        if let Some((_, mut proto)) = parse_fn_proto_decl(parser)? {
            proto.visib_mod = visib_mod;
            proto.doc_comments = doc_comments;
            proto.is_export = is_export;
            proto.is_extern = is_extern;
            proto.lib_name = lib_name;
            proto.fn_inline = match first.kind {
                TokenKind::KeywordInline => FnInline::Always,
                TokenKind::KeywordNoInline => FnInline::Never,
                _ => FnInline::Auto,
            };
            return finish_fn_decl(parser, first.span.start, proto).map(Some);
        }

        return Err(parser.invalid_token());
    }

    if let Some((position, mut var)) = parse_threadlocal_var_decl(parser)? {
        var.visib_mod = visib_mod;
        var.doc_comments = doc_comments;
        return Ok(Some(parser.node_at(position, NodeKind::VariableDeclaration(var))));
    }

    if let Some((position, mut proto)) = parse_fn_proto_decl(parser)? {
        proto.visib_mod = visib_mod;
        proto.doc_comments = doc_comments;
        return finish_fn_decl(parser, position, proto).map(Some);
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordUsingNamespace) {
        let expr = parser.expect_node(parse_expr)?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Some(parser.node(
            &token,
            NodeKind::UsingNamespace(UsingNamespace {
                expr: expr.boxed(),
                visib_mod,
            }),
        )));
    }

    Ok(None)
}

/// `threadlocal? VarDecl`; once `threadlocal` is seen the declaration is required.
fn parse_threadlocal_var_decl(parser: &mut Parser) -> ParseResult<(Position, VarDecl)> {
    if parser.eat_if(TokenKind::KeywordThreadLocal).is_some() {
        let (position, mut var) = parser.expect_node(parse_var_decl_parts)?;
        var.is_threadlocal = true;
        return Ok(Some((position, var)));
    }
    parse_var_decl_parts(parser)
}

/// Attaches the `;` or the body that follows a top-level prototype.
fn finish_fn_decl(parser: &mut Parser, position: Position, proto: FnProto) -> Result<Node, Error> {
    let body = match parse_block(parser)? {
        Some(body) => body,
        None => {
            parser.expect(TokenKind::Semicolon)?;
            return Ok(parser.node_at(position, NodeKind::FnProto(proto)));
        }
    };

    if proto.is_extern {
        return Err(parser.error(ErrorImpl::ExternFnWithBody, position));
    }

    let proto = parser.node_at(position, NodeKind::FnProto(proto));
    Ok(parser.node_at(
        position,
        NodeKind::FnDef(FnDef {
            proto: proto.boxed(),
            body: body.boxed(),
        }),
    ))
}

/// VarDecl <- (KEYWORD_const / KEYWORD_var) IDENTIFIER (COLON TypeExpr)? ByteAlign? LinkSection? (EQUAL Expr)? SEMICOLON
pub fn parse_var_decl_parts(parser: &mut Parser) -> ParseResult<(Position, VarDecl)> {
    let mut_token = match parser
        .eat_if(TokenKind::KeywordConst)
        .or_else(|| parser.eat_if(TokenKind::KeywordVar))
    {
        Some(token) => token,
        None => return Ok(None),
    };

    let name = parser.expect(TokenKind::Identifier)?;
    let ty = match parser.eat_if(TokenKind::Colon) {
        Some(_) => Some(parser.expect_node(parse_type_expr)?),
        None => None,
    };
    let align = parse_byte_align(parser)?;
    let section = parse_link_section(parser)?;
    let init = match parser.eat_if(TokenKind::Eq) {
        Some(_) => Some(parser.expect_node(parse_expr)?),
        None => None,
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(Some((
        mut_token.span.start,
        VarDecl {
            name: name.text().to_string(),
            ty: ty.map(Node::boxed),
            align: align.map(Node::boxed),
            section: section.map(Node::boxed),
            init: init.map(Node::boxed),
            is_const: mut_token.kind == TokenKind::KeywordConst,
            is_comptime: false,
            is_export: false,
            is_extern: false,
            is_threadlocal: false,
            lib_name: None,
            visib_mod: VisibMod::Private,
            doc_comments: None,
        },
    )))
}

/// ContainerField <- IDENTIFIER (COLON (KEYWORD_anytype / TypeExpr))? ByteAlign? (EQUAL Expr)?
fn parse_container_field(parser: &mut Parser) -> ParseResult<(Position, ContainerField)> {
    let ident = match parser.eat_if(TokenKind::Identifier) {
        Some(token) => token,
        None => return Ok(None),
    };

    let ty = match parser.eat_if(TokenKind::Colon) {
        Some(_) => match parser.eat_if(TokenKind::KeywordAnyType) {
            Some(anytype) => Some(parser.node(&anytype, NodeKind::AnyTypeField)),
            None => Some(parser.expect_node(parse_type_expr)?),
        },
        None => None,
    };
    let align = parse_byte_align(parser)?;
    let value = match parser.eat_if(TokenKind::Eq) {
        Some(_) => Some(parser.expect_node(parse_expr)?),
        None => None,
    };

    Ok(Some((
        ident.span.start,
        ContainerField {
            name: ident.text().to_string(),
            ty: ty.map(Node::boxed),
            align: align.map(Node::boxed),
            value: value.map(Node::boxed),
            is_comptime: false,
            doc_comments: None,
        },
    )))
}

/// Statement
///     <- KEYWORD_comptime? VarDecl
///      / KEYWORD_comptime BlockExprStatement
///      / KEYWORD_nosuspend BlockExprStatement
///      / KEYWORD_suspend (SEMICOLON / BlockExprStatement)
///      / KEYWORD_defer BlockExprStatement
///      / KEYWORD_errdefer Payload? BlockExprStatement
///      / IfStatement
///      / LabeledStatement
///      / SwitchExpr
///      / AssignExpr SEMICOLON
pub fn parse_statement(parser: &mut Parser) -> ParseResult {
    let comptime = parser.eat_if(TokenKind::KeywordCompTime);
    if let Some((position, mut var)) = parse_var_decl_parts(parser)? {
        var.is_comptime = comptime.is_some();
        return Ok(Some(parser.node_at(position, NodeKind::VariableDeclaration(var))));
    }

    if let Some(token) = comptime {
        let statement = parser.expect_node(parse_block_expr_statement)?;
        return Ok(Some(parser.node(&token, NodeKind::CompTime(statement.boxed()))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordNoSuspend) {
        let statement = parser.expect_node(parse_block_expr_statement)?;
        return Ok(Some(parser.node(&token, NodeKind::NoSuspend(statement.boxed()))));
    }

    if let Some(token) = parser.eat_if(TokenKind::KeywordSuspend) {
        let statement = match parser.eat_if(TokenKind::Semicolon) {
            Some(_) => None,
            None => Some(parser.expect_node(parse_block_expr_statement)?),
        };
        return Ok(Some(
            parser.node(&token, NodeKind::Suspend(statement.map(Node::boxed))),
        ));
    }

    let defer = parser
        .eat_if(TokenKind::KeywordDefer)
        .or_else(|| parser.eat_if(TokenKind::KeywordErrdefer));
    if let Some(token) = defer {
        let kind = match token.kind {
            TokenKind::KeywordErrdefer => ReturnKind::Error,
            _ => ReturnKind::Unconditional,
        };
        let payload = match kind {
            ReturnKind::Error => parse_payload(parser)?,
            ReturnKind::Unconditional => None,
        };
        let statement = parser.expect_node(parse_block_expr_statement)?;
        return Ok(Some(parser.node(
            &token,
            NodeKind::Defer(Defer {
                kind,
                payload,
                expr: statement.boxed(),
            }),
        )));
    }

    if let Some(node) = parse_if(parser, BodyForm::Statement)? {
        return Ok(Some(node));
    }

    if let Some(node) = parse_labeled_statement(parser)? {
        return Ok(Some(node));
    }

    if let Some(node) = parse_switch_expr(parser)? {
        return Ok(Some(node));
    }

    if let Some(node) = parse_assign_expr(parser)? {
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Some(node));
    }

    Ok(None)
}

/// LabeledStatement <- BlockLabel? (Block / LoopStatement)
fn parse_labeled_statement(parser: &mut Parser) -> ParseResult {
    let label = parse_block_label(parser);

    if let Some(block) = parse_labeled_block(parser, label.clone())? {
        return Ok(Some(block));
    }

    if let Some(node) = parse_loop(parser, BodyForm::Statement, label.clone())? {
        return Ok(Some(node));
    }

    if label.is_some() {
        return Err(parser.invalid_token());
    }
    Ok(None)
}

/// BlockExprStatement <- BlockExpr / AssignExpr SEMICOLON
pub fn parse_block_expr_statement(parser: &mut Parser) -> ParseResult {
    if let Some(block) = parse_block_expr(parser)? {
        return Ok(Some(block));
    }

    if let Some(expr) = parse_assign_expr(parser)? {
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Some(expr));
    }

    Ok(None)
}

/// BlockExpr <- BlockLabel? Block
pub fn parse_block_expr(parser: &mut Parser) -> ParseResult {
    match parse_block_label(parser) {
        Some(label) => parser
            .expect_node(|parser| parse_labeled_block(parser, Some(label)))
            .map(Some),
        None => parse_block(parser),
    }
}

/// Block <- LBRACE Statement* RBRACE
pub fn parse_block(parser: &mut Parser) -> ParseResult {
    parse_labeled_block(parser, None)
}

pub fn parse_labeled_block(parser: &mut Parser, label: Option<String>) -> ParseResult {
    let lbrace = match parser.eat_if(TokenKind::LBrace) {
        Some(token) => token,
        None => return Ok(None),
    };

    let mut statements = Vec::new();
    while let Some(statement) = parse_statement(parser)? {
        statements.push(statement);
    }
    parser.expect(TokenKind::RBrace)?;

    Ok(Some(
        parser.node(&lbrace, NodeKind::Block(Block { label, statements })),
    ))
}

/// BlockLabel <- IDENTIFIER COLON
pub fn parse_block_label(parser: &mut Parser) -> Option<String> {
    let ident = parser.eat_if(TokenKind::Identifier)?;
    if parser.eat_if(TokenKind::Colon).is_none() {
        parser.put_back();
        return None;
    }
    Some(ident.text().to_string())
}

/// BreakLabel <- COLON IDENTIFIER
pub fn parse_break_label(parser: &mut Parser) -> ParseResult<String> {
    if parser.eat_if(TokenKind::Colon).is_none() {
        return Ok(None);
    }
    let ident = parser.expect(TokenKind::Identifier)?;
    Ok(Some(ident.text().to_string()))
}

/// Payload <- PIPE IDENTIFIER PIPE
pub fn parse_payload(parser: &mut Parser) -> ParseResult<String> {
    if parser.eat_if(TokenKind::Pipe).is_none() {
        return Ok(None);
    }
    let ident = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Pipe)?;
    Ok(Some(ident.text().to_string()))
}

/// PtrPayload <- PIPE ASTERISK? IDENTIFIER PIPE
pub fn parse_ptr_payload(parser: &mut Parser) -> ParseResult<PtrPayload> {
    if parser.eat_if(TokenKind::Pipe).is_none() {
        return Ok(None);
    }
    let is_ptr = parser.eat_if(TokenKind::Star).is_some();
    let ident = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Pipe)?;
    Ok(Some(PtrPayload {
        name: ident.text().to_string(),
        is_ptr,
    }))
}

/// PtrIndexPayload <- PIPE ASTERISK? IDENTIFIER (COMMA IDENTIFIER)? PIPE
fn parse_ptr_index_payload(parser: &mut Parser) -> ParseResult<(PtrPayload, Option<String>)> {
    if parser.eat_if(TokenKind::Pipe).is_none() {
        return Ok(None);
    }
    let is_ptr = parser.eat_if(TokenKind::Star).is_some();
    let ident = parser.expect(TokenKind::Identifier)?;
    let index = match parser.eat_if(TokenKind::Comma) {
        Some(_) => Some(parser.expect(TokenKind::Identifier)?.text().to_string()),
        None => None,
    };
    parser.expect(TokenKind::Pipe)?;
    Ok(Some((
        PtrPayload {
            name: ident.text().to_string(),
            is_ptr,
        },
        index,
    )))
}

/// Where an `if`, `while` or `for` appears, which decides how its bodies
/// are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyForm {
    /// Body is a block or `AssignExpr` needing `;` unless `else` follows;
    /// the else branch is a statement.
    Statement,
    /// Both branches are `Expr`.
    Expr,
    /// Both branches are `TypeExpr`.
    TypeExpr,
}

/// Parses a then/loop body, also reporting whether it needs a `;`.
fn parse_body(
    parser: &mut Parser,
    form: BodyForm,
    construct: &'static str,
) -> Result<(Node, bool), Error> {
    match form {
        BodyForm::Statement => {
            if let Some(block) = parse_block_expr(parser)? {
                return Ok((block, false));
            }
            if let Some(expr) = parse_assign_expr(parser)? {
                return Ok((expr, true));
            }
            let found = parser.current_token();
            Err(parser.error(
                ErrorImpl::ExpectedBody {
                    construct,
                    found: found.kind,
                },
                found.span.start,
            ))
        }
        BodyForm::Expr => Ok((parser.expect_node(parse_expr)?, false)),
        BodyForm::TypeExpr => Ok((parser.expect_node(parse_type_expr)?, false)),
    }
}

fn parse_else_body(parser: &mut Parser, form: BodyForm) -> Result<Node, Error> {
    match form {
        BodyForm::Statement => parser.expect_node(parse_statement),
        BodyForm::Expr => parser.expect_node(parse_expr),
        BodyForm::TypeExpr => parser.expect_node(parse_type_expr),
    }
}

/// IfPrefix <- KEYWORD_if LPAREN Expr RPAREN PtrPayload?
///
/// followed by a body and an optional `else Payload?` branch, shaped by `form`.
pub fn parse_if(parser: &mut Parser, form: BodyForm) -> ParseResult {
    let token = match parser.eat_if(TokenKind::KeywordIf) {
        Some(token) => token,
        None => return Ok(None),
    };

    parser.expect(TokenKind::LParen)?;
    let condition = parser.expect_node(parse_expr)?;
    parser.expect(TokenKind::RParen)?;
    let then_payload = parse_ptr_payload(parser)?;

    let (then_body, requires_semi) = parse_body(parser, form, "if")?;

    let mut else_payload = None;
    let mut else_body = None;
    if parser.eat_if(TokenKind::KeywordElse).is_some() {
        else_payload = parse_payload(parser)?;
        else_body = Some(parse_else_body(parser, form)?);
    }

    if requires_semi && else_body.is_none() {
        parser.expect(TokenKind::Semicolon)?;
    }

    Ok(Some(parser.node(
        &token,
        NodeKind::If(IfExpr {
            condition: condition.boxed(),
            then_payload,
            then_body: then_body.boxed(),
            else_payload,
            else_body: else_body.map(Node::boxed),
        }),
    )))
}

/// LoopExpr <- KEYWORD_inline? (ForExpr / WhileExpr)
///
/// `label` was already consumed by the caller.
pub fn parse_loop(parser: &mut Parser, form: BodyForm, label: Option<String>) -> ParseResult {
    let is_inline = parser.eat_if(TokenKind::KeywordInline).is_some();

    if let Some(node) = parse_for(parser, form, label.clone(), is_inline)? {
        return Ok(Some(node));
    }

    if let Some(node) = parse_while(parser, form, label, is_inline)? {
        return Ok(Some(node));
    }

    if is_inline {
        return Err(parser.invalid_token());
    }
    Ok(None)
}

/// ForPrefix <- KEYWORD_for LPAREN Expr RPAREN PtrIndexPayload
fn parse_for(
    parser: &mut Parser,
    form: BodyForm,
    label: Option<String>,
    is_inline: bool,
) -> ParseResult {
    let token = match parser.eat_if(TokenKind::KeywordFor) {
        Some(token) => token,
        None => return Ok(None),
    };

    parser.expect(TokenKind::LParen)?;
    let array = parser.expect_node(parse_expr)?;
    parser.expect(TokenKind::RParen)?;
    let (elem, index) = parser.expect_node(parse_ptr_index_payload)?;

    let (body, requires_semi) = parse_body(parser, form, "loop")?;

    let else_body = match parser.eat_if(TokenKind::KeywordElse) {
        Some(_) => Some(parse_else_body(parser, form)?),
        None => None,
    };

    if requires_semi && else_body.is_none() {
        parser.expect(TokenKind::Semicolon)?;
    }

    Ok(Some(parser.node(
        &token,
        NodeKind::For(ForExpr {
            label,
            is_inline,
            array: array.boxed(),
            elem,
            index,
            body: body.boxed(),
            else_body: else_body.map(Node::boxed),
        }),
    )))
}

/// WhilePrefix <- KEYWORD_while LPAREN Expr RPAREN PtrPayload? WhileContinueExpr?
fn parse_while(
    parser: &mut Parser,
    form: BodyForm,
    label: Option<String>,
    is_inline: bool,
) -> ParseResult {
    let token = match parser.eat_if(TokenKind::KeywordWhile) {
        Some(token) => token,
        None => return Ok(None),
    };

    parser.expect(TokenKind::LParen)?;
    let condition = parser.expect_node(parse_expr)?;
    parser.expect(TokenKind::RParen)?;
    let payload = parse_ptr_payload(parser)?;
    let continue_expr = parse_while_continue_expr(parser)?;

    let (body, requires_semi) = parse_body(parser, form, "loop")?;

    let mut else_payload = None;
    let mut else_body = None;
    if parser.eat_if(TokenKind::KeywordElse).is_some() {
        else_payload = parse_payload(parser)?;
        else_body = Some(parse_else_body(parser, form)?);
    }

    if requires_semi && else_body.is_none() {
        parser.expect(TokenKind::Semicolon)?;
    }

    Ok(Some(parser.node(
        &token,
        NodeKind::While(WhileExpr {
            label,
            is_inline,
            condition: condition.boxed(),
            payload,
            continue_expr: continue_expr.map(Node::boxed),
            body: body.boxed(),
            else_payload,
            else_body: else_body.map(Node::boxed),
        }),
    )))
}

/// WhileContinueExpr <- COLON LPAREN AssignExpr RPAREN
fn parse_while_continue_expr(parser: &mut Parser) -> ParseResult {
    if parser.eat_if(TokenKind::Colon).is_none() {
        return Ok(None);
    }
    parser.expect(TokenKind::LParen)?;
    let expr = parser.expect_node(parse_assign_expr)?;
    parser.expect(TokenKind::RParen)?;
    Ok(Some(expr))
}
