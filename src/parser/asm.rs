//! Inline assembly.

use crate::{
    ast::{
        ast::NodeKind,
        statements::{AsmExpr, AsmInput, AsmOutput, AsmOutputTarget},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    parser::{ParseResult, Parser},
    types::parse_type_expr,
};

/// AsmExpr <- KEYWORD_asm KEYWORD_volatile? LPAREN Expr AsmOutput? RPAREN
///
/// AsmOutput <- COLON AsmOutputList AsmInput?
///
/// AsmInput <- COLON AsmInputList AsmClobbers?
///
/// AsmClobbers <- COLON StringList
pub fn parse_asm_expr(parser: &mut Parser) -> ParseResult {
    let token = match parser.eat_if(TokenKind::KeywordAsm) {
        Some(token) => token,
        None => return Ok(None),
    };

    let is_volatile = parser.eat_if(TokenKind::KeywordVolatile).is_some();
    parser.expect(TokenKind::LParen)?;
    let template = parser.expect_node(parse_expr)?;

    let mut asm = AsmExpr {
        is_volatile,
        template: template.boxed(),
        outputs: Vec::new(),
        inputs: Vec::new(),
        clobbers: Vec::new(),
    };

    if parser.eat_if(TokenKind::Colon).is_some() {
        asm.outputs = parser.parse_list(TokenKind::Comma, parse_asm_output_item)?;

        if parser.eat_if(TokenKind::Colon).is_some() {
            asm.inputs = parser.parse_list(TokenKind::Comma, parse_asm_input_item)?;

            if parser.eat_if(TokenKind::Colon).is_some() {
                asm.clobbers =
                    parser.parse_list(TokenKind::Comma, |parser| Ok(parse_string(parser)))?;
            }
        }
    }

    parser.expect(TokenKind::RParen)?;
    Ok(Some(parser.node(&token, NodeKind::Asm(asm))))
}

/// AsmOutputItem <- LBRACKET IDENTIFIER RBRACKET STRINGLITERAL LPAREN (MINUSRARROW TypeExpr / IDENTIFIER) RPAREN
fn parse_asm_output_item(parser: &mut Parser) -> ParseResult<AsmOutput> {
    let lbracket = match parser.eat_if(TokenKind::LBracket) {
        Some(token) => token,
        None => return Ok(None),
    };

    let symbolic_name = parser.expect(TokenKind::Identifier)?.text().to_string();
    parser.expect(TokenKind::RBracket)?;
    let constraint = expect_string(parser)?;
    parser.expect(TokenKind::LParen)?;

    let target = match parser.eat_if(TokenKind::Arrow) {
        Some(_) => AsmOutputTarget::ReturnType(parser.expect_node(parse_type_expr)?.boxed()),
        None => AsmOutputTarget::Variable(parser.expect(TokenKind::Identifier)?.text().to_string()),
    };
    parser.expect(TokenKind::RParen)?;

    Ok(Some(AsmOutput {
        symbolic_name,
        constraint,
        target,
        position: lbracket.span.start,
    }))
}

/// AsmInputItem <- LBRACKET IDENTIFIER RBRACKET STRINGLITERAL LPAREN Expr RPAREN
fn parse_asm_input_item(parser: &mut Parser) -> ParseResult<AsmInput> {
    let lbracket = match parser.eat_if(TokenKind::LBracket) {
        Some(token) => token,
        None => return Ok(None),
    };

    let symbolic_name = parser.expect(TokenKind::Identifier)?.text().to_string();
    parser.expect(TokenKind::RBracket)?;
    let constraint = expect_string(parser)?;
    parser.expect(TokenKind::LParen)?;
    let expr = parser.expect_node(parse_expr)?;
    parser.expect(TokenKind::RParen)?;

    Ok(Some(AsmInput {
        symbolic_name,
        constraint,
        expr: expr.boxed(),
        position: lbracket.span.start,
    }))
}

fn parse_string(parser: &mut Parser) -> Option<String> {
    match parser.current_token_kind() {
        TokenKind::StringLiteral | TokenKind::MultilineStringLiteral => {
            Some(parser.eat().text().to_string())
        }
        _ => None,
    }
}

fn expect_string(parser: &mut Parser) -> Result<String, Error> {
    match parse_string(parser) {
        Some(text) => Ok(text),
        None => {
            let found = parser.current_token();
            Err(parser.error(
                ErrorImpl::ExpectedToken {
                    expected: TokenKind::StringLiteral,
                    found: found.kind,
                },
                found.span.start,
            ))
        }
    }
}
