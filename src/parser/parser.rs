//! Parser state and the entry point for building the Abstract Syntax Tree.
//!
//! The grammar is parsed by plain recursive descent. Every production is a
//! free function taking the `Parser` by mutable reference and returning a
//! [`ParseResult`]:
//!
//! - `Ok(Some(node))` when the production matched,
//! - `Ok(None)` when the current token cannot start the production,
//! - `Err(error)` once the production has committed and the input is malformed.
//!
//! Absence is ordinary control flow and is never logged. An error aborts the
//! whole parse; no production catches one.

use tracing::{debug, trace};

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenPayload},
    DiagnosticConfig, Position, Span, UnitId,
};

use super::stmt::parse_root;

/// Result of a grammar production. `Ok(None)` means "no match here".
pub type ParseResult<T = Node> = Result<Option<T>, Error>;

/// The mutable state of a single parse.
///
/// The cursor is the only field that changes while parsing. A `Parser` is
/// created per call to [`parse`] and never shared.
pub struct Parser {
    /// The token sequence, always terminated by `Eof`
    tokens: Vec<Token>,
    /// Index of the current token
    pos: usize,
    /// Compilation unit stamped on every node
    owner: UnitId,
    /// Rendering options copied onto raised errors
    config: DiagnosticConfig,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token sequence to parse; an `Eof` token is appended if missing
    /// * `owner` - Handle of the compilation unit being parsed
    /// * `config` - Diagnostic options for errors raised by this parse
    ///
    /// # Returns
    ///
    /// A new Parser with its cursor on the first token.
    pub fn new(mut tokens: Vec<Token>, owner: UnitId, config: DiagnosticConfig) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let end = tokens
                .last()
                .map(|token| token.span.end)
                .unwrap_or_else(Position::null);
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span { start: end, end },
                payload: TokenPayload::None,
            });
        }

        Parser {
            tokens,
            pos: 0,
            owner,
            config,
        }
    }

    /// Returns the token `offset` places after the cursor.
    ///
    /// Reads past the end yield the terminating `Eof`.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.peek(0).kind
    }

    /// Index of the current token.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Returns the current token and advances past it.
    pub fn eat(&mut self) -> Token {
        let token = self.current_token().clone();
        self.pos += 1;
        token
    }

    /// Advances past the current token only if it has the given kind.
    pub fn eat_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current_token_kind() == kind {
            Some(self.eat())
        } else {
            None
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected` - The required TokenKind
    ///
    /// # Returns
    ///
    /// The consumed token, or an `ExpectedToken` error positioned at the
    /// token that was found instead.
    pub fn expect(&mut self, expected: TokenKind) -> Result<Token, Error> {
        if let Some(token) = self.eat_if(expected) {
            return Ok(token);
        }

        let found = self.current_token();
        Err(self.error(
            ErrorImpl::ExpectedToken {
                expected,
                found: found.kind,
            },
            found.span.start,
        ))
    }

    /// Undoes the last `eat`.
    ///
    /// Only used at the bounded lookahead sites of the grammar, which never
    /// undo more than two tokens.
    pub fn put_back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
        trace!(cursor = self.pos, kind = ?self.current_token_kind(), "put back token");
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    /// Builds a node positioned at `token`.
    pub fn node(&self, token: &Token, kind: NodeKind) -> Node {
        Node::new(kind, token.span.start, self.owner)
    }

    /// Builds a node at an explicit position.
    pub fn node_at(&self, position: Position, kind: NodeKind) -> Node {
        Node::new(kind, position, self.owner)
    }

    /// Creates a syntax error carrying this parse's color mode.
    pub fn error(&self, error_impl: ErrorImpl, position: Position) -> Error {
        trace!(%position, error = %error_impl, "syntax error");
        Error::new(error_impl, position).with_color(self.config.color)
    }

    /// "invalid token" error at the current token.
    pub fn invalid_token(&self) -> Error {
        let token = self.current_token();
        self.error(ErrorImpl::InvalidToken { found: token.kind }, token.span.start)
    }

    /// Runs a production that must match, turning absence into an
    /// "invalid token" error at the current token.
    pub fn expect_node<T>(
        &mut self,
        production: impl FnOnce(&mut Parser) -> ParseResult<T>,
    ) -> Result<T, Error> {
        match production(self)? {
            Some(node) => Ok(node),
            None => Err(self.invalid_token()),
        }
    }

    /// Parses `production (sep production)*`.
    ///
    /// Stops at the first absence or at the first missing separator, so a
    /// trailing separator is accepted.
    ///
    /// # Returns
    ///
    /// The matched items in order, possibly empty.
    pub fn parse_list<T>(
        &mut self,
        sep: TokenKind,
        production: impl Fn(&mut Parser) -> ParseResult<T>,
    ) -> Result<Vec<T>, Error> {
        let mut list = Vec::new();
        while let Some(item) = production(self)? {
            list.push(item);
            if self.eat_if(sep).is_none() {
                break;
            }
        }
        Ok(list)
    }
}

/// Parses a complete token sequence into the root container of a unit.
///
/// # Arguments
///
/// * `tokens` - The finished token sequence, terminated by `Eof`
/// * `owner` - Handle stored on every node of the resulting tree
/// * `config` - Controls how a syntax error would be rendered
///
/// # Returns
///
/// The root `ContainerDecl` node with `is_root` set, or the first syntax
/// error. Leftover tokens after the last member are an error.
pub fn parse(tokens: Vec<Token>, owner: UnitId, config: DiagnosticConfig) -> Result<Node, Error> {
    debug!(tokens = tokens.len(), owner = owner.0, "parsing unit");

    let mut parser = Parser::new(tokens, owner, config);
    let root = parse_root(&mut parser)?;

    debug!(nodes = root.node_count(), owner = owner.0, "parsed unit");
    Ok(root)
}
