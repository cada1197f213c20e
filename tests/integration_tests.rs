//! Integration tests for end-to-end parsing.
//!
//! These tests run complete source files through tokenization and parsing
//! and check the shape of the resulting tree and the rendered diagnostics.

use std::path::Path;

use pretty_assertions::assert_eq;
use zparse::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    render_error, DiagnosticConfig, ErrColor, UnitId,
};

const PROGRAM: &str = r#"//! A small program touching most of the grammar.
const std = @import("std");

/// A point in the plane.
pub const Point = struct {
    x: f32 = 0.0,
    y: f32 = 0.0,

    pub fn len2(self: Point) f32 {
        return self.x * self.x + self.y * self.y;
    }
};

const Color = enum(u8) { red, green, blue = 7 };

const ParseError = error{ Empty, TooLong };

fn first(items: []const u8) ParseError!u8 {
    if (items.len == 0) return error.Empty;
    return items[0];
}

pub fn main() !void {
    var buf: [16:0]u8 = undefined;
    var total: usize = 0;
    for (buf) |byte, i| {
        total += byte * i;
    }
    var i: usize = 0;
    while (i < buf.len) : (i += 1) {
        if (buf[i] == 0) break;
    }
    const c = switch (total) {
        0 => Color.red,
        1...9 => .green,
        else => .blue,
    };
    const value = first(buf[0..i]) catch |err| switch (err) {
        error.Empty => 0,
        else => return err,
    };
    defer std.debug.print("{} {}\n", .{ c, value });
    const p = Point{ .x = 1.5, .y = -2.0 };
    _ = p.len2();
}

test "first" {
    const items = [_]u8{ 1, 2, 3 };
    try std.testing.expect((try first(&items)) == 1);
}
"#;

fn parse_source(source: &str, color: ErrColor) -> Result<Node, Error> {
    let tokens = tokenize(source)?;
    parse(tokens, UnitId(3), DiagnosticConfig::new(color))
}

fn decl_names(root: &Node) -> Vec<String> {
    let decl = match &root.kind {
        NodeKind::ContainerDecl(decl) => decl,
        other => panic!("expected root container, got {:?}", other),
    };

    decl.decls
        .iter()
        .map(|node| match &node.kind {
            NodeKind::VariableDeclaration(var) => var.name.clone(),
            NodeKind::FnDef(def) => match &def.proto.kind {
                NodeKind::FnProto(proto) => proto.name.clone().unwrap_or_default(),
                other => panic!("expected prototype, got {:?}", other),
            },
            NodeKind::TestDecl(test) => format!("test {}", test.name.clone().unwrap_or_default()),
            other => panic!("unexpected declaration {:?}", other),
        })
        .collect()
}

#[test]
fn test_parse_complete_program() {
    let root = parse_source(PROGRAM, ErrColor::Off).unwrap();

    assert_eq!(
        decl_names(&root),
        vec!["std", "Point", "Color", "ParseError", "first", "main", "test first"]
    );

    match &root.kind {
        NodeKind::ContainerDecl(decl) => {
            assert!(decl.is_root);
            assert_eq!(
                decl.doc_comments.as_deref(),
                Some(" A small program touching most of the grammar.")
            );
        }
        other => panic!("expected root container, got {:?}", other),
    }
}

#[test]
fn test_every_node_belongs_to_the_unit() {
    fn walk(node: &Node, count: &mut usize) {
        assert_eq!(node.owner, UnitId(3));
        *count += 1;
        for child in node.children() {
            walk(child, count);
        }
    }

    let root = parse_source(PROGRAM, ErrColor::Off).unwrap();
    let mut count = 0;
    walk(&root, &mut count);
    assert_eq!(count, root.node_count());
}

#[test]
fn test_reparse_is_identical() {
    let first = parse_source(PROGRAM, ErrColor::Off).unwrap();
    let second = parse_source(PROGRAM, ErrColor::Off).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_syntax_error_is_rendered() {
    let source = "fn main() void {\n    if (ok return;\n}\n";
    let error = parse_source(source, ErrColor::Off).unwrap_err();

    assert_eq!(
        *error.kind(),
        ErrorImpl::ExpectedToken {
            expected: TokenKind::RParen,
            found: TokenKind::KeywordReturn,
        }
    );
    assert_eq!(error.to_string().split(':').next(), Some("2"));

    let rendered = render_error(&error, source, Path::new("main.zig"));
    assert_eq!(
        rendered,
        "error: ExpectedToken (expected token ')', found 'return')\n\
         -> main.zig:2:12\n  \
         |\n\
         2 | if (ok return;\n  \
         | -------^\n"
    );
}

#[test]
fn test_color_mode_is_carried_by_errors() {
    let error = parse_source("const = 1;", ErrColor::On).unwrap_err();

    assert_eq!(error.color(), ErrColor::On);
    assert_eq!(
        *error.kind(),
        ErrorImpl::ExpectedToken {
            expected: TokenKind::Identifier,
            found: TokenKind::Eq,
        }
    );
}

#[test]
fn test_tokenizer_errors_surface_before_parsing() {
    let error = parse_source("const s = \"unterminated;", ErrColor::Off).unwrap_err();
    assert_eq!(*error.kind(), ErrorImpl::UnterminatedLiteral);
}
