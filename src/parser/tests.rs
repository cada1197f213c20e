//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Declarations, containers and function prototypes
//! - Operator precedence and prefix/suffix expressions
//! - Pointer, array and error set types
//! - Control flow statements and semicolon rules
//! - Bounded lookahead and error reporting

use pretty_assertions::assert_eq;

use super::{
    expr::parse_expr,
    parser::{parse, ParseResult, Parser},
    stmt::{parse_block_expr_statement, parse_statement},
    types::parse_type_expr,
};
use crate::{
    ast::{
        ast::{BinaryOperator, Node, NodeKind, PrefixOperator, VisibMod},
        expressions::{CallModifier, ContainerInitKind},
        statements::{AsmOutputTarget, IfKind, ReturnKind},
        types::{ContainerKind, ContainerLayout, PointerKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
    DiagnosticConfig, Position, UnitId,
};

fn parse_source(source: &str) -> Result<Node, Error> {
    let tokens = tokenize(source).unwrap();
    parse(tokens, UnitId(1), DiagnosticConfig::default())
}

fn root_decls(source: &str) -> Vec<Node> {
    match parse_source(source).unwrap().kind {
        NodeKind::ContainerDecl(decl) => decl.decls,
        other => panic!("expected root container, got {:?}", other),
    }
}

fn single_decl(source: &str) -> Node {
    let mut decls = root_decls(source);
    assert_eq!(decls.len(), 1);
    decls.remove(0)
}

/// Initializer of `const x = <expr>;`.
fn init_of(source: &str) -> Node {
    match single_decl(source).kind {
        NodeKind::VariableDeclaration(var) => *var.init.unwrap(),
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

/// Type annotation of `const x: <type> = ...;`.
fn type_of(source: &str) -> Node {
    match single_decl(source).kind {
        NodeKind::VariableDeclaration(var) => *var.ty.unwrap(),
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

/// Statements of the body of the single function in `source`.
fn body_of(source: &str) -> Vec<Node> {
    match single_decl(source).kind {
        NodeKind::FnDef(def) => match def.body.kind {
            NodeKind::Block(block) => block.statements,
            other => panic!("expected block, got {:?}", other),
        },
        other => panic!("expected function definition, got {:?}", other),
    }
}

fn error_of(source: &str) -> ErrorImpl {
    parse_source(source).unwrap_err().kind().clone()
}

fn symbol(node: &Node) -> &str {
    match &node.kind {
        NodeKind::Symbol(name) => name,
        other => panic!("expected symbol, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_root() {
    let root = parse_source("").unwrap();

    assert_eq!(root.position, Position::new(0, 1, 1));
    assert_eq!(root.owner, UnitId(1));
    match root.kind {
        NodeKind::ContainerDecl(decl) => {
            assert!(decl.is_root);
            assert_eq!(decl.kind, ContainerKind::Struct);
            assert!(decl.fields.is_empty());
            assert!(decl.decls.is_empty());
        }
        other => panic!("expected root container, got {:?}", other),
    }
}

#[test]
fn test_parse_function_definition() {
    let decl = single_decl("fn foo() void { }");

    match decl.kind {
        NodeKind::FnDef(def) => {
            match &def.proto.kind {
                NodeKind::FnProto(proto) => {
                    assert_eq!(proto.name.as_deref(), Some("foo"));
                    assert!(proto.params.is_empty());
                    assert_eq!(symbol(proto.return_type.as_ref().unwrap()), "void");
                    assert_eq!(proto.visib_mod, VisibMod::Private);
                }
                other => panic!("expected prototype, got {:?}", other),
            }
            match &def.body.kind {
                NodeKind::Block(block) => {
                    assert!(block.label.is_none());
                    assert!(block.statements.is_empty());
                }
                other => panic!("expected block, got {:?}", other),
            }
        }
        other => panic!("expected function definition, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration_precedence() {
    let decl = single_decl("const x: i32 = 1 + 2 * 3;");

    let var = match decl.kind {
        NodeKind::VariableDeclaration(var) => var,
        other => panic!("expected variable declaration, got {:?}", other),
    };
    assert_eq!(var.name, "x");
    assert!(var.is_const);
    assert_eq!(symbol(var.ty.as_ref().unwrap()), "i32");

    match var.init.unwrap().kind {
        NodeKind::BinOp(add) => {
            assert_eq!(add.op, BinaryOperator::Add);
            assert!(matches!(add.lhs.kind, NodeKind::IntLiteral(_)));
            match add.rhs.kind {
                NodeKind::BinOp(mult) => assert_eq!(mult.op, BinaryOperator::Mult),
                other => panic!("expected multiplication, got {:?}", other),
            }
        }
        other => panic!("expected addition, got {:?}", other),
    }
}

#[test]
fn test_parse_while_with_payload() {
    let statements = body_of("fn f() void { while (x) |v| { } }");

    assert_eq!(statements.len(), 1);
    match &statements[0].kind {
        NodeKind::While(expr) => {
            assert_eq!(symbol(&expr.condition), "x");
            let payload = expr.payload.as_ref().unwrap();
            assert_eq!(payload.name, "v");
            assert!(!payload.is_ptr);
            assert!(matches!(expr.body.kind, NodeKind::Block(_)));
            assert!(expr.else_body.is_none());
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn test_missing_rparen_reports_found_token() {
    let error = parse_source("fn f() void { if (a == b return; }").unwrap_err();

    assert_eq!(
        *error.kind(),
        ErrorImpl::ExpectedToken {
            expected: TokenKind::RParen,
            found: TokenKind::KeywordReturn,
        }
    );
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 26);
}

#[test]
fn test_parse_anonymous_struct_literal() {
    let init = init_of("const s = .{ .a = 1, .b = 2 };");

    match init.kind {
        NodeKind::ContainerInit(expr) => {
            assert_eq!(expr.kind, ContainerInitKind::Struct);
            assert!(expr.ty.is_none());
            let names: Vec<_> = expr
                .entries
                .iter()
                .map(|entry| match &entry.kind {
                    NodeKind::StructValueField(field) => field.name.clone(),
                    other => panic!("expected field init, got {:?}", other),
                })
                .collect();
            assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("expected container init, got {:?}", other),
    }
}

#[test]
fn test_bool_or_binds_loosest() {
    match init_of("const x = a or b and c;").kind {
        NodeKind::BinOp(or) => {
            assert_eq!(or.op, BinaryOperator::BoolOr);
            match or.rhs.kind {
                NodeKind::BinOp(and) => assert_eq!(and.op, BinaryOperator::BoolAnd),
                other => panic!("expected and, got {:?}", other),
            }
        }
        other => panic!("expected or, got {:?}", other),
    }
}

#[test]
fn test_precedence_levels() {
    // (source, loosest operator, operator of its right operand)
    let cases = [
        ("a and b == c", BinaryOperator::BoolAnd, BinaryOperator::CmpEq),
        ("a == b | c", BinaryOperator::CmpEq, BinaryOperator::BinOr),
        ("a orelse b << c", BinaryOperator::UnwrapOptional, BinaryOperator::BitShiftLeft),
        ("a >> b ++ c", BinaryOperator::BitShiftRight, BinaryOperator::ArrayCat),
        ("a +% b ** c", BinaryOperator::AddWrap, BinaryOperator::ArrayMult),
        ("a != b || c", BinaryOperator::CmpNotEq, BinaryOperator::MergeErrorSets),
    ];

    for (expr, outer, inner) in cases {
        let source = format!("const x = {};", expr);
        match init_of(&source).kind {
            NodeKind::BinOp(top) => {
                assert_eq!(top.op, outer, "{}", expr);
                match top.rhs.kind {
                    NodeKind::BinOp(rhs) => assert_eq!(rhs.op, inner, "{}", expr),
                    other => panic!("{}: expected binary rhs, got {:?}", expr, other),
                }
            }
            other => panic!("{}: expected binary operator, got {:?}", expr, other),
        }
    }
}

#[test]
fn test_comparison_does_not_chain() {
    assert_eq!(
        error_of("const x = a == b == c;"),
        ErrorImpl::ExpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::EqEq,
        }
    );
}

#[test]
fn test_additive_operators_are_left_associative() {
    match init_of("const x = a - b + c;").kind {
        NodeKind::BinOp(add) => {
            assert_eq!(add.op, BinaryOperator::Add);
            match add.lhs.kind {
                NodeKind::BinOp(sub) => assert_eq!(sub.op, BinaryOperator::Sub),
                other => panic!("expected subtraction, got {:?}", other),
            }
            assert_eq!(symbol(&add.rhs), "c");
        }
        other => panic!("expected addition, got {:?}", other),
    }
}

#[test]
fn test_catch_and_orelse() {
    match init_of("const x = a catch |e| b;").kind {
        NodeKind::Catch(expr) => {
            assert_eq!(expr.payload.as_deref(), Some("e"));
            assert_eq!(symbol(&expr.lhs), "a");
            assert_eq!(symbol(&expr.rhs), "b");
        }
        other => panic!("expected catch, got {:?}", other),
    }

    match init_of("const x = a orelse b;").kind {
        NodeKind::BinOp(expr) => assert_eq!(expr.op, BinaryOperator::UnwrapOptional),
        other => panic!("expected orelse, got {:?}", other),
    }
}

#[test]
fn test_prefix_operators_nest_innermost_last() {
    match init_of("const x = !-a;").kind {
        NodeKind::PrefixOp(not) => {
            assert_eq!(not.op, PrefixOperator::BoolNot);
            match not.operand.kind {
                NodeKind::PrefixOp(neg) => {
                    assert_eq!(neg.op, PrefixOperator::Negation);
                    assert_eq!(symbol(&neg.operand), "a");
                }
                other => panic!("expected negation, got {:?}", other),
            }
        }
        other => panic!("expected not, got {:?}", other),
    }
}

#[test]
fn test_try_is_an_error_return() {
    match init_of("const x = try foo();").kind {
        NodeKind::Return(ret) => {
            assert_eq!(ret.kind, ReturnKind::Error);
            assert!(matches!(ret.expr.unwrap().kind, NodeKind::FnCall(_)));
        }
        other => panic!("expected try, got {:?}", other),
    }
}

#[test]
fn test_suffix_chain() {
    match init_of("const x = a.b[0].*.?;").kind {
        NodeKind::UnwrapOptional(inner) => match inner.kind {
            NodeKind::PtrDeref(inner) => match inner.kind {
                NodeKind::ArrayAccess(access) => match access.array.kind {
                    NodeKind::FieldAccess(field) => {
                        assert_eq!(field.field, "b");
                        assert_eq!(symbol(&field.container), "a");
                    }
                    other => panic!("expected field access, got {:?}", other),
                },
                other => panic!("expected array access, got {:?}", other),
            },
            other => panic!("expected deref, got {:?}", other),
        },
        other => panic!("expected unwrap, got {:?}", other),
    }
}

#[test]
fn test_builtin_and_async_calls() {
    match init_of("const std = @import(\"std\");").kind {
        NodeKind::FnCall(call) => {
            assert_eq!(call.modifier, CallModifier::Builtin);
            assert_eq!(symbol(&call.callee), "import");
            assert_eq!(call.args.len(), 1);
            assert_eq!(call.args[0].kind, NodeKind::StringLiteral("std".to_string()));
        }
        other => panic!("expected builtin call, got {:?}", other),
    }

    match init_of("const f = async foo(1, 2);").kind {
        NodeKind::FnCall(call) => {
            assert_eq!(call.modifier, CallModifier::Async);
            assert_eq!(call.args.len(), 2);
        }
        other => panic!("expected async call, got {:?}", other),
    }
}

#[test]
fn test_slice_with_sentinel_after_identifier() {
    match init_of("const s = a[0..n :0];").kind {
        NodeKind::Slice(slice) => {
            assert_eq!(symbol(&slice.array), "a");
            assert_eq!(symbol(slice.end.as_ref().unwrap()), "n");
            assert!(matches!(
                slice.sentinel.unwrap().kind,
                NodeKind::IntLiteral(_)
            ));
        }
        other => panic!("expected slice, got {:?}", other),
    }
}

#[test]
fn test_double_pointer_qualifiers_apply_to_inner() {
    match type_of("const p: **const u8 = undefined;").kind {
        NodeKind::PointerType(outer) => {
            assert_eq!(outer.kind, PointerKind::Single);
            assert!(!outer.is_const);
            match outer.child.kind {
                NodeKind::PointerType(inner) => {
                    assert_eq!(inner.kind, PointerKind::Single);
                    assert!(inner.is_const);
                    assert_eq!(symbol(&inner.child), "u8");
                }
                other => panic!("expected inner pointer, got {:?}", other),
            }
        }
        other => panic!("expected pointer, got {:?}", other),
    }
}

#[test]
fn test_many_and_c_pointers() {
    match type_of("const p: [*:0]const u8 = undefined;").kind {
        NodeKind::PointerType(ptr) => {
            assert_eq!(ptr.kind, PointerKind::Many);
            assert!(ptr.is_const);
            assert!(matches!(ptr.sentinel.unwrap().kind, NodeKind::IntLiteral(_)));
        }
        other => panic!("expected pointer, got {:?}", other),
    }

    match type_of("const p: [*c]volatile u8 = undefined;").kind {
        NodeKind::PointerType(ptr) => {
            assert_eq!(ptr.kind, PointerKind::C);
            assert!(ptr.is_volatile);
        }
        other => panic!("expected pointer, got {:?}", other),
    }
}

#[test]
fn test_pointer_align_with_bit_range() {
    match type_of("const p: *align(4:2:8) u8 = undefined;").kind {
        NodeKind::PointerType(ptr) => {
            assert!(ptr.align.is_some());
            assert_eq!(ptr.bit_offset_start.unwrap().to_u128(), Some(2));
            assert_eq!(ptr.host_int_bytes.unwrap().to_u128(), Some(8));
        }
        other => panic!("expected pointer, got {:?}", other),
    }
}

#[test]
fn test_sentinel_array_after_identifier_size() {
    match type_of("const a: [N:0]u8 = undefined;").kind {
        NodeKind::ArrayType(array) => {
            assert_eq!(symbol(array.size.as_ref().unwrap()), "N");
            assert!(array.sentinel.is_some());
            assert_eq!(symbol(&array.child), "u8");
        }
        other => panic!("expected array type, got {:?}", other),
    }
}

#[test]
fn test_inferred_array_literal_with_enum_literals() {
    match init_of("const a = [_]E{ .a, .b };").kind {
        NodeKind::ContainerInit(init) => {
            assert_eq!(init.kind, ContainerInitKind::Array);
            assert!(matches!(
                init.ty.unwrap().kind,
                NodeKind::InferredArrayType(_)
            ));
            assert_eq!(init.entries[0].kind, NodeKind::EnumLiteral("a".to_string()));
            assert_eq!(init.entries[1].kind, NodeKind::EnumLiteral("b".to_string()));
        }
        other => panic!("expected array init, got {:?}", other),
    }
}

#[test]
fn test_error_union_and_optional_types() {
    match type_of("const t: ?anyerror!u8 = null;").kind {
        NodeKind::PrefixOp(opt) => {
            assert_eq!(opt.op, PrefixOperator::OptionalType);
            match opt.operand.kind {
                NodeKind::BinOp(union) => assert_eq!(union.op, BinaryOperator::ErrorUnion),
                other => panic!("expected error union, got {:?}", other),
            }
        }
        other => panic!("expected optional, got {:?}", other),
    }
}

#[test]
fn test_error_set_and_error_value() {
    match init_of("const E = error{ A, B };").kind {
        NodeKind::ErrorSetDecl(set) => {
            assert_eq!(set.fields.len(), 2);
            assert!(set
                .fields
                .iter()
                .all(|field| matches!(field.kind, NodeKind::ErrorSetField(_))));
        }
        other => panic!("expected error set, got {:?}", other),
    }

    match init_of("const e = error.A;").kind {
        NodeKind::FieldAccess(access) => {
            assert_eq!(access.container.kind, NodeKind::ErrorType);
            assert_eq!(access.field, "A");
        }
        other => panic!("expected error value, got {:?}", other),
    }
}

#[test]
fn test_labeled_block_with_break() {
    match init_of("const x = blk: { break :blk 1; };").kind {
        NodeKind::Block(block) => {
            assert_eq!(block.label.as_deref(), Some("blk"));
            match &block.statements[0].kind {
                NodeKind::Break(brk) => {
                    assert_eq!(brk.label.as_deref(), Some("blk"));
                    assert!(brk.expr.is_some());
                }
                other => panic!("expected break, got {:?}", other),
            }
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_container_declarations() {
    let init = init_of(
        "const S = packed struct { a: u8 = 1, b: u16 align(2), pub fn get() void {} };",
    );
    match init.kind {
        NodeKind::ContainerDecl(decl) => {
            assert_eq!(decl.kind, ContainerKind::Struct);
            assert_eq!(decl.layout, ContainerLayout::Packed);
            assert!(!decl.is_root);
            assert_eq!(decl.fields.len(), 2);
            assert_eq!(decl.decls.len(), 1);
            match &decl.fields[1].kind {
                NodeKind::StructField(field) => {
                    assert_eq!(field.name, "b");
                    assert!(field.align.is_some());
                    assert!(field.value.is_none());
                }
                other => panic!("expected field, got {:?}", other),
            }
        }
        other => panic!("expected container, got {:?}", other),
    }

    match init_of("const U = union(enum) { a: u8, b };").kind {
        NodeKind::ContainerDecl(decl) => {
            assert_eq!(decl.kind, ContainerKind::Union);
            assert!(decl.auto_enum);
            assert!(decl.init_arg.is_none());
            match &decl.fields[1].kind {
                NodeKind::StructField(field) => assert!(field.ty.is_none()),
                other => panic!("expected field, got {:?}", other),
            }
        }
        other => panic!("expected container, got {:?}", other),
    }
}

#[test]
fn test_comptime_field_and_block() {
    match init_of("const S = struct { comptime x: u8 = 1, comptime { foo(); } };").kind {
        NodeKind::ContainerDecl(decl) => {
            match &decl.fields[0].kind {
                NodeKind::StructField(field) => assert!(field.is_comptime),
                other => panic!("expected field, got {:?}", other),
            }
            assert!(matches!(decl.decls[0].kind, NodeKind::ComptimeDecl(_)));
        }
        other => panic!("expected container, got {:?}", other),
    }
}

#[test]
fn test_doc_comments_attach_to_declarations() {
    let root = parse_source("//! unit\n/// first\n/// second\npub const x = 1;").unwrap();

    match root.kind {
        NodeKind::ContainerDecl(decl) => {
            assert_eq!(decl.doc_comments.as_deref(), Some(" unit"));
            match &decl.decls[0].kind {
                NodeKind::VariableDeclaration(var) => {
                    assert_eq!(var.doc_comments.as_deref(), Some(" first\n second"));
                    assert_eq!(var.visib_mod, VisibMod::Public);
                }
                other => panic!("expected variable declaration, got {:?}", other),
            }
        }
        other => panic!("expected root container, got {:?}", other),
    }
}

#[test]
fn test_extern_and_export_declarations() {
    match single_decl("extern \"c\" fn write(fd: i32, buf: [*]const u8, ...) isize;").kind {
        NodeKind::FnProto(proto) => {
            assert!(proto.is_extern);
            assert!(proto.is_var_args);
            assert_eq!(proto.lib_name.as_deref(), Some("c"));
            assert_eq!(proto.params.len(), 3);
        }
        other => panic!("expected prototype, got {:?}", other),
    }

    match single_decl("export threadlocal var counter: u32 = 0;").kind {
        NodeKind::VariableDeclaration(var) => {
            assert!(var.is_export);
            assert!(var.is_threadlocal);
            assert!(!var.is_const);
        }
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_declaration_errors() {
    assert_eq!(error_of("extern fn f() void {}"), ErrorImpl::ExternFnWithBody);
    assert_eq!(error_of("pub x: u8,"), ErrorImpl::PubWithoutDecl);
    assert_eq!(error_of("const x = 1; pub"), ErrorImpl::PubWithoutDecl);
    assert_eq!(error_of("fn f(a: ..., b: i32) void;"), ErrorImpl::VarArgsNotLast);
    assert_eq!(
        error_of("threadlocal fn f() void {}"),
        ErrorImpl::InvalidToken {
            found: TokenKind::KeywordFn,
        }
    );
}

#[test]
fn test_dangling_comptime_is_rejected() {
    assert_eq!(
        error_of("comptime"),
        ErrorImpl::InvalidToken {
            found: TokenKind::Eof,
        }
    );
    assert_eq!(
        error_of("const S = struct { comptime };"),
        ErrorImpl::InvalidToken {
            found: TokenKind::RBrace,
        }
    );
}

#[test]
fn test_doc_comments_before_test_and_comptime() {
    let decls = root_decls("/// about the test\ntest \"t\" {}\n/// setup\ncomptime {}");
    assert_eq!(decls.len(), 2);

    match &decls[0].kind {
        NodeKind::TestDecl(test) => {
            assert_eq!(test.name.as_deref(), Some("t"));
            assert_eq!(test.doc_comments.as_deref(), Some(" about the test"));
        }
        other => panic!("expected test, got {:?}", other),
    }
    match &decls[1].kind {
        NodeKind::ComptimeDecl(decl) => {
            assert_eq!(decl.doc_comments.as_deref(), Some(" setup"));
            assert!(matches!(decl.block.kind, NodeKind::Block(_)));
        }
        other => panic!("expected comptime block, got {:?}", other),
    }
}

#[test]
fn test_unattached_doc_comments_are_rejected() {
    let error = parse_source("const x = 1;\n/// orphan\n").unwrap_err();
    assert_eq!(*error.kind(), ErrorImpl::UnattachedDocComment);
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 1);

    for source in [
        "const S = struct { a: u8, /// trailing\n };",
        "fn f(/// d\n) void {}",
        "const E = error{ A, /// d\n };",
    ] {
        assert_eq!(error_of(source), ErrorImpl::UnattachedDocComment, "{}", source);
    }
}

#[test]
fn test_test_and_usingnamespace() {
    let decls = root_decls("test \"basic\" { } pub usingnamespace @import(\"std\");");

    match &decls[0].kind {
        NodeKind::TestDecl(test) => assert_eq!(test.name.as_deref(), Some("basic")),
        other => panic!("expected test, got {:?}", other),
    }
    match &decls[1].kind {
        NodeKind::UsingNamespace(using) => assert_eq!(using.visib_mod, VisibMod::Public),
        other => panic!("expected usingnamespace, got {:?}", other),
    }
}

#[test]
fn test_if_statement_semicolon_rules() {
    let statements = body_of("fn f() void { if (a) {} else {} if (a) x = 1 else y = 2; x = 3; }");
    assert_eq!(statements.len(), 3);
    match &statements[1].kind {
        NodeKind::If(expr) => {
            assert_eq!(expr.kind(), IfKind::Bool);
            assert!(expr.else_body.is_some());
        }
        other => panic!("expected if, got {:?}", other),
    }

    assert_eq!(
        error_of("fn f() void { if (a) x = 1 }"),
        ErrorImpl::ExpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::RBrace,
        }
    );
}

#[test]
fn test_if_capture_kinds() {
    let statements = body_of("fn f() void { if (a) |v| {} else |err| {} }");
    match &statements[0].kind {
        NodeKind::If(expr) => {
            assert_eq!(expr.kind(), IfKind::ErrorUnion);
            assert_eq!(expr.else_payload.as_deref(), Some("err"));
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_missing_body_is_reported() {
    assert_eq!(
        error_of("fn f() void { if (a) ; }"),
        ErrorImpl::ExpectedBody {
            construct: "if",
            found: TokenKind::Semicolon,
        }
    );
    assert_eq!(
        error_of("fn f() void { while (a) ; }"),
        ErrorImpl::ExpectedBody {
            construct: "loop",
            found: TokenKind::Semicolon,
        }
    );
}

#[test]
fn test_loops() {
    let statements = body_of(
        "fn f() void { for (items) |*item, i| {} while (i < n) : (i += 1) {} outer: inline while (a) {} }",
    );
    assert_eq!(statements.len(), 3);

    match &statements[0].kind {
        NodeKind::For(expr) => {
            assert!(expr.elem.is_ptr);
            assert_eq!(expr.elem.name, "item");
            assert_eq!(expr.index.as_deref(), Some("i"));
        }
        other => panic!("expected for, got {:?}", other),
    }
    match &statements[1].kind {
        NodeKind::While(expr) => assert!(expr.continue_expr.is_some()),
        other => panic!("expected while, got {:?}", other),
    }
    match &statements[2].kind {
        NodeKind::While(expr) => {
            assert!(expr.is_inline);
            assert_eq!(expr.label.as_deref(), Some("outer"));
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn test_inline_without_loop_is_an_error() {
    assert_eq!(
        error_of("fn f() void { inline x; }"),
        ErrorImpl::InvalidToken {
            found: TokenKind::Identifier,
        }
    );
}

#[test]
fn test_defer_statements() {
    let statements = body_of("fn f() void { defer x(); errdefer |err| log(err); }");

    match &statements[0].kind {
        NodeKind::Defer(defer) => {
            assert_eq!(defer.kind, ReturnKind::Unconditional);
            assert!(defer.payload.is_none());
        }
        other => panic!("expected defer, got {:?}", other),
    }
    match &statements[1].kind {
        NodeKind::Defer(defer) => {
            assert_eq!(defer.kind, ReturnKind::Error);
            assert_eq!(defer.payload.as_deref(), Some("err"));
        }
        other => panic!("expected errdefer, got {:?}", other),
    }
}

#[test]
fn test_switch_prongs() {
    match init_of("const y = switch (x) { 1...3, 5 => a, else => |v| b };").kind {
        NodeKind::Switch(switch) => {
            assert_eq!(switch.prongs.len(), 2);
            match &switch.prongs[0].kind {
                NodeKind::SwitchProng(prong) => {
                    assert_eq!(prong.items.len(), 2);
                    assert!(prong.any_items_are_range);
                    assert!(!prong.is_else);
                }
                other => panic!("expected prong, got {:?}", other),
            }
            match &switch.prongs[1].kind {
                NodeKind::SwitchProng(prong) => {
                    assert!(prong.is_else);
                    assert!(prong.items.is_empty());
                    assert_eq!(prong.payload.as_ref().unwrap().name, "v");
                }
                other => panic!("expected prong, got {:?}", other),
            }
        }
        other => panic!("expected switch, got {:?}", other),
    }
}

#[test]
fn test_inline_assembly() {
    let statements = body_of(
        "fn f() void { asm volatile (\"syscall\" : [ret] \"={rax}\" (-> usize) : [n] \"{rax}\" (number) : \"rcx\", \"r11\"); }",
    );

    match &statements[0].kind {
        NodeKind::Asm(asm) => {
            assert!(asm.is_volatile);
            assert_eq!(asm.outputs.len(), 1);
            assert_eq!(asm.outputs[0].symbolic_name, "ret");
            assert_eq!(asm.outputs[0].constraint, "={rax}");
            assert!(matches!(
                asm.outputs[0].target,
                AsmOutputTarget::ReturnType(_)
            ));
            assert_eq!(asm.inputs.len(), 1);
            assert_eq!(symbol(&asm.inputs[0].expr), "number");
            assert_eq!(asm.clobbers, vec!["rcx".to_string(), "r11".to_string()]);
        }
        other => panic!("expected asm, got {:?}", other),
    }
}

#[test]
fn test_absence_leaves_cursor_untouched() {
    fn check(production: fn(&mut Parser) -> ParseResult, name: &str) {
        let tokens = tokenize(")").unwrap();
        let mut parser = Parser::new(tokens, UnitId(1), DiagnosticConfig::default());

        assert_eq!(production(&mut parser).unwrap(), None, "{}", name);
        assert_eq!(parser.cursor(), 0, "{}", name);
    }

    check(parse_expr, "expr");
    check(parse_statement, "statement");
    check(parse_type_expr, "type expression");
    check(parse_block_expr_statement, "block expression statement");
}

#[test]
fn test_label_without_loop_is_put_back() {
    let tokens = tokenize("a : b").unwrap();
    let mut parser = Parser::new(tokens, UnitId(1), DiagnosticConfig::default());

    let node = parse_expr(&mut parser).unwrap().unwrap();
    assert_eq!(symbol(&node), "a");
    assert_eq!(parser.current_token_kind(), TokenKind::Colon);
}

#[test]
fn test_leftover_tokens_are_rejected() {
    assert_eq!(
        error_of("const x = 1; )"),
        ErrorImpl::InvalidToken {
            found: TokenKind::RParen,
        }
    );
}

#[test]
fn test_every_node_carries_the_owner() {
    fn check(node: &Node) {
        assert_eq!(node.owner, UnitId(1));
        node.children().into_iter().for_each(check);
    }

    let root =
        parse_source("const S = struct { a: u8 }; fn f(x: *S) u8 { return x.a + 1; }").unwrap();
    check(&root);
}

#[test]
fn test_parsing_is_deterministic() {
    let source =
        "pub fn main() !void { var i: usize = 0; while (i < 10) : (i += 1) { try foo(i); } }";
    assert_eq!(parse_source(source), parse_source(source));
}
