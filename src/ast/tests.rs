use super::{
    ast::{BinaryOperator, Node, NodeKind},
    expressions::BinOpExpr,
    statements::{IfExpr, IfKind, PtrPayload},
};
use crate::{Position, UnitId};

fn symbol(name: &str, column: u32) -> Node {
    Node::new(
        NodeKind::Symbol(name.to_string()),
        Position::new(column - 1, 1, column),
        UnitId(7),
    )
}

#[test]
fn test_children_in_source_order() {
    let node = Node::new(
        NodeKind::BinOp(BinOpExpr {
            lhs: symbol("a", 1).boxed(),
            op: BinaryOperator::Add,
            rhs: symbol("b", 5).boxed(),
        }),
        Position::new(2, 1, 3),
        UnitId(7),
    );

    let children = node.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].kind, NodeKind::Symbol("a".to_string()));
    assert_eq!(children[1].kind, NodeKind::Symbol("b".to_string()));
    assert_eq!(node.node_count(), 3);
}

#[test]
fn test_if_kind_is_derived_from_captures() {
    let mut expr = IfExpr {
        condition: symbol("c", 5).boxed(),
        then_payload: None,
        then_body: symbol("x", 8).boxed(),
        else_payload: None,
        else_body: None,
    };
    assert_eq!(expr.kind(), IfKind::Bool);

    expr.then_payload = Some(PtrPayload {
        name: "v".to_string(),
        is_ptr: false,
    });
    assert_eq!(expr.kind(), IfKind::Optional);

    expr.else_payload = Some("err".to_string());
    assert_eq!(expr.kind(), IfKind::ErrorUnion);
}

#[test]
fn test_node_display() {
    let node = symbol("foo", 4);

    assert_eq!(node.to_string(), "Symbol @ 1:4");
    assert_eq!(node.owner, UnitId(7));
}

#[test]
fn test_operator_symbols() {
    assert_eq!(BinaryOperator::UnwrapOptional.symbol(), "orelse");
    assert_eq!(BinaryOperator::MergeErrorSets.symbol(), "||");
    assert_eq!(BinaryOperator::AssignBitShiftLeft.to_string(), "<<=");
}
