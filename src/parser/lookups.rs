use lazy_static::lazy_static;

use crate::{
    ast::ast::{BinaryOperator, Node, PrefixOperator},
    lexer::tokens::{Token, TokenKind},
};

use super::parser::{ParseResult, Parser};

/// Whether a precedence level folds one operator or any number of them.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum BinOpChain {
    /// `a == b == c` is not a chain; the second `==` is left to the caller.
    Once,
    Infinite,
}

/// An infix operator recognised at some precedence level.
#[derive(PartialEq, Clone, Debug)]
pub enum InfixOp {
    Bin(BinaryOperator),
    /// `catch` with its optional `|err|` capture.
    Catch(Option<String>),
}

pub type Production = fn(&mut Parser) -> ParseResult<Node>;
pub type OpParser = fn(&mut Parser) -> ParseResult<(Token, InfixOp)>;

// Dense tables indexed by `TokenKind as usize`; most entries are `None`.
pub type BinOpLookup = [Option<BinaryOperator>; TokenKind::COUNT];
pub type PrefixOpLookup = [Option<PrefixOperator>; TokenKind::COUNT];

fn create_bin_op_lookup(entries: &[(TokenKind, BinaryOperator)]) -> BinOpLookup {
    let mut lookup = [None; TokenKind::COUNT];
    for &(kind, op) in entries {
        lookup[kind as usize] = Some(op);
    }
    lookup
}

fn create_prefix_op_lookup(entries: &[(TokenKind, PrefixOperator)]) -> PrefixOpLookup {
    let mut lookup = [None; TokenKind::COUNT];
    for &(kind, op) in entries {
        lookup[kind as usize] = Some(op);
    }
    lookup
}

lazy_static! {
    pub static ref ASSIGN_OPS: BinOpLookup = create_bin_op_lookup(&[
        (TokenKind::Eq, BinaryOperator::Assign),
        (TokenKind::StarEq, BinaryOperator::AssignTimes),
        (TokenKind::StarPercentEq, BinaryOperator::AssignTimesWrap),
        (TokenKind::SlashEq, BinaryOperator::AssignDiv),
        (TokenKind::PercentEq, BinaryOperator::AssignMod),
        (TokenKind::PlusEq, BinaryOperator::AssignPlus),
        (TokenKind::PlusPercentEq, BinaryOperator::AssignPlusWrap),
        (TokenKind::MinusEq, BinaryOperator::AssignMinus),
        (TokenKind::MinusPercentEq, BinaryOperator::AssignMinusWrap),
        (TokenKind::LessLessEq, BinaryOperator::AssignBitShiftLeft),
        (TokenKind::GreaterGreaterEq, BinaryOperator::AssignBitShiftRight),
        (TokenKind::AmpersandEq, BinaryOperator::AssignBitAnd),
        (TokenKind::CaretEq, BinaryOperator::AssignBitXor),
        (TokenKind::PipeEq, BinaryOperator::AssignBitOr),
    ]);

    pub static ref BOOL_OR_OPS: BinOpLookup =
        create_bin_op_lookup(&[(TokenKind::KeywordOr, BinaryOperator::BoolOr)]);

    pub static ref BOOL_AND_OPS: BinOpLookup =
        create_bin_op_lookup(&[(TokenKind::KeywordAnd, BinaryOperator::BoolAnd)]);

    pub static ref COMPARE_OPS: BinOpLookup = create_bin_op_lookup(&[
        (TokenKind::EqEq, BinaryOperator::CmpEq),
        (TokenKind::BangEq, BinaryOperator::CmpNotEq),
        (TokenKind::Less, BinaryOperator::CmpLessThan),
        (TokenKind::Greater, BinaryOperator::CmpGreaterThan),
        (TokenKind::LessEq, BinaryOperator::CmpLessOrEq),
        (TokenKind::GreaterEq, BinaryOperator::CmpGreaterOrEq),
    ]);

    // `catch` shares this level but carries a payload, see `parse_bitwise_op`.
    pub static ref BITWISE_OPS: BinOpLookup = create_bin_op_lookup(&[
        (TokenKind::Ampersand, BinaryOperator::BinAnd),
        (TokenKind::Caret, BinaryOperator::BinXor),
        (TokenKind::Pipe, BinaryOperator::BinOr),
        (TokenKind::KeywordOrElse, BinaryOperator::UnwrapOptional),
    ]);

    pub static ref BIT_SHIFT_OPS: BinOpLookup = create_bin_op_lookup(&[
        (TokenKind::LessLess, BinaryOperator::BitShiftLeft),
        (TokenKind::GreaterGreater, BinaryOperator::BitShiftRight),
    ]);

    pub static ref ADDITION_OPS: BinOpLookup = create_bin_op_lookup(&[
        (TokenKind::Plus, BinaryOperator::Add),
        (TokenKind::Minus, BinaryOperator::Sub),
        (TokenKind::PlusPlus, BinaryOperator::ArrayCat),
        (TokenKind::PlusPercent, BinaryOperator::AddWrap),
        (TokenKind::MinusPercent, BinaryOperator::SubWrap),
    ]);

    pub static ref MULTIPLY_OPS: BinOpLookup = create_bin_op_lookup(&[
        (TokenKind::PipePipe, BinaryOperator::MergeErrorSets),
        (TokenKind::Star, BinaryOperator::Mult),
        (TokenKind::Slash, BinaryOperator::Div),
        (TokenKind::Percent, BinaryOperator::Mod),
        (TokenKind::StarStar, BinaryOperator::ArrayMult),
        (TokenKind::StarPercent, BinaryOperator::MultWrap),
    ]);

    // `try` and `await` are prefix operators too but build their own nodes.
    pub static ref PREFIX_OPS: PrefixOpLookup = create_prefix_op_lookup(&[
        (TokenKind::Bang, PrefixOperator::BoolNot),
        (TokenKind::Minus, PrefixOperator::Negation),
        (TokenKind::Tilde, PrefixOperator::BinNot),
        (TokenKind::MinusPercent, PrefixOperator::NegationWrap),
        (TokenKind::Ampersand, PrefixOperator::AddrOf),
    ]);
}
