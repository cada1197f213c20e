use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("align", TokenKind::KeywordAlign);
        map.insert("allowzero", TokenKind::KeywordAllowZero);
        map.insert("and", TokenKind::KeywordAnd);
        map.insert("anyframe", TokenKind::KeywordAnyFrame);
        map.insert("anytype", TokenKind::KeywordAnyType);
        map.insert("asm", TokenKind::KeywordAsm);
        map.insert("async", TokenKind::KeywordAsync);
        map.insert("await", TokenKind::KeywordAwait);
        map.insert("break", TokenKind::KeywordBreak);
        map.insert("callconv", TokenKind::KeywordCallconv);
        map.insert("catch", TokenKind::KeywordCatch);
        map.insert("comptime", TokenKind::KeywordCompTime);
        map.insert("const", TokenKind::KeywordConst);
        map.insert("continue", TokenKind::KeywordContinue);
        map.insert("defer", TokenKind::KeywordDefer);
        map.insert("else", TokenKind::KeywordElse);
        map.insert("enum", TokenKind::KeywordEnum);
        map.insert("errdefer", TokenKind::KeywordErrdefer);
        map.insert("error", TokenKind::KeywordError);
        map.insert("export", TokenKind::KeywordExport);
        map.insert("extern", TokenKind::KeywordExtern);
        map.insert("false", TokenKind::KeywordFalse);
        map.insert("fn", TokenKind::KeywordFn);
        map.insert("for", TokenKind::KeywordFor);
        map.insert("if", TokenKind::KeywordIf);
        map.insert("inline", TokenKind::KeywordInline);
        map.insert("linksection", TokenKind::KeywordLinkSection);
        map.insert("noalias", TokenKind::KeywordNoAlias);
        map.insert("noinline", TokenKind::KeywordNoInline);
        map.insert("nosuspend", TokenKind::KeywordNoSuspend);
        map.insert("null", TokenKind::KeywordNull);
        map.insert("opaque", TokenKind::KeywordOpaque);
        map.insert("or", TokenKind::KeywordOr);
        map.insert("orelse", TokenKind::KeywordOrElse);
        map.insert("packed", TokenKind::KeywordPacked);
        map.insert("pub", TokenKind::KeywordPub);
        map.insert("resume", TokenKind::KeywordResume);
        map.insert("return", TokenKind::KeywordReturn);
        map.insert("struct", TokenKind::KeywordStruct);
        map.insert("suspend", TokenKind::KeywordSuspend);
        map.insert("switch", TokenKind::KeywordSwitch);
        map.insert("test", TokenKind::KeywordTest);
        map.insert("threadlocal", TokenKind::KeywordThreadLocal);
        map.insert("true", TokenKind::KeywordTrue);
        map.insert("try", TokenKind::KeywordTry);
        map.insert("undefined", TokenKind::KeywordUndefined);
        map.insert("union", TokenKind::KeywordUnion);
        map.insert("unreachable", TokenKind::KeywordUnreachable);
        map.insert("usingnamespace", TokenKind::KeywordUsingNamespace);
        map.insert("var", TokenKind::KeywordVar);
        map.insert("volatile", TokenKind::KeywordVolatile);
        map.insert("while", TokenKind::KeywordWhile);
        map
    };
}

/// Every kind of token the parser understands.
///
/// `Eof` must stay the last variant: `TokenKind::COUNT` is derived from it
/// and sizes the dense operator tables in `parser::lookups`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Literals and names
    Identifier,
    Builtin,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    MultilineStringLiteral,
    CharLiteral,
    DocComment,
    ContainerDocComment,

    // Punctuation
    Ampersand,      // &
    AmpersandEq,    // &=
    Arrow,          // ->
    Bang,           // !
    BangEq,         // !=
    Pipe,           // |
    PipePipe,       // ||
    PipeEq,         // |=
    Caret,          // ^
    CaretEq,        // ^=
    Colon,          // :
    Comma,          // ,
    Dot,            // .
    DotStar,        // .*
    Ellipsis2,      // ..
    Ellipsis3,      // ...
    Eq,             // =
    EqEq,           // ==
    FatArrow,       // =>
    Less,           // <
    LessEq,         // <=
    LessLess,       // <<
    LessLessEq,     // <<=
    Greater,        // >
    GreaterEq,      // >=
    GreaterGreater, // >>
    GreaterGreaterEq, // >>=
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Minus,          // -
    MinusEq,        // -=
    MinusPercent,   // -%
    MinusPercentEq, // -%=
    Percent,        // %
    PercentEq,      // %=
    Plus,           // +
    PlusEq,         // +=
    PlusPercent,    // +%
    PlusPercentEq,  // +%=
    PlusPlus,       // ++
    QuestionMark,   // ?
    Semicolon,      // ;
    Slash,          // /
    SlashEq,        // /=
    Star,           // *
    StarEq,         // *=
    StarPercent,    // *%
    StarPercentEq,  // *%=
    StarStar,       // **
    Tilde,          // ~

    // Reserved
    KeywordAlign,
    KeywordAllowZero,
    KeywordAnd,
    KeywordAnyFrame,
    KeywordAnyType,
    KeywordAsm,
    KeywordAsync,
    KeywordAwait,
    KeywordBreak,
    KeywordCallconv,
    KeywordCatch,
    KeywordCompTime,
    KeywordConst,
    KeywordContinue,
    KeywordDefer,
    KeywordElse,
    KeywordEnum,
    KeywordErrdefer,
    KeywordError,
    KeywordExport,
    KeywordExtern,
    KeywordFalse,
    KeywordFn,
    KeywordFor,
    KeywordIf,
    KeywordInline,
    KeywordLinkSection,
    KeywordNoAlias,
    KeywordNoInline,
    KeywordNoSuspend,
    KeywordNull,
    KeywordOpaque,
    KeywordOr,
    KeywordOrElse,
    KeywordPacked,
    KeywordPub,
    KeywordResume,
    KeywordReturn,
    KeywordStruct,
    KeywordSuspend,
    KeywordSwitch,
    KeywordTest,
    KeywordThreadLocal,
    KeywordTrue,
    KeywordTry,
    KeywordUndefined,
    KeywordUnion,
    KeywordUnreachable,
    KeywordUsingNamespace,
    KeywordVar,
    KeywordVolatile,
    KeywordWhile,

    Eof,
}

impl TokenKind {
    pub const COUNT: usize = TokenKind::Eof as usize + 1;

    /// Surface spelling of the token kind, as shown in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::Builtin => "Builtin",
            TokenKind::IntLiteral => "IntLiteral",
            TokenKind::FloatLiteral => "FloatLiteral",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::MultilineStringLiteral => "MultilineStringLiteral",
            TokenKind::CharLiteral => "CharLiteral",
            TokenKind::DocComment => "DocComment",
            TokenKind::ContainerDocComment => "ContainerDocComment",
            TokenKind::Ampersand => "&",
            TokenKind::AmpersandEq => "&=",
            TokenKind::Arrow => "->",
            TokenKind::Bang => "!",
            TokenKind::BangEq => "!=",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            TokenKind::PipeEq => "|=",
            TokenKind::Caret => "^",
            TokenKind::CaretEq => "^=",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotStar => ".*",
            TokenKind::Ellipsis2 => "..",
            TokenKind::Ellipsis3 => "...",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::FatArrow => "=>",
            TokenKind::Less => "<",
            TokenKind::LessEq => "<=",
            TokenKind::LessLess => "<<",
            TokenKind::LessLessEq => "<<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEq => ">=",
            TokenKind::GreaterGreater => ">>",
            TokenKind::GreaterGreaterEq => ">>=",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Minus => "-",
            TokenKind::MinusEq => "-=",
            TokenKind::MinusPercent => "-%",
            TokenKind::MinusPercentEq => "-%=",
            TokenKind::Percent => "%",
            TokenKind::PercentEq => "%=",
            TokenKind::Plus => "+",
            TokenKind::PlusEq => "+=",
            TokenKind::PlusPercent => "+%",
            TokenKind::PlusPercentEq => "+%=",
            TokenKind::PlusPlus => "++",
            TokenKind::QuestionMark => "?",
            TokenKind::Semicolon => ";",
            TokenKind::Slash => "/",
            TokenKind::SlashEq => "/=",
            TokenKind::Star => "*",
            TokenKind::StarEq => "*=",
            TokenKind::StarPercent => "*%",
            TokenKind::StarPercentEq => "*%=",
            TokenKind::StarStar => "**",
            TokenKind::Tilde => "~",
            TokenKind::KeywordAlign => "align",
            TokenKind::KeywordAllowZero => "allowzero",
            TokenKind::KeywordAnd => "and",
            TokenKind::KeywordAnyFrame => "anyframe",
            TokenKind::KeywordAnyType => "anytype",
            TokenKind::KeywordAsm => "asm",
            TokenKind::KeywordAsync => "async",
            TokenKind::KeywordAwait => "await",
            TokenKind::KeywordBreak => "break",
            TokenKind::KeywordCallconv => "callconv",
            TokenKind::KeywordCatch => "catch",
            TokenKind::KeywordCompTime => "comptime",
            TokenKind::KeywordConst => "const",
            TokenKind::KeywordContinue => "continue",
            TokenKind::KeywordDefer => "defer",
            TokenKind::KeywordElse => "else",
            TokenKind::KeywordEnum => "enum",
            TokenKind::KeywordErrdefer => "errdefer",
            TokenKind::KeywordError => "error",
            TokenKind::KeywordExport => "export",
            TokenKind::KeywordExtern => "extern",
            TokenKind::KeywordFalse => "false",
            TokenKind::KeywordFn => "fn",
            TokenKind::KeywordFor => "for",
            TokenKind::KeywordIf => "if",
            TokenKind::KeywordInline => "inline",
            TokenKind::KeywordLinkSection => "linksection",
            TokenKind::KeywordNoAlias => "noalias",
            TokenKind::KeywordNoInline => "noinline",
            TokenKind::KeywordNoSuspend => "nosuspend",
            TokenKind::KeywordNull => "null",
            TokenKind::KeywordOpaque => "opaque",
            TokenKind::KeywordOr => "or",
            TokenKind::KeywordOrElse => "orelse",
            TokenKind::KeywordPacked => "packed",
            TokenKind::KeywordPub => "pub",
            TokenKind::KeywordResume => "resume",
            TokenKind::KeywordReturn => "return",
            TokenKind::KeywordStruct => "struct",
            TokenKind::KeywordSuspend => "suspend",
            TokenKind::KeywordSwitch => "switch",
            TokenKind::KeywordTest => "test",
            TokenKind::KeywordThreadLocal => "threadlocal",
            TokenKind::KeywordTrue => "true",
            TokenKind::KeywordTry => "try",
            TokenKind::KeywordUndefined => "undefined",
            TokenKind::KeywordUnion => "union",
            TokenKind::KeywordUnreachable => "unreachable",
            TokenKind::KeywordUsingNamespace => "usingnamespace",
            TokenKind::KeywordVar => "var",
            TokenKind::KeywordVolatile => "volatile",
            TokenKind::KeywordWhile => "while",
            TokenKind::Eof => "EOF",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Integer literal value, kept in its source radix.
///
/// Digits never contain `_` separators or the radix prefix. Arithmetic on
/// the value belongs to later stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    pub radix: u32,
    pub digits: String,
}

impl BigInt {
    pub fn new(radix: u32, digits: impl Into<String>) -> Self {
        BigInt {
            radix,
            digits: digits.into(),
        }
    }

    /// Returns the value if it fits in a `u128`.
    pub fn to_u128(&self) -> Option<u128> {
        u128::from_str_radix(&self.digits, self.radix).ok()
    }
}

/// Float literal value as written in the source, without `_` separators.
///
/// `overflow` is set by the tokenizer when a decimal literal does not fit
/// in an `f64`; the parser carries it without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigFloat {
    pub radix: u32,
    pub text: String,
    pub overflow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenPayload {
    None,
    Int(BigInt),
    Float(BigFloat),
    Str(String),
    Char(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub payload: TokenPayload,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.payload {
            TokenPayload::None => write!(f, "{:?}", self.kind),
            TokenPayload::Int(value) => write!(f, "{:?} ({})", self.kind, value.digits),
            TokenPayload::Float(value) => write!(f, "{:?} ({})", self.kind, value.text),
            TokenPayload::Str(value) => write!(f, "{:?} ({:?})", self.kind, value),
            TokenPayload::Char(value) => write!(f, "{:?} ({})", self.kind, value),
        }
    }
}

impl Token {
    /// Text carried by identifier, builtin, string and doc comment tokens.
    pub fn text(&self) -> &str {
        match &self.payload {
            TokenPayload::Str(value) => value,
            _ => "",
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
