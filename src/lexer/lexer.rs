use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_PUNCT, MK_TOKEN,
};

use super::tokens::{BigFloat, BigInt, Token, TokenKind, TokenPayload, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Patterns tried in order at the cursor; the first match wins, so longer
    /// punctuation must precede its prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern {
            regex: pattern(r"\s+"),
            handler: skip_handler,
        },
        RegexPattern {
            regex: pattern(r"//[^\n]*"),
            handler: comment_handler,
        },
        RegexPattern {
            regex: pattern(r"\\\\[^\n]*"),
            handler: multiline_string_handler,
        },
        RegexPattern {
            regex: pattern(r#"@"(?:[^"\\\n]|\\.)*""#),
            handler: quoted_identifier_handler,
        },
        RegexPattern {
            regex: pattern(r"@[a-zA-Z_][a-zA-Z0-9_]*"),
            handler: builtin_handler,
        },
        RegexPattern {
            regex: pattern(r"[a-zA-Z_][a-zA-Z0-9_]*"),
            handler: symbol_handler,
        },
        RegexPattern {
            regex: pattern(concat!(
                r"0x[0-9a-fA-F_]+",
                r"(?:\.[0-9a-fA-F_]+(?:[pP][-+]?[0-9_]+)?|[pP][-+]?[0-9_]+)"
            )),
            handler: float_handler,
        },
        RegexPattern {
            regex: pattern(r"[0-9][0-9_]*(?:\.[0-9][0-9_]*(?:[eE][-+]?[0-9_]+)?|[eE][-+]?[0-9_]+)"),
            handler: float_handler,
        },
        RegexPattern {
            regex: pattern(r"0x[0-9a-fA-F_]+|0o[0-7_]+|0b[01_]+|[0-9][0-9_]*"),
            handler: int_handler,
        },
        RegexPattern {
            regex: pattern(r#""(?:[^"\\\n]|\\.)*""#),
            handler: string_handler,
        },
        RegexPattern {
            regex: pattern(r"'(?:[^'\\\n]|\\u\{[0-9a-fA-F]+\}|\\x[0-9a-fA-F]{2}|\\.)'"),
            handler: char_handler,
        },
        RegexPattern {
            regex: pattern(r#"["']"#),
            handler: unterminated_handler,
        },
        MK_PUNCT!("...", TokenKind::Ellipsis3),
        MK_PUNCT!("..", TokenKind::Ellipsis2),
        MK_PUNCT!(".*", TokenKind::DotStar),
        MK_PUNCT!(".", TokenKind::Dot),
        MK_PUNCT!("<<=", TokenKind::LessLessEq),
        MK_PUNCT!("<<", TokenKind::LessLess),
        MK_PUNCT!("<=", TokenKind::LessEq),
        MK_PUNCT!("<", TokenKind::Less),
        MK_PUNCT!(">>=", TokenKind::GreaterGreaterEq),
        MK_PUNCT!(">>", TokenKind::GreaterGreater),
        MK_PUNCT!(">=", TokenKind::GreaterEq),
        MK_PUNCT!(">", TokenKind::Greater),
        MK_PUNCT!("==", TokenKind::EqEq),
        MK_PUNCT!("=>", TokenKind::FatArrow),
        MK_PUNCT!("=", TokenKind::Eq),
        MK_PUNCT!("!=", TokenKind::BangEq),
        MK_PUNCT!("!", TokenKind::Bang),
        MK_PUNCT!("||", TokenKind::PipePipe),
        MK_PUNCT!("|=", TokenKind::PipeEq),
        MK_PUNCT!("|", TokenKind::Pipe),
        MK_PUNCT!("&=", TokenKind::AmpersandEq),
        MK_PUNCT!("&", TokenKind::Ampersand),
        MK_PUNCT!("^=", TokenKind::CaretEq),
        MK_PUNCT!("^", TokenKind::Caret),
        MK_PUNCT!("->", TokenKind::Arrow),
        MK_PUNCT!("-%=", TokenKind::MinusPercentEq),
        MK_PUNCT!("-%", TokenKind::MinusPercent),
        MK_PUNCT!("-=", TokenKind::MinusEq),
        MK_PUNCT!("-", TokenKind::Minus),
        MK_PUNCT!("+%=", TokenKind::PlusPercentEq),
        MK_PUNCT!("+%", TokenKind::PlusPercent),
        MK_PUNCT!("++", TokenKind::PlusPlus),
        MK_PUNCT!("+=", TokenKind::PlusEq),
        MK_PUNCT!("+", TokenKind::Plus),
        MK_PUNCT!("*%=", TokenKind::StarPercentEq),
        MK_PUNCT!("*%", TokenKind::StarPercent),
        MK_PUNCT!("**", TokenKind::StarStar),
        MK_PUNCT!("*=", TokenKind::StarEq),
        MK_PUNCT!("*", TokenKind::Star),
        MK_PUNCT!("%=", TokenKind::PercentEq),
        MK_PUNCT!("%", TokenKind::Percent),
        MK_PUNCT!("/=", TokenKind::SlashEq),
        MK_PUNCT!("/", TokenKind::Slash),
        MK_PUNCT!("~", TokenKind::Tilde),
        MK_PUNCT!("?", TokenKind::QuestionMark),
        MK_PUNCT!(":", TokenKind::Colon),
        MK_PUNCT!(";", TokenKind::Semicolon),
        MK_PUNCT!(",", TokenKind::Comma),
        MK_PUNCT!("(", TokenKind::LParen),
        MK_PUNCT!(")", TokenKind::RParen),
        MK_PUNCT!("[", TokenKind::LBracket),
        MK_PUNCT!("]", TokenKind::RBracket),
        MK_PUNCT!("{", TokenKind::LBrace),
        MK_PUNCT!("}", TokenKind::RBrace),
    ];
}

fn pattern(source: &str) -> Regex {
    Regex::new(&format!("^(?:{})", source)).expect("lexer pattern is a valid regex")
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.pos as u32, self.line, self.column)
    }

    /// Moves the cursor forward by `n` bytes, tracking lines and columns.
    pub fn advance_n(&mut self, n: usize) {
        for ch in self.source[self.pos..self.pos + n].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += n;
    }

    /// Pushes a token covering the next `len` bytes and advances past it.
    pub fn push(&mut self, kind: TokenKind, len: usize, payload: TokenPayload) {
        let start = self.position();
        self.advance_n(len);
        let end = self.position();
        self.tokens.push(MK_TOKEN!(kind, Span { start, end }, payload));
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn error(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.position())
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_n(matched.len());
    Ok(())
}

fn comment_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    if let Some(text) = matched.strip_prefix("//!") {
        lexer.push(
            TokenKind::ContainerDocComment,
            matched.len(),
            TokenPayload::Str(text.trim_end_matches('\r').to_string()),
        );
    } else if matched.starts_with("///") && !matched.starts_with("////") {
        lexer.push(
            TokenKind::DocComment,
            matched.len(),
            TokenPayload::Str(matched[3..].trim_end_matches('\r').to_string()),
        );
    } else {
        lexer.advance_n(matched.len());
    }
    Ok(())
}

fn multiline_string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let line = matched[2..].trim_end_matches('\r');

    // Consecutive `\\` lines separated only by whitespace form one literal.
    if let Some(previous) = lexer.tokens.last() {
        let gap = &lexer.source[previous.span.end.offset as usize..lexer.pos];
        if previous.kind == TokenKind::MultilineStringLiteral && gap.trim().is_empty() {
            let line = line.to_string();
            lexer.advance_n(matched.len());
            let end = lexer.position();
            if let Some(previous) = lexer.tokens.last_mut() {
                if let TokenPayload::Str(text) = &mut previous.payload {
                    text.push('\n');
                    text.push_str(&line);
                }
                previous.span.end = end;
            }
            return Ok(());
        }
    }

    lexer.push(
        TokenKind::MultilineStringLiteral,
        matched.len(),
        TokenPayload::Str(line.to_string()),
    );
    Ok(())
}

fn quoted_identifier_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let name = decode_escapes(&matched[2..matched.len() - 1], lexer)?;
    lexer.push(TokenKind::Identifier, matched.len(), TokenPayload::Str(name));
    Ok(())
}

fn builtin_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.push(
        TokenKind::Builtin,
        matched.len(),
        TokenPayload::Str(matched[1..].to_string()),
    );
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        lexer.push(*kind, matched.len(), TokenPayload::None);
    } else {
        lexer.push(
            TokenKind::Identifier,
            matched.len(),
            TokenPayload::Str(matched.to_string()),
        );
    }
    Ok(())
}

fn int_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let (radix, digits) = split_radix(matched);
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() {
        return Err(lexer.error(ErrorImpl::UnrecognisedToken {
            token: matched.to_string(),
        }));
    }

    lexer.push(
        TokenKind::IntLiteral,
        matched.len(),
        TokenPayload::Int(BigInt::new(radix, digits)),
    );
    Ok(())
}

fn float_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let (radix, _) = split_radix(matched);
    let text: String = matched.chars().filter(|c| *c != '_').collect();
    let overflow = radix == 10 && text.parse::<f64>().map_or(false, |value| value.is_infinite());

    lexer.push(
        TokenKind::FloatLiteral,
        matched.len(),
        TokenPayload::Float(BigFloat {
            radix,
            text,
            overflow,
        }),
    );
    Ok(())
}

fn split_radix(literal: &str) -> (u32, &str) {
    if let Some(digits) = literal.strip_prefix("0x") {
        (16, digits)
    } else if let Some(digits) = literal.strip_prefix("0o") {
        (8, digits)
    } else if let Some(digits) = literal.strip_prefix("0b") {
        (2, digits)
    } else {
        (10, literal)
    }
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let value = decode_escapes(&matched[1..matched.len() - 1], lexer)?;
    lexer.push(TokenKind::StringLiteral, matched.len(), TokenPayload::Str(value));
    Ok(())
}

fn char_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let body = &matched[1..matched.len() - 1];
    let code = if let Some(hex) = body.strip_prefix("\\x") {
        u32::from_str_radix(hex, 16).map_err(|_| {
            lexer.error(ErrorImpl::InvalidEscape {
                sequence: body.to_string(),
            })
        })?
    } else {
        let decoded = decode_escapes(body, lexer)?;
        decoded.chars().next().map_or(0, |ch| ch as u32)
    };

    lexer.push(TokenKind::CharLiteral, matched.len(), TokenPayload::Char(code));
    Ok(())
}

fn unterminated_handler(lexer: &mut Lexer, _matched: &str) -> Result<(), Error> {
    Err(lexer.error(ErrorImpl::UnterminatedLiteral))
}

fn decode_escapes(body: &str, lexer: &Lexer) -> Result<String, Error> {
    let mut result = String::new();
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let invalid = |sequence: String| lexer.error(ErrorImpl::InvalidEscape { sequence });

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('\'') => result.push('\''),
            Some('"') => result.push('"'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                let byte = u8::from_str_radix(&hex, 16)
                    .map_err(|_| invalid(format!("\\x{}", hex)))?;
                result.push(byte as char);
            }
            Some('u') => {
                if chars.next() != Some('{') {
                    return Err(invalid(String::from("\\u")));
                }
                let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| invalid(format!("\\u{{{}}}", hex)))?;
                result.push(decoded);
            }
            Some(other) => return Err(invalid(format!("\\{}", other))),
            None => return Err(invalid(String::from("\\"))),
        }
    }

    Ok(result)
}

/// Converts source text into tokens. The result always ends with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let remainder = lex.remainder();
        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(remainder)
                .map(|m| (pattern.handler, m.as_str()))
        });

        match matched {
            Some((handler, text)) if !text.is_empty() => handler(&mut lex, text)?,
            _ => {
                let token = remainder.chars().next().map(String::from).unwrap_or_default();
                return Err(lex.error(ErrorImpl::UnrecognisedToken { token }));
            }
        }
    }

    let end = lex.position();
    lex.tokens.push(MK_TOKEN!(
        TokenKind::Eof,
        Span { start: end, end },
        TokenPayload::None
    ));

    tracing::trace!(count = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}
