#![allow(clippy::module_inception)]

use std::{
    fmt::Display,
    io::IsTerminal,
    path::Path,
};

use colored::Colorize;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in the source text.
///
/// `line` and `column` are 1-based, `offset` is the byte offset from the
/// start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    pub fn null() -> Self {
        Position::new(0, 1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Opaque handle for the compilation unit a node was parsed from.
///
/// Later stages use it to map nodes back to their file and source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UnitId(pub u32);

/// Whether rendered diagnostics use terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrColor {
    /// Color only when stderr is a terminal.
    #[default]
    Auto,
    On,
    Off,
}

impl ErrColor {
    pub fn enabled(self) -> bool {
        match self {
            ErrColor::Auto => std::io::stderr().is_terminal(),
            ErrColor::On => true,
            ErrColor::Off => false,
        }
    }
}

/// Controls how a syntax error is rendered. It never changes what is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticConfig {
    pub color: ErrColor,
}

impl DiagnosticConfig {
    pub fn new(color: ErrColor) -> Self {
        DiagnosticConfig { color }
    }
}

/// Returns the 1-based line `line` of `source` without its line terminator.
pub fn get_line(source: &str, line: u32) -> &str {
    source
        .split('\n')
        .nth(line.saturating_sub(1) as usize)
        .map(|text| text.trim_end_matches('\r'))
        .unwrap_or("")
}

/// Renders an error as a source excerpt with a marker under the offending column.
///
/// ```text
/// error: ExpectedToken (expected token ')', found '{')
/// -> main.zig:3:12
///   |
/// 3 | if (a == b {
///   | -----------^
/// ```
pub fn render_error(error: &Error, source: &str, file: &Path) -> String {
    let color = error.color().enabled();
    let position = error.get_position();
    let line_text = get_line(source, position.line);

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    let label = if color {
        "error".red().bold().to_string()
    } else {
        String::from("error")
    };
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("{}: {}\n", label, error.get_error_name()));
    } else {
        out.push_str(&format!(
            "{}: {} ({})\n",
            label,
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!(
        "-> {}:{}\n",
        file.as_os_str().to_string_lossy(),
        position
    ));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = (position.column as usize).saturating_sub(1);
    let arrows = column.saturating_sub(removed_whitespace) + 1;
    let marker = format!("{:->arrows$}", "^");
    let marker = if color {
        marker.red().bold().to_string()
    } else {
        marker
    };
    out.push_str(&format!("{:>padding$} {}\n", "|", marker));

    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (&string[start..], start)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        lexer::tokens::TokenKind,
        ErrColor, Position,
    };

    #[test]
    fn test_get_line() {
        let source = "const a = 1;\r\nconst b = 2;\n\nfn c() void {}\n";
        assert_eq!(super::get_line(source, 1), "const a = 1;");
        assert_eq!(super::get_line(source, 2), "const b = 2;");
        assert_eq!(super::get_line(source, 3), "");
        assert_eq!(super::get_line(source, 4), "fn c() void {}");
        assert_eq!(super::get_line(source, 40), "");
    }

    #[test]
    fn test_render_error_without_color() {
        let source = "fn main() void {\n    if (a == b {\n}\n";
        let error = Error::new(
            ErrorImpl::ExpectedToken {
                expected: TokenKind::RParen,
                found: TokenKind::LBrace,
            },
            Position::new(32, 2, 16),
        )
        .with_color(ErrColor::Off);

        let rendered = super::render_error(&error, source, &PathBuf::from("main.zig"));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "error: ExpectedToken (expected token ')', found '{')"
        );
        assert_eq!(lines[1], "-> main.zig:2:16");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 | if (a == b {");
        assert_eq!(lines[4], "  | -----------^");
    }
}
