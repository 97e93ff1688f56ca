//! Directive classification
//!
//! Load time and run time recognize different directives, but both go
//! through [`classify`] with the table for their phase. The first entry of
//! the table that matches a line wins.

use crate::script::lines::find_unescaped;

/// The kinds of directive a line can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Task,
    Include,
    Variable,
    Print,
    Call,
    Cmd,
    Exit,
}

/// Directives recognized outside task bodies while loading
pub const LOAD_DIRECTIVES: &[DirectiveKind] = &[
    DirectiveKind::Task,
    DirectiveKind::Include,
    DirectiveKind::Variable,
];

/// Directives recognized while replaying a task body
pub const RUN_DIRECTIVES: &[DirectiveKind] = &[
    DirectiveKind::Print,
    DirectiveKind::Call,
    DirectiveKind::Cmd,
    DirectiveKind::Exit,
];

/// A classified line, borrowing its arguments from the line text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    Task(&'a str),
    Include(&'a str),
    Variable { name: &'a str, value: &'a str },
    Print(&'a str),
    Call(&'a str),
    Cmd(&'a str),
    Exit(i32),
}

impl DirectiveKind {
    /// The leading keyword, for keyword directives
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            DirectiveKind::Task => Some("task"),
            DirectiveKind::Include => Some("include"),
            DirectiveKind::Variable => None,
            DirectiveKind::Print => Some("print"),
            DirectiveKind::Call => Some("call"),
            DirectiveKind::Cmd => Some("cmd"),
            DirectiveKind::Exit => Some("exit"),
        }
    }

    /// Try to read `line` as this kind of directive
    pub fn parse(self, line: &str) -> Option<Directive<'_>> {
        match self {
            DirectiveKind::Variable => parse_variable(line),
            DirectiveKind::Task => self.argument(line).map(Directive::Task),
            DirectiveKind::Include => self.argument(line).map(Directive::Include),
            DirectiveKind::Print => self.argument(line).map(Directive::Print),
            DirectiveKind::Call => self.argument(line).map(Directive::Call),
            DirectiveKind::Cmd => self.argument(line).map(Directive::Cmd),
            DirectiveKind::Exit => self
                .argument(line)
                .map(|code| Directive::Exit(parse_exit_code(code))),
        }
    }

    fn argument(self, line: &str) -> Option<&str> {
        let rest = keyword_argument(line, self.keyword()?)?;
        // `print` text keeps its trailing whitespace
        Some(match self {
            DirectiveKind::Print => rest.trim_start(),
            _ => rest.trim(),
        })
    }
}

/// Classify a preprocessed line against a directive table
pub fn classify<'a>(line: &'a str, table: &[DirectiveKind]) -> Option<Directive<'a>> {
    table.iter().find_map(|kind| kind.parse(line))
}

/// The text after `keyword`, if the line starts with it as a word
fn keyword_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// `name = value`, split at the first unescaped `=`
fn parse_variable(line: &str) -> Option<Directive<'_>> {
    let pos = find_unescaped(line, '=')?;
    Some(Directive::Variable {
        name: line[..pos].trim(),
        value: line[pos + 1..].trim(),
    })
}

/// Read an exit code the way C's `atoi` does: optional sign, then leading
/// digits; anything unparsable is 0
pub fn parse_exit_code(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d)));
    let value = if negative { -magnitude } else { magnitude };

    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
