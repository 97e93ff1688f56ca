//! Line splitting and per-line preprocessing

use std::iter::FusedIterator;

/// Characters that end a line in a script
pub const LINE_ENDINGS: &[char] = &['\r', '\n'];

/// Starts a comment that runs to the end of the line
pub const COMMENT_MARKER: char = '#';

/// Placed right before a comment marker to keep it in the line
pub const ESCAPE: char = '\\';

/// Splits text into lines on a set of delimiter characters
///
/// Forward-only: once a line has been yielded it cannot be revisited, and
/// the iterator is exhausted when the remainder is empty. A `\r\n` pair
/// counts as a single delimiter, and a trailing delimiter does not produce
/// an empty last line.
#[derive(Debug, Clone)]
pub struct LineSplitter<'a> {
    rest: &'a str,
    delimiters: &'a [char],
}

impl<'a> LineSplitter<'a> {
    pub fn new(text: &'a str, delimiters: &'a [char]) -> Self {
        LineSplitter {
            rest: text,
            delimiters,
        }
    }

    /// Split on the standard script line endings
    pub fn lines(text: &'a str) -> Self {
        Self::new(text, LINE_ENDINGS)
    }
}

impl<'a> Iterator for LineSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let delimiters = self.delimiters;
        match self.rest.char_indices().find(|(_, c)| delimiters.contains(c)) {
            Some((pos, delimiter)) => {
                let line = &self.rest[..pos];
                let mut end = pos + delimiter.len_utf8();
                if delimiter == '\r' && self.rest[end..].starts_with('\n') {
                    end += 1;
                }
                self.rest = &self.rest[end..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

impl FusedIterator for LineSplitter<'_> {}

/// Find the first occurrence of `marker` that is not preceded by [`ESCAPE`]
pub fn find_unescaped(line: &str, marker: char) -> Option<usize> {
    let mut previous = None;
    for (pos, c) in line.char_indices() {
        if c == marker && previous != Some(ESCAPE) {
            return Some(pos);
        }
        previous = Some(c);
    }
    None
}

/// Truncate a line at its first unescaped comment marker
///
/// The escape character itself is left in place.
pub fn strip_comment(line: &str) -> &str {
    match find_unescaped(line, COMMENT_MARKER) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Remove leading spaces and tabs
pub fn trim_indent(line: &str) -> &str {
    line.trim_start_matches([' ', '\t'])
}

/// Whether a line starts with a space or tab
pub fn is_indented(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

/// Whether a (comment-stripped) line closes the task body it appears in
pub fn ends_task_body(line: &str) -> bool {
    !line.is_empty() && !is_indented(line)
}
