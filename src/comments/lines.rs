//! Per-call line tables: the line index and the comment table.
use crate::parser::syntax::CommentToken;

/// What a physical line holds, for the backward doc scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    /// First and last non-whitespace bytes both sit inside comments.
    CommentOnly,
    Code,
}

/// Source split on `\n` with each line classified. Lines are 1-based.
#[derive(Debug)]
pub struct LineIndex<'a> {
    lines: Vec<&'a str>,
    classes: Vec<LineClass>,
}

impl<'a> LineIndex<'a> {
    /// `comments` must be sorted by `start_byte`.
    pub fn build(source: &'a str, comments: &[CommentToken]) -> Self {
        let mut lines = Vec::new();
        let mut classes = Vec::new();
        let mut offset = 0;
        for line in source.split('\n') {
            classes.push(classify(line, offset, comments));
            lines.push(line);
            offset += line.len() + 1;
        }
        Self { lines, classes }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Class of a line; out-of-range lines read as blank.
    pub fn class(&self, line: usize) -> LineClass {
        line.checked_sub(1)
            .and_then(|i| self.classes.get(i))
            .copied()
            .unwrap_or(LineClass::Blank)
    }
}

fn classify(line: &str, offset: usize, comments: &[CommentToken]) -> LineClass {
    let Some(first) = line.find(|c: char| !c.is_whitespace()) else {
        return LineClass::Blank;
    };
    let last = line.rfind(|c: char| !c.is_whitespace()).unwrap_or(first);
    if in_comment(comments, offset + first) && in_comment(comments, offset + last) {
        LineClass::CommentOnly
    } else {
        LineClass::Code
    }
}

fn in_comment(comments: &[CommentToken], byte: usize) -> bool {
    let idx = comments.partition_point(|c| c.start_byte <= byte);
    idx > 0 && comments[idx - 1].end_byte > byte
}

/// Comment text keyed by line, one slot per line plus an unused slot 0.
///
/// When two comments start on the same line, the later one wins.
#[derive(Debug)]
pub struct CommentTable<'a> {
    slots: Vec<Option<&'a str>>,
}

impl<'a> CommentTable<'a> {
    pub fn build(line_count: usize, comments: &'a [CommentToken]) -> Self {
        let mut slots = vec![None; line_count + 1];
        for comment in comments {
            if let Some(slot) = slots.get_mut(comment.line) {
                *slot = Some(comment.text.as_str());
            }
        }
        Self { slots }
    }

    pub fn get(&self, line: usize) -> Option<&'a str> {
        self.slots.get(line).copied().flatten()
    }
}
