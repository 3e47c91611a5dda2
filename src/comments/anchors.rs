//! Anchor walker: enumerates anchors in a fixed order and attaches comments.
//!
//! Order is declarations first (phase A), then a pre-order walk over every
//! node (phase B). Struct and interface members are walked whenever their
//! aggregate is reached in either phase.
use smallvec::SmallVec;
use tracing::trace;

use super::lines::{CommentTable, LineClass, LineIndex};
use super::map::CommentsMap;
use super::resolver::resolve;
use crate::options::{ExtractOptions, Lookback};
use crate::parser::syntax::{Decl, DocBlock, Member, Shape, Spec, SyntaxNode};

type Candidates = SmallVec<[usize; 8]>;

/// Mutable state for one extraction call.
pub(crate) struct AnchorWalker<'a, 'v> {
    pub(crate) lines: &'a LineIndex<'a>,
    pub(crate) table: &'a CommentTable<'a>,
    pub(crate) visited: &'v mut [bool],
    pub(crate) options: &'a ExtractOptions,
    pub(crate) map: CommentsMap,
}

impl AnchorWalker<'_, '_> {
    /// Resolve `candidates` for the anchor owning `line`.
    ///
    /// An anchor whose key is already taken is skipped without claiming.
    fn attach(&mut self, line: usize, candidates: &mut Candidates, kind: &'static str) {
        if self.map.contains_line(line) {
            trace!(line, kind, "anchor key already taken");
            return;
        }
        let comments = resolve(candidates, self.table, self.visited);
        if comments.is_empty() {
            return;
        }
        trace!(line, kind, count = comments.len(), "attached comments");
        self.map.insert_first(line, comments);
    }

    /// Phase A: top-level declarations in source order.
    pub(crate) fn walk_decls(&mut self, decls: &[Decl]) {
        for decl in decls {
            match decl {
                Decl::Func { line, doc } => {
                    let mut candidates = self.doc_candidates(*line, doc.as_ref(), self.options.func_lookback);
                    self.attach(*line, &mut candidates, "func");
                }
                Decl::Group { keyword, doc, specs } => {
                    for spec in specs {
                        self.walk_spec(spec, doc.as_ref(), keyword.as_str());
                    }
                }
            }
        }
    }

    fn walk_spec(&mut self, spec: &Spec, doc: Option<&DocBlock>, kind: &'static str) {
        let mut candidates = self.doc_candidates(spec.line, doc, self.options.decl_lookback);
        self.attach(spec.line, &mut candidates, kind);
        if let Some(members) = &spec.members {
            self.walk_members(members);
        }
    }

    /// Owning line plus either the doc block or a backward scan, bounded by `lookback`.
    fn doc_candidates(&self, owning: usize, doc: Option<&DocBlock>, lookback: Lookback) -> Candidates {
        let floor = lookback.floor(owning);
        let mut candidates = Candidates::new();
        candidates.push(owning);
        match doc {
            Some(block) => candidates.extend(
                block
                    .lines
                    .iter()
                    .copied()
                    .filter(|&line| line >= floor && line < owning),
            ),
            None => self.scan_above(owning, floor, &mut candidates),
        }
        candidates.sort_unstable();
        candidates
    }

    /// Walk up from `owning - 1` collecting every line with a comment,
    /// stopping at `floor` or at the first line that is not blank and has no
    /// comment. A blank line also stops the walk.
    ///
    /// A line with code and a trailing comment counts as a comment line; the
    /// inner lines of a block comment are passed over.
    fn scan_above(&self, owning: usize, floor: usize, candidates: &mut Candidates) {
        let mut line = owning.saturating_sub(1);
        while line >= floor && line > 0 {
            match (self.table.get(line), self.lines.class(line)) {
                (Some(_), _) => candidates.push(line),
                (None, LineClass::CommentOnly) => {}
                (None, LineClass::Blank | LineClass::Code) => break,
            }
            line -= 1;
        }
    }

    /// Struct fields and interface elements: own line only.
    fn walk_members(&mut self, members: &[Member]) {
        for member in members {
            let mut candidates = Candidates::new();
            candidates.push(member.line);
            self.attach(member.line, &mut candidates, member.kind.as_str());
        }
    }

    /// Phase B: every node in pre-order, own line and the line above.
    pub(crate) fn walk_nodes(&mut self, nodes: &[SyntaxNode]) {
        for node in nodes {
            let mut candidates = Candidates::new();
            if node.line > 1 {
                candidates.push(node.line - 1);
            }
            candidates.push(node.line);
            self.attach(node.line, &mut candidates, node.kind);

            if let Shape::Aggregate(members) = &node.shape {
                self.walk_members(members);
            }
        }
    }
}
