//! Owned syntax model produced from a tree-sitter Go tree.
//!
//! The model keeps only what comment association needs: owning lines, node
//! kinds, aggregate member lists, leading doc groups and the comment tokens.
//! It holds no borrow of the tree or the source, so a parsed file can be cached
//! behind an `Arc` and shared between threads.

/// A lexical comment token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentToken {
    /// 1-based line of the first byte of the comment.
    pub line: usize,
    /// 1-based line of the last byte of the comment.
    pub end_line: usize,
    pub start_byte: usize,
    pub end_byte: usize,
    /// Verbatim text including `//` or `/* */` delimiters.
    pub text: String,
    /// Only whitespace precedes the comment on its first line.
    pub own_line: bool,
}

/// Contiguous run of comments directly above a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// Start lines of the comments in the run, ascending.
    pub lines: Vec<usize>,
}

/// Keyword introducing a general declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKeyword {
    Type,
    Const,
    Var,
}

impl GroupKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKeyword::Type => "type",
            GroupKeyword::Const => "const",
            GroupKeyword::Var => "var",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Struct field.
    Field,
    /// Interface method signature.
    Method,
    /// Embedded interface or type constraint inside an interface.
    Embedded,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Method => "method",
            MemberKind::Embedded => "embedded",
        }
    }
}

/// A field of a struct type or an element of an interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub line: usize,
}

/// One spec of a `type`, `const` or `var` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    pub line: usize,
    /// Members when the spec declares a struct or interface type.
    pub members: Option<Vec<Member>>,
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// Function or method declaration.
    Func {
        line: usize,
        doc: Option<DocBlock>,
    },
    /// `type`, `const` or `var` declaration, grouped or not.
    Group {
        keyword: GroupKeyword,
        doc: Option<DocBlock>,
        specs: Vec<Spec>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Plain,
    /// Struct or interface type literal with its members.
    Aggregate(Vec<Member>),
}

/// A named, non-comment node of the generic tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Grammar kind, e.g. `if_statement` or `call_expression`.
    pub kind: &'static str,
    pub line: usize,
    pub shape: Shape,
}

/// A parsed Go file, lowered for comment association.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxFile {
    pub decls: Vec<Decl>,
    /// Every named node in pre-order, flattened so that walking it needs no
    /// recursion however deeply the source nests.
    pub nodes: Vec<SyntaxNode>,
    /// Comment tokens sorted by `start_byte`.
    pub comments: Vec<CommentToken>,
}
