//! Go CST walker: converts a tree-sitter Go parse tree into a [`SyntaxFile`].
use crate::parser::syntax::{
    CommentToken, Decl, DocBlock, GroupKeyword, Member, MemberKind, Shape, Spec, SyntaxFile,
    SyntaxNode,
};
use crate::parser::treesitter::cursor::{node_text, span_end_line, span_start_line, starts_own_line};

/// Walk context accumulator filled during the cursor walk.
struct GoWalkCtx<'s> {
    source: &'s str,
    nodes: Vec<SyntaxNode>,
    comments: Vec<CommentToken>,
}

impl GoWalkCtx<'_> {
    fn push_comment(&mut self, node: &tree_sitter::Node) {
        self.comments.push(CommentToken {
            line: span_start_line(node),
            end_line: span_end_line(node),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            text: node_text(node, self.source).to_string(),
            own_line: starts_own_line(self.source, node.start_byte()),
        });
    }

    /// Lower a single named node.
    fn visit(&mut self, node: &tree_sitter::Node) {
        let shape = match node.kind() {
            "comment" => {
                self.push_comment(node);
                return;
            }
            // Grammar-only wrapper with no Go AST counterpart; its statements
            // belong directly to the enclosing block.
            "statement_list" => return,
            "struct_type" => Shape::Aggregate(struct_members(node)),
            "interface_type" => Shape::Aggregate(interface_members(node)),
            _ => Shape::Plain,
        };

        self.nodes.push(SyntaxNode {
            kind: node.kind(),
            line: span_start_line(node),
            shape,
        });
    }
}

/// Walk a parsed Go tree and produce the lowered file.
pub fn walk_go_file(tree: &tree_sitter::Tree, source: &str) -> SyntaxFile {
    let mut ctx = GoWalkCtx {
        source,
        nodes: Vec::new(),
        comments: Vec::new(),
    };

    let root = tree.root_node();
    walk_descendants(&mut ctx, &root);
    ctx.comments.sort_by_key(|c| c.start_byte);

    let mut cursor = root.walk();
    let decls = root
        .named_children(&mut cursor)
        .filter_map(|child| walk_decl(&child, &ctx.comments))
        .collect();

    SyntaxFile {
        decls,
        nodes: ctx.nodes,
        comments: ctx.comments,
    }
}

/// Visit every named descendant of `root` in pre-order.
///
/// Uses a tree cursor instead of recursion so nesting depth is bounded only
/// by memory.
fn walk_descendants(ctx: &mut GoWalkCtx, root: &tree_sitter::Node) {
    let mut cursor = root.walk();
    if !cursor.goto_first_child() {
        return;
    }
    loop {
        let node = cursor.node();
        if node.is_named() {
            ctx.visit(&node);
        }
        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Top-level declarations; imports and stray statements are not declarations.
fn walk_decl(node: &tree_sitter::Node, comments: &[CommentToken]) -> Option<Decl> {
    match node.kind() {
        "function_declaration" | "method_declaration" => Some(Decl::Func {
            line: span_start_line(node),
            doc: leading_doc(node, comments),
        }),
        "type_declaration" => Some(walk_group(node, GroupKeyword::Type, comments)),
        "const_declaration" => Some(walk_group(node, GroupKeyword::Const, comments)),
        "var_declaration" => Some(walk_group(node, GroupKeyword::Var, comments)),
        _ => None,
    }
}

fn walk_group(node: &tree_sitter::Node, keyword: GroupKeyword, comments: &[CommentToken]) -> Decl {
    let mut specs = Vec::new();
    collect_specs(node, &mut specs);
    Decl::Group {
        keyword,
        doc: leading_doc(node, comments),
        specs,
    }
}

fn collect_specs(node: &tree_sitter::Node, specs: &mut Vec<Spec>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "type_spec" | "type_alias" => {
                let members = child
                    .child_by_field_name("type")
                    .and_then(|ty| match ty.kind() {
                        "struct_type" => Some(struct_members(&ty)),
                        "interface_type" => Some(interface_members(&ty)),
                        _ => None,
                    });
                specs.push(Spec {
                    line: span_start_line(&child),
                    members,
                });
            }
            "const_spec" | "var_spec" => specs.push(Spec {
                line: span_start_line(&child),
                members: None,
            }),
            // Newer grammars wrap parenthesized var specs in a list node.
            "var_spec_list" => collect_specs(&child, specs),
            _ => {}
        }
    }
}

fn struct_members(node: &tree_sitter::Node) -> Vec<Member> {
    let mut members = Vec::new();
    let mut cursor = node.walk();
    for list in node.named_children(&mut cursor) {
        if list.kind() != "field_declaration_list" {
            continue;
        }
        let mut list_cursor = list.walk();
        for field in list.named_children(&mut list_cursor) {
            if field.kind() == "field_declaration" {
                members.push(Member {
                    kind: MemberKind::Field,
                    line: span_start_line(&field),
                });
            }
        }
    }
    members
}

fn interface_members(node: &tree_sitter::Node) -> Vec<Member> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| Member {
            kind: match child.kind() {
                "method_elem" | "method_spec" => MemberKind::Method,
                _ => MemberKind::Embedded,
            },
            line: span_start_line(&child),
        })
        .collect()
}

/// The run of own-line comments ending directly above `node`.
///
/// Each comment in the run must end on the line above the start of the next
/// one (or of the declaration). A comment that trails code breaks the run.
fn leading_doc(node: &tree_sitter::Node, comments: &[CommentToken]) -> Option<DocBlock> {
    let start = node.start_byte();
    let before = comments.partition_point(|c| c.start_byte < start);

    let mut top = span_start_line(node);
    let mut lines = Vec::new();
    for comment in comments[..before].iter().rev() {
        if comment.end_line + 1 < top || !comment.own_line {
            break;
        }
        lines.push(comment.line);
        top = comment.line;
    }

    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(DocBlock { lines })
}
