//! Comment-to-anchor association engine.
//!
//! Given a lowered file, its line index and a zeroed visited set, produces the
//! [`CommentsMap`] for one extraction call. Every comment line is claimed by at
//! most one anchor and every key is written at most once.

mod anchors;
pub mod lines;
mod map;
pub mod resolver;
pub mod visited;

pub use lines::{CommentTable, LineClass, LineIndex};
pub use map::CommentsMap;
pub use visited::{VisitedGuard, VisitedPool};

use crate::options::ExtractOptions;
use crate::parser::syntax::SyntaxFile;
use anchors::AnchorWalker;

/// Attach the comments of `file` to its anchors.
///
/// `visited` must hold `lines.line_count() + 1` unclaimed slots; a shorter
/// buffer only means the lines past its end can never be claimed.
pub fn associate(
    file: &SyntaxFile,
    lines: &LineIndex<'_>,
    file_id: &str,
    options: &ExtractOptions,
    visited: &mut [bool],
) -> CommentsMap {
    let table = CommentTable::build(lines.line_count(), &file.comments);
    let mut walker = AnchorWalker {
        lines,
        table: &table,
        visited,
        options,
        map: CommentsMap::new(file_id),
    };

    walker.walk_decls(&file.decls);
    walker.walk_nodes(&file.nodes);
    walker.map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Lookback;
    use crate::parser::parse_go;

    fn run(source: &str, options: &ExtractOptions) -> CommentsMap {
        let file = parse_go(source, "t.go").unwrap();
        let lines = LineIndex::build(source, &file.comments);
        let mut visited = vec![false; lines.line_count() + 1];
        associate(&file, &lines, "t.go", options, &mut visited)
    }

    fn extract(source: &str) -> CommentsMap {
        run(source, &ExtractOptions::default())
    }

    fn strings(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_doc_comment_attaches_to_func() {
        let map = extract("// purpose\nfunc F() {}\n\n");
        assert_eq!(map.get(2), Some(&strings(&["// purpose"])[..]));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_declaration_claims_own_line_first() {
        let source = "package main\n\nfunc F() { // note\n\tx := 1\n\t_ = x\n}\n";
        let map = extract(source);
        assert_eq!(map.get(3), Some(&strings(&["// note"])[..]));
        assert!(map.get(4).is_none());
    }

    #[test]
    fn test_struct_members_keep_own_comments() {
        let source = "type T struct { // type\n\tA int // a\n\tB string // b\n}\n";
        let map = extract(source);
        assert_eq!(map.get(1), Some(&strings(&["// type"])[..]));
        assert_eq!(map.get(2), Some(&strings(&["// a"])[..]));
        assert_eq!(map.get(3), Some(&strings(&["// b"])[..]));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_blank_line_stops_doc_block() {
        let source = "package main\n\n// far\n\n// near\nfunc F() {}\n";
        let map = extract(source);
        assert_eq!(map.get(6), Some(&strings(&["// near"])[..]));
        assert!(map.iter().all(|(_, c)| !c.contains(&"// far".to_string())));
    }

    #[test]
    fn test_earlier_declaration_keeps_its_trailing_comment() {
        // F's scan reaches line 3, but the var already claimed it.
        let source = "package main\n\nvar x = 1 // x\nfunc F() {}\n";
        let map = extract(source);
        assert_eq!(map.get(3), Some(&strings(&["// x"])[..]));
        assert!(map.get(4).is_none());
    }

    #[test]
    fn test_scan_passes_code_lines_with_comments() {
        let source = "func F() {\n\tx := 1 // one\n\t_ = x } // end\nfunc G() {}\n";
        let map = extract(source);
        assert_eq!(map.get(4), Some(&strings(&["// one", "// end"])[..]));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_scan_stops_at_code_without_comment() {
        let source = "package main\n\nfunc F() {\n\tx := 1 // one\n\t_ = x\n} // end\nfunc G() {}\n";
        let map = extract(source);
        assert_eq!(map.get(7), Some(&strings(&["// end"])[..]));
        assert_eq!(map.get(4), Some(&strings(&["// one"])[..]));
    }

    #[test]
    fn test_deeply_nested_expression() {
        let depth = 5000;
        let source = format!(
            "package main\n\nvar x = {}1{} // x\n",
            "(".repeat(depth),
            ")".repeat(depth)
        );
        let map = extract(&source);
        assert_eq!(map.get(3), Some(&strings(&["// x"])[..]));
        assert_eq!(map.len(), 1);
    }

    fn long_doc(count: usize) -> String {
        let mut source = String::from("package main\n\n");
        for i in 0..count {
            source.push_str(&format!("// doc {i}\n"));
        }
        source.push_str("func F() {}\n");
        source
    }

    #[test]
    fn test_func_lookback_is_bounded() {
        let map = extract(&long_doc(12));
        // Comments on lines 3..=14, func on line 15.
        let expected: Vec<String> = (2..12).map(|i| format!("// doc {i}")).collect();
        assert_eq!(map.get(15), Some(&expected[..]));
        assert_eq!(map.comment_count(), 10);
    }

    #[test]
    fn test_unbounded_lookback_takes_whole_block() {
        let map = run(&long_doc(12), &ExtractOptions::unbounded());
        assert_eq!(map.get(15).map(<[String]>::len), Some(12));
    }

    #[test]
    fn test_decl_lookback_is_bounded() {
        let mut source = String::from("package main\n\n");
        for i in 0..7 {
            source.push_str(&format!("// doc {i}\n"));
        }
        source.push_str("type T int\n");
        let map = extract(&source);
        let expected: Vec<String> = (2..7).map(|i| format!("// doc {i}")).collect();
        assert_eq!(map.get(10), Some(&expected[..]));
    }

    #[test]
    fn test_custom_lookback() {
        let options = ExtractOptions {
            func_lookback: Lookback::Lines(1),
            ..ExtractOptions::default()
        };
        let map = run("// a\n// b\nfunc F() {}\n", &options);
        assert_eq!(map.get(3), Some(&strings(&["// b"])[..]));
    }

    #[test]
    fn test_statement_takes_line_above() {
        let source = "package main\n\nfunc F() {\n\t// step one\n\tx := 1\n\n\t// dangling\n\n\t_ = x // use\n}\n";
        let map = extract(source);
        assert_eq!(map.get(5), Some(&strings(&["// step one"])[..]));
        assert_eq!(map.get(9), Some(&strings(&["// use"])[..]));
        assert!(map.iter().all(|(_, c)| !c.contains(&"// dangling".to_string())));
    }

    #[test]
    fn test_interface_methods() {
        let source = "package main\n\n// Reader reads.\ntype Reader interface {\n\tRead() error // read\n\t// Close closes.\n\tClose() error\n}\n";
        let map = extract(source);
        assert_eq!(map.get(4), Some(&strings(&["// Reader reads."])[..]));
        assert_eq!(map.get(5), Some(&strings(&["// read"])[..]));
        assert_eq!(map.get(7), Some(&strings(&["// Close closes."])[..]));
    }

    #[test]
    fn test_grouped_const_doc_goes_to_first_spec() {
        let source = "package main\n\n// Colors.\nconst (\n\tRed = iota // red\n\tGreen\n)\n";
        let map = extract(source);
        assert_eq!(map.get(5), Some(&strings(&["// Colors.", "// red"])[..]));
        assert!(map.get(4).is_none());
        assert!(map.get(6).is_none());
    }

    #[test]
    fn test_block_comment_doc() {
        let source = "package main\n\n/*\nF does things.\n*/\nfunc F() {}\n";
        let map = extract(source);
        assert_eq!(map.get(6), Some(&strings(&["/*\nF does things.\n*/"])[..]));
    }

    #[test]
    fn test_inline_struct_in_function_body() {
        let source = "package main\n\nfunc F() {\n\tvar v struct {\n\t\tX int // x\n\t}\n\t_ = v\n}\n";
        let map = extract(source);
        assert_eq!(map.get(5), Some(&strings(&["// x"])[..]));
    }

    #[test]
    fn test_no_comments_yields_empty_map() {
        let map = extract("package main\n\nfunc main() {\n\tprintln(1)\n}\n");
        assert!(map.is_empty());
    }

    #[test]
    fn test_each_comment_claimed_once() {
        let source = "package main // p\n\n// A doc\nfunc A() { // a\n\t// inner\n\tif true { // if\n\t\treturn // ret\n\t}\n}\n\n// T doc\ntype T struct {\n\tX int // x\n}\n";
        let map = extract(source);
        let mut all: Vec<&String> = map.iter().flat_map(|(_, c)| c.iter()).collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
        assert_eq!(total, 8);
    }
}
