use std::fmt::Write;

use crate::parsing::node::{Child, Node};

/// Renders the tree one entry per line, indented two spaces per level.
///
/// Nodes print as their tag followed by their attributes; text runs print
/// quoted with escapes, so line breaks stay visible.
pub fn outline(root: &Node) -> String {
    let mut out = String::new();
    write_node(root, 0, &mut out);
    out
}

fn write_node(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", node.element);
    for (key, value) in node.attributes.iter() {
        let _ = write!(out, " {key}={value:?}");
    }
    out.push('\n');
    for child in &node.children {
        match child {
            Child::Node(n) => write_node(n, depth + 1, out),
            Child::Text(t) => {
                let _ = writeln!(out, "{indent}  {t:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_str;

    #[test]
    fn outline_of_mixed_tree() {
        let root = parse_str("# Title\nHello **world**, see [x](http://e).");
        insta::assert_snapshot!(outline(&root), @r#"
        root
          h1
            "Title"
          "\nHello "
          strong
            "world"
          ", see "
          a href="http://e"
            "x"
          "."
        "#);
    }

    #[test]
    fn display_matches_outline() {
        let root = parse_str("*a*");
        assert_eq!(root.to_string(), outline(&root));
    }
}
