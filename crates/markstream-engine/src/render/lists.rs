use crate::parsing::node::{Child, Element, Node};

/// A child sequence with adjacent list items folded together.
#[derive(Debug, PartialEq, Eq)]
pub enum Block<'a> {
    /// Consecutive items of one kind, in order.
    List {
        ordered: bool,
        items: Vec<&'a Node>,
    },
    /// Any other child, untouched.
    Child(&'a Child),
}

fn list_kind(child: &Child) -> Option<&Element> {
    child
        .as_node()
        .map(|n| &n.element)
        .filter(|e| e.is_list_item())
}

/// Groups runs of same-kind list item nodes.
///
/// A bare `"\n"` run between two items of the same kind is absorbed into
/// the group; any other content ends it.
pub fn group_list_items(children: &[Child]) -> Vec<Block<'_>> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < children.len() {
        let Some(kind) = list_kind(&children[i]) else {
            out.push(Block::Child(&children[i]));
            i += 1;
            continue;
        };

        let mut items: Vec<&Node> = children[i].as_node().into_iter().collect();
        i += 1;
        loop {
            let next = match children.get(i) {
                Some(c) if c.is_line_break() => i + 1,
                _ => i,
            };
            match children.get(next) {
                Some(child) if list_kind(child) == Some(kind) => {
                    items.extend(child.as_node());
                    i = next + 1;
                }
                _ => break,
            }
        }
        out.push(Block::List {
            ordered: *kind == Element::OrderedList,
            items,
        });
    }
    out
}
