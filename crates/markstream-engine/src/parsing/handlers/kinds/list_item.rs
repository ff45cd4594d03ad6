use crate::parsing::{
    handlers::{Context, Nesting, PatternHandler, Probe},
    node::{Element, Node},
};

use super::{INLINE, feed_line};

pub const UNORDERED: &str = "unordered-list";
pub const ORDERED: &str = "ordered-list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `-`, `*` or `+` bullet.
    Bulleted,
    /// Digits followed by `.`.
    Numbered,
}

/// One list item. The parser does not group items into lists; see
/// [`crate::render::group_list_items`].
pub struct ListItem {
    kind: ListKind,
}

impl ListItem {
    pub const BULLETS: [char; 3] = ['-', '*', '+'];
    pub const NUMBER_END: char = '.';
    const MAX_DIGITS: usize = 9;
    /// Deeper leading whitespace is not held back as a possible item.
    const MAX_INDENT: usize = 8;

    pub fn unordered() -> Self {
        Self {
            kind: ListKind::Bulleted,
        }
    }

    pub fn ordered() -> Self {
        Self {
            kind: ListKind::Numbered,
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    fn split_indent(buf: &str) -> (&str, &str) {
        let idx = buf
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(buf.len());
        buf.split_at(idx)
    }

    fn probe_marker(&self, marker: &str) -> Probe {
        match self.kind {
            ListKind::Bulleted => {
                let mut chars = marker.chars();
                match (chars.next(), chars.next(), chars.next()) {
                    (None, _, _) => Probe::Potential,
                    (Some(b), None, _) if Self::BULLETS.contains(&b) => Probe::Potential,
                    (Some(b), Some(' '), None) if Self::BULLETS.contains(&b) => Probe::Commit,
                    _ => Probe::No,
                }
            }
            ListKind::Numbered => {
                let digits = marker.chars().take_while(char::is_ascii_digit).count();
                if digits > Self::MAX_DIGITS {
                    return Probe::No;
                }
                match &marker[digits..] {
                    "" => Probe::Potential,
                    "." if digits > 0 => Probe::Potential,
                    ". " if digits > 0 => Probe::Commit,
                    _ => Probe::No,
                }
            }
        }
    }
}

impl PatternHandler for ListItem {
    fn name(&self) -> &str {
        match self.kind {
            ListKind::Bulleted => UNORDERED,
            ListKind::Numbered => ORDERED,
        }
    }

    fn element(&self) -> Element {
        match self.kind {
            ListKind::Bulleted => Element::UnorderedList,
            ListKind::Numbered => Element::OrderedList,
        }
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        if !cx.at_line_start() {
            return Probe::No;
        }
        let (indent, marker) = Self::split_indent(cx.buffer());
        if indent.len() > Self::MAX_INDENT {
            return Probe::No;
        }
        self.probe_marker(marker)
    }

    /// Records `indent` (leading whitespace width) and, for numbered items,
    /// `start` (the item number).
    fn commit<'b>(&self, buffer: &'b str, node: &mut Node) -> &'b str {
        let (indent, marker) = Self::split_indent(buffer);
        if !indent.is_empty() {
            node.attributes.set("indent", indent.chars().count().to_string());
        }
        if self.kind == ListKind::Numbered {
            let digits: String = marker.chars().take_while(char::is_ascii_digit).collect();
            let number = digits.parse::<u64>().unwrap_or_default();
            node.attributes.set("start", number.to_string());
        }
        ""
    }

    fn feed(&self, ch: char, node: &mut Node, _cx: &Context<'_>) -> bool {
        feed_line(ch, node)
    }

    fn reuse_terminator(&self, terminator: char, _node: &Node) -> bool {
        terminator == '\n'
    }

    fn nesting(&self, _node: &Node) -> Nesting {
        Nesting::Only(INLINE)
    }
}
