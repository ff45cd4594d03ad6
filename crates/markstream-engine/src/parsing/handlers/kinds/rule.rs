use crate::parsing::{
    handlers::{Context, Nesting, PatternHandler, Probe},
    node::{Element, Node},
};

pub const NAME: &str = "horizontal-rule";

const MARKER: &str = "marker";

/// Thematic break: three or more of the same marker at line start.
///
/// The node is created once the third marker arrives and closes on the first
/// character that is not the marker. Only a newline makes a proper rule, but
/// the `hr` node stays in the tree either way; the closing character is
/// handed back to the parent in both cases.
pub struct Rule;

impl Rule {
    pub const MARKERS: [char; 3] = ['-', '*', '_'];
    pub const MIN_RUN: usize = 3;
}

impl PatternHandler for Rule {
    fn name(&self) -> &str {
        NAME
    }

    fn element(&self) -> Element {
        Element::HorizontalRule
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        if !cx.at_line_start() {
            return Probe::No;
        }
        let buf = cx.buffer();
        let Some(first) = buf.chars().next() else {
            return Probe::No;
        };
        if !Self::MARKERS.contains(&first) || buf.chars().any(|c| c != first) {
            return Probe::No;
        }
        if buf.len() < Self::MIN_RUN {
            Probe::Potential
        } else {
            Probe::Commit
        }
    }

    fn commit<'b>(&self, buffer: &'b str, node: &mut Node) -> &'b str {
        if let Some(first) = buffer.chars().next() {
            node.attributes.set(MARKER, first.to_string());
        }
        ""
    }

    fn feed(&self, ch: char, node: &mut Node, _cx: &Context<'_>) -> bool {
        let marker = node.attributes.get(MARKER).and_then(|m| m.chars().next());
        if marker == Some(ch) {
            return false;
        }
        node.attributes.remove(MARKER);
        true
    }

    fn reuse_terminator(&self, _terminator: char, _node: &Node) -> bool {
        true
    }

    fn nesting(&self, _node: &Node) -> Nesting {
        Nesting::Forbidden
    }
}
