use crate::parsing::{
    handlers::{Context, Nesting, PatternHandler, Probe, last_char_suffix},
    node::{Element, Node},
};

use super::LINK_TEXT;

pub const NAME: &str = "link";

/// Scratch attribute holding the link's sub-state while it is open.
pub const PHASE: &str = "phase";
/// Resolved destination, present once the `(` has been seen.
pub const HREF: &str = "href";

const TEXT: &str = "text";
const BETWEEN: &str = "between";
const URL: &str = "url";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Text,
    Between,
    Url,
}

fn phase(node: &Node) -> Option<Phase> {
    match node.attributes.get(PHASE)? {
        TEXT => Some(Phase::Text),
        BETWEEN => Some(Phase::Between),
        URL => Some(Phase::Url),
        _ => None,
    }
}

/// Inline link `[text](url)`.
///
/// Runs `text` → `between` → `url`. Anything but `(` right after `]` aborts
/// the link: the node closes as-is, keeps its phase marker and has no
/// `href`, and the offending character goes back to the parent.
pub struct Link;

impl Link {
    pub const OPEN: char = '[';
    pub const TEXT_CLOSE: char = ']';
    pub const URL_OPEN: char = '(';
    pub const URL_CLOSE: char = ')';
}

impl PatternHandler for Link {
    fn name(&self) -> &str {
        NAME
    }

    fn element(&self) -> Element {
        Element::Link
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        let mut chars = cx.buffer().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(Self::OPEN), None, _) => Probe::Potential,
            (Some(Self::OPEN), Some(c), None) if !c.is_whitespace() => Probe::Commit,
            _ => Probe::No,
        }
    }

    fn feed(&self, ch: char, node: &mut Node, _cx: &Context<'_>) -> bool {
        match phase(node) {
            Some(Phase::Text) if ch == Self::TEXT_CLOSE => {
                node.attributes.set(PHASE, BETWEEN);
                false
            }
            Some(Phase::Text) => {
                node.push_char(ch);
                false
            }
            Some(Phase::Between) if ch == Self::URL_OPEN => {
                node.attributes.set(PHASE, URL);
                node.attributes.set(HREF, "");
                false
            }
            Some(Phase::Url) if ch == Self::URL_CLOSE => {
                node.attributes.remove(PHASE);
                true
            }
            Some(Phase::Url) => {
                node.attributes.push_str(HREF, ch.encode_utf8(&mut [0; 4]));
                false
            }
            _ => true,
        }
    }

    fn commit<'b>(&self, buffer: &'b str, node: &mut Node) -> &'b str {
        node.attributes.set(PHASE, TEXT);
        last_char_suffix(buffer)
    }

    /// Only a bail-out hands its character back; `)` belongs to the link.
    fn reuse_terminator(&self, _terminator: char, node: &Node) -> bool {
        node.attributes.get(PHASE).is_some()
    }

    fn nesting(&self, node: &Node) -> Nesting {
        match phase(node) {
            Some(Phase::Text) => Nesting::Only(LINK_TEXT),
            _ => Nesting::Forbidden,
        }
    }
}
