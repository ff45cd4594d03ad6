use crate::parsing::{
    handlers::{Context, Nesting, PatternHandler, Probe, last_char_suffix},
    node::{Child, Element, Node},
};

use super::INLINE;

pub const EM_STRONG_ASTERISK: &str = "em-strong-asterisk";
pub const EM_STRONG_UNDERSCORE: &str = "em-strong-underscore";
pub const BOLD_ASTERISK: &str = "bold-asterisk";
pub const BOLD_UNDERSCORE: &str = "bold-underscore";
pub const ITALIC_ASTERISK: &str = "italic-asterisk";
pub const ITALIC_UNDERSCORE: &str = "italic-underscore";
pub const STRIKETHROUGH: &str = "strikethrough";

/// A construct delimited by the same marker run on both sides.
///
/// Opens on the marker followed by a character that is neither whitespace
/// nor the marker character, and closes on the marker when the content
/// before it does not end in whitespace or the marker character.
pub struct Emphasis {
    name: &'static str,
    element: Element,
    marker: &'static str,
    intraword: bool,
}

impl Emphasis {
    pub const ASTERISK: char = '*';
    pub const UNDERSCORE: char = '_';
    pub const TILDE: char = '~';

    pub fn em_strong_asterisk() -> Self {
        Self::new(EM_STRONG_ASTERISK, Element::EmStrong, "***", true)
    }

    pub fn em_strong_underscore() -> Self {
        Self::new(EM_STRONG_UNDERSCORE, Element::EmStrong, "___", false)
    }

    pub fn bold_asterisk() -> Self {
        Self::new(BOLD_ASTERISK, Element::Strong, "**", true)
    }

    pub fn bold_underscore() -> Self {
        Self::new(BOLD_UNDERSCORE, Element::Strong, "__", false)
    }

    pub fn italic_asterisk() -> Self {
        Self::new(ITALIC_ASTERISK, Element::Em, "*", true)
    }

    pub fn italic_underscore() -> Self {
        Self::new(ITALIC_UNDERSCORE, Element::Em, "_", false)
    }

    pub fn strikethrough() -> Self {
        Self::new(STRIKETHROUGH, Element::Del, "~~", true)
    }

    /// `intraword: false` refuses to open right after a letter or digit,
    /// so `snake_case` stays text.
    pub fn new(name: &'static str, element: Element, marker: &'static str, intraword: bool) -> Self {
        Self {
            name,
            element,
            marker,
            intraword,
        }
    }

    pub fn marker(&self) -> &'static str {
        self.marker
    }

    fn marker_char(&self) -> Option<char> {
        self.marker.chars().next()
    }

    fn is_flank(&self, c: char) -> bool {
        c.is_whitespace() || Some(c) == self.marker_char()
    }

    /// Content before a closing marker must not end in whitespace or marker.
    fn can_close(&self, node: &Node) -> bool {
        match node.children.last() {
            Some(Child::Text(text)) => text.chars().last().is_some_and(|c| !self.is_flank(c)),
            Some(Child::Node(_)) => true,
            None => false,
        }
    }
}

impl PatternHandler for Emphasis {
    fn name(&self) -> &str {
        self.name
    }

    fn element(&self) -> Element {
        self.element.clone()
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        let buf = cx.buffer();
        if !self.intraword && cx.preceding().is_some_and(char::is_alphanumeric) {
            return Probe::No;
        }
        if self.marker.starts_with(buf) {
            return Probe::Potential;
        }
        let Some(rest) = buf.strip_prefix(self.marker) else {
            return Probe::No;
        };
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !self.is_flank(c) => Probe::Commit,
            _ => Probe::No,
        }
    }

    fn closing(&self, buffer: &str, node: &Node) -> Probe {
        if !self.marker.starts_with(buffer) || !self.can_close(node) {
            return Probe::No;
        }
        if buffer.len() == self.marker.len() {
            Probe::Commit
        } else {
            Probe::Potential
        }
    }

    fn feed(&self, ch: char, node: &mut Node, _cx: &Context<'_>) -> bool {
        node.push_char(ch);
        false
    }

    fn commit<'b>(&self, buffer: &'b str, _node: &mut Node) -> &'b str {
        last_char_suffix(buffer)
    }

    fn nesting(&self, _node: &Node) -> Nesting {
        Nesting::Only(INLINE)
    }
}
