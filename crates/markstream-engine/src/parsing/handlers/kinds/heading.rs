use crate::parsing::{
    handlers::{Context, Nesting, PatternHandler, Probe},
    node::{Element, Node},
};

use super::{INLINE, feed_line};

const NAMES: [&str; 6] = [
    "heading-1",
    "heading-2",
    "heading-3",
    "heading-4",
    "heading-5",
    "heading-6",
];

/// ATX heading of one fixed level. The default registry holds one per level.
pub struct Heading {
    level: u8,
}

impl Heading {
    pub const HASH: char = '#';
    pub const MAX_LEVEL: u8 = 6;

    /// Clamps `level` into `1..=6`.
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(1, Self::MAX_LEVEL),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl PatternHandler for Heading {
    fn name(&self) -> &str {
        NAMES[usize::from(self.level - 1)]
    }

    fn element(&self) -> Element {
        Element::Heading(self.level)
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        if !cx.at_line_start() {
            return Probe::No;
        }
        let buf = cx.buffer();
        let hashes = buf.chars().take_while(|&c| c == Self::HASH).count();
        let rest = &buf[hashes..];
        match rest {
            "" if hashes <= usize::from(self.level) => Probe::Potential,
            " " if hashes == usize::from(self.level) => Probe::Commit,
            _ => Probe::No,
        }
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
