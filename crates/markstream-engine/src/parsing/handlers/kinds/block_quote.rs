use crate::parsing::{
    handlers::{Context, Nesting, PatternHandler, Probe},
    node::{Element, Node},
};

use super::{INLINE, feed_line};

pub const NAME: &str = "blockquote";

/// Blockquote block type with owned delimiter constant.
///
/// One node per quoted line; the line break ends it.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';
}

impl PatternHandler for BlockQuote {
    fn name(&self) -> &str {
        NAME
    }

    fn element(&self) -> Element {
        Element::Blockquote
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        if !cx.at_line_start() {
            return Probe::No;
        }
        let mut chars = cx.buffer().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(Self::PREFIX), None, _) => Probe::Potential,
            (Some(Self::PREFIX), Some(' '), None) => Probe::Commit,
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
