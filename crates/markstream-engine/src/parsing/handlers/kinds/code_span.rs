use crate::parsing::{
    handlers::{Context, Nesting, PatternHandler, Probe, last_char_suffix},
    node::{Element, Node},
};

pub const NAME: &str = "inline-code";

/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other construct opens inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';
}

impl PatternHandler for CodeSpan {
    fn name(&self) -> &str {
        NAME
    }

    fn element(&self) -> Element {
        Element::Code
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        let mut chars = cx.buffer().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(Self::TICK), None, _) => Probe::Potential,
            (Some(Self::TICK), Some(c), None) if c != Self::TICK && !c.is_whitespace() => {
                Probe::Commit
            }
            _ => Probe::No,
        }
    }

    fn feed(&self, ch: char, node: &mut Node, _cx: &Context<'_>) -> bool {
        if ch == Self::TICK {
            return true;
        }
        node.push_char(ch);
        false
    }

    fn commit<'b>(&self, buffer: &'b str, _node: &mut Node) -> &'b str {
        last_char_suffix(buffer)
    }

    fn nesting(&self, _node: &Node) -> Nesting {
        Nesting::Forbidden
    }
}
