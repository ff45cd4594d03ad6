use crate::parsing::{
    handlers::{Context, Nesting, PatternHandler, Probe, last_char_suffix},
    node::{Child, Element, Node},
};

pub const NAME: &str = "code-fence";

const PHASE: &str = "phase";
const INFO: &str = "info";
const BODY: &str = "body";
const CLOSING: &str = "closing";
const LANG: &str = "lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Info,
    Body,
    /// The last body line is exactly the fence; the next newline closes.
    Closing,
}

fn phase(node: &Node) -> Option<Phase> {
    match node.attributes.get(PHASE)? {
        INFO => Some(Phase::Info),
        BODY => Some(Phase::Body),
        CLOSING => Some(Phase::Closing),
        _ => None,
    }
}

/// Fenced code block type with owned delimiter constant.
///
/// The opening line's info string becomes the `lang` attribute; the body is
/// kept verbatim up to a line holding only the fence. That line's newline
/// closes the block and goes back to the parent.
pub struct CodeFence;

impl CodeFence {
    pub const FENCE: &'static str = "```";

    fn feed_info(ch: char, node: &mut Node) {
        if ch == '\n' {
            node.attributes.set(PHASE, BODY);
            let lang = node.attributes.remove(LANG);
            if let Some(lang) = lang.as_deref().map(str::trim_end).filter(|l| !l.is_empty()) {
                node.attributes.set(LANG, lang);
            }
        } else if node.attributes.get(LANG).is_some() || !ch.is_whitespace() {
            node.attributes.push_str(LANG, ch.encode_utf8(&mut [0; 4]));
        }
    }

    /// Whether the body's last line so far is exactly the fence.
    fn ends_with_fence(node: &Node) -> bool {
        match node.children.as_slice() {
            [Child::Text(only)] => only == Self::FENCE,
            [.., Child::Text(last)] => last.strip_prefix('\n') == Some(Self::FENCE),
            _ => false,
        }
    }
}

impl PatternHandler for CodeFence {
    fn name(&self) -> &str {
        NAME
    }

    fn element(&self) -> Element {
        Element::Pre
    }

    fn start(&self, cx: &Context<'_>) -> Probe {
        if !cx.at_line_start() {
            return Probe::No;
        }
        let buf = cx.buffer();
        if Self::FENCE.starts_with(buf) {
            return Probe::Potential;
        }
        match buf.strip_prefix(Self::FENCE) {
            Some(rest) if rest.chars().count() == 1 => Probe::Commit,
            _ => Probe::No,
        }
    }

    fn feed(&self, ch: char, node: &mut Node, _cx: &Context<'_>) -> bool {
        match phase(node) {
            Some(Phase::Info) => {
                Self::feed_info(ch, node);
                false
            }
            Some(Phase::Closing) if ch == '\n' => {
                node.children.pop();
                node.attributes.remove(PHASE);
                true
            }
            _ => {
                node.push_char(ch);
                let next = if Self::ends_with_fence(node) {
                    CLOSING
                } else {
                    BODY
                };
                if node.attributes.get(PHASE) != Some(next) {
                    node.attributes.set(PHASE, next);
                }
                false
            }
        }
    }

    fn commit<'b>(&self, buffer: &'b str, node: &mut Node) -> &'b str {
        node.attributes.set(PHASE, INFO);
        last_char_suffix(buffer)
    }

    /// Only the newline after the closing fence ends the block.
    fn reuse_terminator(&self, terminator: char, _node: &Node) -> bool {
        terminator == '\n'
    }

    fn nesting(&self, _node: &Node) -> Nesting {
        Nesting::Forbidden
    }
}
