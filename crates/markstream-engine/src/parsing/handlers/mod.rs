//! # Pattern Handlers
//!
//! Each construct the parser recognizes is described by one stateless
//! [`PatternHandler`]. The engine never hardcodes a marker: it asks every
//! registered handler whether the pending buffer opens its construct, and
//! asks the active handler what to do with each character of content.
//!
//! ## Modules
//!
//! - **`kinds`**: the default constructs, each owning its delimiter constants
//! - **`registry`**: [`HandlerRegistry`], the ordered handler list
//!
//! ## Probing
//!
//! [`PatternHandler::start`] answers with a tri-state [`Probe`]:
//! - `No`: the buffer cannot begin this construct
//! - `Potential`: the buffer is a prefix of this construct's opener
//! - `Commit`: the construct has definitively started
//!
//! Any `Potential` answer keeps the buffer pending instead of flushing it as
//! text, which is what lets markers split across stream chunks still match.

pub mod kinds;
pub mod registry;

pub use registry::HandlerRegistry;

use crate::parsing::node::{Element, Node};

/// Answer of an opener or closer probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    No,
    Potential,
    Commit,
}

/// Which handlers may open inside an active node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// Every handler may open.
    Any,
    /// Nothing opens; content is taken literally.
    Forbidden,
    /// Only the named handlers may open.
    Only(&'static [&'static str]),
}

impl Nesting {
    pub fn allows(&self, name: &str) -> bool {
        match self {
            Nesting::Any => true,
            Nesting::Forbidden => false,
            Nesting::Only(names) => names.contains(&name),
        }
    }
}

/// Read-only view of parser state handed to handler callbacks.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    buffer: &'a str,
    at_line_start: bool,
    preceding: Option<char>,
}

impl<'a> Context<'a> {
    pub fn new(buffer: &'a str, at_line_start: bool, preceding: Option<char>) -> Self {
        Self {
            buffer,
            at_line_start,
            preceding,
        }
    }

    /// The pending, not yet classified input.
    pub fn buffer(&self) -> &'a str {
        self.buffer
    }

    /// Whether the current container's emitted content ends a line.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// The character emitted just before the buffer in the current container.
    pub fn preceding(&self) -> Option<char> {
        self.preceding
    }
}

/// One syntax construct.
///
/// Implementations hold no per-parse state; anything a construct needs to
/// remember while open lives in its node's attributes.
pub trait PatternHandler: Send + Sync {
    /// Unique key, used by nesting whitelists and configuration.
    fn name(&self) -> &str;

    /// Element of the nodes this handler creates.
    fn element(&self) -> Element;

    /// Probes whether `cx.buffer()` opens this construct.
    fn start(&self, cx: &Context<'_>) -> Probe;

    /// Probes whether the pending buffer closes the active node.
    ///
    /// Consulted before any nested opener, so a closing marker is never
    /// mistaken for the start of another construct.
    fn closing(&self, _buffer: &str, _node: &Node) -> Probe {
        Probe::No
    }

    /// Consumes one content character; `true` closes the node.
    fn feed(&self, ch: char, node: &mut Node, cx: &Context<'_>) -> bool;

    /// Seeds a freshly created node from the buffer that opened it.
    ///
    /// Returns the suffix of `buffer` that is content rather than marker;
    /// the engine processes it inside the new node.
    fn commit<'b>(&self, _buffer: &'b str, _node: &mut Node) -> &'b str {
        ""
    }

    /// Post-close hook.
    fn upgrade(&self, _node: &mut Node, _cx: &Context<'_>) {}

    /// Whether the character that closed `node` is handed back to the parent.
    fn reuse_terminator(&self, _terminator: char, _node: &Node) -> bool {
        false
    }

    /// Which handlers may open while `node` is active.
    fn nesting(&self, _node: &Node) -> Nesting {
        Nesting::Any
    }
}

/// Returns the last character of `buffer` as a slice of it.
pub(crate) fn last_char_suffix(buffer: &str) -> &str {
    buffer
        .char_indices()
        .last()
        .map_or("", |(idx, _)| &buffer[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_whitelist() {
        assert!(Nesting::Any.allows("link"));
        assert!(!Nesting::Forbidden.allows("link"));
        let only = Nesting::Only(&["bold-asterisk"]);
        assert!(only.allows("bold-asterisk"));
        assert!(!only.allows("link"));
    }

    #[test]
    fn last_char_suffix_is_char_aware() {
        assert_eq!(last_char_suffix("**w"), "w");
        assert_eq!(last_char_suffix("[é"), "é");
        assert_eq!(last_char_suffix(""), "");
    }
}
