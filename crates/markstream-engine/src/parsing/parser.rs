use std::fmt;

use super::{
    handlers::{Context, HandlerRegistry, Nesting, Probe},
    node::{Child, Node},
};

/// One step of the route from the root to an open node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    /// Index of the node in its container's children.
    index: usize,
    /// Index of the handler that opened it.
    handler: usize,
}

/// Outcome of probing every eligible opener against the buffer.
enum Opening {
    Commit(usize),
    Potential,
    Nothing,
}

/// Incremental, character-driven markup parser.
///
/// Feed text with [`Parser::parse`] as it arrives; the tree returned is a
/// best-effort view of everything seen so far. Feeding a string in pieces
/// yields the same tree as feeding it whole.
pub struct Parser {
    registry: HandlerRegistry,
    root: Node,
    /// Shortest suffix of the input that may still open or close a construct.
    buffer: String,
    /// Route from the root to the innermost open node.
    active: Vec<Frame>,
}

impl Parser {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            root: Node::root(),
            buffer: String::new(),
            active: Vec::new(),
        }
    }

    /// Consumes `content` one character at a time and returns the root.
    pub fn parse(&mut self, content: &str) -> &Node {
        for ch in content.chars() {
            self.buffer.push(ch);
            self.resolve(false);
        }
        &self.root
    }

    /// Signals end of input: releases anything still pending in the buffer.
    ///
    /// Open constructs stay open.
    pub fn finish(&mut self) -> &Node {
        self.resolve(true);
        &self.root
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Hands over the tree, leaving an empty parser behind.
    pub fn take_root(&mut self) -> Node {
        let root = std::mem::replace(&mut self.root, Node::root());
        self.clear_all_states();
        root
    }

    /// The container new content is appended to: the innermost open node,
    /// or the root when nothing is open.
    pub fn current_node(&self) -> &Node {
        descend(&self.root, &self.active)
    }

    /// Input held back while it may still turn out to be a marker.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Number of open constructs.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Discards the tree, the buffer and every open construct.
    pub fn clear_all_states(&mut self) {
        log::debug!(
            "reset parser ({} open, {} pending)",
            self.active.len(),
            self.buffer.len()
        );
        self.root = Node::root();
        self.buffer.clear();
        self.active.clear();
    }

    /// Drives the buffer until it is empty or waiting for more input.
    ///
    /// At end of input (`eof`) a `Potential` answer no longer holds
    /// characters back.
    fn resolve(&mut self, eof: bool) {
        while !self.buffer.is_empty() {
            if let Some(frame) = self.active.last().copied() {
                let handler = self.registry.handler(frame.handler);
                let node = descend(&self.root, &self.active);
                match handler.closing(&self.buffer, node) {
                    Probe::Commit => {
                        self.buffer.clear();
                        self.close_top();
                        continue;
                    }
                    Probe::Potential if !eof => return,
                    _ => {}
                }
            }

            match self.probe_openers() {
                Opening::Commit(handler) => {
                    self.open(handler);
                    continue;
                }
                Opening::Potential if !eof => return,
                _ => {}
            }

            let ch = self.buffer.remove(0);
            self.release(ch);
        }
    }

    fn probe_openers(&self) -> Opening {
        let container = descend(&self.root, &self.active);
        let (active, nesting) = match self.active.last() {
            Some(frame) => {
                let handler = self.registry.handler(frame.handler);
                (Some(frame.handler), handler.nesting(container))
            }
            None => (None, Nesting::Any),
        };
        if nesting == Nesting::Forbidden {
            return Opening::Nothing;
        }

        let cx = self.context(container);
        let mut potential = false;
        for (idx, handler) in self.registry.iter().enumerate() {
            if active == Some(idx) || !nesting.allows(handler.name()) {
                continue;
            }
            match handler.start(&cx) {
                Probe::Commit => return Opening::Commit(idx),
                Probe::Potential => potential = true,
                Probe::No => {}
            }
        }
        if potential {
            Opening::Potential
        } else {
            Opening::Nothing
        }
    }

    /// Creates the node for `handler_idx` and makes it the current container.
    fn open(&mut self, handler_idx: usize) {
        let handler = self.registry.handler(handler_idx);
        let buffer = std::mem::take(&mut self.buffer);
        let mut node = Node::new(handler.element());
        let rest = handler.commit(&buffer, &mut node);
        // The content suffix must be shorter than what opened the node.
        if rest.len() < buffer.len() {
            self.buffer.push_str(rest);
        }

        log::trace!(
            "open {} at depth {} from {buffer:?}",
            handler.name(),
            self.active.len()
        );
        let container = descend_mut(&mut self.root, &self.active);
        container.children.push(Child::Node(node));
        let index = container.children.len() - 1;
        self.active.push(Frame {
            index,
            handler: handler_idx,
        });
    }

    /// Emits one character that no probe claimed.
    fn release(&mut self, ch: char) {
        let Some(frame) = self.active.last().copied() else {
            self.root.push_char(ch);
            return;
        };
        let handler = self.registry.handler(frame.handler);
        let node = descend_mut(&mut self.root, &self.active);
        let cx = Context::new(&self.buffer, at_line_start(node, false), node.last_char());
        if handler.feed(ch, node, &cx) {
            let reuse = handler.reuse_terminator(ch, node);
            self.close_top();
            if reuse {
                self.buffer.insert(0, ch);
            }
        }
    }

    fn close_top(&mut self) {
        let Some(frame) = self.active.last().copied() else {
            return;
        };
        let handler = self.registry.handler(frame.handler);
        let node = descend_mut(&mut self.root, &self.active);
        let cx = Context::new(&self.buffer, at_line_start(node, false), node.last_char());
        handler.upgrade(node, &cx);
        self.active.pop();
        log::trace!("close {} at depth {}", handler.name(), self.active.len());
    }

    fn context<'a>(&'a self, container: &Node) -> Context<'a> {
        Context::new(
            &self.buffer,
            at_line_start(container, self.active.is_empty()),
            container.last_char(),
        )
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(HandlerRegistry::default())
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("registry", &self.registry)
            .field("buffer", &self.buffer)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Parses a complete string, releasing any trailing pending input.
pub fn parse_str(input: &str) -> Node {
    let mut parser = Parser::default();
    parser.parse(input);
    parser.finish();
    parser.take_root()
}

/// A container is at line start when its content ends with a newline, or
/// when it is the still empty root.
fn at_line_start(container: &Node, is_root: bool) -> bool {
    match container.children.last() {
        None => is_root,
        Some(Child::Text(text)) => text.ends_with('\n'),
        Some(Child::Node(_)) => false,
    }
}

fn descend<'a>(root: &'a Node, path: &[Frame]) -> &'a Node {
    let mut node = root;
    for frame in path {
        node = match node.children.get(frame.index) {
            Some(Child::Node(next)) => next,
            _ => unreachable!("active path only records node children"),
        };
    }
    node
}

fn descend_mut<'a>(root: &'a mut Node, path: &[Frame]) -> &'a mut Node {
    let mut node = root;
    for frame in path {
        node = match node.children.get_mut(frame.index) {
            Some(Child::Node(next)) => next,
            _ => unreachable!("active path only records node children"),
        };
    }
    node
}
