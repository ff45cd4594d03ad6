use std::fmt;

use super::{
    PatternHandler,
    kinds::{BlockQuote, CodeFence, CodeSpan, Emphasis, Heading, Link, ListItem, Rule},
};

/// Ordered handler collection.
///
/// Order is precedence: when several handlers commit on the same buffer the
/// first one registered wins.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn PatternHandler>>,
}

impl HandlerRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler with the lowest precedence so far.
    pub fn with(mut self, handler: impl PatternHandler + 'static) -> Self {
        self.push(handler);
        self
    }

    pub fn push(&mut self, handler: impl PatternHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Drops every handler whose name is listed.
    pub fn without<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.handlers
            .retain(|h| !names.iter().any(|n| n.as_ref() == h.name()));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn PatternHandler> {
        self.iter().find(|h| h.name() == name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn PatternHandler> {
        self.handlers.iter().map(|h| h.as_ref())
    }

    pub(crate) fn handler(&self, index: usize) -> &dyn PatternHandler {
        self.handlers[index].as_ref()
    }
}

impl Default for HandlerRegistry {
    /// Headings, then emphasis, then code, then links, then block constructs.
    fn default() -> Self {
        let mut registry = Self::empty();
        for level in 1..=6 {
            registry.push(Heading::new(level));
        }
        registry.push(Emphasis::em_strong_asterisk());
        registry.push(Emphasis::em_strong_underscore());
        registry.push(Emphasis::bold_asterisk());
        registry.push(Emphasis::bold_underscore());
        registry.push(Emphasis::italic_asterisk());
        registry.push(Emphasis::italic_underscore());
        registry.push(Emphasis::strikethrough());
        registry.push(CodeSpan);
        registry.push(CodeFence);
        registry.push(Link);
        registry.push(ListItem::unordered());
        registry.push(ListItem::ordered());
        registry.push(BlockQuote);
        registry.push(Rule);
        registry
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
