use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// The construct a [`Node`] represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// The permanent base of every tree.
    Root,
    /// A heading, level 1 through 6.
    Heading(u8),
    Strong,
    Em,
    EmStrong,
    Code,
    Pre,
    Del,
    Link,
    UnorderedList,
    OrderedList,
    Blockquote,
    HorizontalRule,
    /// Fallback tag for handlers outside the default set.
    Other(String),
}

impl Element {
    /// The output tag name, e.g. `"h2"` or `"a"`.
    pub fn as_str(&self) -> &str {
        match self {
            Element::Root => "root",
            Element::Heading(1) => "h1",
            Element::Heading(2) => "h2",
            Element::Heading(3) => "h3",
            Element::Heading(4) => "h4",
            Element::Heading(5) => "h5",
            Element::Heading(_) => "h6",
            Element::Strong => "strong",
            Element::Em => "em",
            Element::EmStrong => "em-strong",
            Element::Code => "code",
            Element::Pre => "pre",
            Element::Del => "del",
            Element::Link => "a",
            Element::UnorderedList => "ul",
            Element::OrderedList => "ol",
            Element::Blockquote => "blockquote",
            Element::HorizontalRule => "hr",
            Element::Other(tag) => tag,
        }
    }

    /// Whether this element is one list item (`ul` or `ol`).
    pub fn is_list_item(&self) -> bool {
        matches!(self, Element::UnorderedList | Element::OrderedList)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ordered key/value pairs attached to a node.
///
/// Keeps insertion order; `set` replaces an existing key in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

/// Serializes as a map in insertion order.
impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Attributes {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key.to_string(), value)),
        }
    }

    /// Appends to an existing value, creating the key if needed.
    pub fn push_str(&mut self, key: &str, s: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => v.push_str(s),
            None => self.0.push((key.to_string(), s.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An entry in a node's children: a nested construct or a plain text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Node(Node),
    Text(String),
}

impl Child {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(n) => Some(n),
            Child::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(t) => Some(t),
            Child::Node(_) => None,
        }
    }

    /// A run holding exactly one newline.
    pub fn is_line_break(&self) -> bool {
        matches!(self, Child::Text(t) if t == "\n")
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

/// A node in the output tree.
///
/// There are no parent links: a node is reached from the root through
/// `children` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub element: Element,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            attributes: Attributes::default(),
            children: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(Element::Root)
    }

    /// Builder-style constructor used by tests and custom handlers.
    pub fn with_children(element: Element, children: impl IntoIterator<Item = Child>) -> Self {
        Self {
            element,
            attributes: Attributes::default(),
            children: children.into_iter().collect(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Appends one character of content.
    ///
    /// A newline always starts its own run; anything else joins the trailing
    /// run, including one that begins with a newline.
    pub fn push_char(&mut self, ch: char) {
        if ch != '\n'
            && let Some(Child::Text(last)) = self.children.last_mut()
        {
            last.push(ch);
            return;
        }
        self.children.push(Child::Text(ch.to_string()));
    }

    pub fn push_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.push_char(ch);
        }
    }

    /// The trailing text run, if the last child is text.
    pub fn trailing_text(&self) -> Option<&str> {
        self.children.last().and_then(Child::as_text)
    }

    /// Last character of the trailing text run.
    pub fn last_char(&self) -> Option<char> {
        self.trailing_text().and_then(|t| t.chars().last())
    }

    /// Concatenated text of this node and all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Child::Text(t) => out.push_str(t),
                Child::Node(n) => n.collect_text(out),
            }
        }
    }

    /// Child nodes, skipping text runs.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_node)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::outline(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_starts_its_own_run() {
        let mut node = Node::root();
        node.push_str("Hello\nWorld");
        assert_eq!(
            node.children,
            vec![Child::from("Hello"), Child::from("\nWorld")]
        );
    }

    #[test]
    fn consecutive_newlines_stay_separate() {
        let mut node = Node::root();
        node.push_str("a\n\n");
        assert_eq!(
            node.children,
            vec![Child::from("a"), Child::from("\n"), Child::from("\n")]
        );
    }

    #[test]
    fn text_after_node_starts_new_run() {
        let mut node = Node::root();
        node.push_str("a");
        node.children.push(Node::new(Element::Em).into());
        node.push_char('b');
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.trailing_text(), Some("b"));
    }

    #[test]
    fn attributes_keep_order_and_replace_in_place() {
        let mut attrs = Attributes::default();
        attrs.set("phase", "text");
        attrs.set("href", "x");
        attrs.set("phase", "url");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("phase", "url"), ("href", "x")]);
        assert_eq!(attrs.remove("phase").as_deref(), Some("url"));
        assert_eq!(attrs.get("phase"), None);
    }

    #[test]
    fn heading_tags() {
        assert_eq!(Element::Heading(1).as_str(), "h1");
        assert_eq!(Element::Heading(6).as_str(), "h6");
        assert_eq!(Element::Link.to_string(), "a");
        assert_eq!(Element::Other("mark".into()).as_str(), "mark");
    }

    #[test]
    fn text_flattens_descendants() {
        let node = Node::with_children(
            Element::Root,
            [
                Child::from("a "),
                Node::with_children(Element::Strong, [Child::from("b")]).into(),
                Child::from(" c"),
            ],
        );
        assert_eq!(node.text(), "a b c");
    }
}
