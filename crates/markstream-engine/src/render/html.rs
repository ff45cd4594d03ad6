use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::parsing::node::{Child, Element, Node};

use super::lists::{Block, group_list_items};

/// Renders a tree as an HTML fragment.
///
/// Open (still streaming) constructs render like closed ones. A link that
/// never reached its destination renders its text only.
pub fn to_html(root: &Node) -> String {
    let mut out = String::new();
    render_children(&root.children, &mut out);
    out
}

fn is_block(element: &Element) -> bool {
    matches!(
        element,
        Element::Heading(_)
            | Element::Pre
            | Element::UnorderedList
            | Element::OrderedList
            | Element::Blockquote
            | Element::HorizontalRule
    )
}

fn render_children(children: &[Child], out: &mut String) {
    let mut after_block = false;
    for block in group_list_items(children) {
        match block {
            Block::List { ordered, items } => {
                render_list(ordered, &items, out);
                after_block = true;
            }
            Block::Child(Child::Node(node)) => {
                render_node(node, out);
                after_block = is_block(&node.element);
            }
            Block::Child(Child::Text(text)) => {
                render_text(text, after_block, out);
                after_block = false;
            }
        }
    }
}

/// A block's own line break is layout, not a `<br>`.
fn render_text(text: &str, after_block: bool, out: &mut String) {
    let text = match text.strip_prefix('\n') {
        Some(rest) if after_block => {
            out.push('\n');
            rest
        }
        _ => text,
    };
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(&encode_text(first));
    }
    for line in lines {
        out.push_str("<br>\n");
        out.push_str(&encode_text(line));
    }
}

fn render_list(ordered: bool, items: &[&Node], out: &mut String) {
    let tag = if ordered { "ol" } else { "ul" };
    out.push('<');
    out.push_str(tag);
    if ordered
        && let Some(start) = items.first().and_then(|n| n.attributes.get("start"))
        && start != "1"
    {
        out.push_str(&format!(" start=\"{}\"", encode_double_quoted_attribute(start)));
    }
    out.push('>');
    for item in items {
        out.push_str("<li>");
        render_children(&item.children, out);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>"));
}

fn render_node(node: &Node, out: &mut String) {
    match &node.element {
        Element::Root => render_children(&node.children, out),
        Element::HorizontalRule => out.push_str("<hr>"),
        Element::EmStrong => wrap(node, "<em><strong>", "</strong></em>", out),
        Element::Pre => {
            match node.attributes.get("lang") {
                Some(lang) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    encode_double_quoted_attribute(lang)
                )),
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&encode_text(&node.text()));
            out.push_str("</code></pre>");
        }
        Element::Link => match node.attributes.get("href") {
            Some(href) => {
                let open = format!("<a href=\"{}\">", encode_double_quoted_attribute(href));
                wrap(node, &open, "</a>", out);
            }
            None => render_children(&node.children, out),
        },
        Element::UnorderedList | Element::OrderedList => {
            render_list(node.element == Element::OrderedList, &[node], out)
        }
        element => {
            let tag = element.as_str();
            wrap(node, &format!("<{tag}>"), &format!("</{tag}>"), out);
        }
    }
}

fn wrap(node: &Node, open: &str, close: &str, out: &mut String) {
    out.push_str(open);
    render_children(&node.children, out);
    out.push_str(close);
}
