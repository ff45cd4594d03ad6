//! # Handler Kinds
//!
//! The default constructs. Each type owns its delimiters; the engine never
//! names a marker character itself.
//!
//! - **`Heading`**: `#` run of the handler's level plus a space, line-anchored
//! - **`Emphasis`**: bold, italic, bold+italic and strikethrough marker runs
//! - **`CodeSpan`**: `` ` `` raw zone, nothing nests inside
//! - **`CodeFence`**: ```` ``` ```` raw block with an optional language
//! - **`Link`**: `[text](url)` with a phase machine in the node attributes
//! - **`ListItem`**: bulleted (`-`, `*`, `+`) and numbered (`1.`) items
//! - **`BlockQuote`**: `> ` prefixed line
//! - **`Rule`**: three or more `-`, `*` or `_` on their own line

pub mod block_quote;
pub mod code_fence;
pub mod code_span;
pub mod emphasis;
pub mod heading;
pub mod link;
pub mod list_item;
pub mod rule;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use heading::Heading;
pub use link::Link;
pub use list_item::ListItem;
pub use rule::Rule;

/// Inline formatting permitted inside headings, list items, quotes and
/// emphasis.
pub const INLINE: &[&str] = &[
    emphasis::EM_STRONG_ASTERISK,
    emphasis::EM_STRONG_UNDERSCORE,
    emphasis::BOLD_ASTERISK,
    emphasis::BOLD_UNDERSCORE,
    emphasis::ITALIC_ASTERISK,
    emphasis::ITALIC_UNDERSCORE,
    emphasis::STRIKETHROUGH,
    code_span::NAME,
    link::NAME,
];

/// Inline formatting permitted inside link text: no links in links.
pub const LINK_TEXT: &[&str] = &[
    emphasis::EM_STRONG_ASTERISK,
    emphasis::EM_STRONG_UNDERSCORE,
    emphasis::BOLD_ASTERISK,
    emphasis::BOLD_UNDERSCORE,
    emphasis::ITALIC_ASTERISK,
    emphasis::ITALIC_UNDERSCORE,
    emphasis::STRIKETHROUGH,
    code_span::NAME,
];

/// Shared close rule of the line-anchored blocks.
pub(crate) fn feed_line(ch: char, node: &mut crate::parsing::node::Node) -> bool {
    if ch == '\n' {
        return true;
    }
    node.push_char(ch);
    false
}
