pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use parsing::{
    Attributes, Child, Context, Element, HandlerRegistry, Nesting, Node, Parser, PatternHandler,
    Probe, parse_str,
};
pub use render::{Block, group_list_items, outline, to_html};
