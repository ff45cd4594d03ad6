//! # Parsing
//!
//! Single-pass, character-driven parsing of streamed markup into a [`Node`]
//! tree.
//!
//! ## Modules
//!
//! - **`node`**: the output tree (`Node`, `Child`, `Element`, `Attributes`)
//! - **`handlers`**: the `PatternHandler` contract, the default construct
//!   kinds and the ordered `HandlerRegistry`
//! - **`parser`**: the `Parser` state machine
//!
//! ## Key Invariants
//!
//! - The root is never opened or closed; it is the permanent base of the tree
//! - Nodes have no parent links; the parser reaches the open node by replaying
//!   a root-down path of child indices
//! - Text runs are never empty and only sit next to each other when the
//!   second one starts with a newline
//! - The tree is a pure function of the total input, however it was chunked

pub mod handlers;
pub mod node;
pub mod parser;

#[cfg(test)]
mod tests;

pub use handlers::{Context, HandlerRegistry, Nesting, PatternHandler, Probe};
pub use node::{Attributes, Child, Element, Node};
pub use parser::{Parser, parse_str};
