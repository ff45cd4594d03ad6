//! # Rendering
//!
//! Consumers of the parser's tree. The parser emits one `ul`/`ol` node per
//! list item; grouping adjacent items into a list is done here, on the
//! consumer side.
//!
//! - **`lists`**: [`group_list_items`] folds adjacent same-kind items
//! - **`html`**: [`to_html`] renders a tree as an HTML fragment
//! - **`outline`**: [`outline`] renders an indented debugging view

pub mod html;
pub mod lists;
pub mod outline;

pub use html::to_html;
pub use lists::{Block, group_list_items};
pub use outline::outline;
