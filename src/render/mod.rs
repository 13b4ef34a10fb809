pub mod html;
pub mod node;
pub mod text;

pub use html::render_html;
pub use node::{Cell, Element, Node, TableBuilder, Tag};
pub use text::render_text;
