pub mod layout;
pub mod node;
pub mod parser;
pub mod selector;
pub mod serialize;

pub use layout::{layout_document, layout_document_excluding, LayoutOptions};
pub use node::{ClientRect, Document, LayoutBox, NodeId};
pub use parser::parse_html;
pub use selector::Selector;
pub use serialize::{outer_html, to_html};
