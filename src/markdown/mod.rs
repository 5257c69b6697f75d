//! Generated markdown: a small output tree and its serializer.

pub mod ast;
pub mod writer;

pub use ast::{heading, html, link, paragraph, root, span, strong, text, Node};
pub use writer::to_markdown;
