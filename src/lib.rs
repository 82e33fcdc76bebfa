//! # doctree
//!
//! Turns parsed documentation comments into a backend-agnostic tree of
//! semantic nodes and renders that tree into text markup, one renderer per
//! target format.
//!
//! - [`doc`] holds the node taxonomy: a closed sum type of leaf and
//!   compound document nodes.
//! - [`renderer`] holds the visitor protocol every backend implements and
//!   the worked Markdown backend.
//! - [`members`] holds the member lists that organize the documented
//!   symbols the trees describe, and their category registry.
//! - [`xref`] resolves symbolic cross-reference keys, including via the
//!   external hypertext index generator.

pub mod doc;
pub mod members;
pub mod renderer;
pub mod xref;

#[cfg(test)]
mod tests;

pub use doc::{CompoundNode, DocNode, LeafNode};
pub use renderer::{walk, DocVisitor, MarkdownRenderer};
pub use xref::{LinkResolver, Resolution};
