//! Read-only document tree queries.
//!
//! The extractor never walks a document directly. It asks a [`TreeQuery`]
//! for nodes matching a [`Pattern`], either across the whole document or
//! under a context node, and for the text of a node. Each extraction pass
//! issues its own queries, so passes never share a cursor.

mod html;
mod pattern;

pub use html::{HtmlTree, sanitize_html};
pub use pattern::{InvalidPattern, Pattern};

/// Query capability over an immutable document tree.
///
/// This abstraction allows the extractor to run over any document model;
/// [`HtmlTree`] is the implementation for parsed HTML.
pub trait TreeQuery {
    /// Handle to a node. Cheap to copy, borrows the tree.
    type Node<'a>: Copy
    where
        Self: 'a;

    /// All nodes matching `pattern`, in document order.
    fn select<'a>(&'a self, pattern: &Pattern) -> Vec<Self::Node<'a>>;

    /// Descendants of `context` matching `pattern`, in document order.
    fn select_in<'a>(&'a self, context: Self::Node<'a>, pattern: &Pattern) -> Vec<Self::Node<'a>>;

    /// Text content of a node, whitespace-normalised.
    fn text(&self, node: Self::Node<'_>) -> String;

    /// Number of nodes matching `pattern` in the whole document.
    fn count(&self, pattern: &Pattern) -> usize {
        self.select(pattern).len()
    }

    /// Number of descendants of `context` matching `pattern`.
    fn count_in<'a>(&'a self, context: Self::Node<'a>, pattern: &Pattern) -> usize {
        self.select_in(context, pattern).len()
    }
}
