//! Document manipulation surface.
//!
//! The runtime only needs to find elements by selector, read and replace
//! their markup, and detach them. Hosts plug in their real document;
//! [`MemoryDocument`] is a small in-process implementation.

pub mod injector;
pub mod memory;

pub use injector::FragmentInjector;
pub use memory::{ElementId, MemoryDocument};

/// Query and mutation primitives of a document.
pub trait Document {
    /// Handle to an element of this document.
    type Node: Copy;

    /// First element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// Markup inside the element.
    fn inner_html(&self, node: Self::Node) -> String;

    /// Replace the markup inside the element, keeping the element itself.
    fn set_inner_html(&mut self, node: Self::Node, markup: &str);

    /// Detach the element from the document.
    fn remove(&mut self, node: Self::Node);
}
