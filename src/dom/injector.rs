//! Fragment content injection.

use crate::dom::Document;

/// Swaps a fragment placeholder's content for fetched fragment markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentInjector;

impl FragmentInjector {
    pub fn new() -> Self {
        Self
    }

    /// Copy the content element's markup into the container, then detach
    /// the content element. Returns false, leaving the document untouched,
    /// when either selector matches nothing.
    pub fn load<D: Document>(
        &self,
        document: &mut D,
        fragment: &str,
        container: &str,
        content: &str,
    ) -> bool {
        let Some(source) = document.query_selector(content) else {
            tracing::debug!(fragment, selector = content, "Fragment content element not found");
            return false;
        };
        let Some(target) = document.query_selector(container) else {
            tracing::debug!(fragment, selector = container, "Fragment container not found");
            return false;
        };

        let markup = document.inner_html(source);
        document.set_inner_html(target, &markup);
        if container != content {
            document.remove(source);
        }

        tracing::debug!(fragment, container, bytes = markup.len(), "Fragment content injected");
        true
    }
}
