//! In-memory document.
//!
//! Holds a flat list of body-level elements whose content is kept as raw
//! markup. Supported selectors: `#id`, `.class`, `tag` and `tag#id`.

use crate::dom::Document;

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    inner_html: String,
    attached: bool,
}

impl Element {
    fn matches(&self, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(*id),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Tag { tag, id } => {
                self.tag.eq_ignore_ascii_case(tag)
                    && id.map_or(true, |id| self.id.as_deref() == Some(id))
            }
        }
    }

    fn outer_html(&self) -> String {
        let mut html = format!("<{}", self.tag);
        if let Some(id) = &self.id {
            html.push_str(&format!(" id=\"{}\"", id));
        }
        if !self.classes.is_empty() {
            html.push_str(&format!(" class=\"{}\"", self.classes.join(" ")));
        }
        html.push_str(&format!(">{}</{}>", self.inner_html, self.tag));
        html
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag { tag: &'a str, id: Option<&'a str> },
}

impl<'a> Selector<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains(char::is_whitespace) {
            return None;
        }

        if let Some(id) = raw.strip_prefix('#') {
            return (!id.is_empty()).then_some(Selector::Id(id));
        }
        if let Some(class) = raw.strip_prefix('.') {
            return (!class.is_empty()).then_some(Selector::Class(class));
        }
        match raw.split_once('#') {
            Some((tag, id)) if !id.is_empty() => Some(Selector::Tag { tag, id: Some(id) }),
            Some(_) => None,
            None => Some(Selector::Tag { tag: raw, id: None }),
        }
    }
}

/// Flat in-memory document body.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to the body.
    pub fn append(&mut self, tag: &str, id: Option<&str>, inner_html: &str) -> ElementId {
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            id: id.map(str::to_string),
            classes: Vec::new(),
            inner_html: inner_html.to_string(),
            attached: true,
        });
        ElementId(self.elements.len() - 1)
    }

    /// Add a class to an element.
    pub fn add_class(&mut self, node: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.classes.push(class.to_string());
        }
    }

    /// Markup of the element including its own tag.
    pub fn outer_html(&self, node: ElementId) -> Option<String> {
        self.attached(node).map(Element::outer_html)
    }

    /// Markup of the whole body.
    pub fn body_html(&self) -> String {
        self.elements
            .iter()
            .filter(|e| e.attached)
            .map(Element::outer_html)
            .collect()
    }

    fn attached(&self, node: ElementId) -> Option<&Element> {
        self.elements.get(node.0).filter(|e| e.attached)
    }
}

impl Document for MemoryDocument {
    type Node = ElementId;

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let selector = Selector::parse(selector)?;
        self.elements
            .iter()
            .position(|e| e.attached && e.matches(&selector))
            .map(ElementId)
    }

    fn inner_html(&self, node: ElementId) -> String {
        self.attached(node)
            .map(|e| e.inner_html.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&mut self, node: ElementId, markup: &str) {
        if let Some(element) = self.elements.get_mut(node.0).filter(|e| e.attached) {
            element.inner_html = markup.to_string();
        }
    }

    fn remove(&mut self, node: ElementId) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.attached = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        let mut doc = MemoryDocument::new();
        let a = doc.append("div", Some("a"), "");
        let b = doc.append("SECTION", None, "");
        doc.add_class(b, "hidden");

        assert_eq!(doc.query_selector("#a"), Some(a));
        assert_eq!(doc.query_selector(".hidden"), Some(b));
        assert_eq!(doc.query_selector("section"), Some(b));
        assert_eq!(doc.query_selector("div#a"), Some(a));
        assert_eq!(doc.query_selector("section#a"), None);
        assert_eq!(doc.query_selector("#missing"), None);
        assert_eq!(doc.query_selector("div > p"), None);
        assert_eq!(doc.query_selector("#"), None);
    }

    #[test]
    fn test_render() {
        let mut doc = MemoryDocument::new();
        let a = doc.append("div", Some("a"), "<p>hi</p>");
        doc.add_class(a, "x");
        doc.add_class(a, "y");
        doc.append("span", None, "t");

        assert_eq!(
            doc.body_html(),
            r#"<div id="a" class="x y"><p>hi</p></div><span>t</span>"#
        );
    }

    #[test]
    fn test_removed_elements_disappear() {
        let mut doc = MemoryDocument::new();
        let a = doc.append("div", Some("a"), "x");
        doc.remove(a);

        assert_eq!(doc.query_selector("#a"), None);
        assert_eq!(doc.outer_html(a), None);
        assert_eq!(doc.body_html(), "");
    }
}
