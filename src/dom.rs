//! Element-tree capability.
//!
//! Feature modules never reach into an ambient document. They address
//! elements through opaque [`ElementId`] handles handed out by a [`Dom`]
//! implementation: the browser binding in `web`, or [`MemoryDom`], a
//! synthetic tree used by tests and by anything that wants to drive the page
//! without a renderer.
//!
//! DESIGN
//! ======
//! Every mutation is infallible from the caller's point of view. A browser
//! call that throws is logged by the implementation and otherwise ignored,
//! matching the "missing enhancement, never a broken page" contract.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use std::collections::BTreeMap;

/// Opaque handle to an element owned by a [`Dom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// The element queries the page needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Elements carrying a class.
    Class(&'a str),
    /// The element with an `id` attribute.
    Id(&'a str),
    /// Anchors whose `href` begins with `#`.
    FragmentLinks,
    /// Elements with `tag` nested anywhere below an element carrying `ancestor_class`.
    Descendant { ancestor_class: &'a str, tag: &'a str },
}

impl Selector<'_> {
    /// Equivalent CSS selector string.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Class(class) => format!(".{class}"),
            Self::Id(id) => format!("#{id}"),
            Self::FragmentLinks => r##"a[href^="#"]"##.to_owned(),
            Self::Descendant { ancestor_class, tag } => format!(".{ancestor_class} {tag}"),
        }
    }
}

/// A viewport scroll the page asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Smooth-scroll so the element's top aligns with the viewport top.
    IntoView(ElementId),
    /// Smooth-scroll the window to offset zero.
    Top,
}

/// Element-tree operations used by the feature modules.
pub trait Dom {
    /// The page body, root of the mode classes and of created controls.
    fn body(&mut self) -> Option<ElementId>;

    /// All attached elements matching `selector`, in document order.
    fn query(&mut self, selector: &Selector<'_>) -> Vec<ElementId>;

    /// First attached element matching `selector`.
    fn query_first(&mut self, selector: &Selector<'_>) -> Option<ElementId> {
        self.query(selector).into_iter().next()
    }

    /// Create a detached element.
    fn create(&mut self, tag: &str) -> Option<ElementId>;
    fn append(&mut self, parent: ElementId, child: ElementId);
    /// Detach an element from its parent and release its handle, along with
    /// the handles of everything inside it. Released handles may be reused.
    fn remove(&mut self, element: ElementId);

    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Text content; empty when the element has none.
    fn text(&self, element: ElementId) -> String;
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Set an inline style property.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Inner `(width, height)` in CSS pixels.
    fn client_size(&self, element: ElementId) -> (f64, f64);
    /// `(left, top)` offset relative to the offset parent, in CSS pixels.
    fn offset_position(&self, element: ElementId) -> (f64, f64);

    /// Direct children of `element` carrying `class`.
    fn children_with_class(&mut self, element: ElementId, class: &str) -> Vec<ElementId>;

    fn scroll_into_view(&mut self, element: ElementId);
    fn scroll_to_top(&mut self);
}

#[derive(Clone, Debug, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    size: (f64, f64),
    offset: (f64, f64),
}

/// In-memory element tree.
///
/// Created with an empty `<body>`; build the page with [`MemoryDom::add`].
/// Scroll requests are recorded rather than performed.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    scrolls: Vec<ScrollRequest>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// The body element of every `MemoryDom`.
    pub const BODY: ElementId = ElementId(0);

    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node { tag: "body".to_owned(), ..Node::default() })],
            free: Vec::new(),
            scrolls: Vec::new(),
        }
    }

    /// Create an element with `classes` and append it to `parent`.
    pub fn add(&mut self, parent: ElementId, tag: &str, classes: &[&str]) -> ElementId {
        let id = self.push(tag);
        if let Some(node) = self.node_mut(id) {
            node.classes = classes.iter().map(|class| (*class).to_owned()).collect();
        }
        self.append(parent, id);
        id
    }

    /// Set the geometry reported by [`Dom::client_size`] and [`Dom::offset_position`].
    pub fn set_geometry(&mut self, element: ElementId, size: (f64, f64), offset: (f64, f64)) {
        if let Some(node) = self.node_mut(element) {
            node.size = size;
            node.offset = offset;
        }
    }

    /// Inline style value previously set on `element`.
    #[must_use]
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.node(element)?.styles.get(property).map(String::as_str)
    }

    /// Tag name of `element`.
    #[must_use]
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.tag.as_str())
    }

    /// Direct children of `element`.
    #[must_use]
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.node(element).map(|node| node.children.as_slice()).unwrap_or_default()
    }

    #[must_use]
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element)?.parent
    }

    /// Classes on `element`, in insertion order.
    #[must_use]
    pub fn classes(&self, element: ElementId) -> Vec<&str> {
        self.node(element).map_or_else(Vec::new, |node| node.classes.iter().map(String::as_str).collect())
    }

    /// Number of handles currently backed by an element, body included.
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Scroll requests recorded so far, oldest first.
    #[must_use]
    pub fn scrolls(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.0)?.as_ref()
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.0)?.as_mut()
    }

    fn push(&mut self, tag: &str) -> ElementId {
        let node = Some(Node { tag: tag.to_owned(), ..Node::default() });
        if let Some(index) = self.free.pop() {
            self.nodes[index] = node;
            return ElementId(index);
        }
        self.nodes.push(node);
        ElementId(self.nodes.len() - 1)
    }

    fn detach(&mut self, element: ElementId) {
        let Some(parent) = self.parent(element) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|id| *id != element);
        }
        if let Some(node) = self.node_mut(element) {
            node.parent = None;
        }
    }

    /// Attached elements in document order, body excluded.
    fn walk(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(Self::BODY).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    fn has_ancestor_with_class(&self, element: ElementId, class: &str) -> bool {
        let mut cursor = self.parent(element);
        while let Some(id) = cursor {
            if self.has_class(id, class) {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    fn matches(&self, element: ElementId, selector: &Selector<'_>) -> bool {
        let Some(node) = self.node(element) else {
            return false;
        };
        match selector {
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Id(id) => node.attributes.get("id").is_some_and(|value| value == id),
            Selector::FragmentLinks => {
                node.tag == "a" && node.attributes.get("href").is_some_and(|href| href.starts_with('#'))
            }
            Selector::Descendant { ancestor_class, tag } => {
                node.tag == *tag && self.has_ancestor_with_class(element, ancestor_class)
            }
        }
    }
}

impl Dom for MemoryDom {
    fn body(&mut self) -> Option<ElementId> {
        Some(Self::BODY)
    }

    fn query(&mut self, selector: &Selector<'_>) -> Vec<ElementId> {
        self.walk().into_iter().filter(|id| self.matches(*id, selector)).collect()
    }

    fn create(&mut self, tag: &str) -> Option<ElementId> {
        Some(self.push(tag))
    }

    fn append(&mut self, parent: ElementId, child: ElementId) {
        if self.node(parent).is_none() || self.node(child).is_none() || parent == child {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    fn remove(&mut self, element: ElementId) {
        if element == Self::BODY || self.node(element).is_none() {
            return;
        }
        self.detach(element);
        let mut released = vec![element];
        while let Some(id) = released.pop() {
            if let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) {
                released.extend(node.children);
                self.free.push(id.0);
            }
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element).is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.node(element)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn text(&self, element: ElementId) -> String {
        self.node(element).map(|node| node.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.node_mut(element) {
            text.clone_into(&mut node.text);
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn client_size(&self, element: ElementId) -> (f64, f64) {
        self.node(element).map_or((0.0, 0.0), |node| node.size)
    }

    fn offset_position(&self, element: ElementId) -> (f64, f64) {
        self.node(element).map_or((0.0, 0.0), |node| node.offset)
    }

    fn children_with_class(&mut self, element: ElementId, class: &str) -> Vec<ElementId> {
        self.children(element).iter().copied().filter(|child| self.has_class(*child, class)).collect()
    }

    fn scroll_into_view(&mut self, element: ElementId) {
        self.scrolls.push(ScrollRequest::IntoView(element));
    }

    fn scroll_to_top(&mut self) {
        self.scrolls.push(ScrollRequest::Top);
    }
}
