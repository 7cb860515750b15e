//! Document tree representation.
//!
//! An ordered tree of element and text nodes, modeled after HTML:
//! every [`Element`] has a tag name, an insertion-ordered property list
//! and an ordered list of children. The `class` property is list-valued.
//!
//! A tree is owned by a single pipeline run and discarded after
//! serialization.

/// Root of a document tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level nodes in document order.
    pub children: Vec<Node>,
}

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Element with tag, properties and children.
    Element(Element),
    /// Text content (unescaped).
    Text(String),
}

/// Element node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name (e.g., "pre", "code").
    pub tag: String,
    /// Properties in insertion order.
    pub properties: Vec<(String, PropertyValue)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

/// Value of an element property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    /// Single string value.
    Text(String),
    /// Space-separated token list (used for `class`).
    List(Vec<String>),
    /// Boolean attribute (`checked`, `disabled`).
    Bool(bool),
}

impl Document {
    /// Create a document from top-level nodes.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Get the node at an index path (one index per tree level).
    pub(crate) fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for &index in rest {
            match node {
                Node::Element(element) => node = element.children.get_mut(index)?,
                Node::Text(_) => return None,
            }
        }
        Some(node)
    }

    /// Concatenated text of the whole document.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Return the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Element {
    /// Create an element with no properties or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set a string property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, PropertyValue::Text(value.into()));
        self
    }

    /// Set a boolean property.
    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set_property(name, PropertyValue::Bool(value));
        self
    }

    /// Set the class list.
    #[must_use]
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = classes.into_iter().map(Into::into).collect();
        self.set_property("class", PropertyValue::List(list));
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace all children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Set a property, replacing an existing value with the same name.
    pub fn set_property(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        if let Some(slot) = self.properties.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.properties.push((name, value));
        }
    }

    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Class list, if the `class` property is present and list-valued.
    #[must_use]
    pub fn class_names(&self) -> Option<&[String]> {
        match self.property("class")? {
            PropertyValue::List(list) => Some(list),
            PropertyValue::Text(_) | PropertyValue::Bool(_) => None,
        }
    }

    /// Check the tag name.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

/// Stack-based tree builder fed by start/end/text events.
///
/// Transparent frames collect children like elements do, but splice
/// them into the parent on close instead of wrapping them.
pub(crate) struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Frame>,
}

struct Frame {
    element: Element,
    transparent: bool,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            root: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Open an element; subsequent nodes become its children.
    pub(crate) fn open(&mut self, element: Element) {
        self.open.push(Frame {
            element,
            transparent: false,
        });
    }

    /// Open a frame whose children are spliced into the parent on close.
    pub(crate) fn open_transparent(&mut self) {
        self.open.push(Frame {
            element: Element::new(""),
            transparent: true,
        });
    }

    /// Close the innermost open frame. No-op when nothing is open.
    pub(crate) fn close(&mut self) {
        let Some(frame) = self.open.pop() else {
            return;
        };
        let siblings = self.children_mut();
        if frame.transparent {
            for child in frame.element.children {
                match child {
                    Node::Text(text) => push_text(siblings, &text),
                    node @ Node::Element(_) => siblings.push(node),
                }
            }
        } else {
            siblings.push(Node::Element(frame.element));
        }
    }

    /// Append text, merging with a preceding text node.
    pub(crate) fn text(&mut self, text: &str) {
        if !text.is_empty() {
            push_text(self.children_mut(), text);
        }
    }

    /// Append a complete node.
    pub(crate) fn push(&mut self, node: impl Into<Node>) {
        self.children_mut().push(node.into());
    }

    /// Innermost open element, if any.
    pub(crate) fn current_mut(&mut self) -> Option<&mut Element> {
        self.open.last_mut().map(|frame| &mut frame.element)
    }

    /// Number of open frames.
    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    /// Close all remaining frames and return the top-level nodes.
    pub(crate) fn finish(mut self) -> Vec<Node> {
        while !self.open.is_empty() {
            self.close();
        }
        self.root
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(frame) => &mut frame.element.children,
            None => &mut self.root,
        }
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::text(text));
    }
}
