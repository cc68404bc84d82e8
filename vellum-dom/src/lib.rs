//! Markup tree for vellum templates: ordered attributes, owned children,
//! a pest-based fragment parser and a serializer that round-trips it.

mod error;
mod parse;
mod serialize;

pub use error::MarkupError;
pub use parse::parse_fragment;
pub use serialize::{is_raw_text_element, is_void_element, to_markup};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(t),
        Node::Element(el) => el.children.iter().for_each(|c| collect_text(c, out)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attrs,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// Child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Attribute list in authored order. Duplicate names are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attrs(Vec<Attr>);

impl Attrs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(Attr::new(name, value));
    }

    pub fn push_attr(&mut self, attr: Attr) {
        self.0.push(attr);
    }

    /// Value of the first attribute called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn position(&self, pred: impl FnMut(&Attr) -> bool) -> Option<usize> {
        self.0.iter().position(pred)
    }

    /// Removes the attribute at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Attr {
        self.0.remove(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attr> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Attr> {
        self.0.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Attr> for Attrs {
    fn from_iter<I: IntoIterator<Item = Attr>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Attrs {
    type Item = Attr;
    type IntoIter = std::vec::IntoIter<Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attrs {
    type Item = &'a Attr;
    type IntoIter = std::slice::Iter<'a, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Allow concise attribute lists
impl From<()> for Attrs {
    fn from(_: ()) -> Self {
        Attrs::default()
    }
}
impl From<Vec<(&str, &str)>> for Attrs {
    fn from(v: Vec<(&str, &str)>) -> Self {
        v.into_iter().map(|(k, v)| Attr::new(k, v)).collect()
    }
}

pub fn h(tag: impl Into<String>, attrs: impl Into<Attrs>, children: Vec<Node>) -> Node {
    Node::Element(Element {
        tag: tag.into(),
        attrs: attrs.into(),
        children,
    })
}
pub fn text(t: impl Into<String>) -> Node {
    Node::Text(t.into())
}
