use std::fmt::{self, Write};

use crate::{Element, Node};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Elements whose text content is written verbatim.
pub fn is_raw_text_element(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("script") || tag.eq_ignore_ascii_case("style")
}

/// Serializes a node list. Attribute order and child order are preserved,
/// so `parse_fragment(&to_markup(&nodes))` yields `nodes` again.
pub fn to_markup(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        // Writing into a String cannot fail.
        let _ = write!(out, "{node}");
    }
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(el) => fmt::Display::fmt(el, f),
            Node::Text(t) => write_escaped(f, t, false),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for attr in &self.attrs {
            write!(f, " {}=\"", attr.name)?;
            write_escaped(f, &attr.value, true)?;
            f.write_char('"')?;
        }
        f.write_char('>')?;

        if is_void_element(&self.tag) && self.children.is_empty() {
            return Ok(());
        }
        if is_raw_text_element(&self.tag) {
            for child in &self.children {
                if let Node::Text(t) = child {
                    f.write_str(t)?;
                }
            }
        } else {
            for child in &self.children {
                fmt::Display::fmt(child, f)?;
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str, in_attr: bool) -> fmt::Result {
    for ch in s.chars() {
        match ch {
            '&' => f.write_str("&amp;")?,
            '<' if !in_attr => f.write_str("&lt;")?,
            '>' if !in_attr => f.write_str("&gt;")?,
            '"' if in_attr => f.write_str("&quot;")?,
            '\u{a0}' => f.write_str("&nbsp;")?,
            _ => f.write_char(ch)?,
        }
    }
    Ok(())
}
