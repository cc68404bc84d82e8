use std::borrow::Cow;

use pest::Parser;
use pest::iterators::{Pair, Pairs};

use crate::{Attr, Element, MarkupError, Node};

#[derive(pest_derive::Parser)]
#[grammar = "markup.pest"]
struct MarkupParser;

/// Parses a markup fragment into its top-level nodes.
///
/// The fragment is read in a neutral block context: there is no implicit
/// `<html>`/`<body>` wrapping and no tag-specific reparenting. Comments and
/// doctypes are dropped; whitespace-only text is kept.
pub fn parse_fragment(input: &str) -> Result<Vec<Node>, MarkupError> {
    let mut pairs = MarkupParser::parse(Rule::fragment, input)?;
    let Some(fragment) = pairs.next() else {
        return Ok(Vec::new());
    };
    collect_nodes(fragment.into_inner())
}

fn collect_nodes(pairs: Pairs<'_, Rule>) -> Result<Vec<Node>, MarkupError> {
    pairs
        .filter_map(|pair| build_node(pair).transpose())
        .collect()
}

fn build_node(pair: Pair<'_, Rule>) -> Result<Option<Node>, MarkupError> {
    Ok(match pair.as_rule() {
        Rule::text => Some(Node::Text(decode_entities(pair.as_str()).into_owned())),
        Rule::element
        | Rule::self_closing
        | Rule::void_element
        | Rule::script_element
        | Rule::style_element => Some(Node::Element(build_element(pair)?)),
        // comments, doctypes, EOI
        _ => None,
    })
}

fn build_element(pair: Pair<'_, Rule>) -> Result<Element, MarkupError> {
    let mut el = Element::new("");
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::tag_name | Rule::void_name | Rule::script_name | Rule::style_name => {
                el.tag = part.as_str().to_string();
            }
            Rule::close_name => {
                if !part.as_str().eq_ignore_ascii_case(&el.tag) {
                    let (line, column) = part.line_col();
                    return Err(MarkupError {
                        line,
                        column,
                        message: format!("expected </{}>, found </{}>", el.tag, part.as_str()),
                    });
                }
            }
            Rule::attribute => el.attrs.push_attr(build_attr(part)),
            Rule::script_text | Rule::style_text => {
                if !part.as_str().is_empty() {
                    el.children.push(Node::Text(part.as_str().to_string()));
                }
            }
            _ => el.children.extend(build_node(part)?),
        }
    }
    Ok(el)
}

fn build_attr(pair: Pair<'_, Rule>) -> Attr {
    let mut attr = Attr::new("", "");
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::attr_name => attr.name = part.as_str().to_string(),
            Rule::dq_value | Rule::sq_value | Rule::uq_value => {
                attr.value = decode_entities(part.as_str()).into_owned();
            }
            _ => {}
        }
    }
    attr
}

/// Decodes the named entities the serializer produces plus numeric references.
/// Unknown entities are left untouched.
pub(crate) fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match rest.find(';').filter(|&end| end <= 10) {
            Some(end) => match decode_entity(&rest[1..end]) {
                Some(ch) => {
                    out.push(ch);
                    rest = &rest[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            },
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
