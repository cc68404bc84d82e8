//! Double-brace substitution over text nodes.

use pest::Parser;
use pest::error::{Error as PestError, LineColLocation};
use pest::iterators::Pair;
use thiserror::Error;
use vellum_core::{DataContext, Value};
use vellum_dom::Node;

#[derive(pest_derive::Parser)]
#[grammar = "mustache.pest"]
struct MustacheParser;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    #[error("malformed placeholder at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("closing tag `{0}` has no open section")]
    UnexpectedClose(String),

    #[error("section `{open}` closed by `{close}`")]
    MismatchedClose { open: String, close: String },

    #[error("section `{0}` is never closed")]
    UnclosedSection(String),
}

impl From<PestError<Rule>> for InterpolationError {
    fn from(err: PestError<Rule>) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        InterpolationError::Syntax {
            line,
            column,
            message: err.variant.message().into_owned(),
        }
    }
}

#[derive(Debug)]
enum Segment<'a> {
    Text(&'a str),
    Variable(&'a str),
    Section {
        name: &'a str,
        inverted: bool,
        body: Vec<Segment<'a>>,
    },
}

/// Renders every placeholder in `text` against `ctx`.
///
/// Missing names render as the empty string. Values are not HTML-escaped:
/// text nodes hold decoded text and escaping happens once, on serialization.
pub fn interpolate(text: &str, ctx: &DataContext) -> Result<String, InterpolationError> {
    if !text.contains("{{") {
        return Ok(text.to_string());
    }
    let segments = parse(text)?;
    let mut out = String::with_capacity(text.len());
    Scope::new(ctx).render(&segments, &mut out);
    Ok(out)
}

/// Interpolates every non-blank text node below `nodes`, in document order.
/// Attribute values are left alone.
pub fn interpolate_tree(nodes: &mut [Node], ctx: &DataContext) -> Result<(), InterpolationError> {
    for node in nodes {
        match node {
            Node::Text(t) if t.trim().is_empty() => {}
            Node::Text(t) => *t = interpolate(t, ctx)?,
            Node::Element(el) => interpolate_tree(&mut el.children, ctx)?,
        }
    }
    Ok(())
}

fn parse(text: &str) -> Result<Vec<Segment<'_>>, InterpolationError> {
    let template = MustacheParser::parse(Rule::template, text)?
        .next()
        .map(Pair::into_inner);

    // Open sections, innermost last. The bottom frame is the top level.
    let mut stack: Vec<(Option<(&str, bool)>, Vec<Segment<'_>>)> = vec![(None, Vec::new())];
    for pair in template.into_iter().flatten() {
        let rule = pair.as_rule();
        let raw = pair.as_str();
        let name = pair
            .into_inner()
            .next()
            .map(|p| p.as_str())
            .unwrap_or_default();
        let segment = match rule {
            Rule::text => Segment::Text(raw),
            Rule::variable | Rule::triple | Rule::ampersand => Segment::Variable(name),
            Rule::section | Rule::inverted => {
                stack.push((Some((name, rule == Rule::inverted)), Vec::new()));
                continue;
            }
            Rule::close => {
                let Some((Some((open, inverted)), body)) = stack.pop() else {
                    return Err(InterpolationError::UnexpectedClose(name.to_string()));
                };
                if open != name {
                    return Err(InterpolationError::MismatchedClose {
                        open: open.to_string(),
                        close: name.to_string(),
                    });
                }
                Segment::Section {
                    name,
                    inverted,
                    body,
                }
            }
            // comments, EOI
            _ => continue,
        };
        if let Some((_, segments)) = stack.last_mut() {
            segments.push(segment);
        }
    }

    match stack.pop() {
        Some((None, segments)) if stack.is_empty() => Ok(segments),
        Some((Some((open, _)), _)) => Err(InterpolationError::UnclosedSection(open.to_string())),
        _ => Ok(Vec::new()),
    }
}

/// Lookup stack: section values shadow the data context.
struct Scope<'v> {
    ctx: &'v DataContext,
    frames: Vec<&'v Value>,
}

impl<'v> Scope<'v> {
    fn new(ctx: &'v DataContext) -> Self {
        Self {
            ctx,
            frames: Vec::new(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&'v Value> {
        if name == "." {
            return self.frames.last().copied();
        }
        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        for &frame in self.frames.iter().rev() {
            if let Some(found) = frame.as_record().and_then(|r| r.get(head)) {
                return match rest {
                    Some(rest) => rest.split('.').try_fold(found, |v, s| v.child(s)),
                    None => Some(found),
                };
            }
        }
        self.ctx.get(name)
    }

    fn render(&mut self, segments: &[Segment<'_>], out: &mut String) {
        for segment in segments {
            match segment {
                Segment::Text(t) => out.push_str(t),
                Segment::Variable(name) => {
                    if let Some(value) = self.lookup(name) {
                        out.push_str(&value.to_string());
                    }
                }
                Segment::Section {
                    name,
                    inverted: true,
                    body,
                } => {
                    if !self.lookup(name).is_some_and(Value::is_truthy) {
                        self.render(body, out);
                    }
                }
                Segment::Section { name, body, .. } => match self.lookup(name) {
                    Some(Value::Sequence(items)) => {
                        for item in items {
                            self.frames.push(item);
                            self.render(body, out);
                            self.frames.pop();
                        }
                    }
                    Some(value) if value.is_truthy() => {
                        self.frames.push(value);
                        self.render(body, out);
                        self.frames.pop();
                    }
                    _ => {}
                },
            }
        }
    }
}
