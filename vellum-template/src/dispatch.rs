use tracing::trace;
use vellum_core::{DataContext, Value};
use vellum_dom::{Element, Node, parse_fragment};

use crate::component::{PropTarget, capitalize};
use crate::directive::{DirectiveKind, DirectiveTable};
use crate::error::TemplateError;
use crate::events::{EventHandler, EventRegistry, Listener};
use crate::ids::{NodeIds, rename_in_node};

/// Outcome of dispatching the directives of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The node is still in place; its children may be walked.
    Unchanged,
    /// The node was removed or replaced. Continue at this index of the
    /// (edited) sibling list; it may equal the list's length.
    Resume(usize),
}

/// Event type `v-model` listens on.
const MODEL_EVENT: &str = "input";

pub(crate) struct Dispatcher<'t> {
    pub table: &'t DirectiveTable,
    pub ids: &'t mut NodeIds,
    pub ctx: &'t mut DataContext,
    pub events: &'t mut EventRegistry,
    /// Owning component, recorded on every event registration.
    pub component: &'t str,
}

impl Dispatcher<'_> {
    /// Consumes the directive attributes of `siblings[index]` one at a time,
    /// in attribute order, until none remain or a structural directive
    /// removes the node.
    pub fn run(
        &mut self,
        siblings: &mut Vec<Node>,
        index: usize,
        mut target: Option<&mut PropTarget<'_>>,
    ) -> Result<Flow, TemplateError> {
        loop {
            let Node::Element(el) = &mut siblings[index] else {
                return Ok(Flow::Unchanged);
            };
            let Some(pos) = el.attrs.position(|a| self.table.is_directive(&a.name)) else {
                return Ok(Flow::Unchanged);
            };
            let attr = el.attrs.remove(pos);
            let directive = self.table.parse(&attr)?;
            trace!(
                directive = %directive.kind,
                arg = directive.arg,
                value = directive.value,
                tag = %el.tag,
                "dispatch"
            );

            match directive.kind {
                DirectiveKind::For => return self.expand_for(siblings, index, directive.value),
                DirectiveKind::If => {
                    if !self.condition(directive.value) {
                        siblings.remove(index);
                        return Ok(Flow::Resume(index));
                    }
                }
                DirectiveKind::Bind => {
                    self.bind(el, directive.arg, directive.value, target.as_deref_mut())?
                }
                DirectiveKind::Html => self.html(el, directive.value)?,
                DirectiveKind::Model => self.model(el, directive.value)?,
                DirectiveKind::On => self.on(el, directive.arg, directive.value),
            }
        }
    }

    fn bind(
        &mut self,
        el: &mut Element,
        prop: &str,
        field: &str,
        target: Option<&mut PropTarget<'_>>,
    ) -> Result<(), TemplateError> {
        let value = self.ctx.require(field)?;
        if let Some(target) = target {
            let key = capitalize(prop);
            if target.component.has_prop(&key) {
                target.props.insert(key, value.clone());
                return Ok(());
            }
        }
        match value {
            Value::Bool(false) => {}
            value => el.attrs.push(prop, value.to_string()),
        }
        Ok(())
    }

    /// Replaces `siblings[index]` with one copy per sequence item. Each copy
    /// has the loop variable renamed to a fresh context key bound to its item,
    /// in attribute values and text only.
    fn expand_for(
        &mut self,
        siblings: &mut Vec<Node>,
        index: usize,
        expr: &str,
    ) -> Result<Flow, TemplateError> {
        let (var, field) = parse_for(expr)?;
        let items = match self.ctx.get(field) {
            None => return Err(TemplateError::SequenceNotFound(field.to_string())),
            Some(value) => value
                .as_sequence()
                .ok_or_else(|| TemplateError::NotSequence {
                    field: field.to_string(),
                    found: value.kind(),
                })?
                .to_vec(),
        };

        let original = &siblings[index];
        let mut produced = Vec::with_capacity(items.len());
        for item in items {
            let key = self.ids.synthetic_key(var, &*self.ctx);
            let mut copy = original.clone();
            rename_in_node(&mut copy, var, &key);
            produced.push(copy);
            self.ctx.insert(key, item);
        }
        trace!(var, field, count = produced.len(), "expanded loop");

        siblings.splice(index..=index, produced);
        Ok(Flow::Resume(index))
    }

    /// Only a present `true` keeps the node.
    fn condition(&self, field: &str) -> bool {
        matches!(self.ctx.get(field), Some(Value::Bool(true)))
    }

    fn html(&mut self, el: &mut Element, field: &str) -> Result<(), TemplateError> {
        let markup = self.ctx.string(field)?;
        el.children.extend(parse_fragment(markup)?);
        Ok(())
    }

    fn model(&mut self, el: &mut Element, field: &str) -> Result<(), TemplateError> {
        let value = self.ctx.string(field)?;
        el.attrs.push(MODEL_EVENT, field);
        el.attrs.push("value", value);
        self.events.register_handler(
            MODEL_EVENT,
            Listener::new(
                self.component,
                EventHandler::Model {
                    field: field.to_string(),
                },
            ),
        );
        Ok(())
    }

    fn on(&mut self, el: &mut Element, event: &str, method: &str) {
        el.attrs.push(event, method);
        self.events.register_handler(
            event,
            Listener::new(self.component, EventHandler::Method(method.to_string())),
        );
    }
}

/// Splits `<var> in <field>`.
fn parse_for(expr: &str) -> Result<(&str, &str), TemplateError> {
    let mut words = expr.split_whitespace();
    match (words.next(), words.next(), words.next(), words.next()) {
        (Some(var), Some("in"), Some(field), None) => Ok((var, field)),
        _ => Err(TemplateError::MalformedForExpression(expr.to_string())),
    }
}
