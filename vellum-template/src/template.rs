use std::rc::Rc;

use tracing::debug;
use vellum_core::DataContext;
use vellum_dom::{Element, Node, parse_fragment, to_markup};

use crate::component::{Component, ComponentRegistry, PropTarget};
use crate::directive::DirectiveTable;
use crate::dispatch::{Dispatcher, Flow};
use crate::error::TemplateError;
use crate::events::EventRegistry;
use crate::ids::NodeIds;
use crate::interpolate::interpolate_tree;
use crate::order::order_attrs;

/// Subcomponents may nest this deep before execution gives up.
pub const MAX_COMPONENT_DEPTH: usize = 32;

/// Tag of the stand-in that holds a subcomponent's place until the text pass
/// is done. The markup grammar cannot produce it.
const SLOT_TAG: &str = "#rendered";
const SLOT_INDEX: &str = "index";

#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    pub directives: DirectiveTable,
}

impl TemplateOptions {
    /// Options for a directive marker other than `v-`.
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            directives: DirectiveTable::with_marker(marker),
        }
    }
}

/// Output of one execution.
#[derive(Debug)]
pub struct Rendered {
    pub nodes: Vec<Node>,
    /// The data context after execution, including synthetic loop keys.
    pub context: DataContext,
    pub events: EventRegistry,
}

impl Rendered {
    pub fn to_markup(&self) -> String {
        to_markup(&self.nodes)
    }
}

/// One execution of a component's template.
pub struct Template<'c> {
    component: &'c Component,
    options: TemplateOptions,
    ids: NodeIds,
    depth: usize,
    /// Registries searched for subcomponent tags, innermost last.
    scopes: Vec<&'c ComponentRegistry>,
    /// Finished subcomponent output, spliced in after the text pass.
    rendered: Vec<Vec<Node>>,
}

impl<'c> Template<'c> {
    pub fn new(component: &'c Component) -> Self {
        Self {
            component,
            options: TemplateOptions::default(),
            ids: NodeIds::new(),
            depth: 0,
            scopes: vec![component.components()],
            rendered: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    /// Renders against the component's own data.
    pub fn render(&mut self) -> Result<Rendered, TemplateError> {
        self.render_with(DataContext::new())
    }

    /// Renders against the component's data with `data` merged over it.
    pub fn render_with(&mut self, data: DataContext) -> Result<Rendered, TemplateError> {
        let mut context = self.component.data().clone();
        context.merge(data);
        let mut events = EventRegistry::new();
        let nodes = self.execute(&mut context, &mut events)?;
        Ok(Rendered {
            nodes,
            context,
            events,
        })
    }

    /// Parses the template, runs the directive pass over every element, then
    /// interpolates text. Subcomponent output is already interpolated against
    /// the subcomponent's own data and is spliced in last, untouched by this
    /// execution's text pass. Loop expansion adds keys to `ctx`; handlers
    /// registered by `v-model` and `v-on` go into `events`.
    pub fn execute(
        &mut self,
        ctx: &mut DataContext,
        events: &mut EventRegistry,
    ) -> Result<Vec<Node>, TemplateError> {
        self.ids.reset();
        self.rendered.clear();
        debug!(
            component = self.component.name(),
            depth = self.depth,
            "executing template"
        );

        let mut nodes = parse_fragment(self.component.template())?;
        self.execute_children(&mut nodes, ctx, events)?;
        interpolate_tree(&mut nodes, ctx)?;
        fill_slots(&mut nodes, &mut self.rendered);

        debug!(
            component = self.component.name(),
            nodes = nodes.len(),
            "template executed"
        );
        Ok(nodes)
    }

    fn execute_children(
        &mut self,
        siblings: &mut Vec<Node>,
        ctx: &mut DataContext,
        events: &mut EventRegistry,
    ) -> Result<(), TemplateError> {
        let mut index = 0;
        while index < siblings.len() {
            index = self.execute_element(siblings, index, ctx, events)?;
        }
        Ok(())
    }

    /// Processes `siblings[index]` and returns the index to visit next.
    fn execute_element(
        &mut self,
        siblings: &mut Vec<Node>,
        index: usize,
        ctx: &mut DataContext,
        events: &mut EventRegistry,
    ) -> Result<usize, TemplateError> {
        // Text is left for the interpolation pass.
        let Node::Element(el) = &mut siblings[index] else {
            return Ok(index + 1);
        };
        if let Some(sub) = self.resolve(&el.tag) {
            return self.expand_subcomponent(siblings, index, &sub, ctx, events);
        }

        order_attrs(&mut el.attrs, &self.options.directives);
        let flow = Dispatcher {
            table: &self.options.directives,
            ids: &mut self.ids,
            ctx: &mut *ctx,
            events: &mut *events,
            component: self.component.name(),
        }
        .run(siblings, index, None)?;

        match flow {
            Flow::Resume(next) => Ok(next),
            Flow::Unchanged => {
                if let Node::Element(el) = &mut siblings[index] {
                    self.execute_children(&mut el.children, ctx, events)?;
                }
                Ok(index + 1)
            }
        }
    }

    fn resolve(&self, tag: &str) -> Option<Rc<Component>> {
        self.scopes.iter().rev().find_map(|reg| reg.resolve(tag))
    }

    /// Renders `sub` for the placeholder at `siblings[index]` and leaves a
    /// slot stand-in there; [`fill_slots`] swaps the output in once this
    /// execution's text pass is done. The placeholder's directives run first:
    /// `v-for` and `v-if` may multiply or drop it, and `v-bind` fills the props.
    fn expand_subcomponent(
        &mut self,
        siblings: &mut Vec<Node>,
        index: usize,
        sub: &Component,
        ctx: &mut DataContext,
        events: &mut EventRegistry,
    ) -> Result<usize, TemplateError> {
        if let Node::Element(el) = &mut siblings[index] {
            order_attrs(&mut el.attrs, &self.options.directives);
        }
        let mut target = PropTarget::new(sub);
        let flow = Dispatcher {
            table: &self.options.directives,
            ids: &mut self.ids,
            ctx: &mut *ctx,
            events: &mut *events,
            component: self.component.name(),
        }
        .run(siblings, index, Some(&mut target))?;
        if let Flow::Resume(next) = flow {
            return Ok(next);
        }

        if self.depth >= MAX_COMPONENT_DEPTH {
            return Err(TemplateError::ComponentDepth {
                component: sub.name().to_string(),
                limit: MAX_COMPONENT_DEPTH,
            });
        }
        debug!(
            parent = self.component.name(),
            component = sub.name(),
            props = target.props.len(),
            "expanding subcomponent"
        );

        let mut sub_ctx = sub.data().clone();
        target.props.apply_to(&mut sub_ctx);
        let mut scopes = self.scopes.clone();
        scopes.push(sub.components());
        let mut nested = Template {
            component: sub,
            options: self.options.clone(),
            ids: NodeIds::new(),
            depth: self.depth + 1,
            scopes,
            rendered: Vec::new(),
        };
        let nodes = nested.execute(&mut sub_ctx, events)?;

        let mut slot = Element::new(SLOT_TAG);
        slot.attrs.push(SLOT_INDEX, self.rendered.len().to_string());
        self.rendered.push(nodes);
        siblings[index] = Node::Element(slot);
        Ok(index + 1)
    }
}

/// Replaces every slot stand-in below `nodes` with its subcomponent output.
fn fill_slots(nodes: &mut Vec<Node>, rendered: &mut [Vec<Node>]) {
    let mut index = 0;
    while index < nodes.len() {
        match slot_index(&nodes[index]) {
            Some(slot) => {
                let output = rendered.get_mut(slot).map(std::mem::take).unwrap_or_default();
                let count = output.len();
                nodes.splice(index..=index, output);
                index += count;
            }
            None => {
                if let Node::Element(el) = &mut nodes[index] {
                    fill_slots(&mut el.children, rendered);
                }
                index += 1;
            }
        }
    }
}

fn slot_index(node: &Node) -> Option<usize> {
    let el = node.as_element().filter(|el| el.tag == SLOT_TAG)?;
    el.attrs.get(SLOT_INDEX)?.parse().ok()
}
