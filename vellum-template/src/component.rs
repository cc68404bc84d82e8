use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use vellum_core::{DataContext, Value};

/// A component definition: template markup, the props it accepts, its own
/// data, and the subcomponents its template may use by tag name.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    template: String,
    props: Vec<String>,
    data: DataContext,
    components: ComponentRegistry,
}

impl Component {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            props: Vec::new(),
            data: DataContext::new(),
            components: ComponentRegistry::new(),
        }
    }

    pub fn with_data(mut self, data: DataContext) -> Self {
        self.data = data;
        self
    }

    /// Declares props. Names are capitalized, so `title` and `Title` are the same prop.
    pub fn with_props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.props
            .extend(props.into_iter().map(|p| capitalize(p.as_ref())));
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.register(component);
        self
    }

    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.components = registry;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn props(&self) -> &[String] {
        &self.props
    }

    pub fn data(&self) -> &DataContext {
        &self.data
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// `prop` must already be capitalized.
    pub fn has_prop(&self, prop: &str) -> bool {
        self.props.iter().any(|p| p == prop)
    }
}

/// Tag name → component lookup. Tags match ASCII case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    by_tag: HashMap<String, Rc<Component>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            by_tag: HashMap::new(),
        }
    }

    /// Registers under the component's own name.
    pub fn register(&mut self, component: Component) {
        self.register_rc(Rc::new(component));
    }

    pub fn register_rc(&mut self, component: Rc<Component>) {
        self.by_tag
            .insert(component.name().to_ascii_lowercase(), component);
    }

    pub fn resolve(&self, tag: &str) -> Option<Rc<Component>> {
        self.by_tag.get(&tag.to_ascii_lowercase()).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

/// Values a parent passes into a subcomponent, keyed by capitalized prop name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    values: BTreeMap<String, Value>,
}

impl Props {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, prop: impl Into<String>, value: Value) {
        self.values.insert(prop.into(), value);
    }

    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.values.get(prop)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Binds every prop into the subcomponent's context.
    pub fn apply_to(self, ctx: &mut DataContext) {
        for (prop, value) in self.values {
            ctx.insert(prop, value);
        }
    }
}

/// Binding target for `v-bind` while a subcomponent placeholder is processed.
#[derive(Debug)]
pub(crate) struct PropTarget<'c> {
    pub component: &'c Component,
    pub props: Props,
}

impl<'c> PropTarget<'c> {
    pub fn new(component: &'c Component) -> Self {
        Self {
            component,
            props: Props::new(),
        }
    }
}

/// Upper-cases the first letter of every word; words are split at anything
/// that is not alphanumeric or `_`. `title` → `Title`, `some-prop` → `Some-Prop`.
pub fn capitalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}
