//! Directive-driven template execution.
//!
//! A [`Template`] parses a component's markup, walks it depth first running
//! `v-for`, `v-if`, `v-model`, `v-on`, `v-bind` and `v-html` (in that
//! order on each element), expands subcomponent tags, and finally
//! substitutes `{{ }}` placeholders in text nodes.

mod component;
mod directive;
mod dispatch;
mod error;
mod events;
mod ids;
mod interpolate;
mod order;
mod sfc;
mod template;

pub use component::{Component, ComponentRegistry, Props, capitalize};
pub use directive::{Directive, DirectiveKind, DirectiveTable};
pub use dispatch::Flow;
pub use error::TemplateError;
pub use events::{EventHandler, EventRegistry, Listener};
pub use ids::{NodeIds, rename_in_node, replace_ident};
pub use interpolate::{InterpolationError, interpolate, interpolate_tree};
pub use order::order_attrs;
pub use sfc::{BlockAttr, ScriptBlock, Sfc, SfcError, TemplateBlock, parse_sfc};
pub use template::{MAX_COMPONENT_DEPTH, Rendered, Template, TemplateOptions};
