use std::fmt;

use vellum_dom::Attr;

use crate::error::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Bind,
    For,
    Html,
    If,
    Model,
    On,
}

impl DirectiveKind {
    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Bind => "bind",
            DirectiveKind::For => "for",
            DirectiveKind::Html => "html",
            DirectiveKind::If => "if",
            DirectiveKind::Model => "model",
            DirectiveKind::On => "on",
        }
    }

    /// `bind` and `on` carry a sub-key after `:` (prop name, event name).
    fn takes_argument(self) -> bool {
        matches!(self, DirectiveKind::Bind | DirectiveKind::On)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A directive parsed from an attribute, e.g. `v-on:click="Add"` →
/// `(On, "click", "Add")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub kind: DirectiveKind,
    /// Sub-key after `:`; empty when absent.
    pub arg: &'a str,
    pub value: &'a str,
}

/// The directive prefixes in execution precedence.
///
/// Structural directives come first so that nothing is bound onto a node
/// that a loop or conditional is about to replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveTable {
    marker: String,
    entries: Vec<(DirectiveKind, String)>,
}

impl DirectiveTable {
    pub const DEFAULT_MARKER: &'static str = "v-";

    pub const PRECEDENCE: [DirectiveKind; 6] = [
        DirectiveKind::For,
        DirectiveKind::If,
        DirectiveKind::Model,
        DirectiveKind::On,
        DirectiveKind::Bind,
        DirectiveKind::Html,
    ];

    /// Builds the table for a marker such as `v-` (giving `v-for`, `v-if`, ...).
    pub fn with_marker(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        let entries = Self::PRECEDENCE
            .iter()
            .map(|&kind| (kind, format!("{marker}{}", kind.name())))
            .collect();
        Self { marker, entries }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (DirectiveKind, &str)> {
        self.entries.iter().map(|(kind, prefix)| (*kind, prefix.as_str()))
    }

    /// Any attribute starting with the marker is a directive, known or not.
    pub fn is_directive(&self, key: &str) -> bool {
        key.starts_with(&self.marker)
    }

    /// Precedence slot of the first prefix `key` starts with.
    pub fn slot(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(_, prefix)| key.starts_with(prefix.as_str()))
    }

    /// Splits `attr.name` at the first `:` and matches the head exactly
    /// against the known prefixes.
    pub fn parse<'a>(&self, attr: &'a Attr) -> Result<Directive<'a>, TemplateError> {
        let (head, arg) = attr
            .name
            .split_once(':')
            .unwrap_or((attr.name.as_str(), ""));
        let kind = self
            .entries
            .iter()
            .find(|(_, prefix)| prefix == head)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| TemplateError::UnknownDirective(head.to_string()))?;
        if kind.takes_argument() && arg.is_empty() {
            return Err(TemplateError::UnknownDirective(attr.name.clone()));
        }
        Ok(Directive {
            kind,
            arg,
            value: &attr.value,
        })
    }
}

impl Default for DirectiveTable {
    fn default() -> Self {
        Self::with_marker(Self::DEFAULT_MARKER)
    }
}
