//! Single-file components: markup in a `<template>` block, props and data
//! as JSON in an optional `<script>` block.
//!
//! ```text
//! <template>
//!   <h1>{{ Title }}</h1>
//! </template>
//! <script>
//!   { "props": ["title"], "data": { "Count": 1 } }
//! </script>
//! ```

use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use vellum_core::DataContext;

use crate::component::Component;

#[derive(pest_derive::Parser)]
#[grammar = "sfc.pest"]
struct SfcParser;

#[derive(Debug, Error)]
pub enum SfcError {
    #[error("malformed component file at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("component file has no <template> block")]
    MissingTemplate,

    #[error("component file has more than one <{0}> block")]
    DuplicateBlock(&'static str),

    #[error("unsupported script lang `{0}`, only json is understood")]
    UnsupportedScriptLang(String),

    #[error("invalid script block: {0}")]
    Script(#[from] serde_json::Error),
}

impl From<pest::error::Error<Rule>> for SfcError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        SfcError::Syntax {
            line,
            column,
            message: err.variant.message().into_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockAttr {
    pub name: String,
    pub value: Option<String>, // boolean attrs allowed
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateBlock {
    pub attrs: Vec<BlockAttr>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScriptBlock {
    pub attrs: Vec<BlockAttr>,
    pub content: String,
}

impl ScriptBlock {
    pub fn lang(&self) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == "lang")
            .and_then(|a| a.value.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sfc {
    pub template: Option<TemplateBlock>,
    pub script: Option<ScriptBlock>,
}

pub fn parse_sfc(source: &str) -> Result<Sfc, SfcError> {
    let mut sfc = Sfc::default();

    let Some(file) = SfcParser::parse(Rule::file, source)?.next() else {
        return Ok(sfc);
    };
    for node in file.into_inner() {
        match node.as_rule() {
            Rule::template => {
                if sfc.template.is_some() {
                    return Err(SfcError::DuplicateBlock("template"));
                }
                let (attrs, content) = split_block(node);
                sfc.template = Some(TemplateBlock { attrs, content });
            }
            Rule::script => {
                if sfc.script.is_some() {
                    return Err(SfcError::DuplicateBlock("script"));
                }
                let (attrs, content) = split_block(node);
                sfc.script = Some(ScriptBlock { attrs, content });
            }
            // comments, EOI
            _ => {}
        }
    }
    Ok(sfc)
}

fn split_block(block: Pair<'_, Rule>) -> (Vec<BlockAttr>, String) {
    let mut attrs = Vec::new();
    let mut content = String::new();

    for p in block.into_inner() {
        match p.as_rule() {
            Rule::template_open | Rule::script_open => {
                // attributes are direct children of *_open
                attrs.extend(
                    p.into_inner()
                        .filter(|a| a.as_rule() == Rule::attribute)
                        .map(parse_attr),
                );
            }
            Rule::template_body | Rule::script_body => content = p.as_str().to_string(),
            _ => {}
        }
    }
    (attrs, content)
}

fn parse_attr(attr: Pair<'_, Rule>) -> BlockAttr {
    let mut name = String::new();
    let mut value = None;

    for part in attr.into_inner() {
        match part.as_rule() {
            Rule::ident => name = part.as_str().to_string(),
            Rule::quoted => value = Some(strip_quotes(part.as_str()).to_string()),
            _ => {}
        }
    }
    BlockAttr { name, value }
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(s)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ScriptOptions {
    props: Vec<String>,
    data: serde_json::Map<String, serde_json::Value>,
}

impl Component {
    /// Builds a component from single-file source.
    pub fn from_sfc(name: impl Into<String>, source: &str) -> Result<Self, SfcError> {
        let name = name.into();
        let sfc = parse_sfc(source)?;
        let template = sfc.template.ok_or(SfcError::MissingTemplate)?;
        let mut component = Component::new(name, template.content);

        if let Some(script) = sfc.script {
            match script.lang() {
                None | Some("json") => {}
                Some(other) => return Err(SfcError::UnsupportedScriptLang(other.to_string())),
            }
            let options: ScriptOptions = if script.content.trim().is_empty() {
                ScriptOptions::default()
            } else {
                serde_json::from_str(&script.content)?
            };
            component = component
                .with_props(options.props)
                .with_data(options.data.into_iter().collect::<DataContext>());
        }

        debug!(
            component = component.name(),
            props = component.props().len(),
            fields = component.data().len(),
            "loaded component file"
        );
        Ok(component)
    }
}
