use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vellum_core::DataContext;
use vellum_template::{Component, ComponentRegistry, Template, TemplateOptions};

mod logging;

pub use logging::init_tracing;

/// Inputs of `vellum render`.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Root component file.
    pub component: PathBuf,
    /// JSON object merged over the root component's own data.
    pub data: Option<PathBuf>,
    /// Component files usable as tags, named by file stem.
    pub components: Vec<PathBuf>,
    /// Directive marker; `v-` when unset.
    pub prefix: Option<String>,
}

/// Renders the root component to markup.
pub fn render_cmd(opts: &RenderOptions) -> Result<String> {
    let mut registry = ComponentRegistry::new();
    for path in &opts.components {
        let component = load_component(path)?;
        debug!(tag = component.name(), path = %path.display(), "registered component");
        registry.register(component);
    }

    let root = load_component(&opts.component)?.with_registry(registry);
    let data = match &opts.data {
        Some(path) => load_data(path)?,
        None => DataContext::new(),
    };
    let options = match &opts.prefix {
        Some(marker) => TemplateOptions::with_marker(marker.as_str()),
        None => TemplateOptions::default(),
    };

    let rendered = Template::new(&root)
        .with_options(options)
        .render_with(data)
        .with_context(|| format!("failed to render {}", opts.component.display()))?;

    for event in rendered.events.events() {
        for listener in rendered.events.handlers(event) {
            debug!(event, component = %listener.component, handler = ?listener.handler, "event handler");
        }
    }
    Ok(rendered.to_markup())
}

/// Reads a component file; its stem (lowercased) becomes the tag name.
pub fn load_component(path: &Path) -> Result<Component> {
    let src =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("component")
        .to_ascii_lowercase();
    Component::from_sfc(name, &src).with_context(|| format!("failed to load {}", path.display()))
}

/// Reads a JSON object into a data context.
pub fn load_data(path: &Path) -> Result<DataContext> {
    let src =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&src)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    DataContext::try_from(json).with_context(|| format!("invalid data in {}", path.display()))
}

/// Writes `markup` to `out`, or to stdout when unset.
pub fn write_output(markup: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
            fs::write(path, markup)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "rendered");
        }
        None => println!("{markup}"),
    }
    Ok(())
}
