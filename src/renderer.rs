//! Template rendering for protor, backed by MiniJinja.
//! Every file name, file content and script value that supports
//! interpolation goes through the [`TemplateRenderer`] seam.

use crate::error::{Error, Result};
use cruet::Inflector;
use minijinja::Environment;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer with case-conversion filters registered.
    ///
    /// The filters cover the renames scaffolding templates keep needing:
    /// `{{ project_name | snake_case }}`, `kebab_case`, `camel_case`,
    /// `pascal_case` and `title_case`.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("snake_case", |value: String| value.to_snake_case());
        env.add_filter("kebab_case", |value: String| value.to_kebab_case());
        env.add_filter("camel_case", |value: String| value.to_camel_case());
        env.add_filter("pascal_case", |value: String| value.to_pascal_case());
        env.add_filter("title_case", |value: String| value.to_title_case());
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(Error::MinijinjaError)
    }
}
