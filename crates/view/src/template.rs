//! Template engines
//!
//! A [`TemplateEngine`] turns a payload into markup. [`JinjaTemplate`] is
//! the stock engine, backed by `minijinja` with HTML auto-escaping on for
//! every template regardless of its name. Any
//! `Fn(&Payload) -> Result<String>` closure is also an engine.

use crate::error::{Result, ViewError};
use crate::Payload;
use minijinja::{AutoEscape, Environment};
use std::path::Path;

/// Produces markup from a payload.
///
/// Implementations must be deterministic: the same payload yields the same
/// markup byte for byte.
pub trait TemplateEngine {
    /// Render `payload` to markup.
    fn render(&self, payload: &Payload) -> Result<String>;
}

impl<F> TemplateEngine for F
where
    F: Fn(&Payload) -> Result<String>,
{
    fn render(&self, payload: &Payload) -> Result<String> {
        self(payload)
    }
}

/// One compiled Jinja template.
pub struct JinjaTemplate {
    env: Environment<'static>,
    name: String,
}

impl JinjaTemplate {
    /// Compile `source` under `name`.
    ///
    /// # Errors
    ///
    /// `Template` if the source does not parse.
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template_owned(name.clone(), source.into())
            .map_err(|e| ViewError::Template(format!("failed to add {name} template: {e}")))?;
        Ok(Self { env, name })
    }

    /// Load and compile a template file. The file name becomes the
    /// template name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ViewError::Template(format!("failed to read {}: {e}", path.display())))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_source(name, source)
    }

    /// Template name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TemplateEngine for JinjaTemplate {
    fn render(&self, payload: &Payload) -> Result<String> {
        self.env
            .get_template(&self.name)
            .map_err(|e| ViewError::Template(format!("missing {} template: {e}", self.name)))?
            .render(payload)
            .map_err(|e| ViewError::Render(format!("{} render failed: {e}", self.name)))
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .finish()
    }
}
