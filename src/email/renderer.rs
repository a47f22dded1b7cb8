/**
 * Email Template Renderer
 *
 * This module renders HTML email bodies from templates on disk. Templates
 * are resolved from a configured directory by relative path, e.g.
 * `email/welcome_mail.html`.
 *
 * # Error Conditions
 *
 * - `EmailError::TemplateNotFound` when the name does not resolve
 * - `EmailError::MissingContext` when the template references a value the
 *   caller did not supply (lookups are strict; there is no silent fallback
 *   to an empty string)
 *
 * Rendering has no side effects beyond string construction.
 */

use std::path::Path;

use minijinja::{path_loader, Environment, ErrorKind, UndefinedBehavior};

use crate::email::error::EmailError;

/// Renders named templates against caller-supplied contexts
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer that resolves template names under `template_dir`
    pub fn new(template_dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir.as_ref()));
        // A template referencing a missing value must fail, not render blanks
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Render `template_name` with `context`, producing an HTML string
    pub fn render(
        &self,
        template_name: &str,
        context: &serde_json::Value,
    ) -> Result<String, EmailError> {
        let template = self.env.get_template(template_name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                EmailError::TemplateNotFound(template_name.to_string())
            } else {
                EmailError::Render(e)
            }
        })?;

        template.render(context).map_err(|e| {
            if e.kind() == ErrorKind::UndefinedError {
                EmailError::MissingContext(e.to_string())
            } else {
                EmailError::Render(e)
            }
        })
    }
}
