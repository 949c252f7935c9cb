//! Template engine for HTML pages using Jinja2 syntax.

use minijinja::{Environment, Value};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template directory used when `init_templates` was never called
const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Load every template under `dir` into the global environment.
///
/// Returns the number of templates loaded. Only the first call has an
/// effect; later calls keep the existing environment.
pub fn init_templates(dir: &str) -> usize {
    let mut initialized = false;
    let env = TEMPLATE_ENV.get_or_init(|| {
        initialized = true;
        build_environment(Path::new(dir))
    });

    if !initialized {
        tracing::warn!("Template environment already initialized, ignoring '{}'", dir);
    }

    env.templates().count()
}

fn build_environment(template_path: &Path) -> Environment<'static> {
    let mut env = Environment::new();

    if template_path.exists() {
        load_templates_recursive(&mut env, template_path, template_path);
    } else {
        tracing::warn!(
            "Template directory {} does not exist",
            template_path.display()
        );
    }

    env
}

/// Recursively load all .html templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let Ok(entries) = std::fs::read_dir(current_path) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "html") {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        // Names always use forward slashes so `{% extends %}` paths match
        let template_name = relative.to_string_lossy().replace('\\', "/");

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                // Templates live for the whole process
                let static_name: &'static str = Box::leak(template_name.clone().into_boxed_str());
                let static_content: &'static str = Box::leak(content.into_boxed_str());
                if let Err(e) = env.add_template(static_name, static_content) {
                    tracing::warn!("Failed to load template {}: {}", template_name, e);
                } else {
                    tracing::debug!("Loaded template: {}", template_name);
                }
            }
            Err(e) => tracing::warn!("Failed to read template {}: {}", path.display(), e),
        }
    }
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| build_environment(Path::new(DEFAULT_TEMPLATE_DIR)))
}

/// Render a page template with the given context.
///
/// # Arguments
/// * `template_name` - Path relative to the template directory (e.g. "auth/login.html")
/// * `ctx` - Context built with `minijinja::context!`
pub fn render_page(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}
