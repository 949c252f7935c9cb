//! Server-rendered HTML pages.
//!
//! Templates live under the configured template directory (default
//! `templates/`) and use Jinja2 syntax. Files ending in `.html` are
//! auto-escaped.
//!
//! # Usage
//!
//! ```ignore
//! use minijinja::context;
//! use crate::shared::templates::render_page;
//!
//! let html = render_page("auth/login.html", context! { messages => messages })?;
//! ```

pub mod engine;

pub use engine::{init_templates, render_page, template_exists, TemplateError};
