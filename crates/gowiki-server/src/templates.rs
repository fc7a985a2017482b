//! Page templates.
//!
//! Two templates exist, `view.html` and `edit.html`, each rendered with the
//! page's `title` and `body`. They are parsed once at startup, either from
//! the copies compiled into the binary or from a directory on disk, and are
//! only read afterwards.

use std::path::{Path, PathBuf};

use gowiki_storage::Page;
use minijinja::{Environment, context};

/// Template for the read-only page view.
pub(crate) const VIEW: &str = "view.html";

/// Template for the page editor.
pub(crate) const EDIT: &str = "edit.html";

/// Every template the handlers render.
const TEMPLATE_NAMES: [&str; 2] = [VIEW, EDIT];

/// Error loading templates at startup.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Read {
        /// Template file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Template source failed to parse.
    #[error("Failed to parse template: {0}")]
    Parse(#[from] minijinja::Error),
}

/// Parsed page templates.
///
/// HTML auto-escaping is on for both templates, so page bodies are shown
/// as text.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Templates compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn builtin() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.add_template(VIEW, include_str!("../templates/view.html"))?;
        env.add_template(EDIT, include_str!("../templates/edit.html"))?;
        Ok(Self { env })
    }

    /// Load `view.html` and `edit.html` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing, unreadable, or fails to parse.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        for name in TEMPLATE_NAMES {
            let path = dir.join(name);
            let source = std::fs::read_to_string(&path)
                .map_err(|source| TemplateError::Read { path, source })?;
            env.add_template_owned(name, source)?;
        }
        tracing::info!(dir = %dir.display(), "Loaded templates");
        Ok(Self { env })
    }

    /// Load from `dir` when given, otherwise use the built-in templates.
    ///
    /// # Errors
    ///
    /// See [`Templates::from_dir`] and [`Templates::builtin`].
    pub fn load(dir: Option<&Path>) -> Result<Self, TemplateError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    /// Render template `name` for `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist or fails while rendering.
    pub(crate) fn render(&self, name: &str, page: &Page) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(name)?;
        template.render(context! {
            title => &page.title,
            body => page.body_text(),
        })
    }
}
