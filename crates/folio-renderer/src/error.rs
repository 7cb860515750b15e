//! Error types for document rendering.

use std::path::PathBuf;

/// Error raised while transforming a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Frontmatter block is not valid YAML.
    #[error("invalid frontmatter")]
    Frontmatter(#[from] serde_yaml::Error),

    /// Frontmatter block parsed, but is not a key-value mapping.
    #[error("frontmatter must be a mapping, got {kind}")]
    FrontmatterShape {
        /// YAML kind found at the top level.
        kind: &'static str,
    },

    /// Extension grammars could not be loaded.
    #[error("failed to load grammars from {}", path.display())]
    Grammars {
        /// Extension directory.
        path: PathBuf,
        /// Underlying loading error.
        #[source]
        source: syntect::LoadingError,
    },

    /// Background task building the grammar registry did not complete.
    #[error("grammar registry task failed")]
    RegistryTask(#[from] tokio::task::JoinError),

    /// Scope has no grammar in the registry.
    #[error("no grammar for scope {0}")]
    UnknownScope(String),

    /// Grammar failed while tokenizing a line.
    #[error("highlighting failed for {scope}")]
    Highlight {
        /// Grammar scope being highlighted.
        scope: String,
        /// Underlying parser error.
        #[source]
        source: syntect::parsing::ParsingError,
    },

    /// Grammar produced an unbalanced scope operation.
    #[error("scope stack error for {scope}")]
    ScopeStack {
        /// Grammar scope being highlighted.
        scope: String,
        /// Underlying scope error.
        #[source]
        source: syntect::parsing::ScopeError,
    },

    /// Theme name is not bundled.
    #[error("unknown theme '{name}' (available: {available})")]
    UnknownTheme {
        /// Requested theme.
        name: String,
        /// Comma-separated list of bundled themes.
        available: String,
    },

    /// Stylesheet generation failed.
    #[error("failed to generate stylesheet")]
    Css(#[from] syntect::Error),
}
