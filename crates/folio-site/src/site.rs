//! Page and layout loading.

use std::sync::Arc;

use folio_renderer::{DocumentPipeline, ProcessedDocument, RenderError};
use serde::Serialize;
use tracing::instrument;

use crate::navigation::{BreadcrumbEntry, Settings, build_breadcrumbs, slug_segments};
use crate::source::{DocumentSource, FetchError};

/// Source path of the settings document.
pub const SETTINGS_PATH: &str = "settings.json";

/// Document file name inside each route directory.
pub const DOCUMENT_NAME: &str = "README.md";

/// Error loading a page.
///
/// Fetch failures collapse into two user-facing classes: not found and
/// internal error.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Source has no document for the route.
    #[error("not found")]
    NotFound {
        /// Route slug.
        slug: String,
    },

    /// Any other fetch failure.
    #[error("internal error")]
    Internal(#[source] FetchError),

    /// Document fetched but could not be rendered.
    #[error("internal error")]
    Render(#[from] RenderError),
}

impl PageError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Internal(_) | Self::Render(_) => 500,
        }
    }

    fn from_fetch(slug: &str, error: FetchError) -> Self {
        match error {
            FetchError::NotFound { .. } => Self::NotFound {
                slug: slug.to_owned(),
            },
            other => Self::Internal(other),
        }
    }
}

/// Error loading the site layout.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Settings document could not be fetched or decoded.
    #[error("failed to load settings")]
    Settings(#[from] FetchError),
}

/// Settings plus breadcrumbs for one route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutData {
    /// Site settings, flattened into the top level.
    #[serde(flatten)]
    pub settings: Settings,
    /// Breadcrumbs for the route.
    #[serde(rename = "breadCrumbs")]
    pub bread_crumbs: Vec<BreadcrumbEntry>,
}

/// Source path of the document for a route slug.
///
/// The root route maps to `README.md`, `posts/hello` to
/// `posts/hello/README.md`.
#[must_use]
pub fn document_path(slug: &str) -> String {
    let segments = slug_segments(slug);
    if segments.is_empty() {
        DOCUMENT_NAME.to_owned()
    } else {
        format!("{}/{DOCUMENT_NAME}", segments.join("/"))
    }
}

/// Loads pages and layout data from a document source.
///
/// Nothing is cached: every call fetches from the source.
#[derive(Clone)]
pub struct Site {
    source: Arc<dyn DocumentSource>,
    pipeline: DocumentPipeline,
}

impl Site {
    /// Create a site over a source and a rendering pipeline.
    #[must_use]
    pub fn new(source: Arc<dyn DocumentSource>, pipeline: DocumentPipeline) -> Self {
        Self { source, pipeline }
    }

    /// The rendering pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &DocumentPipeline {
        &self.pipeline
    }

    /// Fetch and render the document for a route.
    #[instrument(skip(self))]
    pub async fn load_page(&self, slug: &str) -> Result<ProcessedDocument, PageError> {
        let markdown = self
            .fetch(document_path(slug))
            .await
            .map_err(|e| PageError::from_fetch(slug, e))?;
        let document = self.pipeline.process(&markdown).await?;
        tracing::info!(bytes = document.text.len(), "Rendered page");
        Ok(document)
    }

    /// Fetch settings and compute breadcrumbs for a route.
    #[instrument(skip(self))]
    pub async fn load_layout(&self, slug: &str) -> Result<LayoutData, SiteError> {
        let raw = self.fetch(SETTINGS_PATH.to_owned()).await?;
        let settings: Settings = serde_json::from_str(&raw).map_err(FetchError::from)?;
        let bread_crumbs = build_breadcrumbs(&settings.navigation, &slug_segments(slug));
        Ok(LayoutData {
            settings,
            bread_crumbs,
        })
    }

    async fn fetch(&self, path: String) -> Result<String, FetchError> {
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || source.fetch(&path)).await?
    }
}
