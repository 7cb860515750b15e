//! Remote content loading for Folio.
//!
//! This crate provides:
//! - [`DocumentSource`]: where raw documents come from ([`HttpSource`] in
//!   production, `MockSource` with the `mock` feature)
//! - [`Site`]: page rendering and layout loading per route
//! - Breadcrumb search over the settings navigation tree
//!
//! # Quick Start
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use folio_renderer::DocumentPipeline;
//! use folio_site::{HttpSource, Site};
//!
//! let source = Arc::new(HttpSource::new("https://example.com/blog", None));
//! let site = Site::new(source, DocumentPipeline::default());
//!
//! let page = site.load_page("posts/hello").await?;
//! let layout = site.load_layout("posts/hello").await?;
//! # Ok(())
//! # }
//! ```

#[cfg(any(test, feature = "mock"))]
mod mock;
mod navigation;
mod site;
mod source;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use navigation::{
    BreadcrumbEntry, NavigationItem, Settings, build_breadcrumbs, find_breadcrumb, slug_segments,
};
pub use site::{DOCUMENT_NAME, LayoutData, PageError, SETTINGS_PATH, Site, SiteError, document_path};
pub use source::{DocumentSource, FetchError, HttpSource};
