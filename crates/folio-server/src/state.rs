//! Application state.
//!
//! Shared state for all request handlers.

use folio_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page and layout loader.
    pub(crate) site: Site,
    /// Application version, mixed into page `ETag`s.
    pub(crate) version: String,
}
