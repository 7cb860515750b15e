//! Mock document source for testing.
//!
//! Provides [`MockSource`] for exercising loaders and handlers without
//! network access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::source::{DocumentSource, FetchError};

#[derive(Clone, Debug)]
enum Response {
    Body(String),
    Status(u16),
    Unreachable,
}

/// In-memory document source.
///
/// Unknown paths behave like a 404. Every fetched path is recorded.
///
/// # Example
///
/// ```ignore
/// use folio_site::{DocumentSource, MockSource};
///
/// let source = MockSource::new()
///     .with_document("README.md", "# Home")
///     .with_status("posts/broken/README.md", 500);
///
/// assert_eq!(source.fetch("README.md").unwrap(), "# Home");
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    responses: RwLock<HashMap<String, Response>>,
    requests: RwLock<Vec<String>>,
}

impl MockSource {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `content` for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path.into(), Response::Body(content.into()));
        self
    }

    /// Answer `path` with an HTTP error status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(self, path: impl Into<String>, status: u16) -> Self {
        self.insert(path.into(), Response::Status(status));
        self
    }

    /// Fail `path` with a connection error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreachable(self, path: impl Into<String>) -> Self {
        self.insert(path.into(), Response::Unreachable);
        self
    }

    /// Replace the content served for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_document(&self, path: impl Into<String>, content: impl Into<String>) {
        self.insert(path.into(), Response::Body(content.into()));
    }

    /// Paths fetched so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }

    fn insert(&self, path: String, response: Response) {
        self.responses.write().unwrap().insert(path, response);
    }
}

impl DocumentSource for MockSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.requests.write().unwrap().push(path.to_owned());

        let response = self.responses.read().unwrap().get(path).cloned();
        match response {
            Some(Response::Body(content)) => Ok(content),
            Some(Response::Status(404)) | None => Err(FetchError::NotFound {
                path: path.to_owned(),
            }),
            Some(Response::Status(status)) => Err(FetchError::Status {
                status,
                body: String::new(),
            }),
            Some(Response::Unreachable) => Err(FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}
