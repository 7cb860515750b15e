//! Remote document source.
//!
//! Paths passed to [`DocumentSource::fetch`] are relative to the source
//! root, e.g. `settings.json` or `posts/hello/README.md`.

use std::time::Duration;

use ureq::Agent;

/// Error fetching a document from the source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Document does not exist (HTTP 404).
    #[error("document not found: {path}")]
    NotFound {
        /// Requested path.
        path: String,
    },

    /// Source returned a non-success status other than 404.
    #[error("HTTP error: {status} - {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    Http(#[from] ureq::Error),

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Response body is not the expected JSON.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Blocking fetch task did not complete.
    #[error("fetch task failed")]
    Task(#[from] tokio::task::JoinError),
}

/// Origin of raw documents.
///
/// Implementations block; async callers run them on the blocking pool.
pub trait DocumentSource: Send + Sync {
    /// Fetch a document as text.
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Document source backed by plain HTTP GET requests.
pub struct HttpSource {
    agent: Agent,
    base_url: String,
}

impl HttpSource {
    /// Create a source rooted at `base_url`.
    ///
    /// With `timeout` of `None` requests never time out.
    #[must_use]
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Source root URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a source path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path);
        tracing::debug!(%url, "Fetching document");

        let response = self.agent.get(&url).call()?;
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status == 404 {
            return Err(FetchError::NotFound {
                path: path.to_owned(),
            });
        }
        if !(200..300).contains(&status) {
            let body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            tracing::warn!(%url, status, "Source returned error status");
            return Err(FetchError::Status { status, body });
        }

        Ok(body_reader.read_to_string()?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    use super::*;
    use pretty_assertions::assert_eq;

    /// Serve one canned HTTP response on a local port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            write!(
                stream,
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_fetch_success() {
        let base = serve_once("200 OK", "# Hello\n");
        let source = HttpSource::new(&base, Some(Duration::from_secs(5)));
        assert_eq!(source.fetch("README.md").unwrap(), "# Hello\n");
    }

    #[test]
    fn test_fetch_404_is_not_found() {
        let base = serve_once("404 Not Found", "");
        let source = HttpSource::new(&base, Some(Duration::from_secs(5)));
        let err = source.fetch("posts/missing/README.md").unwrap_err();
        assert!(
            matches!(err, FetchError::NotFound { ref path } if path == "posts/missing/README.md")
        );
    }

    #[test]
    fn test_fetch_500_is_status_error() {
        let base = serve_once("500 Internal Server Error", "boom");
        let source = HttpSource::new(&base, Some(Duration::from_secs(5)));
        let err = source.fetch("README.md").unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, ref body } if body == "boom"));
    }

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let source = HttpSource::new("https://example.com/blog/main/", None);
        assert_eq!(source.base_url(), "https://example.com/blog/main");
        assert_eq!(
            source.url_for("settings.json"),
            "https://example.com/blog/main/settings.json"
        );
        assert_eq!(
            source.url_for("/posts/README.md"),
            "https://example.com/blog/main/posts/README.md"
        );
    }

    #[test]
    fn test_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let source = HttpSource::new("http://127.0.0.1:9", Some(Duration::from_secs(2)));
        let err = source.fetch("README.md").unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }
}
