//! Markdown document pipeline.

use std::sync::Arc;

use crate::convert::markdown_to_tree;
use crate::error::RenderError;
use crate::format::format_document;
use crate::frontmatter::{Frontmatter, extract_frontmatter};
use crate::highlight::Highlighter;
use crate::serialize::to_html;

/// Rendered document: HTML text plus frontmatter metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcessedDocument {
    /// Serialized HTML.
    pub text: String,
    /// Frontmatter mapping, `None` when the document has no block.
    pub matter: Option<Frontmatter>,
}

/// Runs markdown through conversion, formatting, highlighting and
/// serialization.
///
/// Cheap to clone; clones share the highlighter and its grammar registry.
#[derive(Clone, Debug)]
pub struct DocumentPipeline {
    highlighter: Arc<Highlighter>,
    gfm: bool,
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new(Arc::new(Highlighter::new()))
    }
}

impl DocumentPipeline {
    /// Create a pipeline around a shared highlighter. GFM extensions are on.
    #[must_use]
    pub fn new(highlighter: Arc<Highlighter>) -> Self {
        Self {
            highlighter,
            gfm: true,
        }
    }

    /// Enable or disable tables, strikethrough and task lists.
    #[must_use]
    pub fn with_gfm(mut self, gfm: bool) -> Self {
        self.gfm = gfm;
        self
    }

    /// The shared highlighter.
    #[must_use]
    pub fn highlighter(&self) -> &Arc<Highlighter> {
        &self.highlighter
    }

    /// Render a markdown document.
    pub async fn process(&self, markdown: &str) -> Result<ProcessedDocument, RenderError> {
        let parsed = markdown_to_tree(markdown, self.gfm);
        let mut document = parsed.document;

        format_document(&mut document);
        let highlighted = self.highlighter.rewrite(&mut document).await?;
        let text = to_html(&document);
        let matter = extract_frontmatter(parsed.frontmatter.as_deref())?;

        tracing::debug!(
            bytes = text.len(),
            highlighted,
            frontmatter = matter.is_some(),
            "Processed document"
        );
        Ok(ProcessedDocument { text, matter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_plain_document() {
        let result = DocumentPipeline::default()
            .process("# Hello\n\nSome **bold** text.\n")
            .await
            .unwrap();

        assert_eq!(
            result.text,
            "<h1>Hello</h1>\n<p>Some <strong>bold</strong> text.</p>\n"
        );
        assert_eq!(result.matter, None);
    }

    #[tokio::test]
    async fn test_frontmatter_extracted_and_removed() {
        let result = DocumentPipeline::default()
            .process("---\nkey: value\n---\n\nBody text.\n")
            .await
            .unwrap();

        assert_eq!(result.text, "<p>Body text.</p>\n");
        assert_eq!(result.matter, Some([("key", "value")].into_iter().collect::<Frontmatter>()));
        assert!(!result.text.contains("key"));
    }

    #[tokio::test]
    async fn test_empty_frontmatter_block() {
        let result = DocumentPipeline::default()
            .process("---\n---\n\nBody\n")
            .await
            .unwrap();

        assert_eq!(result.text, "<p>Body</p>\n");
        assert_eq!(result.matter, Some(Frontmatter::default()));
    }

    #[tokio::test]
    async fn test_frontmatter_must_start_document() {
        let result = DocumentPipeline::default()
            .process("\n---\nkey: value\n---\n\nBody\n")
            .await
            .unwrap();

        assert_eq!(result.text, "<hr>\n<h2>key: value</h2>\n<p>Body</p>\n");
        assert_eq!(result.matter, None);
    }

    #[tokio::test]
    async fn test_dot_closing_fence_not_frontmatter() {
        let result = DocumentPipeline::default()
            .process("---\nkey: value\n...\n\nBody\n")
            .await
            .unwrap();

        assert_eq!(result.matter, None);
        assert!(result.text.starts_with("<hr>\n<p>key: value"));
        assert!(result.text.ends_with("<p>Body</p>\n"));
    }

    #[tokio::test]
    async fn test_code_block_highlighted() {
        let result = DocumentPipeline::default()
            .process("Intro\n\n```js\nconst x = 1;\n```\n")
            .await
            .unwrap();

        assert!(
            result
                .text
                .starts_with("<p>Intro</p>\n<div class=\"highlight highlight-js\"><pre><span")
        );
        assert!(result.text.ends_with("</pre></div>\n"));
        assert!(!result.text.contains("<code"));
    }

    #[tokio::test]
    async fn test_unknown_language_left_as_code() {
        let result = DocumentPipeline::default()
            .process("```totally-unknown\na < b\n```\n")
            .await
            .unwrap();

        assert_eq!(
            result.text,
            "<pre><code class=\"language-totally-unknown\">a &lt; b\n</code></pre>\n"
        );
    }

    #[tokio::test]
    async fn test_malformed_frontmatter_aborts() {
        let err = DocumentPipeline::default()
            .process("---\nkey: [unclosed\n---\n\nBody\n")
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::Frontmatter(_)));
    }

    #[tokio::test]
    async fn test_gfm_toggle() {
        let markdown = "~~gone~~\n";
        let pipeline = DocumentPipeline::default();

        let with_gfm = pipeline.process(markdown).await.unwrap();
        let without = pipeline.clone().with_gfm(false).process(markdown).await.unwrap();

        assert_eq!(with_gfm.text, "<p><del>gone</del></p>\n");
        assert_eq!(without.text, "<p>~~gone~~</p>\n");
    }

    #[tokio::test]
    async fn test_output_is_deterministic() {
        let markdown = "---\ntitle: T\n---\n\n# T\n\n- a\n  - b\n\n```rust\nfn main() {}\n```\n";
        let pipeline = DocumentPipeline::default();

        let first = pipeline.process(markdown).await.unwrap();
        let second = pipeline.process(markdown).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_clones_share_registry() {
        let pipeline = DocumentPipeline::default();
        let clone = pipeline.clone();

        let a = pipeline.highlighter().registry().await.unwrap();
        let b = clone.highlighter().registry().await.unwrap();

        assert!(Arc::ptr_eq(&a, &b));
    }
}
