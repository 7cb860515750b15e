//! Markdown to highlighted HTML document pipeline.
//!
//! [`DocumentPipeline`] turns raw markdown into serialized HTML plus
//! frontmatter metadata:
//!
//! 1. Parse markdown (with YAML metadata blocks) into a [`Document`] tree
//! 2. Re-indent block structure
//! 3. Replace `pre > code.language-*` blocks with highlighted markup
//! 4. Serialize to HTML
//! 5. Parse the metadata block into [`Frontmatter`]
//!
//! Grammars are loaded once per [`Highlighter`] and shared by every
//! document it processes.
//!
//! # Example
//!
//! ```no_run
//! use folio_renderer::DocumentPipeline;
//!
//! # async fn run() -> Result<(), folio_renderer::RenderError> {
//! let pipeline = DocumentPipeline::default();
//! let doc = pipeline.process("---\ntitle: Hi\n---\n\n```js\nlet x;\n```\n").await?;
//! assert_eq!(doc.matter.unwrap().get("title"), Some("Hi"));
//! # Ok(())
//! # }
//! ```

mod convert;
mod error;
mod format;
mod frontmatter;
mod highlight;
mod pipeline;
mod serialize;
mod theme;
mod tree;

pub use convert::LANGUAGE_PREFIX;
pub use error::RenderError;
pub use frontmatter::{Frontmatter, extract_frontmatter};
pub use highlight::{GrammarRegistry, Highlighter, rewrite_with, scope_class};
pub use pipeline::{DocumentPipeline, ProcessedDocument};
pub use serialize::{nodes_to_html, to_html};
pub use theme::{DEFAULT_THEME, theme_css};
pub use tree::{Document, Element, Node, PropertyValue};
