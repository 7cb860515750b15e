//! Syntax highlighting of fenced code blocks.
//!
//! Rewrites `pre > code.language-<tag>` blocks into
//! `div.highlight.highlight-<scope>` wrappers holding a `pre` with
//! tokenized spans. Grammars come from a [`GrammarRegistry`], built
//! lazily once per [`Highlighter`] and shared by every rewrite.
//!
//! Span classes follow syntect's spaced class style (`keyword control js`),
//! so stylesheets from [`crate::theme_css`] apply directly.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use syntect::parsing::{
    BasicScopeStackOp, ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet,
};
use syntect::util::LinesWithEndings;
use tokio::sync::OnceCell;

use crate::convert::LANGUAGE_PREFIX;
use crate::error::RenderError;
use crate::tree::{Document, Element, Node, TreeBuilder};

/// Immutable set of language grammars.
#[derive(Debug)]
pub struct GrammarRegistry {
    syntaxes: SyntaxSet,
}

impl GrammarRegistry {
    /// Registry with the bundled grammars only.
    ///
    /// The bundle is two-face's extended set (Dockerfile, TypeScript,
    /// TOML, Kotlin, Swift, SCSS, GraphQL and more on top of syntect's
    /// defaults).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            syntaxes: two_face::syntax::extra_newlines(),
        }
    }

    /// Registry with bundled grammars plus `.sublime-syntax` files from `dir`.
    pub fn load(dir: Option<&Path>) -> Result<Self, RenderError> {
        let Some(dir) = dir else {
            return Ok(Self::with_defaults());
        };

        let mut builder = two_face::syntax::extra_newlines().into_builder();
        builder
            .add_from_folder(dir, true)
            .map_err(|source| RenderError::Grammars {
                path: dir.to_path_buf(),
                source,
            })?;
        Ok(Self {
            syntaxes: builder.build(),
        })
    }

    /// Number of grammars in the registry.
    pub(crate) fn len(&self) -> usize {
        self.syntaxes.syntaxes().len()
    }

    /// Resolve a fence language tag to a grammar scope.
    ///
    /// Matches file extensions and grammar names case-insensitively.
    /// The plain-text grammar counts as unresolved.
    #[must_use]
    pub fn flag_to_scope(&self, flag: &str) -> Option<Scope> {
        let syntax = self.syntaxes.find_syntax_by_token(flag)?;
        if syntax.scope == self.syntaxes.find_syntax_plain_text().scope {
            return None;
        }
        Some(syntax.scope)
    }

    /// Tokenize `text` with the grammar for `scope`.
    ///
    /// Returns text nodes and `span` elements whose concatenated text
    /// equals `text`. The grammar's root scope gets no span.
    pub fn highlight(&self, text: &str, scope: Scope) -> Result<Vec<Node>, RenderError> {
        let syntax = self
            .syntaxes
            .find_syntax_by_scope(scope)
            .ok_or_else(|| RenderError::UnknownScope(scope.build_string()))?;
        self.tokenize(text, syntax)
    }

    fn tokenize(&self, text: &str, syntax: &SyntaxReference) -> Result<Vec<Node>, RenderError> {
        let root = syntax.scope;
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut builder = TreeBuilder::new();

        for line in LinesWithEndings::from(text) {
            let ops = state
                .parse_line(line, &self.syntaxes)
                .map_err(|source| RenderError::Highlight {
                    scope: root.build_string(),
                    source,
                })?;

            let mut cursor = 0;
            for (position, op) in ops {
                if position > cursor {
                    builder.text(&line[cursor..position]);
                    cursor = position;
                }
                stack
                    .apply_with_hook(&op, |basic, _| match basic {
                        BasicScopeStackOp::Push(pushed) => {
                            if pushed == root && builder.depth() == 0 {
                                builder.open_transparent();
                            } else {
                                builder.open(span_for(pushed));
                            }
                        }
                        BasicScopeStackOp::Pop => builder.close(),
                    })
                    .map_err(|source| RenderError::ScopeStack {
                        scope: root.build_string(),
                        source,
                    })?;
            }
            builder.text(&line[cursor..]);
        }

        Ok(builder.finish())
    }
}

fn span_for(scope: Scope) -> Element {
    let name = scope.build_string();
    Element::new("span").with_classes(name.split('.'))
}

/// Class suffix for a grammar scope: `source.js` becomes `js`,
/// `text.html.basic` becomes `text-html-basic`.
#[must_use]
pub fn scope_class(scope: &str) -> String {
    scope
        .strip_prefix("source.")
        .unwrap_or(scope)
        .replace('.', "-")
}

/// A code block scheduled for replacement.
struct Replacement {
    /// Index path of the `pre` element.
    path: Vec<usize>,
    scope: Scope,
    text: String,
}

/// Code block highlighter with a lazily built, shared grammar registry.
#[derive(Debug, Default)]
pub struct Highlighter {
    syntaxes_dir: Option<PathBuf>,
    registry: OnceCell<Arc<GrammarRegistry>>,
}

impl Highlighter {
    /// Highlighter using bundled grammars only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlighter that also loads grammars from `dir`.
    #[must_use]
    pub fn with_syntaxes_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            syntaxes_dir: Some(dir.into()),
            registry: OnceCell::new(),
        }
    }

    /// Highlighter around an already built registry.
    #[must_use]
    pub fn with_registry(registry: Arc<GrammarRegistry>) -> Self {
        Self {
            syntaxes_dir: None,
            registry: OnceCell::new_with(Some(registry)),
        }
    }

    /// Get the grammar registry, building it on first use.
    ///
    /// Concurrent first callers share one construction. A failed
    /// construction is retried by the next caller.
    pub async fn registry(&self) -> Result<Arc<GrammarRegistry>, RenderError> {
        let registry = self
            .registry
            .get_or_try_init(|| async {
                let dir = self.syntaxes_dir.clone();
                let start = Instant::now();
                let registry =
                    tokio::task::spawn_blocking(move || GrammarRegistry::load(dir.as_deref()))
                        .await??;
                tracing::info!(
                    grammars = registry.len(),
                    elapsed_ms = start.elapsed().as_millis(),
                    "Loaded grammar registry"
                );
                Ok::<_, RenderError>(Arc::new(registry))
            })
            .await?;
        Ok(Arc::clone(registry))
    }

    /// Replace every highlightable code block in `document`.
    ///
    /// Returns the number of blocks replaced.
    pub async fn rewrite(&self, document: &mut Document) -> Result<usize, RenderError> {
        let registry = self.registry().await?;
        rewrite_with(&registry, document)
    }
}

/// Replace highlightable code blocks using an existing registry.
pub fn rewrite_with(
    registry: &GrammarRegistry,
    document: &mut Document,
) -> Result<usize, RenderError> {
    let mut replacements = Vec::new();
    let mut path = Vec::new();
    collect(registry, &document.children, &mut path, &mut replacements);

    let count = replacements.len();
    for replacement in replacements {
        let fragment = registry.highlight(&replacement.text, replacement.scope)?;
        let class = format!(
            "highlight-{}",
            scope_class(&replacement.scope.build_string())
        );
        let wrapper = Element::new("div")
            .with_classes(["highlight".to_owned(), class])
            .with_child(Element::new("pre").with_children(fragment));

        if let Some(node) = document.node_at_mut(&replacement.path) {
            *node = wrapper.into();
        }
    }
    Ok(count)
}

fn collect(
    registry: &GrammarRegistry,
    nodes: &[Node],
    path: &mut Vec<usize>,
    out: &mut Vec<Replacement>,
) {
    for (index, node) in nodes.iter().enumerate() {
        let Node::Element(element) = node else {
            continue;
        };
        path.push(index);
        if element.is("pre") {
            if let Some((scope, text)) = highlight_target(registry, element) {
                out.push(Replacement {
                    path: path.clone(),
                    scope,
                    text,
                });
            }
        } else {
            collect(registry, &element.children, path, out);
        }
        path.pop();
    }
}

/// Scope and code text of a `pre` block, if it can be highlighted.
fn highlight_target(registry: &GrammarRegistry, pre: &Element) -> Option<(Scope, String)> {
    let code = pre.children.first()?.as_element()?;
    if !code.is("code") {
        return None;
    }
    let flag = code
        .class_names()?
        .iter()
        .find_map(|class| class.strip_prefix(LANGUAGE_PREFIX))?;

    let Some(scope) = registry.flag_to_scope(flag) else {
        tracing::debug!(language = flag, "No grammar for code block language");
        return None;
    };
    let text = code.children.iter().map(Node::text_content).collect();
    Some((scope, text))
}
