//! Whitespace formatting pass.
//!
//! Re-indents block-level structure so serialized output reads like
//! hand-written HTML: each block child starts on its own line, indented
//! two spaces per nesting level. Inline content and `pre` contents are
//! left untouched.

use crate::tree::{Document, Element, Node};

/// Elements laid out as blocks.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Elements whose whitespace is significant.
const PRESERVE_WHITESPACE: &[&str] = &["pre", "textarea", "script", "style"];

const INDENT: &str = "  ";

/// Format the document in place.
///
/// Top-level blocks are separated by newlines and the document ends
/// with one.
pub(crate) fn format_document(document: &mut Document) {
    for child in &mut document.children {
        if let Node::Element(element) = child {
            format_element(element, 0);
        }
    }

    if document.children.is_empty() {
        return;
    }
    let children = std::mem::take(&mut document.children);
    document.children = interleave(children, "\n", "\n", false);
}

fn format_element(element: &mut Element, level: usize) {
    if PRESERVE_WHITESPACE.contains(&element.tag.as_str()) {
        return;
    }

    for child in &mut element.children {
        if let Node::Element(inner) = child {
            format_element(inner, level + 1);
        }
    }

    if !element.children.iter().any(is_block) {
        return;
    }

    let child_break = format!("\n{}", INDENT.repeat(level + 1));
    let closing_break = format!("\n{}", INDENT.repeat(level));
    let children = std::mem::take(&mut element.children);
    element.children = interleave(children, &child_break, &closing_break, true);
}

/// Drop whitespace-only text, then put `before` ahead of each child
/// and `after` at the end. `lead` controls the break before the first child.
fn interleave(children: Vec<Node>, before: &str, after: &str, lead: bool) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len() * 2 + 1);
    for child in children {
        if matches!(&child, Node::Text(text) if text.trim().is_empty()) {
            continue;
        }
        if lead || !out.is_empty() {
            out.push(Node::text(before));
        }
        out.push(child);
    }
    if !out.is_empty() {
        out.push(Node::text(after));
    }
    out
}

fn is_block(node: &Node) -> bool {
    matches!(node, Node::Element(element) if BLOCK_ELEMENTS.contains(&element.tag.as_str()))
}
