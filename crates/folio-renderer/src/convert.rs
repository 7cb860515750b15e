//! Markdown to document tree conversion.
//!
//! Drives pulldown-cmark's event stream into a [`TreeBuilder`], mapping
//! Markdown constructs onto their standard HTML elements. A `---` fenced
//! YAML block at the very start of the document is split off before
//! parsing and kept verbatim for the frontmatter extractor. Raw HTML is
//! dropped.

use pulldown_cmark::{
    Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use crate::tree::{Document, Element, Node, PropertyValue, TreeBuilder};

/// Class prefix for declared code block languages.
pub const LANGUAGE_PREFIX: &str = "language-";

const FRONTMATTER_FENCE: &str = "---";

/// Parsed markdown: the visible tree plus the raw metadata block, if any.
#[derive(Debug)]
pub(crate) struct ParsedMarkdown {
    pub(crate) document: Document,
    pub(crate) frontmatter: Option<String>,
}

/// Parser options for the given GFM setting.
pub(crate) fn parser_options(gfm: bool) -> Options {
    if gfm {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    } else {
        Options::empty()
    }
}

/// Parse markdown into a document tree.
pub(crate) fn markdown_to_tree(markdown: &str, gfm: bool) -> ParsedMarkdown {
    let (frontmatter, body) = split_frontmatter(markdown);
    let mut converter = Converter::new();
    for event in Parser::new_ext(body, parser_options(gfm)) {
        converter.event(event);
    }
    ParsedMarkdown {
        document: converter.finish(),
        frontmatter: frontmatter.map(str::to_owned),
    }
}

/// Split a leading frontmatter block from the document body.
///
/// The opening `---` line must start at byte 0 and the block ends at the
/// next `---` line. Trailing blanks on fence lines are allowed. Without a
/// closing fence the whole input is body.
pub(crate) fn split_frontmatter(markdown: &str) -> (Option<&str>, &str) {
    let mut lines = markdown.split_inclusive('\n');
    let Some(opening) = lines.next().filter(|line| is_fence(line)) else {
        return (None, markdown);
    };

    let start = opening.len();
    let mut offset = start;
    for line in lines {
        if is_fence(line) {
            return (
                Some(&markdown[start..offset]),
                &markdown[offset + line.len()..],
            );
        }
        offset += line.len();
    }
    (None, markdown)
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r', ' ', '\t']) == FRONTMATTER_FENCE
}

struct Converter {
    builder: TreeBuilder,
    table: TableState,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    in_body: bool,
    cell: usize,
}

impl Converter {
    fn new() -> Self {
        Self {
            builder: TreeBuilder::new(),
            table: TableState::default(),
        }
    }

    fn finish(self) -> Document {
        Document::new(self.builder.finish())
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.builder.text(&text),
            Event::Code(code) => {
                self.builder
                    .push(Element::new("code").with_child(Node::text(code.into_string())));
            }
            Event::SoftBreak => self.builder.text("\n"),
            Event::HardBreak => {
                self.builder.push(Element::new("br"));
                self.builder.text("\n");
            }
            Event::Rule => self.builder.push(Element::new("hr")),
            Event::TaskListMarker(checked) => {
                self.builder.push(
                    Element::new("input")
                        .with_property("type", "checkbox")
                        .with_flag("checked", checked)
                        .with_flag("disabled", true),
                );
                self.builder.text(" ");
            }
            // Raw HTML never reaches the tree.
            Event::Html(_) | Event::InlineHtml(_) => {}
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.builder.open(Element::new("p")),
            Tag::Heading { level, .. } => self.builder.open(Element::new(heading_tag(level))),
            Tag::BlockQuote(_) => self.builder.open(Element::new("blockquote")),
            Tag::CodeBlock(kind) => {
                let mut code = Element::new("code");
                if let CodeBlockKind::Fenced(info) = kind
                    && let Some(lang) = fence_language(&info)
                {
                    code = code.with_classes([format!("{LANGUAGE_PREFIX}{lang}")]);
                }
                self.builder.open(Element::new("pre"));
                self.builder.open(code);
            }
            Tag::List(Some(start)) => {
                let mut list = Element::new("ol");
                if start != 1 {
                    list = list.with_property("start", start.to_string());
                }
                self.builder.open(list);
            }
            Tag::List(None) => self.builder.open(Element::new("ul")),
            Tag::Item => self.builder.open(Element::new("li")),
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments,
                    ..TableState::default()
                };
                self.builder.open(Element::new("table"));
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                self.builder.open(Element::new("thead"));
                self.builder.open(Element::new("tr"));
            }
            Tag::TableRow => {
                if !self.table.in_body {
                    self.table.in_body = true;
                    self.builder.open(Element::new("tbody"));
                }
                self.table.cell = 0;
                self.builder.open(Element::new("tr"));
            }
            Tag::TableCell => {
                let mut cell = Element::new(if self.table.in_head { "th" } else { "td" });
                if let Some(align) = self
                    .table
                    .alignments
                    .get(self.table.cell)
                    .and_then(|a| alignment_value(*a))
                {
                    cell = cell.with_property("align", align);
                }
                self.table.cell += 1;
                self.builder.open(cell);
            }
            Tag::Emphasis => self.builder.open(Element::new("em")),
            Tag::Strong => self.builder.open(Element::new("strong")),
            Tag::Strikethrough => self.builder.open(Element::new("del")),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = Element::new("a").with_property("href", dest_url.into_string());
                if !title.is_empty() {
                    link = link.with_property("title", title.into_string());
                }
                self.builder.open(link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as child events; folded into `alt` on close.
                let mut image = Element::new("img").with_property("src", dest_url.into_string());
                if !title.is_empty() {
                    image = image.with_property("title", title.into_string());
                }
                self.builder.open(image);
            }
            Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => self.builder.open_transparent(),
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::CodeBlock => {
                self.builder.close();
                self.builder.close();
            }
            TagEnd::TableHead => {
                self.table.in_head = false;
                self.builder.close();
                self.builder.close();
            }
            TagEnd::Table => {
                if self.table.in_body {
                    self.builder.close();
                }
                self.table = TableState::default();
                self.builder.close();
            }
            TagEnd::Image => {
                if let Some(image) = self.builder.current_mut() {
                    let alt: String = image.children.drain(..).map(|c| c.text_content()).collect();
                    image.set_property("alt", PropertyValue::Text(alt));
                }
                self.builder.close();
            }
            _ => self.builder.close(),
        }
    }
}

/// Extract the language from a fence info string (first word).
pub(crate) fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace().next().filter(|lang| !lang.is_empty())
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn alignment_value(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}
