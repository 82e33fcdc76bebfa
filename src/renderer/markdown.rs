//! The Markdown backend: the worked example of a render state machine.
//!
//! One `MarkdownVisitor` instance is one render pass. All emission funnels
//! through `put`/`filter`, so a hidden region suppresses every node kind in
//! one place, and escaping toggles with the literal-region flag. Rendering
//! the same tree twice with fresh visitors yields identical output.

use anyhow::{bail, Result};
use tracing::warn;

use crate::doc::{
    CompoundNode, DocNode, Image, IncOperatorKind, IncludeKind, LeafNode, Style, VerbatimKind,
};
use crate::renderer::components::{AssetPaths, MarkupEscaper};
use crate::renderer::traits::{walk, DocVisitor};
use crate::xref::{LinkResolver, Resolution};

/// Maximum list/indent nesting depth a render pass accepts.
pub const MAX_INDENT_LEVELS: usize = 13;

/// Per-level list bookkeeping: kind, next item number, marker glyph.
#[derive(Debug, Clone, Copy)]
struct ListLevel {
    ordered: bool,
    number: usize,
    marker: char,
}

/// The active hyperlink span, kept until its closing visit.
#[derive(Debug, Clone)]
enum LinkContext {
    Resolved(Resolution),
    /// Target did not resolve; the span degrades to plain text.
    Unresolved,
}

/// Renders document trees to Markdown, one fresh state per pass.
pub struct MarkdownRenderer<'a> {
    resolver: &'a dyn LinkResolver,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(resolver: &'a dyn LinkResolver) -> Self {
        Self { resolver }
    }

    pub fn render(&self, tree: &DocNode) -> Result<String> {
        let mut visitor = MarkdownVisitor::new(self.resolver);
        walk(tree, &mut visitor)?;
        Ok(visitor.into_output())
    }
}

/// Visitor state for one Markdown render pass.
pub struct MarkdownVisitor<'a> {
    out: String,
    resolver: &'a dyn LinkResolver,
    /// Literal region: escaping is off while set.
    inside_pre: bool,
    /// Depth of enclosing never-emitted regions; content is still walked
    /// for its cross-reference side effects.
    hide_depth: usize,
    levels: Vec<ListLevel>,
    link: Option<LinkContext>,
    /// Nested hyperlink spans are flattened: the inner span keeps its text
    /// but contributes no markup. Counts the suppressed opens.
    flattened_links: usize,
    /// Column counts of the open tables, innermost last.
    tables: Vec<usize>,
}

impl<'a> MarkdownVisitor<'a> {
    pub fn new(resolver: &'a dyn LinkResolver) -> Self {
        Self {
            out: String::new(),
            resolver,
            inside_pre: false,
            hide_depth: 0,
            levels: Vec::new(),
            link: None,
            flattened_links: 0,
            tables: Vec::new(),
        }
    }

    pub fn into_output(self) -> String {
        self.out
    }

    fn hidden(&self) -> bool {
        self.hide_depth > 0
    }

    /// Raw emission; the single point where `hide` applies.
    fn put(&mut self, text: &str) {
        if !self.hidden() {
            self.out.push_str(text);
        }
    }

    /// Prose emission: escaped outside literal regions, raw inside them.
    fn filter(&mut self, text: &str) {
        if self.hidden() {
            return;
        }
        if self.inside_pre {
            self.out.push_str(text);
        } else {
            self.out.push_str(&MarkupEscaper.escape(text));
        }
    }

    fn ensure_newline(&mut self) {
        if self.hidden() || self.out.is_empty() {
            return;
        }
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn ensure_blank_line(&mut self) {
        if self.hidden() || self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn push_level(&mut self, ordered: bool) -> Result<()> {
        if self.levels.len() == MAX_INDENT_LEVELS {
            bail!("list nesting exceeds the maximum of {MAX_INDENT_LEVELS} levels");
        }
        self.levels.push(ListLevel {
            ordered,
            number: 0,
            marker: if ordered { '.' } else { '-' },
        });
        Ok(())
    }

    fn pop_level(&mut self) {
        self.levels.pop();
    }

    /// Emits the marker for a new list item, advancing the counter of an
    /// ordered level first.
    fn begin_list_item(&mut self) {
        let depth = self.levels.len();
        let marker = match self.levels.last_mut() {
            Some(level) if level.ordered => {
                level.number += 1;
                format!("{}{} ", level.number, level.marker)
            }
            Some(level) => format!("{} ", level.marker),
            None => "- ".to_string(),
        };
        self.ensure_newline();
        let pad = "  ".repeat(depth.saturating_sub(1));
        self.put(&pad);
        self.put(&marker);
    }

    /// Looks up a symbolic key. This runs even inside hidden regions: the
    /// resolver's mention bookkeeping must happen regardless of visibility.
    fn resolve(&self, key: &str) -> Option<Resolution> {
        let resolution = self.resolver.resolve(key);
        if resolution.is_none() {
            warn!(key, "unresolved cross-reference, emitting plain text");
        }
        resolution
    }

    fn start_link(&mut self, resolution: Option<Resolution>) {
        if self.link.is_some() {
            self.flattened_links += 1;
            return;
        }
        let context = match resolution {
            Some(resolution) => {
                self.put("[");
                LinkContext::Resolved(resolution)
            }
            None => LinkContext::Unresolved,
        };
        self.link = Some(context);
    }

    /// Closing markup is keyed by the scope of the stored resolution:
    /// same-document anchors, cross-document anchors and external pages
    /// all close differently.
    fn end_link(&mut self) {
        if self.flattened_links > 0 {
            self.flattened_links -= 1;
            return;
        }
        let Some(context) = self.link.take() else {
            return;
        };
        match context {
            LinkContext::Resolved(Resolution::Local { anchor }) => {
                self.put(&format!("](#{anchor})"));
            }
            LinkContext::Resolved(Resolution::Document { file, anchor }) => {
                if anchor.is_empty() {
                    self.put(&format!("]({file}.md)"));
                } else {
                    self.put(&format!("]({file}.md#{anchor})"));
                }
            }
            LinkContext::Resolved(Resolution::External { url }) => {
                self.put(&format!("]({url})"));
            }
            LinkContext::Unresolved => {}
        }
    }

    fn fenced_block(&mut self, tag: &str, text: &str) {
        self.ensure_blank_line();
        self.put("```");
        self.put(tag);
        self.put("\n");
        self.put(text);
        if !text.ends_with('\n') {
            self.put("\n");
        }
        self.put("```\n\n");
    }

    fn style_marker(style: Style) -> &'static str {
        match style {
            Style::Bold => "**",
            Style::Italic => "*",
            Style::Code => "`",
            Style::Strike => "~~",
        }
    }

    /// The asset an image reference resolves to. Non-native assets were
    /// converted by an external collaborator; we reference the artifact.
    fn image_asset(image: &Image) -> String {
        if image.native {
            image.name.clone()
        } else {
            AssetPaths.converted(&image.name)
        }
    }

    /// Emits the picture reference. When a caption is present the node's
    /// children render as an emphasized caption line right after it; inline
    /// pictures stay in the surrounding text flow.
    fn include_picture_pre(&mut self, asset: &str, has_caption: bool, inline: bool) {
        if !inline {
            self.ensure_blank_line();
        }
        self.put(&format!("![]({asset})"));
        if has_caption && !inline {
            self.put("\n*");
        }
    }

    fn include_picture_post(&mut self, has_caption: bool, inline: bool) {
        if has_caption && !inline {
            self.put("*");
        }
        if !inline {
            self.ensure_blank_line();
        }
    }

    fn heading_prefix(level: usize) -> String {
        let mut hashes = "#".repeat(level.clamp(1, 6));
        hashes.push(' ');
        hashes
    }
}

impl DocVisitor for MarkdownVisitor<'_> {
    fn visit(&mut self, leaf: &LeafNode) -> Result<()> {
        match leaf {
            LeafNode::Word(text) => self.filter(text),
            LeafNode::LinkedWord(word) => {
                let resolution = self.resolve(&word.target);
                match resolution {
                    Some(resolution) if self.link.is_none() => {
                        self.start_link(Some(resolution));
                        self.filter(&word.word);
                        self.end_link();
                    }
                    // unresolved, or already inside an enclosing link
                    _ => self.filter(&word.word),
                }
            }
            LeafNode::WhiteSpace(run) => {
                if self.inside_pre {
                    self.put(run);
                } else {
                    self.put(" ");
                }
            }
            LeafNode::Symbol(symbol) => self.filter(symbol.glyph()),
            LeafNode::Emoji(emoji) => self.put(&emoji.unicode),
            LeafNode::Url(url) => {
                self.put("<");
                self.put(&url.url);
                self.put(">");
            }
            LeafNode::LineBreak => self.put("  \n"),
            LeafNode::HorizontalRuler => {
                self.ensure_blank_line();
                self.put("---\n\n");
            }
            LeafNode::StyleChange(change) => {
                self.put(Self::style_marker(change.style));
                // a code span is a literal region: escaping pauses inside it
                if change.style == Style::Code {
                    self.inside_pre = change.enable;
                }
            }
            LeafNode::Verbatim(verbatim) => match &verbatim.kind {
                VerbatimKind::Code { language } => {
                    self.fenced_block(language.as_deref().unwrap_or(""), &verbatim.text);
                }
                VerbatimKind::Html => {
                    // raw hypertext flows through untouched
                    self.ensure_blank_line();
                    self.put(&verbatim.text);
                    self.ensure_newline();
                }
                VerbatimKind::Raw => self.put(&verbatim.text),
                VerbatimKind::Diagram(language) => {
                    self.fenced_block(language.as_str(), &verbatim.text);
                }
            },
            LeafNode::Anchor(anchor) => {
                self.put(&format!("<a id=\"{}\"></a>", anchor.id));
            }
            LeafNode::Include(include) => match include.kind {
                IncludeKind::Html => {
                    self.ensure_blank_line();
                    self.put(&include.text);
                    self.ensure_newline();
                }
                IncludeKind::Verbatim | IncludeKind::Snippet => {
                    self.fenced_block("", &include.text);
                }
            },
            LeafNode::IncOperator(op) => {
                if op.is_first {
                    self.ensure_blank_line();
                    self.put("```\n");
                    self.inside_pre = true;
                }
                if op.kind != IncOperatorKind::Skip {
                    self.put(&op.text);
                    if !op.text.ends_with('\n') {
                        self.put("\n");
                    }
                }
                if op.is_last {
                    self.inside_pre = false;
                    self.put("```\n\n");
                }
            }
            LeafNode::Formula(formula) => {
                self.put("$");
                self.put(&formula.text);
                self.put("$");
            }
            LeafNode::IndexEntry(_) => {
                // no reader-facing index in this format
            }
            LeafNode::SimpleSectSep => self.ensure_blank_line(),
            LeafNode::Cite(cite) => match self.resolve(&cite.target) {
                Some(resolution) => {
                    self.start_link(Some(resolution));
                    self.filter(&cite.text);
                    self.end_link();
                }
                None => self.filter(&cite.text),
            },
        }
        Ok(())
    }

    fn visit_pre(&mut self, node: &CompoundNode) -> Result<()> {
        match node {
            CompoundNode::Root(_) | CompoundNode::Para(_) | CompoundNode::Text(_) => {}
            CompoundNode::AutoList(list) => {
                if self.levels.is_empty() {
                    self.ensure_blank_line();
                }
                self.push_level(list.ordered)?;
            }
            CompoundNode::HtmlList(list) => {
                if self.levels.is_empty() {
                    self.ensure_blank_line();
                }
                self.push_level(list.ordered)?;
            }
            CompoundNode::SimpleList(_) => {
                if self.levels.is_empty() {
                    self.ensure_blank_line();
                }
                self.push_level(false)?;
            }
            CompoundNode::AutoListItem(_)
            | CompoundNode::HtmlListItem(_)
            | CompoundNode::SimpleListItem(_) => self.begin_list_item(),
            CompoundNode::SimpleSect(sect) => {
                self.ensure_blank_line();
                if let Some(label) = sect.kind.label() {
                    self.put(&format!("**{label}:** "));
                }
            }
            CompoundNode::Title(_) => self.put("**"),
            CompoundNode::Section(section) => {
                self.ensure_blank_line();
                self.put(&Self::heading_prefix(section.level));
                self.filter(&section.title);
                if !section.anchor.is_empty() {
                    self.put(&format!(" <a id=\"{}\"></a>", section.anchor));
                }
                self.put("\n\n");
            }
            CompoundNode::Heading(heading) => {
                self.ensure_blank_line();
                self.put(&Self::heading_prefix(heading.level));
            }
            CompoundNode::DescList(_) => self.ensure_blank_line(),
            CompoundNode::DescTitle(_) => {
                self.ensure_newline();
                self.put("**");
            }
            CompoundNode::DescData(_) => self.ensure_newline(),
            CompoundNode::Table(table) => {
                self.ensure_blank_line();
                self.tables.push(table.columns);
            }
            CompoundNode::Caption(_) => self.put("*"),
            CompoundNode::Row(_) => {
                self.ensure_newline();
                self.put("|");
            }
            CompoundNode::Cell(_) => self.put(" "),
            CompoundNode::Internal(_) => {
                // parsed for cross-reference side effects, never emitted
                self.hide_depth += 1;
            }
            CompoundNode::HRef(href) => {
                self.start_link(Some(Resolution::External {
                    url: href.url.clone(),
                }));
            }
            CompoundNode::Image(image) => {
                let asset = Self::image_asset(image);
                self.include_picture_pre(&asset, image.has_caption, image.inline);
            }
            CompoundNode::DiagramFile(diagram) => {
                // the diagram tool already materialized the artifact
                let asset = AssetPaths.converted(&diagram.name);
                self.include_picture_pre(&asset, diagram.has_caption, false);
            }
            CompoundNode::Link(link) => {
                let resolution = self.resolve(&link.target);
                self.start_link(resolution);
            }
            CompoundNode::Ref(reference) => {
                let resolution = self.resolve(&reference.target);
                self.start_link(resolution);
                if reference.children.is_empty() {
                    self.filter(&reference.text);
                }
            }
            CompoundNode::SecRefList(_) => {
                self.ensure_blank_line();
                self.push_level(false)?;
            }
            CompoundNode::SecRefItem(item) => {
                self.begin_list_item();
                let resolution = self.resolve(&item.target);
                self.start_link(resolution);
            }
            CompoundNode::ParamSect(sect) => {
                self.ensure_blank_line();
                self.put(&format!("**{}**\n", sect.kind.label()));
            }
            CompoundNode::ParamList(list) => {
                self.ensure_newline();
                self.put("- **");
                self.filter(&list.names.join(", "));
                self.put("**");
                if let Some(tag) = list.direction.tag() {
                    self.put(" `");
                    self.put(tag);
                    self.put("`");
                }
                self.put(": ");
            }
            CompoundNode::XRefItem(item) => {
                self.ensure_blank_line();
                self.put(&format!("<a id=\"{}\"></a>", item.key));
                self.put("**");
                self.filter(&item.title);
                self.put(":** ");
            }
            CompoundNode::BlockQuote(_) => {
                self.ensure_blank_line();
                self.put("> ");
            }
            CompoundNode::FlowChart(_) | CompoundNode::ParBlock(_) => self.ensure_blank_line(),
        }
        Ok(())
    }

    fn visit_post(&mut self, node: &CompoundNode) -> Result<()> {
        match node {
            CompoundNode::Root(_) | CompoundNode::Text(_) => {}
            CompoundNode::Para(_) => self.ensure_blank_line(),
            CompoundNode::AutoList(_)
            | CompoundNode::HtmlList(_)
            | CompoundNode::SimpleList(_) => {
                self.pop_level();
                if self.levels.is_empty() {
                    self.ensure_blank_line();
                }
            }
            CompoundNode::AutoListItem(_)
            | CompoundNode::HtmlListItem(_)
            | CompoundNode::SimpleListItem(_) => {}
            CompoundNode::SimpleSect(_) => self.ensure_blank_line(),
            CompoundNode::Title(_) => {
                self.put("**");
                self.ensure_blank_line();
            }
            CompoundNode::Section(_) => {}
            CompoundNode::Heading(_) => self.ensure_blank_line(),
            CompoundNode::DescList(_) => self.ensure_blank_line(),
            CompoundNode::DescTitle(_) => {
                self.put("**");
                self.ensure_newline();
            }
            CompoundNode::DescData(_) => self.ensure_newline(),
            CompoundNode::Table(_) => {
                self.tables.pop();
                self.ensure_blank_line();
            }
            CompoundNode::Caption(_) => {
                self.put("*");
                self.ensure_newline();
            }
            CompoundNode::Row(row) => {
                if row.heading {
                    let columns = self.tables.last().copied().unwrap_or(0);
                    self.ensure_newline();
                    self.put("|");
                    for _ in 0..columns {
                        self.put(" --- |");
                    }
                }
            }
            CompoundNode::Cell(_) => self.put(" |"),
            CompoundNode::Internal(_) => {
                self.hide_depth = self.hide_depth.saturating_sub(1);
            }
            CompoundNode::HRef(_) => self.end_link(),
            CompoundNode::Image(image) => {
                self.include_picture_post(image.has_caption, image.inline);
            }
            CompoundNode::DiagramFile(diagram) => {
                self.include_picture_post(diagram.has_caption, false);
            }
            CompoundNode::Link(_) | CompoundNode::Ref(_) => self.end_link(),
            CompoundNode::SecRefList(_) => {
                self.pop_level();
                if self.levels.is_empty() {
                    self.ensure_blank_line();
                }
            }
            CompoundNode::SecRefItem(_) => self.end_link(),
            CompoundNode::ParamSect(_) => self.ensure_blank_line(),
            CompoundNode::ParamList(_) => self.ensure_newline(),
            CompoundNode::XRefItem(_) => self.ensure_blank_line(),
            CompoundNode::BlockQuote(_) => self.ensure_blank_line(),
            CompoundNode::FlowChart(_) | CompoundNode::ParBlock(_) => self.ensure_blank_line(),
        }
        Ok(())
    }
}
