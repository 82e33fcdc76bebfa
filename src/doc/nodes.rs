//! The document node taxonomy.
//!
//! A documentation comment is parsed (upstream, out of this crate) into a
//! tree of `DocNode`s. The taxonomy is a closed sum type: leaf kinds carry
//! pure data, compound kinds own an ordered list of children plus metadata.
//! Renderers consume the tree read-only; cross-references travel as symbolic
//! string keys, never as pointers into another tree.

use serde::{Deserialize, Serialize};

/// A single node in a documentation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocNode {
    Leaf(LeafNode),
    Compound(CompoundNode),
}

impl DocNode {
    /// Shorthand for the most common leaf.
    pub fn word(text: impl Into<String>) -> Self {
        DocNode::Leaf(LeafNode::Word(text.into()))
    }

    pub fn space() -> Self {
        DocNode::Leaf(LeafNode::WhiteSpace(" ".to_string()))
    }
}

impl From<LeafNode> for DocNode {
    fn from(leaf: LeafNode) -> Self {
        DocNode::Leaf(leaf)
    }
}

impl From<CompoundNode> for DocNode {
    fn from(node: CompoundNode) -> Self {
        DocNode::Compound(node)
    }
}

/// Leaf node kinds: no children, data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeafNode {
    /// A plain word of prose.
    Word(String),
    /// A word carrying a symbolic cross-reference key.
    LinkedWord(LinkedWord),
    /// A run of whitespace between words.
    WhiteSpace(String),
    /// A named entity symbol (copyright sign, angle brackets, ...).
    Symbol(EntitySymbol),
    Emoji(Emoji),
    /// A raw URL or e-mail address appearing in prose.
    Url(Url),
    /// An explicit line break.
    LineBreak,
    /// A horizontal ruler.
    HorizontalRuler,
    /// Turns an inline style on or off.
    StyleChange(StyleChange),
    /// A literal block: code, raw passthrough, or an embedded diagram.
    Verbatim(Verbatim),
    /// A named jump target.
    Anchor(Anchor),
    /// An included file or snippet.
    Include(Include),
    /// Line-range / skip markers applied to an included snippet.
    IncOperator(IncOperator),
    /// A formula in source form.
    Formula(Formula),
    /// An entry for the generated index.
    IndexEntry(IndexEntry),
    /// Separator between two adjacent simple sections.
    SimpleSectSep,
    /// A citation reference.
    Cite(Cite),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedWord {
    pub word: String,
    /// Symbolic key handed to the link resolver at render time.
    pub target: String,
}

/// The fixed set of entity symbols the parser can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntitySymbol {
    Copyright,
    Trademark,
    Registered,
    LessThan,
    GreaterThan,
    Ampersand,
    Quote,
    Apostrophe,
    NonBreakingSpace,
    EmDash,
    EnDash,
    Ellipsis,
}

impl EntitySymbol {
    /// The Unicode rendition of the symbol.
    pub fn glyph(&self) -> &'static str {
        match self {
            EntitySymbol::Copyright => "\u{00a9}",
            EntitySymbol::Trademark => "\u{2122}",
            EntitySymbol::Registered => "\u{00ae}",
            EntitySymbol::LessThan => "<",
            EntitySymbol::GreaterThan => ">",
            EntitySymbol::Ampersand => "&",
            EntitySymbol::Quote => "\"",
            EntitySymbol::Apostrophe => "'",
            EntitySymbol::NonBreakingSpace => "\u{00a0}",
            EntitySymbol::EmDash => "\u{2014}",
            EntitySymbol::EnDash => "\u{2013}",
            EntitySymbol::Ellipsis => "\u{2026}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emoji {
    /// The `:name:` the author wrote.
    pub name: String,
    /// The resolved Unicode sequence.
    pub unicode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url {
    pub url: String,
    pub is_email: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    Bold,
    Italic,
    Code,
    Strike,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleChange {
    pub style: Style,
    /// True opens the styled span, false closes it.
    pub enable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verbatim {
    pub kind: VerbatimKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VerbatimKind {
    /// A source-code block, optionally tagged with a language.
    Code { language: Option<String> },
    /// Raw hypertext passed through to backends that accept it.
    Html,
    /// Unprocessed literal text.
    Raw,
    /// An embedded diagram description (rendered by a diagram tool).
    Diagram(DiagramLanguage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagramLanguage {
    Dot,
    Msc,
    Dia,
    PlantUml,
}

impl DiagramLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramLanguage::Dot => "dot",
            DiagramLanguage::Msc => "msc",
            DiagramLanguage::Dia => "dia",
            DiagramLanguage::PlantUml => "plantuml",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Include {
    pub kind: IncludeKind,
    pub file: String,
    /// File contents as captured by the parser.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncludeKind {
    /// Whole file as a literal block.
    Verbatim,
    /// A named snippet extracted from the file.
    Snippet,
    /// Raw hypertext include.
    Html,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncOperator {
    pub kind: IncOperatorKind,
    pub text: String,
    /// First operator of a run; opens the literal block.
    pub is_first: bool,
    /// Last operator of a run; closes the literal block.
    pub is_last: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncOperatorKind {
    Line,
    SkipLine,
    Skip,
    Until,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub entry: String,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cite {
    pub target: String,
    pub text: String,
}

/// Compound node kinds: an ordered child list plus per-kind metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompoundNode {
    AutoList(AutoList),
    AutoListItem(AutoListItem),
    Para(Para),
    Root(Root),
    SimpleSect(SimpleSect),
    Title(Title),
    SimpleList(SimpleList),
    SimpleListItem(SimpleListItem),
    Section(Section),
    Heading(Heading),
    HtmlList(HtmlList),
    HtmlListItem(HtmlListItem),
    DescList(DescList),
    DescTitle(DescTitle),
    DescData(DescData),
    Table(Table),
    Caption(Caption),
    Row(Row),
    Cell(Cell),
    Internal(Internal),
    HRef(HRef),
    Image(Image),
    DiagramFile(DiagramFile),
    Link(Link),
    Ref(Ref),
    SecRefList(SecRefList),
    SecRefItem(SecRefItem),
    ParamSect(ParamSect),
    ParamList(ParamList),
    XRefItem(XRefItem),
    Text(Text),
    BlockQuote(BlockQuote),
    FlowChart(FlowChart),
    ParBlock(ParBlock),
}

impl CompoundNode {
    /// The node's children in stored (document) order.
    pub fn children(&self) -> &[DocNode] {
        match self {
            CompoundNode::AutoList(n) => &n.children,
            CompoundNode::AutoListItem(n) => &n.children,
            CompoundNode::Para(n) => &n.children,
            CompoundNode::Root(n) => &n.children,
            CompoundNode::SimpleSect(n) => &n.children,
            CompoundNode::Title(n) => &n.children,
            CompoundNode::SimpleList(n) => &n.children,
            CompoundNode::SimpleListItem(n) => &n.children,
            CompoundNode::Section(n) => &n.children,
            CompoundNode::Heading(n) => &n.children,
            CompoundNode::HtmlList(n) => &n.children,
            CompoundNode::HtmlListItem(n) => &n.children,
            CompoundNode::DescList(n) => &n.children,
            CompoundNode::DescTitle(n) => &n.children,
            CompoundNode::DescData(n) => &n.children,
            CompoundNode::Table(n) => &n.children,
            CompoundNode::Caption(n) => &n.children,
            CompoundNode::Row(n) => &n.children,
            CompoundNode::Cell(n) => &n.children,
            CompoundNode::Internal(n) => &n.children,
            CompoundNode::HRef(n) => &n.children,
            CompoundNode::Image(n) => &n.children,
            CompoundNode::DiagramFile(n) => &n.children,
            CompoundNode::Link(n) => &n.children,
            CompoundNode::Ref(n) => &n.children,
            CompoundNode::SecRefList(n) => &n.children,
            CompoundNode::SecRefItem(n) => &n.children,
            CompoundNode::ParamSect(n) => &n.children,
            CompoundNode::ParamList(n) => &n.children,
            CompoundNode::XRefItem(n) => &n.children,
            CompoundNode::Text(n) => &n.children,
            CompoundNode::BlockQuote(n) => &n.children,
            CompoundNode::FlowChart(n) => &n.children,
            CompoundNode::ParBlock(n) => &n.children,
        }
    }
}

/// An auto-numbered or bulleted list produced by indentation markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoList {
    pub ordered: bool,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoListItem {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Para {
    pub children: Vec<DocNode>,
}

/// The root of a documentation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<DocNode>,
}

/// A titled simple section such as a note, warning or see-also block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleSect {
    pub kind: SimpleSectKind,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimpleSectKind {
    See,
    Return,
    Author,
    Version,
    Since,
    Date,
    Note,
    Warning,
    Pre,
    Post,
    Copyright,
    Invariant,
    Remark,
    Attention,
    /// Author-titled section; the heading comes from a `Title` child.
    User,
}

impl SimpleSectKind {
    /// The fixed heading for the section, or `None` for user-titled ones.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            SimpleSectKind::See => Some("See also"),
            SimpleSectKind::Return => Some("Returns"),
            SimpleSectKind::Author => Some("Author"),
            SimpleSectKind::Version => Some("Version"),
            SimpleSectKind::Since => Some("Since"),
            SimpleSectKind::Date => Some("Date"),
            SimpleSectKind::Note => Some("Note"),
            SimpleSectKind::Warning => Some("Warning"),
            SimpleSectKind::Pre => Some("Precondition"),
            SimpleSectKind::Post => Some("Postcondition"),
            SimpleSectKind::Copyright => Some("Copyright"),
            SimpleSectKind::Invariant => Some("Invariant"),
            SimpleSectKind::Remark => Some("Remarks"),
            SimpleSectKind::Attention => Some("Attention"),
            SimpleSectKind::User => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleList {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleListItem {
    pub children: Vec<DocNode>,
}

/// A numbered document section with its own heading line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub level: usize,
    pub title: String,
    pub anchor: String,
    pub children: Vec<DocNode>,
}

/// A standalone heading (hypertext header element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: usize,
    pub children: Vec<DocNode>,
}

/// An explicit hypertext list written by the author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlList {
    pub ordered: bool,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlListItem {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescList {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescTitle {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescData {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column count as determined by the parser.
    pub columns: usize,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub heading: bool,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub heading: bool,
    pub children: Vec<DocNode>,
}

/// Content only emitted when internal documentation is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Internal {
    pub children: Vec<DocNode>,
}

/// A hyperlink span around arbitrary content, targeting a literal URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HRef {
    pub url: String,
    pub children: Vec<DocNode>,
}

/// An image reference. The three flags are decision inputs for the
/// backend's inclusion helper and must be threaded through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
    /// True when the asset format is natively renderable by the target
    /// backend; otherwise a converted copy is assumed to exist on disk.
    pub native: bool,
    pub has_caption: bool,
    pub inline: bool,
    pub children: Vec<DocNode>,
}

/// A reference to a diagram source file rendered by an external tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramFile {
    pub language: DiagramLanguage,
    pub name: String,
    pub has_caption: bool,
    pub children: Vec<DocNode>,
}

/// A link to another documented entity, by symbolic key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub target: String,
    pub children: Vec<DocNode>,
}

/// A named reference; renders its target's title when it has no children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ref {
    pub target: String,
    pub text: String,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecRefList {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecRefItem {
    pub target: String,
    pub children: Vec<DocNode>,
}

/// A parameter documentation section (parameters, return values, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSect {
    pub kind: ParamSectKind,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamSectKind {
    Param,
    RetVal,
    Exception,
    TemplateParam,
}

impl ParamSectKind {
    pub fn label(&self) -> &'static str {
        match self {
            ParamSectKind::Param => "Parameters",
            ParamSectKind::RetVal => "Return values",
            ParamSectKind::Exception => "Exceptions",
            ParamSectKind::TemplateParam => "Template parameters",
        }
    }
}

/// One entry of a parameter section: names, direction, description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamList {
    pub names: Vec<String>,
    pub direction: ParamDirection,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamDirection {
    In,
    Out,
    InOut,
    Unspecified,
}

impl ParamDirection {
    /// Direction tag shown next to the parameter name, if any.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            ParamDirection::In => Some("[in]"),
            ParamDirection::Out => Some("[out]"),
            ParamDirection::InOut => Some("[in,out]"),
            ParamDirection::Unspecified => None,
        }
    }
}

/// An item that also registers itself on a cross-reference page
/// (todo list, bug list, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XRefItem {
    pub key: String,
    pub title: String,
    pub children: Vec<DocNode>,
}

/// A plain block of text nodes without paragraph semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockQuote {
    pub children: Vec<DocNode>,
}

/// A flow-chart block derived from structured source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowChart {
    pub children: Vec<DocNode>,
}

/// A generic parenthetical grouping block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParBlock {
    pub children: Vec<DocNode>,
}
