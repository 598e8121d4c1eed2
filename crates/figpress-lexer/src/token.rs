/// Where a token was found, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// 1-based line on which the token was completed.
    pub line: usize,
}

impl Span {
    pub fn new(line: usize) -> Self {
        Self { line }
    }
}

/// A single `name` or `name="value"` attribute on a tag.
///
/// Names are lowercased by the scanner. Values have character references
/// decoded; `None` means the attribute has no value or an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
        }
    }
}

/// Token classification for markup source.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<div class="x">`
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
    },
    /// `<img src="x" />`, or a void element written without the slash.
    SelfClosingTag {
        name: String,
        attributes: Vec<Attribute>,
    },
    /// `</div>`
    EndTag { name: String },
    /// Character data between tags, with references decoded.
    Text(String),
    /// Body of a `script` or `style` element, exactly as written.
    RawText(String),
}

/// A token produced by the markup scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Look up an attribute value by (lowercase) name.
///
/// Attributes written without a value read as the empty string.
pub fn attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_deref().unwrap_or(""))
}

/// HTML5 void elements (self-closing, no children).
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Check if a tag name is an HTML5 void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}
