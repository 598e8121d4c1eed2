//! Markup transformer.
//!
//! Walks the token stream once as a two-state machine:
//!
//! - `Normal`: every container gets a semantic BEM class, its inline style
//!   is filtered into a rule, and it is emitted re-indented.
//! - `InsideButton`: entered on a button layer. Nothing below it is
//!   emitted; the last text seen is kept, and when the button's own end tag
//!   arrives a single `<a href="#">` carrying that text is emitted.
//!
//! Only the last text run of a button survives, and a button layer nested
//! inside another is treated as plain content of the outer one.

use crate::emit::{Emitter, OpenTag};
use crate::naming::{bem_class, NameSession};
use crate::style::filter_style;
use crate::{is_button, HeadingMap, StyleRules, TransformOutput};
use figpress_lexer::{attribute, Attribute, Scanner, Span, Token, TokenKind};

/// Attributes consumed by the transform and never copied to the output.
pub const STRIPPED_ATTRIBUTES: &[&str] = &["style", "data-layer", "data-svg-wrapper"];

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

#[derive(Debug)]
enum Mode {
    Normal,
    InsideButton {
        class: String,
        /// Open elements inside the button, the button itself included.
        depth: usize,
        pending_text: Option<String>,
    },
}

/// One transform session over one section.
pub struct Transformer<'a> {
    section: &'a str,
    headings: &'a HeadingMap,
    names: NameSession,
    rules: StyleRules,
    out: Emitter,
    mode: Mode,
}

/// Transform `markup` into class-based markup and per-class rules.
pub fn transform(markup: &str, section: &str, headings: &HeadingMap) -> TransformOutput {
    let mut transformer = Transformer::new(section, headings);
    for token in Scanner::tokenize(markup) {
        transformer.feed(token);
    }
    transformer.finish()
}

impl<'a> Transformer<'a> {
    pub fn new(section: &'a str, headings: &'a HeadingMap) -> Self {
        Self {
            section,
            headings,
            names: NameSession::new(),
            rules: StyleRules::new(),
            out: Emitter::new(),
            mode: Mode::Normal,
        }
    }

    /// Process one token.
    pub fn feed(&mut self, token: Token) {
        match token.kind {
            TokenKind::StartTag { name, attributes } => self.start_tag(&name, &attributes),
            TokenKind::SelfClosingTag { name, attributes } => {
                self.self_closing_tag(name, &attributes)
            }
            TokenKind::EndTag { name } => self.end_tag(&name, token.span),
            TokenKind::Text(text) => self.text(&text),
            TokenKind::RawText(text) => self.raw_text(&text),
        }
    }

    /// Finish the session, closing anything left open.
    pub fn finish(mut self) -> TransformOutput {
        if let Mode::InsideButton {
            class,
            pending_text,
            ..
        } = std::mem::replace(&mut self.mode, Mode::Normal)
        {
            log::debug!("button {class} not closed before end of input");
            if let Some(text) = pending_text {
                self.out.anchor(&class, &text);
            }
        }

        TransformOutput {
            markup: self.out.finish(),
            rules: self.rules,
        }
    }

    fn start_tag(&mut self, tag: &str, attributes: &[Attribute]) {
        if let Mode::InsideButton { depth, .. } = &mut self.mode {
            *depth += 1;
            return;
        }

        if is_button(attributes) {
            self.enter_button(attributes);
            return;
        }

        let seed = attribute(attributes, "data-layer")
            .filter(|layer| !layer.is_empty())
            .or_else(|| attribute(attributes, "class").and_then(|c| c.split_whitespace().next()))
            .unwrap_or(tag);
        let class = bem_class(self.section, &self.names.semantic_name(seed, tag));

        if let Some(style) = attribute(attributes, "style") {
            let declarations = filter_style(style);
            if !declarations.is_empty() {
                self.rules.entry(class.clone()).or_insert(declarations);
            }
        }

        let mut open = OpenTag {
            tag: tag.to_string(),
            attributes: retained_attributes(attributes),
        };
        match open.attributes.iter_mut().find(|(name, _)| name == "class") {
            Some((_, value)) => *value = class,
            None => open.attributes.push(("class".into(), class)),
        }
        self.out.open(open);
    }

    fn enter_button(&mut self, attributes: &[Attribute]) {
        let class = bem_class(self.section, &self.names.semantic_name("button", "a"));

        if let Some(style) = attribute(attributes, "style") {
            let declarations = filter_style(style);
            if !declarations.is_empty() {
                self.rules.insert(class.clone(), declarations);
            }
        }

        self.mode = Mode::InsideButton {
            class,
            depth: 1,
            pending_text: None,
        };
    }

    fn self_closing_tag(&mut self, tag: String, attributes: &[Attribute]) {
        if matches!(self.mode, Mode::InsideButton { .. }) {
            return;
        }

        self.out.self_closing(OpenTag {
            tag,
            attributes: retained_attributes(attributes),
        });
    }

    fn end_tag(&mut self, tag: &str, span: Span) {
        match &mut self.mode {
            Mode::InsideButton {
                class,
                depth,
                pending_text,
            } => {
                *depth -= 1;
                if *depth > 0 {
                    return;
                }
                match pending_text.take() {
                    Some(text) => self.out.anchor(class, &text),
                    None => log::debug!("button {class} has no text, dropping it"),
                }
                self.mode = Mode::Normal;
            }
            Mode::Normal => {
                if !self.out.close() {
                    log::debug!("ignoring stray </{tag}> at line {}", span.line);
                }
            }
        }
    }

    fn text(&mut self, raw: &str) {
        let text = raw.trim();
        if text.is_empty() {
            return;
        }

        if let Mode::InsideButton { pending_text, .. } = &mut self.mode {
            *pending_text = Some(text.to_string());
            return;
        }

        let headings = self.headings;
        if let Some(level) = headings.get(text) {
            self.promote_heading(text, level);
        }
        self.out.text(text);
    }

    /// `script`/`style` bodies pass through unescaped and are never headings.
    fn raw_text(&mut self, raw: &str) {
        let text = raw.trim();
        if text.is_empty() || matches!(self.mode, Mode::InsideButton { .. }) {
            return;
        }
        self.out.raw_text(text);
    }

    /// Turn the `div` opened right before `text` into the mapped heading.
    ///
    /// A matching entry consumes a `title` name even when there is no `div`
    /// to promote, so later headings are numbered the same either way.
    fn promote_heading(&mut self, text: &str, level: &str) {
        let Some(heading) = heading_tag(level) else {
            log::debug!("heading entry {text:?} maps to {level:?}, not h1-h6; ignored");
            return;
        };

        let class = bem_class(self.section, &self.names.semantic_name("title", heading));
        match self.out.last_open_div() {
            Some(open) => {
                open.tag = heading.to_string();
                open.prepend_class(&class);
            }
            None => log::debug!(
                "heading text {text:?} does not directly follow a <div>; left as text"
            ),
        }
    }
}

/// Normalize a heading map value to `h1`..`h6`, or `None` if it is not one.
pub fn heading_tag(value: &str) -> Option<&'static str> {
    let value = value.trim().to_ascii_lowercase();
    HEADING_TAGS.iter().copied().find(|tag| *tag == value)
}

/// Output attributes: stripped ones and those without a value are dropped.
fn retained_attributes(attributes: &[Attribute]) -> Vec<(String, String)> {
    attributes
        .iter()
        .filter(|a| !STRIPPED_ATTRIBUTES.contains(&a.name.as_str()))
        .filter_map(|a| match a.value.as_deref() {
            Some(value) if !value.is_empty() => Some((a.name.clone(), value.to_string())),
            _ => None,
        })
        .collect()
}
