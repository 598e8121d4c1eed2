//! Structured output for the transformer.
//!
//! Emitted markup is kept as a list of items until the walk is over, so a
//! container's opening tag can still be renamed (heading promotion) and its
//! closing tag follows the new name.

use html_escape::{encode_double_quoted_attribute, encode_text};

const INDENT: &str = "    ";

/// An opening tag that may still be rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTag {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

impl OpenTag {
    /// Prepend a class to the `class` attribute, adding one if missing.
    pub fn prepend_class(&mut self, class: &str) {
        match self.attributes.iter_mut().find(|(name, _)| name == "class") {
            Some((_, value)) if !value.is_empty() => *value = format!("{class} {value}"),
            Some((_, value)) => *value = class.to_string(),
            None => self.attributes.push(("class".into(), class.into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Open(usize, OpenTag),
    /// Index of the matching `Open` item.
    Close(usize, usize),
    SelfClosing(usize, OpenTag),
    Text(usize, String),
    /// Written without escaping.
    Raw(usize, String),
    Anchor {
        depth: usize,
        class: String,
        text: String,
    },
}

/// Collects emitted items and tracks the open element stack.
#[derive(Debug, Default)]
pub struct Emitter {
    items: Vec<Item>,
    open: Vec<usize>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn open(&mut self, tag: OpenTag) {
        self.items.push(Item::Open(self.depth(), tag));
        self.open.push(self.items.len() - 1);
    }

    /// Close the innermost open element. Returns `false` when nothing is open.
    pub fn close(&mut self) -> bool {
        match self.open.pop() {
            Some(index) => {
                self.items.push(Item::Close(self.depth(), index));
                true
            }
            None => false,
        }
    }

    pub fn self_closing(&mut self, tag: OpenTag) {
        self.items.push(Item::SelfClosing(self.depth(), tag));
    }

    pub fn text(&mut self, text: &str) {
        self.items.push(Item::Text(self.depth(), text.to_string()));
    }

    pub fn raw_text(&mut self, text: &str) {
        self.items.push(Item::Raw(self.depth(), text.to_string()));
    }

    pub fn anchor(&mut self, class: &str, text: &str) {
        self.items.push(Item::Anchor {
            depth: self.depth(),
            class: class.to_string(),
            text: text.to_string(),
        });
    }

    /// The last emitted item, if it is the opening tag of a `div`.
    pub fn last_open_div(&mut self) -> Option<&mut OpenTag> {
        match self.items.last_mut() {
            Some(Item::Open(_, tag)) if tag.tag == "div" => Some(tag),
            _ => None,
        }
    }

    /// Close everything still open and render the items, one per line.
    pub fn finish(mut self) -> String {
        let unclosed = self.open.len();
        if unclosed > 0 {
            log::debug!("closing {unclosed} element(s) left open at end of input");
        }
        while self.close() {}

        let lines: Vec<String> = self.items.iter().map(|item| self.render(item)).collect();
        lines.join("\n")
    }

    fn render(&self, item: &Item) -> String {
        match item {
            Item::Open(depth, tag) => {
                format!("{}<{}{}>", INDENT.repeat(*depth), tag.tag, render_attributes(tag))
            }
            Item::Close(depth, index) => {
                let name = match &self.items[*index] {
                    Item::Open(_, tag) => tag.tag.as_str(),
                    _ => "div",
                };
                format!("{}</{name}>", INDENT.repeat(*depth))
            }
            Item::SelfClosing(depth, tag) => {
                format!("{}<{}{} />", INDENT.repeat(*depth), tag.tag, render_attributes(tag))
            }
            Item::Text(depth, text) => format!("{}{}", INDENT.repeat(*depth), encode_text(text)),
            Item::Raw(depth, text) => format!("{}{text}", INDENT.repeat(*depth)),
            Item::Anchor { depth, class, text } => format!(
                "{}<a href=\"#\" class=\"{}\">{}</a>",
                INDENT.repeat(*depth),
                encode_double_quoted_attribute(class),
                encode_text(text)
            ),
        }
    }
}

fn render_attributes(tag: &OpenTag) -> String {
    tag.attributes
        .iter()
        .map(|(name, value)| format!(" {name}=\"{}\"", encode_double_quoted_attribute(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn div(class: &str) -> OpenTag {
        OpenTag {
            tag: "div".into(),
            attributes: vec![("class".into(), class.into())],
        }
    }

    #[test]
    fn test_indentation() {
        let mut out = Emitter::new();
        out.open(div("s__wrap"));
        out.open(div("s__box"));
        out.text("Hello");
        out.close();
        out.self_closing(OpenTag {
            tag: "img".into(),
            attributes: vec![("src".into(), "a.png".into())],
        });
        out.close();

        assert_eq!(
            out.finish(),
            "<div class=\"s__wrap\">\n    <div class=\"s__box\">\n        Hello\n    </div>\n    <img src=\"a.png\" />\n</div>"
        );
    }

    #[test]
    fn test_renamed_open_tag_renames_close() {
        let mut out = Emitter::new();
        out.open(div("s__text"));
        if let Some(tag) = out.last_open_div() {
            tag.tag = "h2".into();
            tag.prepend_class("s__title");
        }
        out.text("Welcome");
        out.close();

        assert_eq!(
            out.finish(),
            "<h2 class=\"s__title s__text\">\n    Welcome\n</h2>"
        );
    }

    #[test]
    fn test_last_open_div_only_directly_after_open() {
        let mut out = Emitter::new();
        out.open(div("s__a"));
        out.text("first");
        assert!(out.last_open_div().is_none());

        out.open(OpenTag {
            tag: "span".into(),
            attributes: Vec::new(),
        });
        assert!(out.last_open_div().is_none());
    }

    #[test]
    fn test_close_with_nothing_open() {
        let mut out = Emitter::new();
        assert!(!out.close());
        assert_eq!(out.finish(), "");
    }

    #[test]
    fn test_unclosed_elements_closed_on_finish() {
        let mut out = Emitter::new();
        out.open(div("s__a"));
        out.open(div("s__b"));
        assert_eq!(
            out.finish(),
            "<div class=\"s__a\">\n    <div class=\"s__b\">\n    </div>\n</div>"
        );
    }

    #[test]
    fn test_output_escaped() {
        let mut out = Emitter::new();
        out.open(OpenTag {
            tag: "div".into(),
            attributes: vec![("title".into(), "say \"hi\"".into())],
        });
        out.text("a < b & c");
        out.anchor("s__btn", "Save & exit");
        out.close();

        assert_eq!(
            out.finish(),
            "<div title=\"say &quot;hi&quot;\">\n    a &lt; b &amp; c\n    <a href=\"#\" class=\"s__btn\">Save &amp; exit</a>\n</div>"
        );
    }

    #[test]
    fn test_raw_text_not_escaped() {
        let mut out = Emitter::new();
        out.open(OpenTag {
            tag: "script".into(),
            attributes: Vec::new(),
        });
        out.raw_text("if (a < b && c) {}");
        out.close();

        assert_eq!(out.finish(), "<script>\n    if (a < b && c) {}\n</script>");
    }

    #[test]
    fn test_prepend_class_without_class() {
        let mut tag = OpenTag {
            tag: "div".into(),
            attributes: Vec::new(),
        };
        tag.prepend_class("s__title");
        assert_eq!(tag.attributes, vec![("class".to_string(), "s__title".to_string())]);
    }
}
