//! figpress Code Generator
//!
//! Turns a design-tool HTML export into class-based markup and a stylesheet.
//! Layer names become BEM classes scoped to a section, inline styles become
//! rules, button layers collapse into anchors, and chosen text runs are
//! promoted to headings.
//!
//! ```text
//! markup → analyze() → Analysis { potential_titles, button_texts }
//! markup → transform() → TransformOutput { markup, rules }
//!                      → merge_rules() → render_stylesheet() → css
//! ```

pub mod analyzer;
pub mod emit;
pub mod naming;
pub mod style;
pub mod transformer;

pub use analyzer::{analyze, Analysis};
pub use naming::NameSession;
pub use style::{filter_style, merge_rules, render_stylesheet};
pub use transformer::{transform, Transformer};

use figpress_lexer::{attribute, Attribute};
use indexmap::IndexMap;

/// Class (or merged selector) → declarations, in insertion order.
pub type StyleRules = IndexMap<String, Vec<String>>;

/// Exact text content → heading tag (`h1`..`h6`).
pub type HeadingMap = IndexMap<String, String>;

/// The result of one transform session.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    pub markup: String,
    pub rules: StyleRules,
}

/// A fully converted section: markup plus rendered, merged CSS.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutput {
    pub html: String,
    pub css: String,
}

/// Whether a tag's layer name or class marks it as a button.
pub fn is_button(attributes: &[Attribute]) -> bool {
    ["data-layer", "class"].iter().any(|name| {
        attribute(attributes, name).is_some_and(|value| {
            let value = value.to_lowercase();
            value.contains("button") || value.contains("btn")
        })
    })
}

/// Transform a section, merge its rules and render the stylesheet.
pub fn compile(markup: &str, section: &str, headings: &HeadingMap) -> SectionOutput {
    let output = transform(markup, section, headings);
    let merged = merge_rules(&output.rules);

    SectionOutput {
        html: output.markup,
        css: render_stylesheet(&merged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_button_by_layer() {
        assert!(is_button(&[Attribute::new("data-layer", Some("Button/Primary"))]));
        assert!(is_button(&[Attribute::new("data-layer", Some("CTA btn"))]));
        assert!(!is_button(&[Attribute::new("data-layer", Some("Frame 3"))]));
    }

    #[test]
    fn test_is_button_by_class() {
        assert!(is_button(&[Attribute::new("class", Some("hero-Button"))]));
        assert!(is_button(&[Attribute::new("class", Some("btn primary"))]));
        assert!(!is_button(&[Attribute::new("class", None)]));
        assert!(!is_button(&[]));
    }

    #[test]
    fn test_compile_empty() {
        let output = compile("", "hero", &HeadingMap::new());
        assert_eq!(output.html, "");
        assert_eq!(output.css, "");
    }

    #[test]
    fn test_compile_merges_shared_styles() {
        let markup = r#"<div data-layer="Card" style="color:red;width:10px">
  <div data-layer="Badge" style="color:red">New</div>
  <div data-layer="Note" style="color:blue">Fresh</div>
</div>"#;
        let output = compile(markup, "promo", &HeadingMap::new());

        assert_eq!(
            output.html,
            "<div class=\"promo__card\">\n    <div class=\"promo__badge\">\n        New\n    </div>\n    <div class=\"promo__note\">\n        Fresh\n    </div>\n</div>"
        );
        assert_eq!(
            output.css,
            ".promo__card,\n.promo__badge {\n    color:red;\n}\n\n.promo__note {\n    color:blue;\n}\n\n"
        );
    }

    #[test]
    fn test_compile_landing_section() {
        let markup = r#"<div data-layer="Frame 1" style="position:absolute;left:0;top:0;background:#F5F5F5">
  <div data-layer="Welcome" style="font-size:48px;color:#111">Welcome</div>
  <div data-layer="Intro" style="color:#555">We build things.</div>
  <div data-layer="Button" style="background:#0A84FF;border-radius:8px;width:160px">
    <div data-layer="Label">Get started</div>
  </div>
  <img data-layer="Hero Image" src="hero.png" style="width:400px">
</div>"#;
        let mut headings = HeadingMap::new();
        headings.insert("Welcome".into(), "h1".into());

        let output = compile(markup, "landing", &headings);

        assert_eq!(
            output.html,
            [
                "<div class=\"landing__wrap\">",
                "    <h1 class=\"landing__title landing__welcome\">",
                "        Welcome",
                "    </h1>",
                "    <div class=\"landing__intro\">",
                "        We build things.",
                "    </div>",
                "    <a href=\"#\" class=\"landing__btn\">Get started</a>",
                "    <img src=\"hero.png\" />",
                "</div>",
            ]
            .join("\n")
        );
        assert!(output.css.contains(".landing__wrap {\n    background:#F5F5F5;\n}"));
        assert!(output.css.contains(".landing__welcome {\n    color:#111;\n}"));
        assert!(output
            .css
            .contains(".landing__btn {\n    background:#0A84FF;\n    border-radius:8px;\n}"));
        assert!(!output.css.contains("width"));
    }
}
