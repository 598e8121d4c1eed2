//! Semantic class naming.
//!
//! Turns designer layer names ("Frame 12", "Rectangle 4", "Hero Image")
//! into short readable BEM element names, deduplicated per session.

use std::collections::HashMap;

/// Design-tool layer vocabulary and the semantic term that replaces it.
/// Checked in order; the first term contained in the label wins.
pub const LAYER_TERMS: &[(&str, &str)] = &[
    ("frame", "wrap"),
    ("rectangle", "box"),
    ("ellipse", "circle"),
    ("line", "divider"),
    ("group", "group"),
    ("vector", "icon"),
    ("text", "text"),
    ("button", "btn"),
    ("image", "img"),
    ("svg", "svg"),
];

/// Name used when a label yields fewer than two letters.
pub fn fallback_name(tag: &str) -> &'static str {
    match tag {
        "a" => "link",
        "button" => "btn",
        "img" => "img",
        "svg" => "icon",
        "ul" | "ol" => "list",
        "li" => "item",
        "p" => "text",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "title",
        "span" => "label",
        _ => "block",
    }
}

/// Normalize a label to a local name, before session deduplication.
pub fn local_name(raw: &str, tag: &str) -> String {
    let letters: String = raw.chars().filter(char::is_ascii_alphabetic).collect();
    let mut name = letters.to_ascii_lowercase();

    if let Some((_, term)) = LAYER_TERMS.iter().find(|(layer, _)| name.contains(layer)) {
        name = term.to_string();
    }

    if name.len() < 2 {
        name = fallback_name(tag).to_string();
    }

    hyphenate_case(&name).to_ascii_lowercase()
}

/// Insert `-` between a lowercase letter and a following uppercase one.
fn hyphenate_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_lower = false;
    for c in name.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push('-');
        }
        out.push(c);
        prev_lower = c.is_ascii_lowercase();
    }
    out
}

/// Per-transform name state.
///
/// Counts how often each local name was handed out so repeats become
/// `icon`, `icon-2`, `icon-3`. One session covers one section; nothing is
/// shared between sessions.
#[derive(Debug, Default)]
pub struct NameSession {
    counts: HashMap<String, usize>,
}

impl NameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the next unique local name for `raw` on a `tag` element.
    pub fn semantic_name(&mut self, raw: &str, tag: &str) -> String {
        let name = local_name(raw, tag);
        let count = self.counts.entry(name.clone()).or_insert(0);
        *count += 1;

        if *count > 1 {
            format!("{name}-{count}")
        } else {
            name
        }
    }
}

/// Join a section and a local name into a BEM class: `hero__icon`.
pub fn bem_class(section: &str, name: &str) -> String {
    format!("{section}__{name}")
}
