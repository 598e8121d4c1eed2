//! Stylesheet generation.
//!
//! Filters inline `style` attributes down to the declarations worth keeping,
//! merges classes that ended up with the same declarations, and renders the
//! result as CSS text.

use crate::StyleRules;
use indexmap::IndexMap;

/// Properties dropped from every inline style. Typography and absolute
/// geometry come from the theme, not from the design export.
pub const EXCLUDED_PROPERTIES: &[&str] = &[
    "font-size",
    "line-height",
    "font-family",
    "font-weight",
    "left",
    "top",
    "position",
    "width",
    "height",
];

/// Filter a raw `style` attribute value.
///
/// Returns the trimmed, non-empty declarations whose property is not in
/// [`EXCLUDED_PROPERTIES`], in source order and with their original text.
/// A segment without `:` is treated as a property name and kept.
pub fn filter_style(style: &str) -> Vec<String> {
    style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            let property = decl.split(':').next().unwrap_or_default();
            let property = property.trim().to_lowercase();
            !EXCLUDED_PROPERTIES.contains(&property.as_str())
        })
        .map(str::to_string)
        .collect()
}

/// Collapse classes that share the exact same declarations into one rule.
///
/// Declarations are compared as text after sorting, so order does not
/// matter but `color:red` and `color: red` differ. Selectors become
/// `.a,\n.b`; groups keep the order in which they were first seen, and each
/// merged rule lists its declarations sorted.
pub fn merge_rules(rules: &StyleRules) -> StyleRules {
    let mut groups: IndexMap<Vec<&str>, Vec<&str>> = IndexMap::new();

    for (class, declarations) in rules {
        let mut key: Vec<&str> = declarations.iter().map(String::as_str).collect();
        key.sort_unstable();
        groups.entry(key).or_default().push(class);
    }

    groups
        .into_iter()
        .map(|(declarations, classes)| {
            let selector = classes
                .iter()
                .map(|c| format!(".{c}"))
                .collect::<Vec<_>>()
                .join(",\n");
            let declarations = declarations.into_iter().map(str::to_string).collect();
            (selector, declarations)
        })
        .collect()
}

/// Render rules as CSS. Rules without declarations are skipped.
pub fn render_stylesheet(rules: &StyleRules) -> String {
    let mut css = String::new();

    for (selector, declarations) in rules {
        if declarations.is_empty() {
            continue;
        }
        css.push_str(selector);
        css.push_str(" {\n");
        for decl in declarations {
            css.push_str(&format!("    {decl};\n"));
        }
        css.push_str("}\n\n");
    }

    css
}
