//! Read-only pre-pass that suggests heading candidates.
//!
//! The operator runs this before the real transform to decide which text
//! runs go into the heading map. It is a heuristic and carries no
//! guarantees beyond "short, non-numeric, not a button label".

use crate::is_button;
use figpress_lexer::{Scanner, TokenKind};
use serde::Serialize;

/// Texts of this many characters or more are never title candidates.
pub const MAX_TITLE_CHARS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub potential_titles: Vec<String>,
    pub button_texts: Vec<String>,
}

/// Collect potential titles and button texts from `markup`.
///
/// A button layer marks the next text run as its label. Titles are then
/// filtered by value against the button labels, so a paragraph that happens
/// to read the same as a button ("Buy now") is dropped as well.
pub fn analyze(markup: &str) -> Analysis {
    let mut analysis = Analysis::default();
    let mut in_button = false;

    for token in Scanner::tokenize(markup) {
        match token.kind {
            TokenKind::StartTag { attributes, .. } | TokenKind::SelfClosingTag { attributes, .. } => {
                if is_button(&attributes) {
                    in_button = true;
                }
            }
            TokenKind::Text(raw) => {
                let text = raw.trim();
                if text.is_empty() {
                    continue;
                }
                if in_button {
                    analysis.button_texts.push(text.to_string());
                    in_button = false;
                } else if is_title_candidate(text) {
                    analysis.potential_titles.push(text.to_string());
                }
            }
            TokenKind::EndTag { .. } | TokenKind::RawText(_) => {}
        }
    }

    let buttons = &analysis.button_texts;
    analysis.potential_titles.retain(|title| !buttons.contains(title));
    analysis
}

fn is_title_candidate(text: &str) -> bool {
    text.chars().count() < MAX_TITLE_CHARS && !text.chars().all(char::is_numeric)
}
