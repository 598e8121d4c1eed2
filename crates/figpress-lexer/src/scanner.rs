use std::cell::{Cell, RefCell};

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token as HtmlToken, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};
use html5ever::TokenizerResult;

use crate::token::{is_void_element, Attribute, Span, Token, TokenKind};

/// Permissive markup scanner.
///
/// Drives the html5ever tokenizer over exported HTML and folds its events
/// into start, self-closing, end, text and raw-text tokens. Never fails:
/// comments, doctypes and parse errors are dropped, and consecutive
/// character runs are joined into one text token.
///
/// - Tag and attribute names arrive lowercased, references decoded
/// - Void elements are delivered as self-closing; their end tags are dropped
/// - `script`/`style` bodies are tokenized as raw text and kept undecoded
pub struct Scanner;

impl Scanner {
    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(source));

        let tokenizer = Tokenizer::new(Collector::default(), TokenizerOpts::default());
        while let TokenizerResult::Script(_) = tokenizer.feed(&input) {}
        tokenizer.end();

        tokenizer.sink.tokens.take()
    }
}

/// Token sink collecting html5ever events into [`Token`]s.
#[derive(Default)]
struct Collector {
    tokens: RefCell<Vec<Token>>,
    text: RefCell<String>,
    text_line: Cell<usize>,
    /// Inside a `script` or `style` body.
    raw: Cell<bool>,
}

impl Collector {
    fn push(&self, kind: TokenKind, line: usize) {
        self.tokens.borrow_mut().push(Token::new(kind, Span::new(line)));
    }

    fn push_text(&self, chars: &str, line: usize) {
        let mut text = self.text.borrow_mut();
        if text.is_empty() {
            self.text_line.set(line);
        }
        text.push_str(chars);
    }

    fn flush_text(&self) {
        let text = self.text.take();
        if text.is_empty() {
            return;
        }
        let kind = if self.raw.get() {
            TokenKind::RawText(text)
        } else {
            TokenKind::Text(text)
        };
        self.push(kind, self.text_line.get());
    }

    fn tag(&self, tag: Tag, line: usize) -> TokenSinkResult<()> {
        let name = tag.name.to_string();

        match tag.kind {
            TagKind::StartTag => {
                let attributes = tag
                    .attrs
                    .iter()
                    .map(|attr| {
                        let value: &str = &attr.value;
                        let value = Some(value).filter(|v| !v.is_empty());
                        Attribute::new(attr.name.local.to_string(), value)
                    })
                    .collect();

                if tag.self_closing || is_void_element(&name) {
                    self.push(TokenKind::SelfClosingTag { name, attributes }, line);
                    return TokenSinkResult::Continue;
                }

                let raw_kind = match name.as_str() {
                    "script" => Some(RawKind::ScriptData),
                    "style" => Some(RawKind::Rawtext),
                    _ => None,
                };
                self.push(TokenKind::StartTag { name, attributes }, line);
                if let Some(kind) = raw_kind {
                    self.raw.set(true);
                    return TokenSinkResult::RawData(kind);
                }
            }
            TagKind::EndTag => {
                self.raw.set(false);
                if !is_void_element(&name) {
                    self.push(TokenKind::EndTag { name }, line);
                }
            }
        }
        TokenSinkResult::Continue
    }
}

impl TokenSink for Collector {
    type Handle = ();

    fn process_token(&self, token: HtmlToken, line_number: u64) -> TokenSinkResult<()> {
        let line = line_number as usize;
        match token {
            HtmlToken::CharacterTokens(chars) => self.push_text(&chars, line),
            HtmlToken::TagToken(tag) => {
                self.flush_text();
                return self.tag(tag, line);
            }
            HtmlToken::CommentToken(_) | HtmlToken::DoctypeToken(_) | HtmlToken::EOFToken => {
                self.flush_text()
            }
            HtmlToken::NullCharacterToken | HtmlToken::ParseError(_) => {}
        }
        TokenSinkResult::Continue
    }

    fn end(&self) {
        self.flush_text();
    }
}
