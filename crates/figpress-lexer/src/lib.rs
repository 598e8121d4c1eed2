//! figpress Lexer
//!
//! Tokenizes exported design-tool markup into a flat stream of start,
//! self-closing, end, text and raw-text tokens, using the html5ever
//! tokenizer. The scanner is permissive: it never fails and skips comments
//! and declarations.
//!
//! # Example
//!
//! ```
//! use figpress_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("<p>Hi</p>");
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].kind, TokenKind::Text("Hi".into()));
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{attribute, is_void_element, Attribute, Span, Token, TokenKind};
