//! absurl Lexer
//!
//! Splits HTML or XML bytes into a stream of tokens: plain text, plus the
//! quote-and-slash sequences that follow a `src=` or `href=` attribute
//! prefix. Root-relative values (`"/`) become match tokens, scheme-relative
//! values (`"//`) become guard tokens. Which quote sequences count is decided
//! by the [`Rule`]s handed to the lexer.
//!
//! # Example
//!
//! ```
//! use absurl_lexer::{Lexer, Rule, TokenKind};
//!
//! let rules = vec![Rule::new(
//!     TokenKind::SrcDq,
//!     TokenKind::GuardSrcDq,
//!     "\"/",
//!     "\"//",
//!     "\"https://example.com/",
//! )];
//! let tokens = Lexer::tokenize(b"<img src=\"/a.png\">", &rules);
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].kind, TokenKind::SrcDq);
//! ```

pub mod prefix;
pub mod rule;
pub mod scanner;
pub mod token;

pub use prefix::{MatchState, PrefixMatcher, ATTRIBUTE_PREFIXES};
pub use rule::Rule;
pub use scanner::{decode_char, recycle, Lexer};
pub use token::{Attribute, Token, TokenKind};
