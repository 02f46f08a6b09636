//! absurl Rewriter
//!
//! Turns root-relative `src` and `href` values into absolute URLs anchored at
//! a base, in HTML (literal quotes) or XML (entity-escaped quotes).
//! Scheme-relative values (`//host/...`) are never touched, and one of them
//! anywhere in a document switches off rewriting for its whole
//! attribute+quote family in that document.
//!
//! ```text
//! bytes → Lexer → tokens → discover_guards → substitute → bytes
//! ```
//!
//! # Example
//!
//! ```
//! use absurl_rewrite::{rewrite_html, RuleSet};
//!
//! let rules = RuleSet::new("http://example.com/");
//! let out = rewrite_html(b"<img src=\"/img/a.png\">", &rules);
//! assert_eq!(out, b"<img src=\"http://example.com/img/a.png\">");
//! ```

pub mod config;
pub mod engine;
pub mod pool;
pub mod rules;

use std::path::PathBuf;

use absurl_lexer::Lexer;
use log::trace;

pub use config::Config;
pub use engine::RewriteStats;
pub use pool::{BufferPool, TokenPool};
pub use rules::{Dialect, RuleSet};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: baseUrl is empty")]
    MissingBaseUrl,
}

/// Build the HTML and XML rule families for `base_url`.
pub fn build_rule_set(base_url: &str) -> RuleSet {
    RuleSet::new(base_url)
}

/// Rewrite root-relative URLs quoted with literal `"` or `'`.
pub fn rewrite_html(content: &[u8], rules: &RuleSet) -> Vec<u8> {
    rewrite(content, rules, Dialect::Html)
}

/// Rewrite root-relative URLs quoted with `&#34;` or `&#39;`.
pub fn rewrite_xml(content: &[u8], rules: &RuleSet) -> Vec<u8> {
    rewrite(content, rules, Dialect::Xml)
}

/// Rewrite `content` with the rule family of `dialect`, without pooling.
pub fn rewrite(content: &[u8], rules: &RuleSet, dialect: Dialect) -> Vec<u8> {
    let rules = rules.for_dialect(dialect);
    let tokens = Lexer::tokenize(content, rules);
    let mut out = Vec::with_capacity(content.len());
    let stats = engine::apply(&tokens, rules, &mut out);
    trace!("rewrote {dialect:?} document: {stats:?}");
    out
}

/// A rule set plus pooled scratch storage, for rewriting many documents.
///
/// `Replacer` is `Send + Sync`; guard state lives in each call, so documents
/// never influence each other.
#[derive(Debug)]
pub struct Replacer {
    rules: RuleSet,
    tokens: TokenPool,
    buffers: BufferPool,
}

impl Replacer {
    pub fn new(base_url: &str) -> Self {
        Self {
            rules: RuleSet::new(base_url),
            tokens: TokenPool::new(),
            buffers: BufferPool::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn replace_in_html(&self, content: &[u8]) -> Vec<u8> {
        self.replace(content, Dialect::Html)
    }

    pub fn replace_in_xml(&self, content: &[u8]) -> Vec<u8> {
        self.replace(content, Dialect::Xml)
    }

    /// Rewrite into a pooled buffer and return a copy of the result.
    pub fn replace(&self, content: &[u8], dialect: Dialect) -> Vec<u8> {
        let mut buf = self.buffers.acquire();
        buf.reserve(content.len());
        self.replace_into(content, dialect, &mut buf);
        buf.to_vec()
    }

    /// Append the rewritten `content` to `out`.
    pub fn replace_into(
        &self,
        content: &[u8],
        dialect: Dialect,
        out: &mut Vec<u8>,
    ) -> RewriteStats {
        let rules = self.rules.for_dialect(dialect);
        let mut tokens = self.tokens.acquire();
        let stats = engine::apply(tokens.lex(content, rules), rules, out);
        trace!("rewrote {dialect:?} document: {stats:?}");
        stats
    }
}
