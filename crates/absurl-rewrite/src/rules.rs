//! Rule set construction.
//!
//! A rule set holds two families of four rules each, one family per
//! [`Dialect`]. Within a family the order is src-double, src-single,
//! href-double, href-single, which is also the order the lexer tries them.

use std::path::Path;

use absurl_lexer::{Rule, TokenKind};
use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

/// How quotes around attribute values are written in the content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Literal `"` and `'`.
    #[default]
    Html,
    /// Entity-escaped `&#34;` and `&#39;`, as found in feeds and sitemaps.
    Xml,
}

impl Dialect {
    /// Guess the dialect from a file extension. Unknown extensions are HTML.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xml" | "rss" | "atom" | "svg") => Dialect::Xml,
            _ => Dialect::Html,
        }
    }

    /// The (double, single) quote sequences of this dialect.
    pub fn quotes(self) -> (&'static str, &'static str) {
        match self {
            Dialect::Html => ("\"", "'"),
            Dialect::Xml => ("&#34;", "&#39;"),
        }
    }
}

/// The HTML and XML rule families for one base URL.
///
/// Immutable once built and safe to share between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    base: String,
    html: [Rule; 4],
    xml: [Rule; 4],
}

impl RuleSet {
    /// Build both rule families for `base_url`.
    ///
    /// Never fails: a base that does not parse as an absolute URL is used as
    /// given, minus trailing slashes.
    pub fn new(base_url: &str) -> Self {
        let base = normalize_base(base_url);
        debug!("building rule set for base '{base}'");

        Self {
            html: family(Dialect::Html, &base),
            xml: family(Dialect::Xml, &base),
            base,
        }
    }

    /// The base URL the replacements are anchored at, without trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn html(&self) -> &[Rule] {
        &self.html
    }

    pub fn xml(&self) -> &[Rule] {
        &self.xml
    }

    pub fn for_dialect(&self, dialect: Dialect) -> &[Rule] {
        match dialect {
            Dialect::Html => self.html(),
            Dialect::Xml => self.xml(),
        }
    }
}

/// Serialize `base_url` through the URL parser when it parses, then strip
/// trailing slashes.
pub fn normalize_base(base_url: &str) -> String {
    let base_url = base_url.trim();
    let serialized = match Url::parse(base_url) {
        Ok(url) => url.to_string(),
        Err(e) => {
            debug!("base URL '{base_url}' did not parse ({e}), using it verbatim");
            base_url.to_string()
        }
    };
    serialized.trim_end_matches('/').to_string()
}

fn family(dialect: Dialect, base: &str) -> [Rule; 4] {
    let (dq, sq) = dialect.quotes();
    let rule = |match_kind, guard_kind, quote: &str| {
        Rule::new(
            match_kind,
            guard_kind,
            format!("{quote}/"),
            format!("{quote}//"),
            format!("{quote}{base}/"),
        )
    };

    [
        rule(TokenKind::SrcDq, TokenKind::GuardSrcDq, dq),
        rule(TokenKind::SrcSq, TokenKind::GuardSrcSq, sq),
        rule(TokenKind::HrefDq, TokenKind::GuardHrefDq, dq),
        rule(TokenKind::HrefSq, TokenKind::GuardHrefSq, sq),
    ]
}
