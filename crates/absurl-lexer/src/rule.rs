use crate::token::{Attribute, TokenKind};

/// One match/guard/replacement triple.
///
/// The lexer only reads the kinds and the `match_bytes`/`guard_bytes`
/// patterns; `replacement` is written by the rewrite engine in place of a
/// match token. Rules are immutable once built, whether a rule is guarded
/// in a given document is tracked by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub match_kind: TokenKind,
    pub guard_kind: TokenKind,
    pub match_bytes: Vec<u8>,
    pub guard_bytes: Vec<u8>,
    pub replacement: Vec<u8>,
}

impl Rule {
    pub fn new(
        match_kind: TokenKind,
        guard_kind: TokenKind,
        match_bytes: impl Into<Vec<u8>>,
        guard_bytes: impl Into<Vec<u8>>,
        replacement: impl Into<Vec<u8>>,
    ) -> Self {
        debug_assert_eq!(match_kind.attribute(), guard_kind.attribute());
        debug_assert!(guard_kind.is_guard() && !match_kind.is_guard());
        Self {
            match_kind,
            guard_kind,
            match_bytes: match_bytes.into(),
            guard_bytes: guard_bytes.into(),
            replacement: replacement.into(),
        }
    }

    /// The attribute family this rule belongs to.
    pub fn attribute(&self) -> Option<Attribute> {
        self.match_kind.attribute()
    }
}
