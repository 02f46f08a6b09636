/// The attribute a prefix match was recognized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Src,
    Href,
}

impl Attribute {
    /// Map the first character of a recognized prefix back to its attribute.
    pub fn from_first_char(c: char) -> Self {
        if c == 's' {
            Attribute::Src
        } else {
            Attribute::Href
        }
    }
}

/// Token classification.
///
/// Every match kind has a guard counterpart. A match kind marks a root-relative
/// value (`"/`), a guard kind marks a scheme-relative one (`"//`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,

    // Matches
    SrcDq,
    SrcSq,
    HrefDq,
    HrefSq,

    // Guards
    GuardSrcDq,
    GuardSrcSq,
    GuardHrefDq,
    GuardHrefSq,
}

impl TokenKind {
    pub fn is_text(self) -> bool {
        self == TokenKind::Text
    }

    pub fn is_guard(self) -> bool {
        matches!(
            self,
            TokenKind::GuardSrcDq
                | TokenKind::GuardSrcSq
                | TokenKind::GuardHrefDq
                | TokenKind::GuardHrefSq
        )
    }

    /// The attribute this kind belongs to, or `None` for text.
    pub fn attribute(self) -> Option<Attribute> {
        match self {
            TokenKind::Text => None,
            TokenKind::SrcDq | TokenKind::SrcSq | TokenKind::GuardSrcDq | TokenKind::GuardSrcSq => {
                Some(Attribute::Src)
            }
            TokenKind::HrefDq
            | TokenKind::HrefSq
            | TokenKind::GuardHrefDq
            | TokenKind::GuardHrefSq => Some(Attribute::Href),
        }
    }

    /// Short name used when dumping token streams.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Text => "text",
            TokenKind::SrcDq => "src-dq",
            TokenKind::SrcSq => "src-sq",
            TokenKind::HrefDq => "href-dq",
            TokenKind::HrefSq => "href-sq",
            TokenKind::GuardSrcDq => "guard-src-dq",
            TokenKind::GuardSrcSq => "guard-src-sq",
            TokenKind::GuardHrefDq => "guard-href-dq",
            TokenKind::GuardHrefSq => "guard-href-sq",
        }
    }
}

/// A classified span of the scanned content.
///
/// `value` borrows the original bytes; `offset` is the byte position of its
/// first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub offset: usize,
    pub value: &'a [u8],
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, offset: usize, value: &'a [u8]) -> Self {
        Self {
            kind,
            offset,
            value,
        }
    }

    /// Byte offset one past the end of this token.
    pub fn end(&self) -> usize {
        self.offset + self.value.len()
    }
}
