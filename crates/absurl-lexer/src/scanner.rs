use crate::prefix::{MatchState, PrefixMatcher};
use crate::rule::Rule;
use crate::token::{Attribute, Token, TokenKind};

/// Byte-level scanner that splits content into text and match/guard tokens.
///
/// The scan is a single forward pass:
/// - characters are decoded one at a time (invalid UTF-8 steps one byte)
/// - each is fed to the prefix matcher looking for `src=` / `href=`
/// - on a full prefix the bytes that follow are checked against the rules
///
/// Offsets are byte positions, so every token value is a direct slice of the
/// content and the tokens always cover the content exactly once.
pub struct Lexer<'a, 'r> {
    content: &'a [u8],
    /// Input position.
    pos: usize,
    /// Start of the pending token.
    start: usize,
    rules: &'r [Rule],
    matcher: PrefixMatcher,
    tokens: Vec<Token<'a>>,
}

impl<'a, 'r> Lexer<'a, 'r> {
    /// Create a lexer over `content` using `rules` for candidate confirmation.
    pub fn new(content: &'a [u8], rules: &'r [Rule]) -> Self {
        Self::with_tokens(content, rules, Vec::new())
    }

    /// Create a lexer that pushes into existing token storage.
    ///
    /// The vector is cleared first; only its allocation is reused.
    pub fn with_tokens(
        content: &'a [u8],
        rules: &'r [Rule],
        mut tokens: Vec<Token<'a>>,
    ) -> Self {
        tokens.clear();
        Self {
            content,
            pos: 0,
            start: 0,
            rules,
            matcher: PrefixMatcher::attributes(),
            tokens,
        }
    }

    /// Tokenize the entire content.
    pub fn tokenize(content: &'a [u8], rules: &'r [Rule]) -> Vec<Token<'a>> {
        Lexer::new(content, rules).run()
    }

    /// Scan to the end of the content and hand back the tokens.
    pub fn run(mut self) -> Vec<Token<'a>> {
        self.scan();
        self.tokens
    }

    fn scan(&mut self) {
        while self.pos < self.content.len() {
            let (c, width) = decode_char(&self.content[self.pos..]);
            self.pos += width;

            if self.matcher.feed(c) == MatchState::Full {
                self.check_candidate();
            }
        }

        self.flush_text();
    }

    /// Look at the bytes after a full prefix and emit a guard or match token
    /// for the first rule of the matched attribute whose pattern fits.
    fn check_candidate(&mut self) {
        let attribute = Attribute::from_first_char(self.matcher.first());
        let rules = self.rules;

        for rule in rules {
            if rule.attribute() != Some(attribute) {
                continue;
            }

            let rest = &self.content[self.pos..];
            if rest.starts_with(&rule.guard_bytes) {
                self.flush_text();
                self.pos += rule.guard_bytes.len();
                self.emit(rule.guard_kind);
                return;
            }
            if rest.starts_with(&rule.match_bytes) {
                self.flush_text();
                self.pos += rule.match_bytes.len();
                self.emit(rule.match_kind);
                return;
            }
        }
        // False positive: the prefix stays part of the pending text.
    }

    // --- Helpers ---

    fn emit(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(
            kind,
            self.start,
            &self.content[self.start..self.pos],
        ));
        self.start = self.pos;
    }

    fn flush_text(&mut self) {
        if self.pos > self.start {
            self.emit(TokenKind::Text);
        }
    }
}

/// Decode the character at the front of `bytes`, returning it with its width.
///
/// Anything that is not a complete, valid UTF-8 sequence decodes as
/// U+FFFD with width 1, so scanning always makes progress.
pub fn decode_char(bytes: &[u8]) -> (char, usize) {
    let Some(&lead) = bytes.first() else {
        return (char::REPLACEMENT_CHARACTER, 1);
    };
    if lead.is_ascii() {
        return (lead as char, 1);
    }

    let width = match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return (char::REPLACEMENT_CHARACTER, 1),
    };

    bytes
        .get(..width)
        .and_then(|seq| std::str::from_utf8(seq).ok())
        .and_then(|s| s.chars().next())
        .map_or((char::REPLACEMENT_CHARACTER, 1), |c| (c, width))
}

/// Empty a token vector and rebind it to a new content lifetime, keeping the
/// allocation so pooled storage can serve the next document.
pub fn recycle<'b>(tokens: Vec<Token<'_>>) -> Vec<Token<'b>> {
    // `filter_map` yields nothing; the in-place collect reuses the buffer.
    tokens.into_iter().filter_map(|_| None).collect()
}
