//! Incremental recognizer for a tiny fixed set of literal prefixes.
//!
//! The matcher is fed one decoded character at a time and keeps at most one
//! candidate alive. Candidates are chosen by their first character, so the
//! prefixes must start with pairwise distinct characters (true for `src=` and
//! `href=`). Matching only starts after a space, which stands in for the
//! boundary between two tag attributes.

/// The attribute-value markers the lexer looks for.
pub const ATTRIBUTE_PREFIXES: &[&str] = &["src=", "href="];

/// Result of feeding one character to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Not inside a candidate; nothing is checked until the next space.
    None,
    /// Just saw a space; the next character may start a prefix.
    Whitespace,
    /// On the way towards a full match.
    Partial,
    /// A whole prefix has been consumed.
    Full,
}

#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefixes: Vec<Vec<char>>,
    /// Index into `prefixes` of the candidate in play.
    current: Option<usize>,
    /// Index of the last matched character of the candidate.
    cursor: usize,
    /// First character of the most recent match.
    first: char,
    state: MatchState,
}

impl PrefixMatcher {
    pub fn new(prefixes: &[&str]) -> Self {
        debug_assert!(prefixes.iter().all(|p| !p.is_empty()));
        debug_assert!(
            prefixes.iter().enumerate().all(|(i, a)| prefixes[i + 1..]
                .iter()
                .all(|b| a.chars().next() != b.chars().next())),
            "prefixes must start with distinct characters"
        );

        Self {
            prefixes: prefixes.iter().map(|p| p.chars().collect()).collect(),
            current: None,
            cursor: 0,
            first: '\0',
            state: MatchState::None,
        }
    }

    /// Matcher for `src=` and `href=`.
    pub fn attributes() -> Self {
        Self::new(ATTRIBUTE_PREFIXES)
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// First character of the prefix that last matched fully or partially.
    pub fn first(&self) -> char {
        self.first
    }

    /// Feed the next character and return the new state.
    ///
    /// A space always resets to `Whitespace`. In the `None` state other
    /// characters are ignored, so a prefix glued to a preceding word
    /// (`xsrc=`, `data-src=`) is never recognized.
    pub fn feed(&mut self, c: char) -> MatchState {
        if c == ' ' {
            self.current = None;
            self.state = MatchState::Whitespace;
        } else if self.state != MatchState::None {
            self.state = self.step(c);
        }
        self.state
    }

    fn step(&mut self, c: char) -> MatchState {
        match self.current {
            None => {
                let Some(index) = self.prefixes.iter().position(|p| p[0] == c) else {
                    return MatchState::None;
                };
                self.first = c;
                self.cursor = 0;
                if self.prefixes[index].len() == 1 {
                    MatchState::Full
                } else {
                    self.current = Some(index);
                    MatchState::Partial
                }
            }
            Some(index) => {
                let prefix = &self.prefixes[index];
                self.cursor += 1;
                if prefix[self.cursor] != c {
                    self.current = None;
                    return MatchState::None;
                }
                if self.cursor + 1 == prefix.len() {
                    self.current = None;
                    MatchState::Full
                } else {
                    MatchState::Partial
                }
            }
        }
    }
}
