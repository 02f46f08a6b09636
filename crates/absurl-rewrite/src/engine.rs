//! Two-pass replacement over a token stream.
//!
//! Pass 1 marks every rule whose guard token occurs anywhere in the
//! document. Pass 2 writes the output, replacing match tokens of unguarded
//! rules and copying everything else. Guarding is document-wide: one
//! `href="//cdn..."` keeps every `href="/..."` in the same document as is.

use absurl_lexer::{Rule, Token};

/// Counts gathered while writing a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Match tokens replaced with an absolute URL.
    pub rewritten: usize,
    /// Match tokens left alone because their rule was guarded.
    pub suppressed: usize,
    /// Guard tokens seen.
    pub guards: usize,
}

/// Pass 1: which rules have at least one guard token in `tokens`.
pub fn discover_guards(tokens: &[Token<'_>], rules: &[Rule]) -> Vec<bool> {
    let mut guarded = vec![false; rules.len()];
    for token in tokens.iter().filter(|t| !t.kind.is_text()) {
        if let Some(i) = rules.iter().position(|r| r.guard_kind == token.kind) {
            guarded[i] = true;
        }
    }
    guarded
}

/// Pass 2: append the rewritten document to `out`.
pub fn substitute(
    tokens: &[Token<'_>],
    rules: &[Rule],
    guarded: &[bool],
    out: &mut Vec<u8>,
) -> RewriteStats {
    let mut stats = RewriteStats::default();

    for token in tokens {
        if token.kind.is_text() {
            out.extend_from_slice(token.value);
            continue;
        }

        if token.kind.is_guard() {
            stats.guards += 1;
            out.extend_from_slice(token.value);
            continue;
        }

        match rules.iter().position(|r| r.match_kind == token.kind) {
            Some(i) if !guarded[i] => {
                stats.rewritten += 1;
                out.extend_from_slice(&rules[i].replacement);
            }
            Some(_) => {
                stats.suppressed += 1;
                out.extend_from_slice(token.value);
            }
            // Not produced by these rules; keep the bytes.
            None => out.extend_from_slice(token.value),
        }
    }

    stats
}

/// Run both passes, appending the result to `out`.
pub fn apply(tokens: &[Token<'_>], rules: &[Rule], out: &mut Vec<u8>) -> RewriteStats {
    let guarded = discover_guards(tokens, rules);
    substitute(tokens, rules, &guarded, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use absurl_lexer::{Lexer, TokenKind};
    use pretty_assertions::assert_eq;

    /// Helper: lex with the HTML rules and run both passes.
    fn run(content: &str) -> (String, RewriteStats) {
        let rules = RuleSet::new("http://example.com");
        let tokens = Lexer::tokenize(content.as_bytes(), rules.html());
        let mut out = Vec::new();
        let stats = apply(&tokens, rules.html(), &mut out);
        (String::from_utf8(out).unwrap(), stats)
    }

    // =========================================================================
    // Pass 1
    // =========================================================================

    #[test]
    fn test_no_guards() {
        let rules = RuleSet::new("http://example.com");
        let tokens = Lexer::tokenize(b"<img src=\"/a\">", rules.html());
        assert_eq!(discover_guards(&tokens, rules.html()), vec![false; 4]);
    }

    #[test]
    fn test_guard_marks_only_its_rule() {
        let rules = RuleSet::new("http://example.com");
        let tokens = Lexer::tokenize(b"<a href='//x.com'> <img src=\"//y.com\">", rules.html());
        assert_eq!(
            discover_guards(&tokens, rules.html()),
            vec![true, false, false, true]
        );
    }

    #[test]
    fn test_guard_after_match_still_counts() {
        let rules = RuleSet::new("http://example.com");
        let tokens = Lexer::tokenize(b"<a href=\"/b\"> <a href=\"//x\">", rules.html());
        assert_eq!(
            discover_guards(&tokens, rules.html()),
            vec![false, false, true, false]
        );
    }

    // =========================================================================
    // Pass 2
    // =========================================================================

    #[test]
    fn test_rewrite_and_stats() {
        let (out, stats) = run("<img src=\"/a.png\"> <a href='/b'>");
        assert_eq!(
            out,
            "<img src=\"http://example.com/a.png\"> <a href='http://example.com/b'>"
        );
        assert_eq!(
            stats,
            RewriteStats {
                rewritten: 2,
                suppressed: 0,
                guards: 0
            }
        );
    }

    #[test]
    fn test_guard_suppresses_whole_document() {
        let (out, stats) = run("<a href=\"/a\"> <a href=\"//x.com/\"> <a href=\"/b\">");
        assert_eq!(out, "<a href=\"/a\"> <a href=\"//x.com/\"> <a href=\"/b\">");
        assert_eq!(stats.suppressed, 2);
        assert_eq!(stats.guards, 1);
    }

    #[test]
    fn test_guard_is_per_quote_style() {
        let (out, _) = run("<a href=\"//x.com/\"> <a href='/b'> <a href=\"/c\">");
        assert_eq!(
            out,
            "<a href=\"//x.com/\"> <a href='http://example.com/b'> <a href=\"/c\">"
        );
    }

    #[test]
    fn test_guard_is_per_attribute() {
        let (out, _) = run("<script src=\"//cdn.com/x.js\"> <a href=\"/b\">");
        assert_eq!(
            out,
            "<script src=\"//cdn.com/x.js\"> <a href=\"http://example.com/b\">"
        );
    }

    #[test]
    fn test_unknown_kind_copied() {
        let rules = RuleSet::new("http://example.com");
        let tokens = vec![
            Token::new(TokenKind::Text, 0, b"a"),
            Token::new(TokenKind::SrcDq, 1, b"\"/"),
        ];
        let mut out = Vec::new();
        apply(&tokens, &rules.html()[2..], &mut out);
        assert_eq!(out, b"a\"/");
    }

    #[test]
    fn test_appends_to_existing_output() {
        let rules = RuleSet::new("http://example.com");
        let tokens = Lexer::tokenize(b" src='/x'", rules.html());
        let mut out = b"head:".to_vec();
        apply(&tokens, rules.html(), &mut out);
        assert_eq!(out, b"head: src='http://example.com/x'");
    }
}
