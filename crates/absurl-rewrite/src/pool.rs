//! Reusable storage for token vectors and output buffers.
//!
//! Storage is handed out behind RAII handles and goes back to the pool when
//! the handle drops, on every exit path. Pools are `Mutex`-guarded so a
//! single [`Replacer`](crate::Replacer) can be shared between threads; each
//! handle is owned by exactly one call at a time.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use absurl_lexer::{recycle, Lexer, Rule, Token};

/// Idle entries kept per pool.
pub const MAX_IDLE: usize = 16;
/// Output buffers that grew past this many bytes are not kept.
pub const MAX_RETAINED_BYTES: usize = 1 << 20;
/// Token vectors that grew past this many tokens are not kept.
pub const MAX_RETAINED_TOKENS: usize = 1 << 16;

/// Bounded free list shared by both pool kinds.
#[derive(Debug)]
struct FreeList<T> {
    idle: Mutex<Vec<T>>,
}

impl<T> FreeList<T> {
    fn new() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
        }
    }

    fn take(&self) -> Option<T> {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    fn put(&self, item: T) {
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < MAX_IDLE {
            idle.push(item);
        }
    }

    fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// =========================================================================
// Output buffers
// =========================================================================

#[derive(Debug)]
pub struct BufferPool {
    free: FreeList<Vec<u8>>,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferPool {
    pub fn new() -> Self {
        Self {
            free: FreeList::new(),
        }
    }

    /// Acquire an empty buffer.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self.free.take().unwrap_or_default();
        PooledBuffer { pool: self, buf }
    }

    /// Number of buffers waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.idle()
    }
}

/// Handle to a pooled byte buffer; derefs to `Vec<u8>`.
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        let mut buf = std::mem::take(&mut self.buf);
        if buf.capacity() <= MAX_RETAINED_BYTES {
            buf.clear();
            self.pool.free.put(buf);
        }
    }
}

// =========================================================================
// Token storage
// =========================================================================

#[derive(Debug)]
pub struct TokenPool {
    free: FreeList<Vec<Token<'static>>>,
}

impl Default for TokenPool {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenPool {
    pub fn new() -> Self {
        Self {
            free: FreeList::new(),
        }
    }

    /// Acquire empty token storage for content living at least `'a`.
    pub fn acquire<'a>(&self) -> PooledTokens<'_, 'a> {
        let tokens = self.free.take().map(recycle).unwrap_or_default();
        PooledTokens { pool: self, tokens }
    }

    /// Number of token vectors waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.idle()
    }
}

/// Handle to pooled token storage. The tokens borrow the content they were
/// lexed from, and are emptied before the storage returns to the pool.
pub struct PooledTokens<'p, 'a> {
    pool: &'p TokenPool,
    tokens: Vec<Token<'a>>,
}

impl<'a> PooledTokens<'_, 'a> {
    /// Lex `content` into this storage, replacing whatever it held.
    pub fn lex(&mut self, content: &'a [u8], rules: &[Rule]) -> &[Token<'a>] {
        let storage = std::mem::take(&mut self.tokens);
        self.tokens = Lexer::with_tokens(content, rules, storage).run();
        &self.tokens
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }
}

impl Drop for PooledTokens<'_, '_> {
    fn drop(&mut self) {
        let tokens = std::mem::take(&mut self.tokens);
        if tokens.capacity() <= MAX_RETAINED_TOKENS {
            self.pool.free.put(recycle(tokens));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    #[test]
    fn test_buffer_returned_on_drop() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.acquire();
            buf.extend_from_slice(b"hello");
            assert_eq!(pool.idle(), 0);
        }
        assert_eq!(pool.idle(), 1);

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 5);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_oversized_buffer_dropped() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.acquire();
            buf.reserve(MAX_RETAINED_BYTES + 1);
        }
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_idle_is_bounded() {
        let pool = BufferPool::new();
        let handles: Vec<_> = (0..MAX_IDLE + 4).map(|_| pool.acquire()).collect();
        drop(handles);
        assert_eq!(pool.idle(), MAX_IDLE);
    }

    #[test]
    fn test_tokens_reused_across_contents() {
        let rules = RuleSet::new("http://example.com");
        let pool = TokenPool::new();

        {
            let first = b"<img src=\"/a\">".to_vec();
            let mut tokens = pool.acquire();
            assert_eq!(tokens.lex(&first, rules.html()).len(), 3);
        }
        assert_eq!(pool.idle(), 1);

        let second = b"plain".to_vec();
        let mut tokens = pool.acquire();
        assert!(tokens.tokens().is_empty());
        let lexed = tokens.lex(&second, rules.html());
        assert_eq!(lexed.len(), 1);
        assert_eq!(lexed[0].value, b"plain");
    }
}
