//! String interning for declaration and class names
//!
//! The interner is shared between the resolution stage, which interns names
//! while building declarations, and every renderer or checker invocation that
//! reads them back. `ThreadedRodeo` is lock free for both operations, so one
//! interner can serve concurrent invocations without a mutex.

pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::fmt;
use std::sync::Arc;

/// Thread-safe, cheaply clonable string interner
#[derive(Clone, Default)]
pub struct Interner {
    inner: Arc<ThreadedRodeo>,
}

impl Interner {
    /// Creates an empty interner
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning the existing symbol when already present
    pub fn intern(&self, text: &str) -> Symbol {
        self.inner.get_or_intern(text)
    }

    /// Looks up a symbol without interning
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.inner.get(text)
    }

    /// Resolves a symbol to its text
    ///
    /// Symbols are only ever produced by this interner, so resolution cannot
    /// miss for well-formed input; foreign symbols resolve to an empty string.
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.inner.try_resolve(&sym).unwrap_or_default()
    }

    /// Resolves a symbol, returning `None` for symbols from another interner
    pub fn try_resolve(&self, sym: Symbol) -> Option<&str> {
        self.inner.try_resolve(&sym)
    }

    /// Number of distinct strings interned so far
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing has been interned yet
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}
