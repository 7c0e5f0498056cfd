//! The process-wide JIT symbol namespace.
//!
//! Definitions are append-only: a name, once defined, stays defined for the
//! life of the namespace and can never be redefined.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use crate::error::BackendError;

/// An append-only set of defined symbol names plus a serial generator for
/// making new names unique.
#[derive(Debug, Default)]
pub struct Namespace {
    symbols: RwLock<FxHashSet<String>>,
    serial: AtomicU64,
}

static GLOBAL: OnceLock<Arc<Namespace>> = OnceLock::new();

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The namespace shared by every JIT backend in the process.
    ///
    /// Created on first use.
    pub fn global() -> Arc<Namespace> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Namespace::new())))
    }

    /// A serial never handed out before by this namespace.
    pub fn next_serial(&self) -> u64 {
        self.serial.fetch_add(1, Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_defined(&self, symbol: &str) -> bool {
        self.symbols.read().contains(symbol)
    }

    /// Number of defined symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.read().is_empty()
    }

    /// Define every name in `symbols`, or none of them.
    ///
    /// # Errors
    ///
    /// [`BackendError::DuplicateSymbol`] naming the first symbol that is
    /// already defined (or repeated within `symbols`).
    pub fn define_all(&self, symbols: &[String]) -> Result<(), BackendError> {
        let mut defined = self.symbols.write();
        let mut pending = FxHashSet::default();
        for symbol in symbols {
            if defined.contains(symbol) || !pending.insert(symbol.as_str()) {
                return Err(BackendError::DuplicateSymbol {
                    symbol: symbol.clone(),
                });
            }
        }
        defined.extend(symbols.iter().cloned());
        tracing::debug!(count = symbols.len(), total = defined.len(), "defined symbols");
        Ok(())
    }
}
