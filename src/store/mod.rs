use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::server::ServerUdn;

/// The cached color pair for one server. Its presence in a store is the
/// resolved guard: a record can never exist with only one color written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTheme {
    pub expanded: Rgb,
    pub collapsed: Rgb,
}

/// Cache of resolved themes keyed by server identity.
///
/// `claim` is the single-flight primitive: it must atomically insert the
/// provisional record only when the slot is vacant, so concurrent first
/// resolutions of one server cannot both proceed. Implementations must be
/// safe to call from palette worker threads.
pub trait ThemeStore: Send + Sync {
    fn get(&self, udn: &ServerUdn) -> Option<ResolvedTheme>;

    /// Insert-if-absent. Returns true when this call claimed the slot.
    fn claim(&self, udn: &ServerUdn, provisional: ResolvedTheme) -> bool;

    /// Overwrite a claimed record with its palette-refined colors.
    fn refine(&self, udn: &ServerUdn, theme: ResolvedTheme);
}

#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    entries: Mutex<HashMap<ServerUdn, ResolvedTheme>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of all resolved entries, for hosts listing known servers.
    pub fn snapshot(&self) -> Vec<(ServerUdn, ResolvedTheme)> {
        self.lock()
            .iter()
            .map(|(udn, theme)| (udn.clone(), *theme))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ServerUdn, ResolvedTheme>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self, udn: &ServerUdn) -> Option<ResolvedTheme> {
        self.lock().get(udn).copied()
    }

    fn claim(&self, udn: &ServerUdn, provisional: ResolvedTheme) -> bool {
        match self.lock().entry(udn.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(provisional);
                true
            }
        }
    }

    fn refine(&self, udn: &ServerUdn, theme: ResolvedTheme) {
        let mut entries = self.lock();
        if entries.insert(udn.clone(), theme).is_none() {
            tracing::warn!(%udn, "refined a theme that was never claimed");
        }
    }
}
