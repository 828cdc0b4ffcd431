//! Language registry mapping language ids to packs.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::english::English;
use super::german::German;
use super::pack::LanguagePack;
use crate::error::{EngineError, Result};

static GLOBAL: LazyLock<Arc<LanguageRegistry>> =
    LazyLock::new(|| Arc::new(LanguageRegistry::with_builtin()));

/// Registry mapping language ids to packs.
///
/// The registry is open for insertion at any time; packs themselves are
/// immutable and handed out as shared `Arc`s. Ids are matched
/// case-insensitively.
pub struct LanguageRegistry {
    packs: RwLock<HashMap<String, Arc<dyn LanguagePack>>>,
}

impl LanguageRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            packs: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the built-in German and English packs.
    #[must_use]
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register(German);
        registry.register(English);
        registry
    }

    /// Process-wide registry, seeded with the built-in packs on first use.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Register a pack under its own id. An existing pack with the same id is replaced.
    pub fn register(&self, pack: impl LanguagePack + 'static) {
        self.register_shared(Arc::new(pack));
    }

    /// Register an already shared pack.
    pub fn register_shared(&self, pack: Arc<dyn LanguagePack>) {
        let id = pack.id().to_lowercase();
        let mut packs = self.packs.write().unwrap_or_else(PoisonError::into_inner);
        if packs.insert(id.clone(), pack).is_some() {
            tracing::warn!(language = %id, "Replaced registered language pack");
        }
    }

    /// Get the pack for a language id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn LanguagePack>> {
        self.packs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id.to_lowercase())
            .cloned()
    }

    /// Get the pack for a language id, failing for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownLanguage` if no pack is registered under `id`.
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn LanguagePack>> {
        self.get(id)
            .ok_or_else(|| EngineError::UnknownLanguage(id.to_string()))
    }

    /// Check if a pack is registered for a language id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All registered packs, sorted by id.
    pub fn all(&self) -> Vec<Arc<dyn LanguagePack>> {
        let mut packs: Vec<_> = self
            .packs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        packs.sort_by(|a, b| a.id().cmp(b.id()));
        packs
    }

    /// All registered language ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.all().iter().map(|pack| pack.id().to_string()).collect()
    }

    /// Number of registered packs.
    pub fn len(&self) -> usize {
        self.packs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if no pack is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
