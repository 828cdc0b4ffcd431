//! Language packs and the registry that owns them.
//!
//! A language pack bundles everything the orchestrator needs to know about
//! one language: its pattern table, the minimum word length worth breaking,
//! and optional hooks for fixed hyphenations, post-processing and skipping.
//! New languages are added by registering another [`LanguagePack`]; the
//! orchestrator itself never changes.

mod english;
mod german;
mod pack;
mod registry;
mod special_cases;

pub use english::English;
pub use german::German;
pub use pack::LanguagePack;
pub use registry::LanguageRegistry;
pub use special_cases::brand_hyphenation;
