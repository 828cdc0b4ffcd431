//! World struct for Cucumber BDD tests
//!
//! Contains the test state that persists across steps in a scenario.

use cucumber::World;
use softhyphen_engine::{
    hyphenate, CustomRule, EngineError, ExclusionRule, HyphenationOptions, HyphenationResult,
    LanguageRegistry, OutputEncoding, RuleSnapshot,
};

/// Test world that holds state across steps in a Cucumber scenario.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct HyphenationWorld {
    /// Registry with the built-in language packs
    pub registry: LanguageRegistry,
    /// Requested language id
    pub language: String,
    pub encoding: OutputEncoding,
    pub html_mode: bool,
    /// Rules collected by `Given` steps
    pub custom_rules: Vec<CustomRule>,
    pub exclusions: Vec<ExclusionRule>,
    /// Last hyphenation result (if successful)
    pub result: Option<HyphenationResult>,
    /// Last error (if the request failed)
    pub error: Option<EngineError>,
}

impl Default for HyphenationWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl HyphenationWorld {
    pub fn new() -> Self {
        Self {
            registry: LanguageRegistry::with_builtin(),
            language: "de".to_string(),
            encoding: OutputEncoding::default(),
            html_mode: false,
            custom_rules: Vec::new(),
            exclusions: Vec::new(),
            result: None,
            error: None,
        }
    }

    /// Hyphenate text with the current settings and store the result or error
    pub fn hyphenate(&mut self, text: &str) {
        let rules = RuleSnapshot::new(self.custom_rules.clone(), self.exclusions.clone());

        match HyphenationOptions::for_language(&self.registry, &self.language) {
            Ok(options) => {
                let options = options
                    .with_encoding(self.encoding)
                    .with_html_mode(self.html_mode);
                self.result = Some(hyphenate(text, &options, &rules));
                self.error = None;
            }
            Err(e) => {
                self.result = None;
                self.error = Some(e);
            }
        }
    }

    /// The last result, failing the step if the request errored
    pub fn result(&self) -> &HyphenationResult {
        match (&self.result, &self.error) {
            (Some(result), _) => result,
            (None, Some(e)) => panic!("Expected a result, got error: {e}"),
            (None, None) => panic!("No text was hyphenated"),
        }
    }
}
