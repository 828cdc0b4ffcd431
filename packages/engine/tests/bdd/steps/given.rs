//! Given step definitions
//!
//! Steps that set up the language, encoding and rules for a scenario.

use cucumber::given;
use softhyphen_engine::{CustomRule, ExclusionRule};

use crate::world::HyphenationWorld;

#[given(expr = "the language is {string}")]
fn set_language(world: &mut HyphenationWorld, language: String) {
    world.language = language;
}

#[given(expr = "the output encoding is {string}")]
fn set_encoding(world: &mut HyphenationWorld, encoding: String) {
    world.encoding = encoding.parse().expect("html or unicode");
}

#[given("HTML mode is enabled")]
fn enable_html_mode(world: &mut HyphenationWorld) {
    world.html_mode = true;
}

#[given(expr = "the custom rule {string} is {string}")]
fn add_custom_rule(world: &mut HyphenationWorld, word: String, hyphenated: String) {
    world.custom_rules.push(CustomRule::new(word, hyphenated));
}

#[given(expr = "the word {string} is excluded")]
fn add_exclusion(world: &mut HyphenationWorld, word: String) {
    world.exclusions.push(ExclusionRule::new(word));
}
