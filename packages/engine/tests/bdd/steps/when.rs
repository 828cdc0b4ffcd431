//! When step definitions
//!
//! Steps that run the hyphenation.

use cucumber::{gherkin::Step, when};

use crate::world::HyphenationWorld;

#[when(expr = "the text {string} is hyphenated")]
fn hyphenate_text(world: &mut HyphenationWorld, text: String) {
    world.hyphenate(&text);
}

#[when("the following text is hyphenated:")]
fn hyphenate_docstring(world: &mut HyphenationWorld, step: &Step) {
    let text = step.docstring.as_deref().expect("step needs a doc string");
    world.hyphenate(text.trim());
}
