//! Then step definitions
//!
//! Steps that verify the output and statistics.

use cucumber::then;

use crate::helpers::show_breaks;
use crate::world::HyphenationWorld;

#[then(expr = "the output is {string}")]
fn assert_output(world: &mut HyphenationWorld, expected: String) {
    assert_eq!(world.result().output, expected);
}

#[then(expr = "the output contains {string}")]
fn assert_output_contains(world: &mut HyphenationWorld, expected: String) {
    let output = &world.result().output;
    assert!(output.contains(&expected), "Expected {expected:?} in {output:?}");
}

#[then("the output contains a soft hyphen")]
fn assert_contains_soft_hyphen(world: &mut HyphenationWorld) {
    let output = &world.result().output;
    assert!(output.contains('\u{AD}'), "No soft hyphen in {output:?}");
}

#[then(expr = "the breaks read {string}")]
fn assert_breaks(world: &mut HyphenationWorld, expected: String) {
    assert_eq!(show_breaks(&world.result().output), expected);
}

#[then(expr = "the output without breaks is {string}")]
fn assert_output_without_breaks(world: &mut HyphenationWorld, expected: String) {
    let shown = show_breaks(&world.result().output);
    assert_eq!(shown.replace('|', ""), expected);
}

#[then(expr = "the breaks do not contain {string}")]
fn assert_breaks_exclude(world: &mut HyphenationWorld, unexpected: String) {
    let shown = show_breaks(&world.result().output);
    assert!(!shown.contains(&unexpected), "Unexpected {unexpected:?} in {shown:?}");
}

#[then(regex = r"^(\d+) words? (?:was|were) processed$")]
fn assert_words_processed(world: &mut HyphenationWorld, count: usize) {
    assert_eq!(world.result().words_processed, count);
}

#[then(regex = r"^(\d+) hyphens? (?:was|were) inserted$")]
fn assert_hyphens_inserted(world: &mut HyphenationWorld, count: usize) {
    assert_eq!(world.result().hyphens_inserted, count);
}

#[then(regex = r"^at least (\d+) hyphens? (?:was|were) inserted$")]
fn assert_min_hyphens_inserted(world: &mut HyphenationWorld, count: usize) {
    let inserted = world.result().hyphens_inserted;
    assert!(inserted >= count, "Expected at least {count} hyphens, got {inserted}");
}

#[then(expr = "the request fails with {string}")]
fn assert_error(world: &mut HyphenationWorld, expected: String) {
    let error = world.error.as_ref().expect("Expected the request to fail");
    assert_eq!(error.to_string(), expected);
}
