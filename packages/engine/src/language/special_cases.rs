//! Fixed break points for product and brand names.
//!
//! These compounds are written in CamelCase in product copy and must break
//! at the seam between their two parts, which no pattern table would find.

/// Lowercase brand name -> hyphenated form with its canonical casing.
const BRANDS: &[(&str, &str)] = &[
    ("logicline", "Logic\u{AD}Line"),
    ("frontrack", "Front\u{AD}Rack"),
    ("combirack", "Combi\u{AD}Rack"),
    ("powerrack", "Power\u{AD}Rack"),
    ("heckrack", "Heck\u{AD}Rack"),
    ("ecocover", "Eco\u{AD}Cover"),
    ("basiccover", "Basic\u{AD}Cover"),
    ("combicover", "Combi\u{AD}Cover"),
    ("basicbox", "Basic\u{AD}Box"),
    ("combibox", "Combi\u{AD}Box"),
    ("toolbox", "Tool\u{AD}Box"),
    ("roadbox", "Road\u{AD}Box"),
    ("longbox", "Long\u{AD}Box"),
];

/// Look up the fixed hyphenation of a brand name (case-insensitive).
pub fn brand_hyphenation(word: &str) -> Option<&'static str> {
    let key = word.to_lowercase();
    BRANDS
        .iter()
        .find(|(brand, _)| *brand == key)
        .map(|(_, hyphenated)| *hyphenated)
}
