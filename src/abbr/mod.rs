// src/abbr/mod.rs
//! Anatomical label abbreviations: registry, normalizer and agreement pass.
pub mod anatomical;
pub mod normalize;
pub mod registry;

pub use anatomical::expand_latin_abbrevs;
pub use normalize::normalize_latin_label;
pub use registry::AbbreviationRegistry;
