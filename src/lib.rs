// src/lib.rs

pub mod abbr;
pub mod c_api;
pub mod core;
pub mod lexicon;
pub mod rx;

pub use crate::abbr::{expand_latin_abbrevs, normalize_latin_label, AbbreviationRegistry};
pub use crate::core::declension::{decline, paradigm_forms, FormTable};
pub use crate::core::engine::{expand_latin_all, ExpansionStages, LatinExpander};
pub use crate::core::error::{DeclensionError, LexiconError};
pub use crate::core::types::{
    AdjectiveClass, AdjectiveLemma, Case, Gender, GrammaticalNumber, LemmaEntry, NounClass, NounLemma,
    PartOfSpeech, SolveFeatures, SolveResult, SolveTrace,
};
pub use crate::lexicon::parse_lexicon;
pub use crate::rx::expand_rx_abbrevs;
