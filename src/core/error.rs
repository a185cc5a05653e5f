// src/core/error.rs
use crate::core::types::{Case, DeclensionClass, GrammaticalNumber, PartOfSpeech, StemSource};
use thiserror::Error;

/// Why the solver refused to produce a form. Each variant points at a
/// malformed lexicon entry; the solver never guesses past one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclensionError {
    #[error("part of speech mismatch for {lemma}: entry is {entry}, requested {requested}")]
    PartOfSpeechMismatch {
        lemma: String,
        entry: PartOfSpeech,
        requested: PartOfSpeech,
    },

    #[error("lemma {lemma} has no declension class")]
    MissingClass { lemma: String },

    #[error("lemma {lemma} has no {needed} to derive a stem from")]
    MissingStemSource { lemma: String, needed: StemSource },

    #[error("no {pos} paradigm for class '{class}'")]
    UnknownParadigm { pos: PartOfSpeech, class: String },

    #[error("no ending for {number}.{case} in class {class}")]
    MissingEnding {
        class: DeclensionClass,
        number: GrammaticalNumber,
        case: Case,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseFeatureError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseFeatureError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid lexicon JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lexicon row {index} ({lemma}): {source}")]
    Row {
        index: usize,
        lemma: String,
        #[source]
        source: DeclensionError,
    },
}
