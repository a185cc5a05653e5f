// src/core/context.rs
use crate::core::types::{Case, Gender, GrammaticalNumber};
use serde::Serialize;

/// Grammatical features an adjective has to agree with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Agreement {
    pub case: Case,
    pub number: GrammaticalNumber,
    pub gender: Gender,
}

impl Agreement {
    /// Nominative singular masculine, used when nothing has been resolved yet.
    pub const DEFAULT: Agreement = Agreement {
        case: Case::Nom,
        number: GrammaticalNumber::Singular,
        gender: Gender::Masculine,
    };

    /// Adjective tables only know m/f/n; common gender agrees as masculine.
    pub fn concrete(self) -> Self {
        match self.gender {
            Gender::Common => Self {
                gender: Gender::Masculine,
                ..self
            },
            _ => self,
        }
    }
}

/// One resolved noun abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NounContext {
    pub case: Case,
    pub number: GrammaticalNumber,
    pub gender: Gender,
    /// Position of the emitted noun in the output token list.
    pub index: usize,
    /// Registry key the token resolved to.
    pub key: &'static str,
}

impl NounContext {
    pub fn agreement(&self) -> Agreement {
        Agreement {
            case: self.case,
            number: self.number,
            gender: self.gender,
        }
    }

    fn is_nominative_singular(&self) -> bool {
        self.case == Case::Nom && self.number == GrammaticalNumber::Singular
    }
}

/// Noun contexts accumulated left to right during one expansion.
/// Lives for a single call; nothing carries over.
#[derive(Debug, Default)]
pub struct AgreementContext {
    nouns: Vec<NounContext>,
    head: Option<NounContext>,
}

impl AgreementContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, noun: NounContext) {
        if self.head.is_none() {
            self.head = Some(noun);
        }
        self.nouns.push(noun);
    }

    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty()
    }

    pub fn last(&self) -> Option<&NounContext> {
        self.nouns.last()
    }

    pub fn head(&self) -> Option<&NounContext> {
        self.head.as_ref()
    }

    /// Target for an ordinary adjective: the latest noun, else nom.sg.m.
    pub fn adjective_target(&self) -> Agreement {
        self.last()
            .map(NounContext::agreement)
            .unwrap_or(Agreement::DEFAULT)
            .concrete()
    }

    /// When the two latest nouns are nominative singular and joined by a
    /// conjunction somewhere between their output positions, a following
    /// laterality adjective agrees with the pair as a nominative plural.
    pub fn coordinated_target(&self, is_conjunction: impl Fn(usize) -> bool) -> Option<Agreement> {
        let [.., left, right] = self.nouns.as_slice() else {
            return None;
        };
        let (start, end) = (left.index.min(right.index) + 1, left.index.max(right.index));
        if !(start..end).any(is_conjunction) {
            return None;
        }
        if !left.is_nominative_singular() || !right.is_nominative_singular() {
            return None;
        }
        let gender = if left.gender == right.gender {
            left.gender
        } else {
            Gender::Masculine
        };
        Some(
            Agreement {
                case: Case::Nom,
                number: GrammaticalNumber::Plural,
                gender,
            }
            .concrete(),
        )
    }
}
