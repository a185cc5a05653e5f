// src/abbr/registry.rs
//! Abbreviation → lemma lookup for anatomical labels.
//!
//! Two disjoint tables (nouns, adjectives) plus an alias table for
//! adjectives. Plural noun forms are never stored: "aa." and "ligg." are
//! recognized by doubling the last letter of a singular key.

use crate::core::types::{
    AdjectiveClass, AdjectiveLemma, Gender, GrammaticalNumber, LemmaEntry, LemmaFlags, NounClass,
    NounLemma,
};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Adjectives whose coordinated-pair agreement switches to nominative plural.
pub const LATERALITY_ADJECTIVES: [&str; 2] = ["dx", "sin"];

const NOUNS: &[(&str, &str, &str, NounClass, Gender)] = &[
    ("m", "mūsculus", "mūsculī", NounClass::SecondUs, Gender::Masculine),
    ("n", "nervus", "nervī", NounClass::SecondUs, Gender::Masculine),
    ("a", "artēria", "artēriae", NounClass::First, Gender::Feminine),
    ("v", "vēna", "vēnae", NounClass::First, Gender::Feminine),
    ("r", "rāmus", "rāmī", NounClass::SecondUs, Gender::Masculine),
    ("lig", "ligāmentum", "ligāmentī", NounClass::SecondNeuter, Gender::Neuter),
    ("proc", "processus", "processūs", NounClass::FourthMasculine, Gender::Masculine),
    ("art", "articulātiō", "articulātiōnis", NounClass::ThirdConsonant, Gender::Feminine),
    ("t", "tendō", "tendinis", NounClass::ThirdConsonant, Gender::Masculine),
    ("gl", "glandula", "glandulae", NounClass::First, Gender::Feminine),
    ("ggl", "ganglion", "gangliī", NounClass::SecondNeuter, Gender::Neuter),
    ("for", "forāmen", "forāminis", NounClass::ThirdNeuter, Gender::Neuter),
    ("ncl", "nucleus", "nucleī", NounClass::SecondUs, Gender::Masculine),
    ("pl", "plexus", "plexūs", NounClass::FourthMasculine, Gender::Masculine),
    ("rec", "recessus", "recessūs", NounClass::FourthMasculine, Gender::Masculine),
    ("var", "variētās", "variētātis", NounClass::ThirdConsonant, Gender::Feminine),
];

const THIRD_TWO: &[(&str, &str)] = &[
    ("lat", "laterālis"),
    ("med", "mediālis"),
    ("vent", "ventrālis"),
    ("dors", "dorsālis"),
    ("superf", "superficiālis"),
    ("comm", "commūnis"),
];

const FIRST_SECOND: &[(&str, &str, &str)] = &[
    ("prof", "profundus", "profundī"),
    ("ext", "externus", "externī"),
    ("int", "internus", "internī"),
];

const ER_ADJECTIVES: &[(&str, &str, &str)] = &[("dx", "dexter", "dextrī"), ("sin", "sinister", "sinistrī")];

const COMPARATIVES: &[(&str, &str)] = &[
    ("ant", "anterior"),
    ("post", "posterior"),
    ("sup", "superior"),
    ("inf", "inferior"),
];

const ALIASES: &[(&str, &str)] = &[
    ("dex", "dx"),
    ("dextr", "dx"),
    ("superfic", "superf"),
    ("superfici", "superf"),
    ("commun", "comm"),
];

/// A token recognized as a noun abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounToken {
    pub key: &'static str,
    pub number: GrammaticalNumber,
}

#[derive(Debug)]
pub struct AbbreviationRegistry {
    nouns: BTreeMap<&'static str, LemmaEntry>,
    adjectives: BTreeMap<&'static str, LemmaEntry>,
    aliases: BTreeMap<&'static str, &'static str>,
}

static REGISTRY: LazyLock<AbbreviationRegistry> = LazyLock::new(AbbreviationRegistry::build);

/// Lowercased token without its trailing dots.
pub fn abbr_base(token: &str) -> String {
    token.trim_end_matches('.').to_lowercase()
}

impl AbbreviationRegistry {
    /// The process-wide registry, built on first use.
    pub fn global() -> &'static AbbreviationRegistry {
        &REGISTRY
    }

    fn build() -> Self {
        let nouns = NOUNS
            .iter()
            .map(|&(key, lemma, gen_sg, class, gender)| (key, NounLemma::new(lemma, gen_sg, class, gender).into()))
            .collect();

        let mut adjectives: BTreeMap<&'static str, LemmaEntry> = BTreeMap::new();
        for &(key, lemma) in THIRD_TWO {
            adjectives.insert(key, AdjectiveLemma::new(lemma, lemma, AdjectiveClass::ThirdTwoTermination).into());
        }
        for &(key, lemma, gen_sg) in FIRST_SECOND {
            adjectives.insert(key, AdjectiveLemma::new(lemma, gen_sg, AdjectiveClass::FirstSecond).into());
        }
        for &(key, lemma, gen_sg) in ER_ADJECTIVES {
            let flags = LemmaFlags {
                drop_e_after_r: true,
                ..LemmaFlags::default()
            };
            adjectives.insert(
                key,
                AdjectiveLemma::new(lemma, gen_sg, AdjectiveClass::FirstSecond)
                    .with_flags(flags)
                    .into(),
            );
        }
        for &(key, lemma) in COMPARATIVES {
            adjectives.insert(key, AdjectiveLemma::with_stored_stem(lemma, lemma, AdjectiveClass::Comparative).into());
        }

        Self {
            nouns,
            adjectives,
            aliases: ALIASES.iter().copied().collect(),
        }
    }

    pub fn noun(&self, key: &str) -> Option<&LemmaEntry> {
        self.nouns.get(key)
    }

    pub fn adjective(&self, key: &str) -> Option<&LemmaEntry> {
        self.adjectives.get(key)
    }

    pub fn noun_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.nouns.keys().copied()
    }

    pub fn adjective_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.adjectives.keys().copied()
    }

    pub fn alias_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.aliases.keys().copied()
    }

    fn noun_key(&self, base: &str) -> Option<&'static str> {
        self.nouns.get_key_value(base).map(|(key, _)| *key)
    }

    /// Singular key if `token` names a registered noun, or a doubled-letter
    /// plural of one. A singular key wins over a doubled reading.
    pub fn classify_noun(&self, token: &str) -> Option<NounToken> {
        let base = abbr_base(token);
        if let Some(key) = self.noun_key(&base) {
            return Some(NounToken {
                key,
                number: GrammaticalNumber::Singular,
            });
        }
        let mut chars = base.chars().rev();
        let (last, previous) = (chars.next()?, chars.next()?);
        if last != previous {
            return None;
        }
        let candidate = &base[..base.len() - last.len_utf8()];
        self.noun_key(candidate).map(|key| NounToken {
            key,
            number: GrammaticalNumber::Plural,
        })
    }

    pub fn is_noun_token(&self, token: &str) -> bool {
        self.classify_noun(token).is_some()
    }

    /// True only for a bare singular key ("a", "lig"), not for doubled plurals.
    pub fn is_singular_noun_key(&self, token: &str) -> bool {
        self.nouns.contains_key(abbr_base(token).as_str())
    }

    /// Canonical adjective key after alias resolution.
    pub fn canonical_adjective(&self, token: &str) -> Option<&'static str> {
        let base = abbr_base(token);
        let key = self.aliases.get(base.as_str()).copied().unwrap_or(base.as_str());
        self.adjectives.get_key_value(key).map(|(key, _)| *key)
    }

    pub fn is_adjective_token(&self, token: &str) -> bool {
        self.canonical_adjective(token).is_some()
    }

    pub fn is_abbreviation(&self, token: &str) -> bool {
        self.is_noun_token(token) || self.is_adjective_token(token)
    }

    /// Recognized abbreviations end in exactly one dot; anything else is returned as is.
    pub fn ensure_dot(&self, token: &str) -> String {
        if self.is_abbreviation(token) {
            format!("{}.", token.trim_end_matches('.'))
        } else {
            token.to_string()
        }
    }
}

pub fn is_laterality(key: &str) -> bool {
    LATERALITY_ADJECTIVES.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_disjoint() {
        let registry = AbbreviationRegistry::global();
        for key in registry.noun_keys() {
            assert!(registry.adjective(key).is_none(), "{key} is in both tables");
        }
        for alias in registry.alias_keys() {
            assert!(registry.noun(alias).is_none());
            assert!(registry.canonical_adjective(alias).is_some());
        }
    }

    #[test]
    fn doubled_keys_are_plural() {
        let registry = AbbreviationRegistry::global();
        assert_eq!(
            registry.classify_noun("aa."),
            Some(NounToken {
                key: "a",
                number: GrammaticalNumber::Plural
            })
        );
        assert_eq!(registry.classify_noun("LIGG").unwrap().key, "lig");
        assert_eq!(registry.classify_noun("a.").unwrap().number, GrammaticalNumber::Singular);
        assert!(registry.classify_noun("ab.").is_none());
        assert!(registry.classify_noun("x").is_none());
        assert!(registry.classify_noun("").is_none());
    }

    #[test]
    fn singular_key_wins_over_doubling() {
        let registry = AbbreviationRegistry::global();
        // "ggl" ends in a single l, "gll" would be doubled "gl".
        assert_eq!(registry.classify_noun("ggl.").unwrap().number, GrammaticalNumber::Singular);
        assert_eq!(registry.classify_noun("gll.").unwrap().key, "gl");
    }

    #[test]
    fn aliases_resolve_to_canonical_adjectives() {
        let registry = AbbreviationRegistry::global();
        assert_eq!(registry.canonical_adjective("Dex."), Some("dx"));
        assert_eq!(registry.canonical_adjective("dextr"), Some("dx"));
        assert_eq!(registry.canonical_adjective("commun."), Some("comm"));
        assert_eq!(registry.canonical_adjective("lat"), Some("lat"));
        assert!(registry.canonical_adjective("latus").is_none());
        assert!(is_laterality("sin"));
        assert!(!is_laterality("lat"));
    }

    #[test]
    fn ensure_dot_leaves_exactly_one() {
        let registry = AbbreviationRegistry::global();
        assert_eq!(registry.ensure_dot("a"), "a.");
        assert_eq!(registry.ensure_dot("lat.."), "lat.");
        assert_eq!(registry.ensure_dot("Dex"), "Dex.");
        assert_eq!(registry.ensure_dot("vena"), "vena");
    }
}
