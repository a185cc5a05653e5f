// src/abbr/anatomical.rs
//! Left-to-right agreement pass over normalized label tokens.

use crate::abbr::normalize::{is_coord_conjunction, latinize_conjunction};
use crate::abbr::registry::{is_laterality, AbbreviationRegistry, NounToken};
use crate::core::context::{Agreement, AgreementContext, NounContext};
use crate::core::declension::decline;
use crate::core::text::{inherit_capitalization, strip_trailing_punct};
use crate::core::types::{Case, Gender, GrammaticalNumber, LemmaEntry, SolveFeatures};

/// Expands noun and adjective abbreviations in `text`. Unknown tokens and
/// tokens the solver rejects pass through unchanged.
pub fn expand_latin_abbrevs(text: &str) -> String {
    AnatomicalExpander::new(AbbreviationRegistry::global()).expand(text)
}

struct AnatomicalExpander<'r> {
    registry: &'r AbbreviationRegistry,
    out: Vec<String>,
    /// Parallel to `out`: true where the slot came from an abbreviation.
    abbreviated: Vec<bool>,
    context: AgreementContext,
}

impl<'r> AnatomicalExpander<'r> {
    fn new(registry: &'r AbbreviationRegistry) -> Self {
        Self {
            registry,
            out: Vec::new(),
            abbreviated: Vec::new(),
            context: AgreementContext::new(),
        }
    }

    fn expand(mut self, text: &str) -> String {
        for raw in text.split_whitespace() {
            let token = latinize_conjunction(&self.registry.ensure_dot(raw));
            if let Some(noun) = self.registry.classify_noun(&token) {
                self.emit_noun(&token, noun);
            } else if let Some(key) = self.registry.canonical_adjective(&token) {
                self.emit_adjective(&token, key);
            } else {
                self.emit(token, false);
            }
        }
        self.out.join(" ")
    }

    fn emit_noun(&mut self, token: &str, noun: NounToken) {
        let Some(entry) = self.registry.noun(noun.key) else {
            self.emit(token.to_string(), true);
            return;
        };
        let case = self.case_for_next_noun();
        let features = SolveFeatures::noun(case, noun.number).without_macrons();
        let emitted = self.solve(entry, &features, token);
        self.emit(emitted, true);
        self.context.push(NounContext {
            case,
            number: noun.number,
            gender: entry.primary_gender().unwrap_or(Gender::Masculine),
            index: self.out.len() - 1,
            key: noun.key,
        });
    }

    fn emit_adjective(&mut self, token: &str, key: &'static str) {
        let Some(entry) = self.registry.adjective(key) else {
            self.emit(token.to_string(), true);
            return;
        };
        let mut target = self.context.adjective_target();
        if is_laterality(key) {
            let out = &self.out;
            if let Some(pair) = self.context.coordinated_target(|i| is_coord_conjunction(&out[i])) {
                target = pair;
            }
        }
        let Agreement { case, number, gender } = target;
        let features = SolveFeatures::adjective(case, number, gender).without_macrons();
        let emitted = self.solve(entry, &features, token);
        self.emit(emitted, true);
    }

    fn emit(&mut self, token: String, abbreviation: bool) {
        self.out.push(token);
        self.abbreviated.push(abbreviation);
    }

    fn solve(&self, entry: &LemmaEntry, features: &SolveFeatures, token: &str) -> String {
        match decline(entry, features) {
            Ok(result) => inherit_capitalization(token, &result.form),
            Err(err) => {
                tracing::debug!(token, error = %err, "leaving abbreviation unexpanded");
                token.to_string()
            }
        }
    }

    /// Coordinated nouns share the previous noun's case; the first noun of a
    /// label is genitive when it follows a bare word, nominative otherwise;
    /// any other noun is genitive.
    fn case_for_next_noun(&self) -> Case {
        let after_conjunction = self.out.last().is_some_and(|t| is_coord_conjunction(t));
        match self.context.last() {
            Some(previous) if after_conjunction => previous.case,
            Some(_) => Case::Gen,
            None if self.follows_bare_word() => Case::Gen,
            None => Case::Nom,
        }
    }

    /// Scans emitted tokens backwards; a conjunction or an expanded
    /// abbreviation stops the scan, a purely alphabetic word ends it positively.
    fn follows_bare_word(&self) -> bool {
        for (token, &abbreviation) in self.out.iter().zip(&self.abbreviated).rev() {
            let stripped = strip_trailing_punct(token);
            if stripped.is_empty() {
                continue;
            }
            if abbreviation
                || is_coord_conjunction(stripped)
                || self.registry.is_singular_noun_key(stripped)
                || self.registry.is_adjective_token(stripped)
            {
                return false;
            }
            if stripped.chars().all(char::is_alphabetic) {
                return true;
            }
        }
        false
    }
}

/// Number the registry assigns to a noun token, if it is one.
pub fn noun_number(token: &str) -> Option<GrammaticalNumber> {
    AbbreviationRegistry::global()
        .classify_noun(token)
        .map(|noun| noun.number)
}

/// Registry key for a noun or adjective token, after plural and alias folding.
pub fn canonical_key(token: &str) -> Option<&'static str> {
    let registry = AbbreviationRegistry::global();
    registry
        .classify_noun(token)
        .map(|noun| noun.key)
        .or_else(|| registry.canonical_adjective(token))
}
