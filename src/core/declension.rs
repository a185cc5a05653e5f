// src/core/declension.rs
//! Table-driven declension solver.
//!
//! `decline` is pure: the same entry and features always give the same form
//! and the same trace. Every refusal is a typed `DeclensionError`.

use crate::core::error::DeclensionError;
use crate::core::paradigm::{adjective_paradigm, noun_paradigm, stem_rule, Paradigm};
use crate::core::text::{remove_macrons, replace_suffix};
use crate::core::types::{
    AdjectiveClass, AppliedRule, Case, DeclensionClass, EndingChosen, FormKey, Gender,
    GrammaticalNumber, LemmaEntry, NounClass, SolveFeatures, SolveResult, SolveTrace, StemSource,
};
use serde::Serialize;

struct ResolvedParadigm {
    class: DeclensionClass,
    paradigm: Option<&'static Paradigm>,
    gender: Option<Gender>,
}

struct DerivedStem {
    stem: String,
    source: StemSource,
    rules: Vec<AppliedRule>,
}

/// Inflects `entry` for the requested features.
pub fn decline(entry: &LemmaEntry, features: &SolveFeatures) -> Result<SolveResult, DeclensionError> {
    if entry.pos() != features.pos {
        return Err(DeclensionError::PartOfSpeechMismatch {
            lemma: entry.lemma().to_string(),
            entry: entry.pos(),
            requested: features.pos,
        });
    }

    let resolved = resolve_paradigm(entry, features)?;
    let Some(paradigm) = resolved.paradigm else {
        return Ok(indeclinable(entry, features, resolved));
    };

    let (case, number, gender) = (features.case, features.number, resolved.gender);
    let mut rules = paradigm_notes(paradigm, case, number);
    // Neuter acc/voc read the nominative slot and are composed as nominatives.
    let (slot_case, cell) = paradigm
        .resolve(number, case)
        .ok_or(DeclensionError::MissingEnding {
            class: resolved.class,
            number,
            case,
        })?;

    let derived = derive_stem(entry, resolved.class)?;
    rules.extend(derived.rules.iter().copied());

    let mut suffix = cell.suffix();
    let ius_vocative = matches!(entry, LemmaEntry::Noun(_))
        && resolved.class == DeclensionClass::Noun(NounClass::SecondUs)
        && case == Case::Voc
        && number == GrammaticalNumber::Singular
        && entry.flags().voc_ius_to_i;
    if ius_vocative {
        suffix = "ī";
        rules.push(AppliedRule::VocIusToI);
    }

    let composed = compose_form(
        entry,
        &Composition {
            stem: &derived.stem,
            suffix,
            case: slot_case,
            number,
            gender,
            class: resolved.class,
        },
    );

    let override_form = gender.and_then(|g| entry.overrides().get(&FormKey::new(case, number, g)));
    let override_hit = override_form.is_some();
    let form = override_form.cloned().unwrap_or(composed);
    let form = if features.strip_macrons {
        remove_macrons(&form)
    } else {
        form
    };

    tracing::trace!(lemma = entry.lemma(), class = %resolved.class, %case, %number, form = %form, "declined");

    Ok(SolveResult {
        form,
        trace: SolveTrace {
            lemma: entry.lemma().to_string(),
            class_used: resolved.class,
            stem_source: derived.source,
            stem: derived.stem,
            ending: EndingChosen {
                case,
                number,
                gender,
                end: cell.end.to_string(),
                alt_options: cell.alt_suffixes(),
            },
            rules_applied: rules,
            override_hit,
        },
    })
}

fn resolve_paradigm(
    entry: &LemmaEntry,
    features: &SolveFeatures,
) -> Result<ResolvedParadigm, DeclensionError> {
    let missing_class = || DeclensionError::MissingClass {
        lemma: entry.lemma().to_string(),
    };
    match entry {
        LemmaEntry::Noun(noun) => {
            let class = noun.class.ok_or_else(missing_class)?;
            Ok(ResolvedParadigm {
                class: DeclensionClass::Noun(class),
                paradigm: Some(noun_paradigm(class)),
                gender: entry.primary_gender(),
            })
        }
        LemmaEntry::Adjective(adjective) => {
            let class = adjective.class.ok_or_else(missing_class)?;
            // Adjective tables only know m/f/n; common or unspecified gender agrees as masculine.
            let gender = match features.gender.or_else(|| entry.primary_gender()) {
                Some(g @ (Gender::Feminine | Gender::Neuter)) => g,
                _ => Gender::Masculine,
            };
            let gender = Some(gender);
            Ok(ResolvedParadigm {
                class: DeclensionClass::Adjective(class),
                paradigm: adjective_paradigm(class).for_gender(gender),
                gender,
            })
        }
    }
}

fn indeclinable(entry: &LemmaEntry, features: &SolveFeatures, resolved: ResolvedParadigm) -> SolveResult {
    let form = if features.strip_macrons {
        remove_macrons(entry.lemma())
    } else {
        entry.lemma().to_string()
    };
    SolveResult {
        form,
        trace: SolveTrace {
            lemma: entry.lemma().to_string(),
            class_used: resolved.class,
            stem_source: StemSource::Stored,
            stem: entry.stem().unwrap_or(entry.lemma()).to_string(),
            ending: EndingChosen {
                case: features.case,
                number: features.number,
                gender: resolved.gender,
                end: String::new(),
                alt_options: Vec::new(),
            },
            rules_applied: vec![AppliedRule::Indeclinable],
            override_hit: false,
        },
    }
}

fn paradigm_notes(paradigm: &Paradigm, case: Case, number: GrammaticalNumber) -> Vec<AppliedRule> {
    let mut notes = Vec::new();
    if paradigm.lookup_case(case) != case {
        notes.push(AppliedRule::NeuterNomAccVocEqual);
    }
    if paradigm.rules.gen_plural_ium && case == Case::Gen && number == GrammaticalNumber::Plural {
        notes.push(AppliedRule::GenPluralIum);
    }
    if paradigm.rules.abl_sing_i && case == Case::Abl && number == GrammaticalNumber::Singular {
        notes.push(AppliedRule::AblSingI);
    }
    notes
}

fn derive_stem(entry: &LemmaEntry, class: DeclensionClass) -> Result<DerivedStem, DeclensionError> {
    if let Some(stem) = entry.stem() {
        return Ok(DerivedStem {
            stem: stem.to_string(),
            source: StemSource::Stored,
            rules: Vec::new(),
        });
    }

    let rule = stem_rule(class);
    let missing = |needed| DeclensionError::MissingStemSource {
        lemma: entry.lemma().to_string(),
        needed,
    };
    let base = match rule.base_from {
        StemSource::GenSg => entry.gen_sg().ok_or_else(|| missing(StemSource::GenSg))?,
        StemSource::NomSg => entry.lemma(),
        StemSource::Stored => return Err(missing(StemSource::Stored)),
    };

    let flags = entry.flags();
    let mut rules = Vec::new();
    let mut stem = base.to_string();
    if !rule.strip_suffix.is_empty() {
        if let Some(stripped) = base.strip_suffix(rule.strip_suffix) {
            stem = stripped.to_string();
        } else if let Some(stripped) = flags
            .alt_strip_suffixes
            .iter()
            .find_map(|alt| base.strip_suffix(alt.as_str()))
        {
            stem = stripped.to_string();
            rules.push(AppliedRule::AltStripSuffix);
        }
    }

    if (flags.drop_e_after_r || rule.drop_e_after_r) && stem.ends_with("er") {
        stem = replace_suffix(&stem, "er", "r");
        rules.push(AppliedRule::DropEAfterR);
    } else if (flags.keep_e_after_r || rule.keep_e_after_r) && stem.ends_with('r') && !stem.ends_with("er") {
        stem = replace_suffix(&stem, "r", "er");
        rules.push(AppliedRule::KeepEAfterR);
    }

    Ok(DerivedStem {
        stem,
        source: rule.base_from,
        rules,
    })
}

struct Composition<'a> {
    stem: &'a str,
    suffix: &'a str,
    case: Case,
    number: GrammaticalNumber,
    gender: Option<Gender>,
    class: DeclensionClass,
}

/// stem + ending, except where the headword itself is the answer.
fn compose_form(entry: &LemmaEntry, c: &Composition<'_>) -> String {
    let lemma = entry.lemma();
    let singular = c.number == GrammaticalNumber::Singular;
    let plain = || format!("{}{}", c.stem, c.suffix);

    match (entry, c.class) {
        (LemmaEntry::Noun(noun), DeclensionClass::Noun(class)) => {
            if singular && c.case == Case::Voc && class == NounClass::SecondUs && noun.flags.voc_ius_to_i {
                let rewritten = replace_suffix(lemma, "ius", "ī");
                return if rewritten != lemma { rewritten } else { plain() };
            }
            if singular && c.case == Case::Nom {
                return lemma.to_string();
            }
            // -us nouns build a real vocative (nerve); every other class repeats the headword.
            if singular && c.case == Case::Voc && !(class == NounClass::SecondUs && !c.suffix.is_empty()) {
                return lemma.to_string();
            }
            if singular && c.case == Case::Acc && c.suffix.is_empty() && noun.genders.contains(&Gender::Neuter) {
                return lemma.to_string();
            }
            plain()
        }
        (LemmaEntry::Adjective(_), DeclensionClass::Adjective(class)) if singular => {
            adjective_headword_form(lemma, class, c.case, c.gender).unwrap_or_else(plain)
        }
        _ => plain(),
    }
}

/// Singular adjective slots that come straight from the headword.
fn adjective_headword_form(
    lemma: &str,
    class: AdjectiveClass,
    case: Case,
    gender: Option<Gender>,
) -> Option<String> {
    let neuter_rewrite = || match class {
        AdjectiveClass::ThirdTwoTermination => Some(replace_suffix(lemma, "is", "e")),
        AdjectiveClass::ThirdOneTermination => Some(lemma.to_string()),
        AdjectiveClass::Comparative => Some(replace_suffix(lemma, "ior", "ius")),
        _ => None,
    };
    match (case, gender) {
        (Case::Nom, _) if class == AdjectiveClass::ThirdOneTermination => Some(lemma.to_string()),
        (Case::Nom, Some(Gender::Masculine)) => Some(lemma.to_string()),
        (Case::Nom, Some(Gender::Feminine)) if class == AdjectiveClass::ThirdTwoTermination => {
            Some(lemma.to_string())
        }
        (Case::Nom | Case::Acc | Case::Voc, Some(Gender::Neuter)) => neuter_rewrite(),
        _ => None,
    }
}

/// One filled paradigm slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub number: GrammaticalNumber,
    pub case: Case,
    pub form: String,
}

/// Every singular and plural form of one lemma for one gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormTable {
    pub lemma: String,
    pub gender: Option<Gender>,
    pub cells: Vec<TableCell>,
}

impl FormTable {
    pub fn get(&self, case: Case, number: GrammaticalNumber) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.case == case && cell.number == number)
            .map(|cell| cell.form.as_str())
    }

    /// Forms in table order (singular first, nom → voc).
    pub fn iter(&self) -> impl Iterator<Item = (GrammaticalNumber, Case, &str)> {
        self.cells.iter().map(|cell| (cell.number, cell.case, cell.form.as_str()))
    }

    /// Distinct surface forms, useful as an accepted-answer pool.
    pub fn distinct_forms(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for (_, _, form) in self.iter() {
            if !seen.contains(&form) {
                seen.push(form);
            }
        }
        seen
    }
}

/// Declines `entry` into every (number, case) slot. The first failing slot aborts.
pub fn paradigm_forms(
    entry: &LemmaEntry,
    gender: Option<Gender>,
    strip_macrons: bool,
) -> Result<FormTable, DeclensionError> {
    let mut cells = Vec::with_capacity(12);
    for number in GrammaticalNumber::ALL {
        for case in Case::ALL {
            let features = SolveFeatures {
                pos: entry.pos(),
                case,
                number,
                gender,
                strip_macrons,
            };
            let form = decline(entry, &features)?.form;
            cells.push(TableCell { number, case, form });
        }
    }
    Ok(FormTable {
        lemma: entry.lemma().to_string(),
        gender: gender.or_else(|| entry.primary_gender()),
        cells,
    })
}
