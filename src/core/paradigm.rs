// src/core/paradigm.rs
//! Declension tables and stem-derivation rules.
//!
//! Everything in this module is static data. Rows are indexed by case in the
//! order nom, gen, dat, acc, abl, voc. A `None` slot is only legal in a
//! paradigm whose rules redirect that case to the nominative.

use crate::core::types::{
    AdjectiveClass, Case, DeclensionClass, Gender, GrammaticalNumber, NounClass, StemSource,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndingCell {
    pub end: &'static str,
    pub alt: &'static [&'static str],
}

impl EndingCell {
    /// The ending without the table's leading hyphen.
    pub fn suffix(&self) -> &'static str {
        strip_hyphen(self.end)
    }

    pub fn alt_suffixes(&self) -> Vec<String> {
        self.alt.iter().map(|a| strip_hyphen(a).to_string()).collect()
    }
}

fn strip_hyphen(end: &str) -> &str {
    end.strip_prefix('-').unwrap_or(end)
}

const fn e(end: &'static str) -> Option<EndingCell> {
    Some(EndingCell { end, alt: &[] })
}

const fn ea(end: &'static str, alt: &'static [&'static str]) -> Option<EndingCell> {
    Some(EndingCell { end, alt })
}

/// Filled by the nominative through the neuter syncretism rule.
const AS_NOM: Option<EndingCell> = None;

type CaseRow = [Option<EndingCell>; 6];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParadigmRules {
    pub neuter_nom_acc_voc_equal: bool,
    pub gen_plural_ium: bool,
    pub abl_sing_i: bool,
}

const PLAIN: ParadigmRules = ParadigmRules {
    neuter_nom_acc_voc_equal: false,
    gen_plural_ium: false,
    abl_sing_i: false,
};

#[derive(Debug, Serialize)]
pub struct Paradigm {
    pub label: &'static str,
    endings: [CaseRow; 2],
    pub rules: ParadigmRules,
}

impl Paradigm {
    pub const fn new(label: &'static str, sg: CaseRow, pl: CaseRow, rules: ParadigmRules) -> Self {
        Self {
            label,
            endings: [sg, pl],
            rules,
        }
    }

    /// The slot a lookup for `case` actually reads.
    pub fn lookup_case(&self, case: Case) -> Case {
        if self.rules.neuter_nom_acc_voc_equal && matches!(case, Case::Acc | Case::Voc) {
            Case::Nom
        } else {
            case
        }
    }

    /// Raw table slot, no redirects.
    pub fn cell(&self, number: GrammaticalNumber, case: Case) -> Option<&EndingCell> {
        self.endings[number.index()][case.index()].as_ref()
    }

    /// Ending for (number, case) after syncretism, with the slot it came from.
    pub fn resolve(&self, number: GrammaticalNumber, case: Case) -> Option<(Case, &EndingCell)> {
        let target = self.lookup_case(case);
        self.cell(number, target).map(|cell| (target, cell))
    }
}

pub static FIRST: Paradigm = Paradigm::new(
    "1st decl. (mostly feminine)",
    [e("-a"), e("-ae"), e("-ae"), e("-am"), e("-ā"), e("-a")],
    [e("-ae"), e("-ārum"), e("-īs"), e("-ās"), e("-īs"), e("-ae")],
    PLAIN,
);

pub static SECOND_US: Paradigm = Paradigm::new(
    "2nd decl. masculine (-us)",
    [e("-us"), e("-ī"), e("-ō"), e("-um"), e("-ō"), e("-e")],
    [e("-ī"), e("-ōrum"), e("-īs"), e("-ōs"), e("-īs"), e("-ī")],
    PLAIN,
);

pub static SECOND_ER: Paradigm = Paradigm::new(
    "2nd decl. masculine (-er)",
    [e("-er"), e("-ī"), e("-ō"), e("-um"), e("-ō"), e("-er")],
    [e("-ī"), e("-ōrum"), e("-īs"), e("-ōs"), e("-īs"), e("-ī")],
    PLAIN,
);

pub static SECOND_NEUTER: Paradigm = Paradigm::new(
    "2nd decl. neuter",
    [e("-um"), e("-ī"), e("-ō"), AS_NOM, e("-ō"), AS_NOM],
    [e("-a"), e("-ōrum"), e("-īs"), AS_NOM, e("-īs"), AS_NOM],
    ParadigmRules {
        neuter_nom_acc_voc_equal: true,
        ..PLAIN
    },
);

pub static THIRD_CONSONANT: Paradigm = Paradigm::new(
    "3rd decl. consonant-stem (m./f.)",
    [e(""), e("-is"), e("-ī"), e("-em"), e("-e"), e("")],
    [e("-ēs"), e("-um"), e("-ibus"), e("-ēs"), e("-ibus"), e("-ēs")],
    PLAIN,
);

pub static THIRD_I_STEM: Paradigm = Paradigm::new(
    "3rd decl. i-stem (m./f.)",
    [e(""), e("-is"), e("-ī"), e("-em"), e("-ī"), e("")],
    [e("-ēs"), e("-ium"), e("-ibus"), e("-ēs"), e("-ibus"), e("-ēs")],
    ParadigmRules {
        gen_plural_ium: true,
        abl_sing_i: true,
        ..PLAIN
    },
);

pub static THIRD_NEUTER: Paradigm = Paradigm::new(
    "3rd decl. consonant-stem (neuter)",
    [e(""), e("-is"), e("-ī"), AS_NOM, e("-e"), AS_NOM],
    [e("-a"), e("-um"), e("-ibus"), AS_NOM, e("-ibus"), AS_NOM],
    ParadigmRules {
        neuter_nom_acc_voc_equal: true,
        ..PLAIN
    },
);

pub static THIRD_NEUTER_I_STEM: Paradigm = Paradigm::new(
    "3rd decl. i-stem (neuter)",
    [e(""), e("-is"), e("-ī"), AS_NOM, e("-ī"), AS_NOM],
    [e("-ia"), e("-ium"), e("-ibus"), AS_NOM, e("-ibus"), AS_NOM],
    ParadigmRules {
        neuter_nom_acc_voc_equal: true,
        gen_plural_ium: true,
        abl_sing_i: true,
    },
);

pub static FOURTH_MASCULINE: Paradigm = Paradigm::new(
    "4th decl. masculine",
    [e("-us"), e("-ūs"), ea("-uī", &["-ū"]), e("-um"), e("-ū"), e("-us")],
    [e("-ūs"), e("-uum"), e("-ibus"), e("-ūs"), e("-ibus"), e("-ūs")],
    PLAIN,
);

pub static FOURTH_NEUTER: Paradigm = Paradigm::new(
    "4th decl. neuter",
    [e("-ū"), e("-ūs"), e("-ū"), AS_NOM, e("-ū"), AS_NOM],
    [e("-ua"), e("-uum"), e("-ibus"), AS_NOM, e("-ibus"), AS_NOM],
    ParadigmRules {
        neuter_nom_acc_voc_equal: true,
        ..PLAIN
    },
);

pub static FIFTH: Paradigm = Paradigm::new(
    "5th decl. (mostly feminine)",
    [e("-ēs"), ea("-eī", &["-ēī"]), ea("-eī", &["-ēī"]), e("-em"), e("-ē"), e("-ēs")],
    [e("-ēs"), e("-ērum"), e("-ēbus"), e("-ēs"), e("-ēbus"), e("-ēs")],
    PLAIN,
);

pub fn noun_paradigm(class: NounClass) -> &'static Paradigm {
    match class {
        NounClass::First => &FIRST,
        NounClass::SecondUs => &SECOND_US,
        NounClass::SecondEr => &SECOND_ER,
        NounClass::SecondNeuter => &SECOND_NEUTER,
        NounClass::ThirdConsonant => &THIRD_CONSONANT,
        NounClass::ThirdIStem => &THIRD_I_STEM,
        NounClass::ThirdNeuter => &THIRD_NEUTER,
        NounClass::ThirdNeuterIStem => &THIRD_NEUTER_I_STEM,
        NounClass::FourthMasculine => &FOURTH_MASCULINE,
        NounClass::FourthNeuter => &FOURTH_NEUTER,
        NounClass::Fifth => &FIFTH,
    }
}

#[derive(Debug, Serialize)]
pub struct GenderedParadigms {
    pub masculine: &'static Paradigm,
    pub feminine: &'static Paradigm,
    pub neuter: &'static Paradigm,
}

/// Adjective endings borrow the noun tables per gender; `None` means the
/// class is indeclinable.
#[derive(Debug, Serialize)]
pub struct AdjectiveParadigm {
    pub label: &'static str,
    pub by_gender: Option<GenderedParadigms>,
}

impl AdjectiveParadigm {
    /// Common gender and a missing gender both fall back to the masculine table.
    pub fn for_gender(&self, gender: Option<Gender>) -> Option<&'static Paradigm> {
        let tables = self.by_gender.as_ref()?;
        Some(match gender {
            Some(Gender::Feminine) => tables.feminine,
            Some(Gender::Neuter) => tables.neuter,
            _ => tables.masculine,
        })
    }
}

pub static ADJ_FIRST_SECOND: AdjectiveParadigm = AdjectiveParadigm {
    label: "Adjectives of 1st/2nd decl. (bonus, bona, bonum)",
    by_gender: Some(GenderedParadigms {
        masculine: &SECOND_US,
        feminine: &FIRST,
        neuter: &SECOND_NEUTER,
    }),
};

pub static ADJ_THIRD_TWO: AdjectiveParadigm = AdjectiveParadigm {
    label: "3rd decl. adjectives, two terminations (fortis, forte)",
    by_gender: Some(GenderedParadigms {
        masculine: &THIRD_I_STEM,
        feminine: &THIRD_I_STEM,
        neuter: &THIRD_NEUTER_I_STEM,
    }),
};

pub static ADJ_THIRD_ONE: AdjectiveParadigm = AdjectiveParadigm {
    label: "3rd decl. adjectives, one termination (ingēns, ingentis)",
    by_gender: Some(GenderedParadigms {
        masculine: &THIRD_I_STEM,
        feminine: &THIRD_I_STEM,
        neuter: &THIRD_NEUTER_I_STEM,
    }),
};

pub static ADJ_COMPARATIVE: AdjectiveParadigm = AdjectiveParadigm {
    label: "Comparatives (clārior, clārius)",
    by_gender: Some(GenderedParadigms {
        masculine: &THIRD_CONSONANT,
        feminine: &THIRD_CONSONANT,
        neuter: &THIRD_NEUTER,
    }),
};

pub static ADJ_SUPERLATIVE: AdjectiveParadigm = AdjectiveParadigm {
    label: "Superlatives (clārissimus, -a, -um)",
    by_gender: Some(GenderedParadigms {
        masculine: &SECOND_US,
        feminine: &FIRST,
        neuter: &SECOND_NEUTER,
    }),
};

pub static ADJ_INDECLINABLE: AdjectiveParadigm = AdjectiveParadigm {
    label: "Indeclinable adjective",
    by_gender: None,
};

pub fn adjective_paradigm(class: AdjectiveClass) -> &'static AdjectiveParadigm {
    match class {
        AdjectiveClass::FirstSecond => &ADJ_FIRST_SECOND,
        AdjectiveClass::ThirdTwoTermination => &ADJ_THIRD_TWO,
        AdjectiveClass::ThirdOneTermination => &ADJ_THIRD_ONE,
        AdjectiveClass::Comparative => &ADJ_COMPARATIVE,
        AdjectiveClass::Superlative => &ADJ_SUPERLATIVE,
        AdjectiveClass::Indeclinable => &ADJ_INDECLINABLE,
    }
}

/// How to get from a dictionary entry to the stem endings attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StemRule {
    pub base_from: StemSource,
    pub strip_suffix: &'static str,
    pub drop_e_after_r: bool,
    pub keep_e_after_r: bool,
}

const fn from_gen_sg(strip_suffix: &'static str) -> StemRule {
    StemRule {
        base_from: StemSource::GenSg,
        strip_suffix,
        drop_e_after_r: false,
        keep_e_after_r: false,
    }
}

const STORED: StemRule = StemRule {
    base_from: StemSource::Stored,
    strip_suffix: "",
    drop_e_after_r: false,
    keep_e_after_r: false,
};

pub fn stem_rule(class: DeclensionClass) -> StemRule {
    match class {
        DeclensionClass::Noun(class) => match class {
            NounClass::First => from_gen_sg("ae"),
            NounClass::SecondUs | NounClass::SecondEr | NounClass::SecondNeuter => from_gen_sg("ī"),
            NounClass::ThirdConsonant
            | NounClass::ThirdIStem
            | NounClass::ThirdNeuter
            | NounClass::ThirdNeuterIStem => from_gen_sg("is"),
            NounClass::FourthMasculine | NounClass::FourthNeuter => from_gen_sg("ūs"),
            NounClass::Fifth => from_gen_sg("eī"),
        },
        DeclensionClass::Adjective(class) => match class {
            AdjectiveClass::FirstSecond => from_gen_sg("ī"),
            AdjectiveClass::ThirdTwoTermination | AdjectiveClass::ThirdOneTermination => {
                from_gen_sg("is")
            }
            AdjectiveClass::Comparative
            | AdjectiveClass::Superlative
            | AdjectiveClass::Indeclinable => STORED,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_paradigms() -> Vec<&'static Paradigm> {
        let mut out: Vec<&'static Paradigm> = NounClass::ALL.iter().map(|c| noun_paradigm(*c)).collect();
        for class in AdjectiveClass::ALL {
            if let Some(tables) = &adjective_paradigm(class).by_gender {
                out.extend([tables.masculine, tables.feminine, tables.neuter]);
            }
        }
        out
    }

    #[test]
    fn every_slot_is_reachable() {
        for paradigm in all_paradigms() {
            for number in GrammaticalNumber::ALL {
                for case in Case::ALL {
                    assert!(
                        paradigm.resolve(number, case).is_some(),
                        "{}: {number}.{case} unreachable",
                        paradigm.label
                    );
                }
            }
        }
    }

    #[test]
    fn neuter_acc_and_voc_read_the_nominative_slot() {
        for class in [
            NounClass::SecondNeuter,
            NounClass::ThirdNeuter,
            NounClass::ThirdNeuterIStem,
            NounClass::FourthNeuter,
        ] {
            let paradigm = noun_paradigm(class);
            for number in GrammaticalNumber::ALL {
                let (slot, nom) = paradigm.resolve(number, Case::Nom).unwrap();
                assert_eq!(slot, Case::Nom);
                for case in [Case::Acc, Case::Voc] {
                    let (slot, cell) = paradigm.resolve(number, case).unwrap();
                    assert_eq!(slot, Case::Nom);
                    assert_eq!(cell, nom);
                }
            }
        }
        assert_eq!(SECOND_US.lookup_case(Case::Acc), Case::Acc);
    }

    #[test]
    fn a_hole_without_a_redirect_does_not_resolve() {
        let broken = Paradigm::new(
            "broken",
            [e("-a"), e("-ae"), e("-ae"), AS_NOM, e("-ā"), e("-a")],
            [e("-ae"), e("-ārum"), e("-īs"), e("-ās"), e("-īs"), e("-ae")],
            PLAIN,
        );
        assert!(broken.resolve(GrammaticalNumber::Singular, Case::Acc).is_none());
        assert!(broken.resolve(GrammaticalNumber::Plural, Case::Acc).is_some());
    }

    #[test]
    fn alternates_drop_the_hyphen() {
        let (_, cell) = FIFTH.resolve(GrammaticalNumber::Singular, Case::Gen).unwrap();
        assert_eq!(cell.suffix(), "eī");
        assert_eq!(cell.alt_suffixes(), vec!["ēī".to_string()]);
    }

    #[test]
    fn adjective_gender_fallback_is_masculine() {
        let p = adjective_paradigm(AdjectiveClass::FirstSecond);
        assert!(std::ptr::eq(p.for_gender(None).unwrap(), &SECOND_US));
        assert!(std::ptr::eq(p.for_gender(Some(Gender::Common)).unwrap(), &SECOND_US));
        assert!(std::ptr::eq(p.for_gender(Some(Gender::Feminine)).unwrap(), &FIRST));
        assert!(adjective_paradigm(AdjectiveClass::Indeclinable).for_gender(None).is_none());
    }
}
