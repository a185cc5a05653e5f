// src/core/types.rs
use crate::core::error::ParseFeatureError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Adjective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Masculine,
    #[serde(rename = "f")]
    Feminine,
    #[serde(rename = "n")]
    Neuter,
    /// Common gender (m./f. sharing one set of forms).
    #[serde(rename = "c")]
    Common,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrammaticalNumber {
    #[serde(rename = "sg")]
    Singular,
    #[serde(rename = "pl")]
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nom,
    Gen,
    Dat,
    Acc,
    Abl,
    Voc,
}

impl PartOfSpeech {
    pub fn code(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Adjective => "adjective",
        }
    }
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Self::Masculine => "m",
            Self::Feminine => "f",
            Self::Neuter => "n",
            Self::Common => "c",
        }
    }
}

impl GrammaticalNumber {
    pub const ALL: [GrammaticalNumber; 2] = [Self::Singular, Self::Plural];

    pub fn code(self) -> &'static str {
        match self {
            Self::Singular => "sg",
            Self::Plural => "pl",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl Case {
    pub const ALL: [Case; 6] = [Self::Nom, Self::Gen, Self::Dat, Self::Acc, Self::Abl, Self::Voc];

    pub fn code(self) -> &'static str {
        match self {
            Self::Nom => "nom",
            Self::Gen => "gen",
            Self::Dat => "dat",
            Self::Acc => "acc",
            Self::Abl => "abl",
            Self::Voc => "voc",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

macro_rules! code_display_and_parse {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.code())
            }
        }

        impl FromStr for $ty {
            type Err = ParseFeatureError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.code() == wanted)
                    .ok_or_else(|| ParseFeatureError::new($kind, s))
            }
        }
    };
}

code_display_and_parse!(PartOfSpeech, "part of speech", [PartOfSpeech::Noun, PartOfSpeech::Adjective]);
code_display_and_parse!(
    Gender,
    "gender",
    [Gender::Masculine, Gender::Feminine, Gender::Neuter, Gender::Common]
);
code_display_and_parse!(
    GrammaticalNumber,
    "number",
    [GrammaticalNumber::Singular, GrammaticalNumber::Plural]
);
code_display_and_parse!(
    Case,
    "case",
    [Case::Nom, Case::Gen, Case::Dat, Case::Acc, Case::Abl, Case::Voc]
);

/// Noun declension classes. Codes follow the dictionary convention
/// (declension number plus a gender/stem-type suffix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NounClass {
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2m_us")]
    SecondUs,
    #[serde(rename = "2m_er")]
    SecondEr,
    #[serde(rename = "2n")]
    SecondNeuter,
    #[serde(rename = "3mf")]
    ThirdConsonant,
    #[serde(rename = "3mf_i")]
    ThirdIStem,
    #[serde(rename = "3n")]
    ThirdNeuter,
    #[serde(rename = "3n_i")]
    ThirdNeuterIStem,
    #[serde(rename = "4m")]
    FourthMasculine,
    #[serde(rename = "4n")]
    FourthNeuter,
    #[serde(rename = "5")]
    Fifth,
}

impl NounClass {
    pub const ALL: [NounClass; 11] = [
        Self::First,
        Self::SecondUs,
        Self::SecondEr,
        Self::SecondNeuter,
        Self::ThirdConsonant,
        Self::ThirdIStem,
        Self::ThirdNeuter,
        Self::ThirdNeuterIStem,
        Self::FourthMasculine,
        Self::FourthNeuter,
        Self::Fifth,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::First => "1",
            Self::SecondUs => "2m_us",
            Self::SecondEr => "2m_er",
            Self::SecondNeuter => "2n",
            Self::ThirdConsonant => "3mf",
            Self::ThirdIStem => "3mf_i",
            Self::ThirdNeuter => "3n",
            Self::ThirdNeuterIStem => "3n_i",
            Self::FourthMasculine => "4m",
            Self::FourthNeuter => "4n",
            Self::Fifth => "5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdjectiveClass {
    /// bonus, bona, bonum
    #[serde(rename = "1-2")]
    FirstSecond,
    /// fortis, forte
    #[serde(rename = "3-two")]
    ThirdTwoTermination,
    /// ingēns, ingentis
    #[serde(rename = "3-one")]
    ThirdOneTermination,
    #[serde(rename = "comparative")]
    Comparative,
    #[serde(rename = "superlative")]
    Superlative,
    #[serde(rename = "indeclinable")]
    Indeclinable,
}

impl AdjectiveClass {
    pub const ALL: [AdjectiveClass; 6] = [
        Self::FirstSecond,
        Self::ThirdTwoTermination,
        Self::ThirdOneTermination,
        Self::Comparative,
        Self::Superlative,
        Self::Indeclinable,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::FirstSecond => "1-2",
            Self::ThirdTwoTermination => "3-two",
            Self::ThirdOneTermination => "3-one",
            Self::Comparative => "comparative",
            Self::Superlative => "superlative",
            Self::Indeclinable => "indeclinable",
        }
    }
}

code_display_and_parse!(
    NounClass,
    "noun class",
    [
        NounClass::First,
        NounClass::SecondUs,
        NounClass::SecondEr,
        NounClass::SecondNeuter,
        NounClass::ThirdConsonant,
        NounClass::ThirdIStem,
        NounClass::ThirdNeuter,
        NounClass::ThirdNeuterIStem,
        NounClass::FourthMasculine,
        NounClass::FourthNeuter,
        NounClass::Fifth,
    ]
);
code_display_and_parse!(
    AdjectiveClass,
    "adjective class",
    [
        AdjectiveClass::FirstSecond,
        AdjectiveClass::ThirdTwoTermination,
        AdjectiveClass::ThirdOneTermination,
        AdjectiveClass::Comparative,
        AdjectiveClass::Superlative,
        AdjectiveClass::Indeclinable,
    ]
);

/// The class a solve actually used, as recorded in the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclensionClass {
    Noun(NounClass),
    Adjective(AdjectiveClass),
}

impl fmt::Display for DeclensionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noun(class) => fmt::Display::fmt(class, f),
            Self::Adjective(class) => fmt::Display::fmt(class, f),
        }
    }
}

/// Per-lemma phonological switches consulted during stem derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemmaFlags {
    /// dexter → dextr-
    #[serde(alias = "dropEAfterR")]
    pub drop_e_after_r: bool,
    /// līber → līber- (restores an "e" the genitive dropped)
    #[serde(alias = "keepEAfterR")]
    pub keep_e_after_r: bool,
    /// fīlius → voc. fīlī
    #[serde(alias = "vocIusToI")]
    pub voc_ius_to_i: bool,
    /// Tried in order when the rule's strip suffix does not match.
    #[serde(alias = "altStripSuffixes")]
    pub alt_strip_suffixes: Vec<String>,
}

/// Addresses one cell of a lemma's paradigm; used to key irregular overrides.
/// Renders (and serializes) as `acc_sg_n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormKey {
    pub case: Case,
    pub number: GrammaticalNumber,
    pub gender: Gender,
}

impl FormKey {
    pub fn new(case: Case, number: GrammaticalNumber, gender: Gender) -> Self {
        Self { case, number, gender }
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.case, self.number, self.gender)
    }
}

impl FromStr for FormKey {
    type Err = ParseFeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('_');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(case), Some(number), Some(gender), None) => Ok(Self {
                case: case.parse()?,
                number: number.parse()?,
                gender: gender.parse()?,
            }),
            _ => Err(ParseFeatureError::new("form key", s)),
        }
    }
}

impl Serialize for FormKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FormKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounLemma {
    pub lemma: String,
    pub gen_sg: Option<String>,
    pub class: Option<NounClass>,
    pub genders: Vec<Gender>,
    pub stem: Option<String>,
    #[serde(default)]
    pub flags: LemmaFlags,
    #[serde(default)]
    pub overrides: BTreeMap<FormKey, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjectiveLemma {
    pub lemma: String,
    pub gen_sg: Option<String>,
    pub class: Option<AdjectiveClass>,
    pub genders: Vec<Gender>,
    pub stem: Option<String>,
    #[serde(default)]
    pub flags: LemmaFlags,
    #[serde(default)]
    pub overrides: BTreeMap<FormKey, String>,
}

impl NounLemma {
    pub fn new(lemma: &str, gen_sg: &str, class: NounClass, gender: Gender) -> Self {
        Self {
            lemma: lemma.to_string(),
            gen_sg: Some(gen_sg.to_string()),
            class: Some(class),
            genders: vec![gender],
            stem: None,
            flags: LemmaFlags::default(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_flags(mut self, flags: LemmaFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_override(mut self, key: FormKey, form: &str) -> Self {
        self.overrides.insert(key, form.to_string());
        self
    }
}

impl AdjectiveLemma {
    /// Three-gender adjective derived from its genitive singular.
    pub fn new(lemma: &str, gen_sg: &str, class: AdjectiveClass) -> Self {
        Self {
            lemma: lemma.to_string(),
            gen_sg: Some(gen_sg.to_string()),
            class: Some(class),
            genders: vec![Gender::Masculine, Gender::Feminine, Gender::Neuter],
            stem: None,
            flags: LemmaFlags::default(),
            overrides: BTreeMap::new(),
        }
    }

    /// Adjective whose stem is stored directly (comparatives).
    pub fn with_stored_stem(lemma: &str, stem: &str, class: AdjectiveClass) -> Self {
        Self {
            lemma: lemma.to_string(),
            gen_sg: None,
            class: Some(class),
            genders: vec![Gender::Masculine, Gender::Feminine, Gender::Neuter],
            stem: Some(stem.to_string()),
            flags: LemmaFlags::default(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_flags(mut self, flags: LemmaFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_override(mut self, key: FormKey, form: &str) -> Self {
        self.overrides.insert(key, form.to_string());
        self
    }
}

/// A dictionary entry the solver can inflect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pos", rename_all = "lowercase")]
pub enum LemmaEntry {
    Noun(NounLemma),
    Adjective(AdjectiveLemma),
}

impl LemmaEntry {
    pub fn pos(&self) -> PartOfSpeech {
        match self {
            Self::Noun(_) => PartOfSpeech::Noun,
            Self::Adjective(_) => PartOfSpeech::Adjective,
        }
    }

    pub fn lemma(&self) -> &str {
        match self {
            Self::Noun(n) => &n.lemma,
            Self::Adjective(a) => &a.lemma,
        }
    }

    pub fn gen_sg(&self) -> Option<&str> {
        match self {
            Self::Noun(n) => n.gen_sg.as_deref(),
            Self::Adjective(a) => a.gen_sg.as_deref(),
        }
    }

    pub fn genders(&self) -> &[Gender] {
        match self {
            Self::Noun(n) => &n.genders,
            Self::Adjective(a) => &a.genders,
        }
    }

    pub fn stem(&self) -> Option<&str> {
        match self {
            Self::Noun(n) => n.stem.as_deref(),
            Self::Adjective(a) => a.stem.as_deref(),
        }
    }

    pub fn flags(&self) -> &LemmaFlags {
        match self {
            Self::Noun(n) => &n.flags,
            Self::Adjective(a) => &a.flags,
        }
    }

    pub fn overrides(&self) -> &BTreeMap<FormKey, String> {
        match self {
            Self::Noun(n) => &n.overrides,
            Self::Adjective(a) => &a.overrides,
        }
    }

    /// First listed gender, if any.
    pub fn primary_gender(&self) -> Option<Gender> {
        self.genders().first().copied()
    }
}

impl From<NounLemma> for LemmaEntry {
    fn from(noun: NounLemma) -> Self {
        Self::Noun(noun)
    }
}

impl From<AdjectiveLemma> for LemmaEntry {
    fn from(adjective: AdjectiveLemma) -> Self {
        Self::Adjective(adjective)
    }
}

/// What the caller wants out of a single `decline` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveFeatures {
    pub pos: PartOfSpeech,
    pub case: Case,
    pub number: GrammaticalNumber,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, alias = "stripMacrons")]
    pub strip_macrons: bool,
}

impl SolveFeatures {
    pub fn noun(case: Case, number: GrammaticalNumber) -> Self {
        Self {
            pos: PartOfSpeech::Noun,
            case,
            number,
            gender: None,
            strip_macrons: false,
        }
    }

    pub fn adjective(case: Case, number: GrammaticalNumber, gender: Gender) -> Self {
        Self {
            pos: PartOfSpeech::Adjective,
            case,
            number,
            gender: Some(gender),
            strip_macrons: false,
        }
    }

    pub fn without_macrons(mut self) -> Self {
        self.strip_macrons = true;
        self
    }
}

/// Where the stem in a trace came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StemSource {
    Stored,
    GenSg,
    NomSg,
}

impl fmt::Display for StemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stored => "stored stem",
            Self::GenSg => "genitive singular",
            Self::NomSg => "nominative singular",
        })
    }
}

/// Special rules that can fire during a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedRule {
    NeuterNomAccVocEqual,
    GenPluralIum,
    AblSingI,
    DropEAfterR,
    KeepEAfterR,
    AltStripSuffix,
    VocIusToI,
    Indeclinable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingChosen {
    pub case: Case,
    pub number: GrammaticalNumber,
    pub gender: Option<Gender>,
    /// Ending as written in the paradigm table (leading hyphen kept).
    pub end: String,
    pub alt_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveTrace {
    pub lemma: String,
    pub class_used: DeclensionClass,
    pub stem_source: StemSource,
    pub stem: String,
    pub ending: EndingChosen,
    pub rules_applied: Vec<AppliedRule>,
    pub override_hit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub form: String,
    pub trace: SolveTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back() {
        for case in Case::ALL {
            assert_eq!(case.code().parse::<Case>().unwrap(), case);
        }
        for class in NounClass::ALL {
            assert_eq!(class.code().parse::<NounClass>().unwrap(), class);
        }
        for class in AdjectiveClass::ALL {
            assert_eq!(class.to_string().parse::<AdjectiveClass>().unwrap(), class);
        }
        assert_eq!("SG".parse::<GrammaticalNumber>().unwrap(), GrammaticalNumber::Singular);
        assert!("ablative".parse::<Case>().is_err());
    }

    #[test]
    fn form_key_round_trips_through_its_code() {
        let key: FormKey = "acc_sg_n".parse().unwrap();
        assert_eq!(key, FormKey::new(Case::Acc, GrammaticalNumber::Singular, Gender::Neuter));
        assert_eq!(key.to_string(), "acc_sg_n");
        assert!("acc_sg".parse::<FormKey>().is_err());
        assert!("acc_sg_n_x".parse::<FormKey>().is_err());
    }

    #[test]
    fn entry_serializes_with_pos_tag_and_short_codes() {
        let entry: LemmaEntry =
            NounLemma::new("nervus", "nervī", NounClass::SecondUs, Gender::Masculine).into();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["pos"], "noun");
        assert_eq!(json["class"], "2m_us");
        assert_eq!(json["genders"][0], "m");
    }

    #[test]
    fn overrides_serialize_with_string_keys() {
        let entry: LemmaEntry = NounLemma::new("deus", "deī", NounClass::SecondUs, Gender::Masculine)
            .with_override(FormKey::new(Case::Voc, GrammaticalNumber::Singular, Gender::Masculine), "deus")
            .into();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"voc_sg_m\":\"deus\""));
        let back: LemmaEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
