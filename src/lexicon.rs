// src/lexicon.rs
//! Externally supplied lexicon rows (JSON) turned into solver entries.

use crate::core::error::{DeclensionError, LexiconError};
use crate::core::types::{
    AdjectiveClass, AdjectiveLemma, FormKey, Gender, LemmaEntry, LemmaFlags, NounClass, NounLemma,
    PartOfSpeech,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One dictionary row as card builders export it. Class codes stay strings
/// here because their meaning depends on `pos`.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconRow {
    pub lemma: String,
    pub pos: PartOfSpeech,
    #[serde(default, alias = "genSg")]
    pub gen_sg: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub genders: Vec<Gender>,
    #[serde(default, alias = "nounClass", alias = "adjClass")]
    pub class: Option<String>,
    #[serde(default)]
    pub stem: Option<String>,
    #[serde(default)]
    pub flags: LemmaFlags,
    #[serde(default)]
    pub overrides: BTreeMap<FormKey, String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<LexiconRow> for LemmaEntry {
    type Error = DeclensionError;

    fn try_from(row: LexiconRow) -> Result<Self, Self::Error> {
        let class = non_blank(row.class);
        let mut genders = row.genders;
        if genders.is_empty() {
            genders.extend(row.gender);
        }
        let lemma = row.lemma.trim().to_string();
        let gen_sg = non_blank(row.gen_sg);
        let stem = non_blank(row.stem);
        let unknown = |code: &str| DeclensionError::UnknownParadigm {
            pos: row.pos,
            class: code.to_string(),
        };

        match row.pos {
            PartOfSpeech::Noun => {
                let class = class
                    .as_deref()
                    .map(|code| code.parse::<NounClass>().map_err(|_| unknown(code)))
                    .transpose()?;
                Ok(NounLemma {
                    lemma,
                    gen_sg,
                    class,
                    genders,
                    stem,
                    flags: row.flags,
                    overrides: row.overrides,
                }
                .into())
            }
            PartOfSpeech::Adjective => {
                let class = class
                    .as_deref()
                    .map(|code| code.parse::<AdjectiveClass>().map_err(|_| unknown(code)))
                    .transpose()?;
                if genders.is_empty() {
                    genders = vec![Gender::Masculine, Gender::Feminine, Gender::Neuter];
                }
                Ok(AdjectiveLemma {
                    lemma,
                    gen_sg,
                    class,
                    genders,
                    stem,
                    flags: row.flags,
                    overrides: row.overrides,
                }
                .into())
            }
        }
    }
}

fn rows_to_entries(rows: Vec<LexiconRow>) -> Result<Vec<LemmaEntry>, LexiconError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let lemma = row.lemma.clone();
            LemmaEntry::try_from(row).map_err(|source| LexiconError::Row { index, lemma, source })
        })
        .collect()
}

/// Parses a JSON array of rows. The first bad row fails the whole batch.
pub fn parse_lexicon(json: &str) -> Result<Vec<LemmaEntry>, LexiconError> {
    let rows: Vec<LexiconRow> = serde_json::from_str(json)?;
    rows_to_entries(rows)
}

/// Parses a single JSON row object.
pub fn parse_lexicon_row(json: &str) -> Result<LemmaEntry, LexiconError> {
    let row: LexiconRow = serde_json::from_str(json)?;
    let lemma = row.lemma.clone();
    LemmaEntry::try_from(row).map_err(|source| LexiconError::Row {
        index: 0,
        lemma,
        source,
    })
}

pub fn load_lexicon(path: &Path) -> Result<Vec<LemmaEntry>, LexiconError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let rows: Vec<LexiconRow> = serde_json::from_reader(reader)?;
    let entries = rows_to_entries(rows)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "loaded lexicon");
    Ok(entries)
}
