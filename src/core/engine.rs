// src/core/engine.rs
use crate::abbr::anatomical::expand_latin_abbrevs;
use crate::abbr::normalize::normalize_latin_label;
use crate::core::text::match_case_pattern;
use crate::rx::{expand_rx_abbrevs, protect_rx};
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

static CUT_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s*\(\s*cut\s*\)\s*").unwrap());

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// "Arteria et Vena" followed by up to seven descriptor words.
static ARTERIA_ET_VENA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Arteria)\s+et\s+(Vena)\s+([A-Za-z\x{00C0}-\x{024F}]+(?:\s+[A-Za-z\x{00C0}-\x{024F}]+){0,6})")
        .unwrap()
});

/// Text after every orchestrator step, for debugging tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpansionStages {
    pub input: String,
    pub protected: String,
    pub normalized: String,
    pub anatomical: String,
    pub restored: String,
    pub rx: String,
    #[serde(rename = "final")]
    pub output: String,
}

/// The full label expansion pipeline. Holds no state between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct LatinExpander;

impl LatinExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, input: &str) -> String {
        self.expand_with_stages(input).output
    }

    pub fn expand_with_stages(&self, input: &str) -> ExpansionStages {
        // 1. Hide Rx spans so the anatomical pass cannot misread them
        let protected = protect_rx(input);

        // 2. Token order and punctuation
        let normalized = normalize_latin_label(&protected.text);

        // 3. Agreement pass over noun/adjective abbreviations
        let anatomical = expand_latin_abbrevs(&normalized);

        // 4. Put the Rx phrases back, 5. and expand anything now visible
        let restored = protected.restore(&anatomical);
        let rx = expand_rx_abbrevs(&restored);

        // 6. Editorial markers, 7. shared descriptors of coordinated vessels
        let output = pluralize_coordinated_descriptors(&strip_cut_markers(&rx));

        tracing::debug!(input, placeholders = protected.placeholders.len(), output = %output, "expanded label");

        ExpansionStages {
            input: input.to_string(),
            protected: protected.text,
            normalized,
            anatomical,
            restored,
            rx,
            output,
        }
    }
}

/// Expands an abbreviated anatomical or prescription label to full Latin.
pub fn expand_latin_all(input: &str) -> String {
    LatinExpander::new().expand(input)
}

/// Removes "(cut)" markers and collapses the whitespace they leave behind.
pub fn strip_cut_markers(text: &str) -> String {
    let spaced = CUT_MARKER.replace_all(text, " ");
    MULTI_SPACE.replace_all(&spaced, " ").trim().to_string()
}

/// Feminine nominative plural of a shared descriptor word.
fn to_fem_nom_plural(token: &str) -> String {
    let lower = token.to_lowercase();
    if lower.is_empty() || lower.chars().any(|c| c.is_ascii_digit()) {
        return token.to_string();
    }
    if lower.ends_with("ae") || lower.ends_with("es") || lower.ends_with("iores") {
        return token.to_string();
    }
    let plural = match lower.as_str() {
        "dextra" => "dextrae".to_string(),
        "sinistra" => "sinistrae".to_string(),
        l if l.ends_with("ior") => format!("{l}es"),
        l if l.ends_with("is") => format!("{}es", &l[..l.len() - 2]),
        l if l.ends_with('a') => format!("{l}e"),
        l if l.ends_with("us") => format!("{}ae", &l[..l.len() - 2]),
        _ => return token.to_string(),
    };
    match_case_pattern(token, &plural)
}

/// "Arteria et Vena dorsalis" → "Arteria et Vena dorsales": every descriptor
/// shared by the pair is put in the feminine nominative plural.
pub fn pluralize_coordinated_descriptors(text: &str) -> String {
    ARTERIA_ET_VENA
        .replace_all(text, |caps: &Captures| {
            let descriptors: Vec<String> = caps[3].split_whitespace().map(to_fem_nom_plural).collect();
            format!("{} et {} {}", &caps[1], &caps[2], descriptors.join(" "))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_markers_are_removed() {
        assert_eq!(strip_cut_markers("a. lat. (cut)"), "a. lat.");
        assert_eq!(strip_cut_markers("n. ( CUT ) med."), "n. med.");
        assert_eq!(strip_cut_markers("  plain   text "), "plain text");
    }

    #[test]
    fn descriptor_suffix_table() {
        assert_eq!(to_fem_nom_plural("dorsalis"), "dorsales");
        assert_eq!(to_fem_nom_plural("Profunda"), "Profundae");
        assert_eq!(to_fem_nom_plural("SINISTRA"), "SINISTRAE");
        assert_eq!(to_fem_nom_plural("anterior"), "anteriores");
        assert_eq!(to_fem_nom_plural("superficialis"), "superficiales");
        assert_eq!(to_fem_nom_plural("profundus"), "profundae");
        assert_eq!(to_fem_nom_plural("posteriores"), "posteriores");
        assert_eq!(to_fem_nom_plural("C7"), "C7");
        assert_eq!(to_fem_nom_plural("nervi"), "nervi");
    }

    #[test]
    fn only_arteria_et_vena_chains_are_pluralized() {
        assert_eq!(
            pluralize_coordinated_descriptors("Arteria et Vena Dorsalis"),
            "Arteria et Vena Dorsales"
        );
        assert_eq!(
            pluralize_coordinated_descriptors("Arteria et Vena profunda lateralis"),
            "Arteria et Vena profundae laterales"
        );
        assert_eq!(pluralize_coordinated_descriptors("arteria et vena dorsalis"), "arteria et vena dorsalis");
        assert_eq!(pluralize_coordinated_descriptors("Arteria dorsalis"), "Arteria dorsalis");
    }

    #[test]
    fn full_pipeline_scenarios() {
        assert_eq!(expand_latin_all("a. lat. dex."), "arteria lateralis dextra");
        assert_eq!(expand_latin_all("A. et V. dx."), "Arteria et Vena dextrae");
        assert_eq!(expand_latin_all("Arteria et Vena Dorsalis"), "Arteria et Vena Dorsales");
        assert_eq!(expand_latin_all("D.S. b.d."), "Da, signa bis die");
    }

    #[test]
    fn stages_are_recorded_in_order() {
        let stages = LatinExpander::new().expand_with_stages("Rp. a. lat. (cut)");
        assert_eq!(stages.input, "Rp. a. lat. (cut)");
        assert!(stages.protected.contains('\u{E000}'));
        assert!(stages.anatomical.contains("arteria lateralis"));
        assert!(stages.restored.starts_with("Recipe"));
        assert_eq!(stages.output, "Recipe arteria lateralis");
        let json = serde_json::to_value(&stages).unwrap();
        assert_eq!(json["final"], "Recipe arteria lateralis");
    }

    #[test]
    fn empty_input() {
        assert_eq!(expand_latin_all(""), "");
    }
}
