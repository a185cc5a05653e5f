// src/rx.rs
//! Prescription and clinical phrase expansion ("D.S." → "Da, signa").
//!
//! One pass over the text per call. At each position the earliest match
//! wins, then the longest, then table order. Replacement text is copied to
//! the output and never scanned again.

use regex::{Match, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// (pattern, phrase, lowercase only). Patterns are case-insensitive.
const RX_TABLE: &[(&str, &str, bool)] = &[
    // prescription verbs and stock phrases
    (r"\bRp\.?\b", "Recipe", false),
    (r"\bD\.?\s*S\.?\b", "Da, signa", false),
    (r"\bS\.?\b", "Signa", false),
    (r"\bD\.?\b", "Da", false),
    (r"\bD\.?\s*ad\s*vitr\.?\b", "Da ad vitrum", false),
    // ad + accusative
    (r"\bad\s*caps\.?\b", "ad capsulas", false),
    (r"\bad\s*caps\.?\s*gelat\.?\b", "ad capsulas gelatinosas", false),
    // preparations
    (r"\bemuls\.?\b", "emulsio", false),
    (r"\bsol\.?\b", "solutio", false),
    (r"\bsusp\.?\b", "suspensio", false),
    (r"\bsupp\.?\b", "suppositorium", false),
    (r"\btinct\.?\b", "tinctura", false),
    (r"\bung\.?\b", "unguentum", false),
    (r"\bplv\.?\b", "pulvis", false),
    (r"\bpil\.?\b", "pilula", false),
    (r"\b(?:tab(?:\(l\)\.?|\b\.?)|tbl\b\.?)", "tabulettae", false),
    // quantities and frequency; "AA" is unrelated uppercase shorthand
    (r"\baa\.?\b", "ana partes aequales", true),
    (r"\bb\.?\s*d\.?\b", "bis die", false),
    (r"\bq\.?\s*s\.?\b", "quantum satis", false),
    (r"\bp\.?\s*d\.?\b", "pro dosi", false),
    (r"\bp\.?\s*die\b", "pro die", false),
    (r"\bNo\.?\b", "numero", false),
    // routes
    (r"\bp\.?o\.?\b", "per os", false),
    (r"\bi\.?m\.?\b", "intramuscularis", false),
    (r"\bi\.?v\.?\b", "intravenosus", false),
    (r"\bs\.?c\.?\b", "subcutaneus", false),
    // clinical
    (r"\bdg\.?\b", "diagnosis", false),
    (r"\bgr\.?\b", "gradus", false),
    (r"\bca\b", "carcinoma", false),
    (r"\bv\.?\s*s\.?\b", "verisimiliter", false),
    // containers, originals
    (r"\bExp\.?orig\.?\b", "expeditio originalis", false),
    (r"\bvitr\.?\b", "vitrum", false),
];

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

#[derive(Debug)]
pub struct RxRule {
    pattern: Regex,
    pub phrase: &'static str,
    pub lowercase_only: bool,
}

impl RxRule {
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Next acceptable match at or after `at`. Lowercase-only rules skip
    /// matches containing uppercase and keep looking one character later.
    fn find_from<'t>(&self, text: &'t str, mut at: usize) -> Option<Match<'t>> {
        loop {
            let found = self.pattern.find_at(text, at)?;
            if !self.lowercase_only || found.as_str() == found.as_str().to_lowercase() {
                return Some(found);
            }
            at = found.start() + text[found.start()..].chars().next().map_or(1, char::len_utf8);
            if at > text.len() {
                return None;
            }
        }
    }
}

static RULES: LazyLock<Vec<RxRule>> = LazyLock::new(|| {
    RX_TABLE
        .iter()
        .map(|&(pattern, phrase, lowercase_only)| RxRule {
            pattern: Regex::new(&format!("(?i){pattern}")).unwrap(),
            phrase,
            lowercase_only,
        })
        .collect()
});

/// "<phrase>." → "<phrase>" before whitespace or end of text, one pattern per
/// distinct phrase.
static TRAILING_CLEANUPS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let phrases: BTreeSet<&str> = RX_TABLE.iter().map(|&(_, phrase, _)| phrase).collect();
    phrases
        .into_iter()
        .map(|phrase| Regex::new(&format!(r"\b({})\.(\s|$)", regex::escape(phrase))).unwrap())
        .collect()
});

/// The rule table in priority order.
pub fn rules() -> &'static [RxRule] {
    &RULES
}

fn apply_trailing_cleanups(text: String) -> String {
    TRAILING_CLEANUPS.iter().fold(text, |acc, cleanup| {
        cleanup.replace_all(&acc, "$1$2").into_owned()
    })
}

/// Earliest, then longest, then first-listed match at or after `from`.
fn next_match<'t>(text: &'t str, from: usize) -> Option<(Match<'t>, &'static RxRule)> {
    let mut best: Option<(Match<'t>, &'static RxRule)> = None;
    for rule in rules() {
        let Some(found) = rule.find_from(text, from) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((current, _)) => {
                found.start() < current.start()
                    || (found.start() == current.start() && found.len() > current.len())
            }
        };
        if better {
            best = Some((found, rule));
        }
    }
    best
}

/// Single left-to-right substitution pass.
fn rewrite(text: &str, mut replacement: impl FnMut(&'static RxRule) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while pos < text.len() {
        let Some((found, rule)) = next_match(text, pos) else {
            break;
        };
        out.push_str(&text[pos..found.start()]);
        if found.is_empty() {
            let step = text[found.start()..].chars().next().map_or(1, char::len_utf8);
            out.push_str(&text[found.start()..found.start() + step]);
            pos = found.start() + step;
            continue;
        }
        tracing::trace!(matched = found.as_str(), phrase = rule.phrase, "rx substitution");
        out.push_str(&replacement(rule));
        pos = found.end();
    }
    if pos < text.len() {
        out.push_str(&text[pos..]);
    }
    out
}

/// Expands every Rx abbreviation in `text`. Running it on its own output
/// changes nothing.
pub fn expand_rx_abbrevs(text: &str) -> String {
    apply_trailing_cleanups(rewrite(text, |rule| rule.phrase.to_string()))
}

fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_OPEN}RX{index}{PLACEHOLDER_CLOSE}")
}

/// Text with every Rx span swapped for an opaque placeholder, plus the
/// phrases needed to put them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedText {
    pub text: String,
    pub placeholders: Vec<&'static str>,
}

impl ProtectedText {
    /// Puts the literal phrases back into `text` (usually `self.text` after
    /// other passes have run over it).
    pub fn restore(&self, text: &str) -> String {
        let restored = self
            .placeholders
            .iter()
            .enumerate()
            .fold(text.to_string(), |acc, (index, phrase)| acc.replace(&placeholder(index), phrase));
        apply_trailing_cleanups(restored)
    }
}

/// Hides Rx spans from the anatomical pass.
pub fn protect_rx(text: &str) -> ProtectedText {
    let mut placeholders = Vec::new();
    let text = rewrite(text, |rule| {
        placeholders.push(rule.phrase);
        placeholder(placeholders.len() - 1)
    });
    ProtectedText { text, placeholders }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signa_and_frequency() {
        let expanded = expand_rx_abbrevs("D.S. b.d.");
        assert_eq!(expanded, "Da, signa bis die");
        assert_eq!(expand_rx_abbrevs(&expanded), expanded);
    }

    #[test]
    fn terminal_dots_of_abbreviations_are_dropped() {
        assert_eq!(expand_rx_abbrevs("Rp. tab. No. 20"), "Recipe tabulettae numero 20");
        assert_eq!(expand_rx_abbrevs("P.O."), "per os");
    }

    #[test]
    fn longest_match_at_a_position_wins() {
        assert_eq!(expand_rx_abbrevs("D. ad vitr."), "Da ad vitrum");
        assert_eq!(expand_rx_abbrevs("ad caps. gelat."), "ad capsulas gelatinosas");
        assert_eq!(expand_rx_abbrevs("ad caps."), "ad capsulas");
    }

    #[test]
    fn tablet_spellings() {
        for raw in ["tab.", "Tab(l).", "tbl.", "tab"] {
            assert_eq!(expand_rx_abbrevs(raw), "tabulettae", "{raw}");
        }
        assert_eq!(expand_rx_abbrevs("tabulettae"), "tabulettae");
    }

    #[test]
    fn lowercase_only_rule_ignores_uppercase() {
        assert_eq!(expand_rx_abbrevs("aa."), "ana partes aequales");
        assert_eq!(expand_rx_abbrevs("AA."), "AA.");
        assert_eq!(expand_rx_abbrevs("Aa. aa."), "Aa. ana partes aequales");
    }

    #[test]
    fn words_containing_abbreviations_are_untouched() {
        let text = "canalis solutio dorsalis superior";
        assert_eq!(expand_rx_abbrevs(text), text);
    }

    #[test]
    fn every_phrase_is_a_fixed_point() {
        for rule in rules() {
            assert_eq!(expand_rx_abbrevs(rule.phrase), rule.phrase, "{}", rule.pattern());
        }
    }

    #[test]
    fn protect_then_restore_round_trips_to_the_expansion() {
        let protected = protect_rx("Rp. a. lat. D.S.");
        assert_eq!(protected.placeholders, vec!["Recipe", "Da, signa"]);
        assert!(!protected.text.contains("Rp"));
        assert!(protected.text.contains("a. lat."));
        assert_eq!(protected.restore(&protected.text), "Recipe a. lat. Da, signa");
    }

    #[test]
    fn text_without_rx_is_unchanged() {
        let protected = protect_rx("a. lat. dex.");
        assert!(protected.placeholders.is_empty());
        assert_eq!(protected.text, "a. lat. dex.");
        assert_eq!(expand_rx_abbrevs(""), "");
    }
}
