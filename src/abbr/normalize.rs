// src/abbr/normalize.rs
//! Token normalizer run before the anatomical pass.

use crate::abbr::registry::AbbreviationRegistry;
use crate::core::text::strip_trailing_punct;

/// "et", "and" or "&", ignoring case and trailing punctuation.
pub fn is_coord_conjunction(token: &str) -> bool {
    let stripped = strip_trailing_punct(token);
    stripped == "&" || stripped.eq_ignore_ascii_case("et") || stripped.eq_ignore_ascii_case("and")
}

/// Rewrites "&" and "and" to "et", keeping the source casing and any trailing punctuation.
pub fn latinize_conjunction(token: &str) -> String {
    let word = strip_trailing_punct(token);
    let punct = &token[word.len()..];
    let et = if word == "&" {
        "et"
    } else if !word.eq_ignore_ascii_case("and") {
        return token.to_string();
    } else if word == word.to_uppercase() {
        "ET"
    } else if word.starts_with(|c: char| c.is_ascii_uppercase()) {
        "Et"
    } else {
        "et"
    };
    format!("{et}{punct}")
}

fn is_dot_only(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c == '.')
}

/// Folds dot-only tokens into their predecessor ("lat ." → "lat.").
fn merge_split_dots(tokens: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match out.last_mut() {
            Some(previous) if is_dot_only(&token) => previous.push_str(&token),
            _ => out.push(token),
        }
    }
    out
}

/// Moves a trailing run of noun abbreviations in front of the last bare
/// lowercase word they govern ("lig. colli ant. n." keeps "n." last only if
/// a conjunction sits in between).
fn reposition_trailing_abbreviations(tokens: &mut Vec<String>, registry: &AbbreviationRegistry) {
    let run_start = tokens
        .iter()
        .rposition(|t| !registry.is_noun_token(t))
        .map_or(0, |i| i + 1);
    if run_start == tokens.len() || run_start == 0 {
        return;
    }

    let is_bare_lowercase = |t: &str| {
        t.starts_with(char::is_lowercase) && !registry.is_abbreviation(t) && !is_coord_conjunction(t)
    };
    let Some(target) = tokens[..run_start].iter().rposition(|t| is_bare_lowercase(t.as_str())) else {
        return;
    };
    if tokens[target + 1..run_start].iter().any(|t| is_coord_conjunction(t)) {
        return;
    }

    let run: Vec<String> = tokens.drain(run_start..).collect();
    tokens.splice(target..target, run);
}

/// Canonical token order and punctuation for an abbreviated label.
///
/// Idempotent: running it on its own output changes nothing.
pub fn normalize_latin_label(raw: &str) -> String {
    let registry = AbbreviationRegistry::global();
    let tokens = merge_split_dots(raw.split_whitespace().map(str::to_string).collect());
    let mut tokens: Vec<String> = tokens
        .iter()
        .map(|t| latinize_conjunction(&registry.ensure_dot(t)))
        .collect();

    reposition_trailing_abbreviations(&mut tokens, registry);

    for token in tokens.iter_mut() {
        if registry.is_abbreviation(token) {
            continue;
        }
        let trimmed = token.trim_end_matches('.');
        if !trimmed.is_empty() && trimmed.len() != token.len() {
            *token = trimmed.to_string();
        }
    }

    tokens.join(" ")
}
