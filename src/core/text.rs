// src/core/text.rs
//! Small string transforms shared by the solver and the expanders.

/// Replaces long-vowel letters with their plain forms (ā → a, Ū → U).
pub fn remove_macrons(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'ā' => 'a',
            'ē' => 'e',
            'ī' => 'i',
            'ō' => 'o',
            'ū' => 'u',
            'ȳ' => 'y',
            'Ā' => 'A',
            'Ē' => 'E',
            'Ī' => 'I',
            'Ō' => 'O',
            'Ū' => 'U',
            'Ȳ' => 'Y',
            other => other,
        })
        .collect()
}

/// `form` lowercased, with its first letter raised when `source` starts uppercase.
pub fn inherit_capitalization(source: &str, form: &str) -> String {
    let lower = form.to_lowercase();
    if source.chars().next().is_some_and(char::is_uppercase) {
        capitalize(&lower)
    } else {
        lower
    }
}

/// Copies the case pattern of `source` (ALL CAPS, Capitalized, lower) onto `lower`.
pub fn match_case_pattern(source: &str, lower: &str) -> String {
    if source == source.to_uppercase() {
        lower.to_uppercase()
    } else if source.chars().next().is_some_and(char::is_uppercase) {
        capitalize(lower)
    } else {
        lower.to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Swaps a trailing `from` for `to`; leaves `word` alone when it does not end in `from`.
pub fn replace_suffix(word: &str, from: &str, to: &str) -> String {
    match word.strip_suffix(from) {
        Some(stem) => format!("{stem}{to}"),
        None => word.to_string(),
    }
}

/// Drops trailing `.,;:` punctuation.
pub fn strip_trailing_punct(token: &str) -> &str {
    token.trim_end_matches(['.', ',', ';', ':'])
}
