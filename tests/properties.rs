// tests/properties.rs
use latin_core::abbr::anatomical::noun_number;
use latin_core::{
    decline, expand_rx_abbrevs, normalize_latin_label, AbbreviationRegistry, Case, Gender, GrammaticalNumber,
    SolveFeatures,
};
use proptest::prelude::*;
use proptest::sample::select;

fn noun_keys() -> Vec<&'static str> {
    AbbreviationRegistry::global().noun_keys().collect()
}

fn adjective_keys() -> Vec<&'static str> {
    AbbreviationRegistry::global().adjective_keys().collect()
}

/// Label tokens: registry keys with and without dots, doubled plurals,
/// conjunctions, loose dots and plain words.
fn arb_label_token() -> impl Strategy<Value = String> {
    let registry = AbbreviationRegistry::global();
    let mut keys: Vec<String> = registry
        .noun_keys()
        .chain(registry.adjective_keys())
        .chain(registry.alias_keys())
        .map(str::to_string)
        .collect();
    keys.extend(registry.noun_keys().map(|k| format!("{k}{}", &k[k.len() - 1..])));
    prop_oneof![
        4 => (select(keys), any::<bool>(), any::<bool>()).prop_map(|(key, dotted, capital)| {
            let mut token = if capital {
                let mut chars = key.chars();
                chars.next().map(|c| c.to_uppercase().chain(chars).collect::<String>()).unwrap_or_default()
            } else {
                key
            };
            if dotted {
                token.push('.');
            }
            token
        }),
        1 => select(vec!["et", "&", "and", "And", "&,", ".", "..", ","]).prop_map(str::to_string),
        3 => "[a-z]{3,8}\\.?",
        1 => "[A-Z][a-z]{2,6}",
    ]
}

fn arb_label() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_label_token(), 0..8).prop_map(|tokens| tokens.join(" "))
}

fn arb_rx_line() -> impl Strategy<Value = String> {
    let vocab = vec![
        "Rp.", "D.S.", "S.", "D.", "b.d.", "tab.", "tbl.", "No.", "20", "p.o.", "aa.", "sol.", "i.v.", "q.s.",
        "dg.", "vitr.", "aqua", "ml", "ad caps.", "Exp.orig.", "arteria",
    ];
    prop::collection::vec(select(vocab), 0..8).prop_map(|tokens| tokens.join(" "))
}

fn arb_gender() -> impl Strategy<Value = Gender> {
    select(vec![Gender::Masculine, Gender::Feminine, Gender::Neuter])
}

proptest! {
    #[test]
    fn normalizer_is_idempotent(label in arb_label()) {
        let once = normalize_latin_label(&label);
        let twice = normalize_latin_label(&once);
        prop_assert_eq!(twice, once, "label: {:?}", label);
    }

    #[test]
    fn rx_expansion_is_idempotent(line in arb_rx_line()) {
        let once = expand_rx_abbrevs(&line);
        let twice = expand_rx_abbrevs(&once);
        prop_assert_eq!(twice, once, "line: {:?}", line);
    }

    #[test]
    fn decline_is_deterministic(
        key in select(noun_keys().into_iter().chain(adjective_keys()).collect::<Vec<_>>()),
        case in select(Case::ALL.to_vec()),
        number in select(GrammaticalNumber::ALL.to_vec()),
        gender in arb_gender(),
        strip in any::<bool>(),
    ) {
        let registry = AbbreviationRegistry::global();
        let entry = registry.noun(key).or_else(|| registry.adjective(key)).unwrap();
        let mut features = match entry.pos() {
            latin_core::PartOfSpeech::Noun => SolveFeatures::noun(case, number),
            latin_core::PartOfSpeech::Adjective => SolveFeatures::adjective(case, number, gender),
        };
        features.strip_macrons = strip;
        let first = decline(entry, &features);
        prop_assert!(first.is_ok(), "{} {:?}: {:?}", key, features, first);
        prop_assert_eq!(decline(entry, &features), first);
    }

    #[test]
    fn neuter_direct_cases_share_one_form(
        key in select(noun_keys().into_iter().chain(adjective_keys()).collect::<Vec<_>>()),
        number in select(GrammaticalNumber::ALL.to_vec()),
    ) {
        let registry = AbbreviationRegistry::global();
        let entry = registry.noun(key).or_else(|| registry.adjective(key)).unwrap();
        let features = |case| match entry.pos() {
            latin_core::PartOfSpeech::Noun => SolveFeatures::noun(case, number),
            latin_core::PartOfSpeech::Adjective => SolveFeatures::adjective(case, number, Gender::Neuter),
        };
        let is_neuter = entry.pos() == latin_core::PartOfSpeech::Adjective || entry.genders().contains(&Gender::Neuter);
        prop_assume!(is_neuter);
        let nom = decline(entry, &features(Case::Nom)).unwrap().form;
        prop_assert_eq!(&decline(entry, &features(Case::Acc)).unwrap().form, &nom);
        prop_assert_eq!(&decline(entry, &features(Case::Voc)).unwrap().form, &nom);
    }

    #[test]
    fn doubled_final_letter_reads_as_plural(key in select(noun_keys()), dots in 0usize..3) {
        let dots = ".".repeat(dots);
        let last = &key[key.len() - 1..];
        prop_assert_eq!(noun_number(&format!("{key}{dots}")), Some(GrammaticalNumber::Singular));
        prop_assert_eq!(noun_number(&format!("{key}{last}{dots}")), Some(GrammaticalNumber::Plural));
        prop_assert_eq!(
            latin_core::abbr::anatomical::canonical_key(&format!("{key}{last}.")),
            Some(key)
        );
    }
}
