//! Pluralization helpers for the inflected guess strategy.
//!
//! Irregular forms common in database schemas are checked before falling back
//! to the `inflector` crate.

use inflector::Inflector;

static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("crisis", "crises"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

/// Plural form of a table-name stem
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *singular || lower == *plural {
            return match_case(word, plural);
        }
    }

    word.to_plural()
}

/// Singular form of a table-name stem
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *plural || lower == *singular {
            return match_case(word, singular);
        }
    }

    word.to_singular()
}

/// Copy the capitalization of `source` onto a lowercase irregular form
fn match_case(source: &str, form: &str) -> String {
    let mut chars = source.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            if source.chars().count() > 1 && chars.all(|c| !c.is_lowercase()) {
                form.to_uppercase()
            } else {
                let mut forms = form.chars();
                forms
                    .next()
                    .map(|f| f.to_uppercase().chain(forms).collect())
                    .unwrap_or_default()
            }
        }
        _ => form.to_string(),
    }
}
