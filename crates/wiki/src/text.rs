use std::collections::HashSet;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "of", "and", "or", "in", "on", "at", "to", "for", "with", "by", "from",
    "as", "is", "was", "are", "were", "be", "been", "it", "its", "this", "that", "which", "who",
    "whom", "whose", "what", "when", "where", "why", "how", "not", "no", "often", "used", "part",
];

/// Lowercased, stopword-free word set of a text, used for overlap scoring.
pub fn significant_words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|w| w.to_lowercase())
        .filter(|w| w.len() >= 2 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Number of significant words a candidate title shares with the context.
/// Parenthetical disambiguators count: "Intermezzo (novel)" matches a
/// context mentioning a novel.
pub fn overlap_score(candidate: &str, context: &HashSet<String>) -> usize {
    significant_words(candidate)
        .iter()
        .filter(|w| context.contains(*w))
        .count()
}

const LOWERCASE_IN_TITLES: &[&str] = &[
    "Of", "And", "The", "In", "On", "At", "To", "For", "With", "By",
];

/// Title-case an entity name the way Wikipedia titles are cased: capitalize
/// each word, then lowercase short function words except the first.
///
/// Only the first letter of each word changes; the remainder keeps its
/// casing so acronyms ("EU") and mixed-case names ("McDonald's") survive.
pub fn to_title_case(text: &str) -> String {
    let mut words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    for word in words.iter_mut().skip(1) {
        if LOWERCASE_IN_TITLES.contains(&word.as_str()) {
            *word = word.to_lowercase();
        }
    }
    words.join(" ")
}
