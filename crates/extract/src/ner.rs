use regex::Regex;
use std::sync::LazyLock;

use crate::normalizer::normalize;
use crate::schema::{EntityLabel, EntitySpan};

/// A pretrained named-entity model. Implementations must be deterministic:
/// the same text always yields the same spans.
pub trait NerModel {
    fn entities(&self, text: &str) -> Vec<EntitySpan>;
}

static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    // Opening quote must follow a boundary so apostrophes inside words
    // ("Grant's") don't start a span.
    Regex::new(r#"(?:^|[\s(])["'“‘]([^"'”’]{2,60})["'”’]"#).unwrap()
});

const CONNECTORS: &[&str] = &["of", "the", "and", "de", "da", "la", "von", "van"];

// Capitalized function words that open English sentences and questions.
// They are stripped from the front of a sentence-initial run so "What King"
// never becomes an entity.
const SENTENCE_OPENERS: &[&str] = &[
    "What", "Who", "Whom", "Whose", "Which", "Where", "When", "Why", "How", "This", "That",
    "These", "Those", "The", "A", "An", "In", "On", "By", "It", "Is", "Was", "Do", "Does",
    "Did", "Name",
];

const FAC_SUFFIXES: &[&str] = &[
    "Tomb", "Bridge", "Tower", "Stadium", "Airport", "Mausoleum", "Museum", "Cathedral",
    "Castle", "Park", "Palace",
];
const LOC_PREFIXES: &[&str] = &["Lake", "Mount", "Cape", "River"];
const LOC_SUFFIXES: &[&str] = &[
    "River", "Island", "Islands", "Mountains", "Sea", "Ocean", "Bay", "Desert", "Valley",
];
const ORG_SUFFIXES: &[&str] = &[
    "Inc", "Ltd", "Corp", "Corporation", "Company", "University", "College", "FC", "United",
];

/// Capitalization-and-pattern NER model.
///
/// Finds quoted work titles and maximal runs of capitalized tokens (connector
/// words like "of" allowed inside a run), then assigns coarse labels from
/// surface patterns. Far blunter than a statistical model, but deterministic
/// and dependency-free; the pipeline only needs candidate names to send to
/// Wikipedia, and the literal answer is always added separately.
pub struct HeuristicNer;

impl HeuristicNer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicNer {
    fn default() -> Self {
        Self::new()
    }
}

impl NerModel for HeuristicNer {
    fn entities(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans = Vec::new();

        // Quoted titles first: they beat the caps pass on dedup.
        for cap in QUOTED.captures_iter(text) {
            let inner = cap[1].trim();
            if starts_uppercase(inner) {
                spans.push(EntitySpan {
                    text: inner.to_string(),
                    label: EntityLabel::WorkOfArt,
                });
            }
        }

        for sentence in text.split(['.', '?', '!']) {
            collect_caps_spans(sentence, &mut spans);
        }

        dedup_spans(spans)
    }
}

fn collect_caps_spans(sentence: &str, spans: &mut Vec<EntitySpan>) {
    let tokens: Vec<String> = sentence
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .collect();
    let sentence_len = tokens.iter().filter(|t| !t.is_empty()).count();

    let mut run: Vec<String> = Vec::new();
    let mut run_start = 0;

    for i in 0..tokens.len() {
        let tok = &tokens[i];
        if tok.is_empty() {
            flush_run(&mut run, run_start, sentence_len, spans);
            continue;
        }
        if starts_uppercase(tok) {
            if run.is_empty() {
                run_start = i;
            }
            run.push(tok.clone());
        } else if !run.is_empty()
            && CONNECTORS.contains(&tok.as_str())
            && tokens.get(i + 1).is_some_and(|next| starts_uppercase(next))
        {
            run.push(tok.clone());
        } else {
            flush_run(&mut run, run_start, sentence_len, spans);
        }
    }
    flush_run(&mut run, run_start, sentence_len, spans);
}

fn flush_run(run: &mut Vec<String>, run_start: usize, sentence_len: usize, spans: &mut Vec<EntitySpan>) {
    if run.is_empty() {
        return;
    }
    let mut words = std::mem::take(run);

    let mut stripped_opener = false;
    if run_start == 0 && sentence_len > 1 {
        while words
            .first()
            .is_some_and(|w| SENTENCE_OPENERS.contains(&w.as_str()))
        {
            words.remove(0);
            stripped_opener = true;
        }
        if words.is_empty() {
            return;
        }
        // A lone capitalized word opening a multi-word sentence is usually
        // just a sentence start, not an entity. Acronyms and words exposed by
        // opener stripping ("Which Beatle…") are kept.
        if words.len() == 1 && !stripped_opener && !is_acronym(&words[0]) {
            return;
        }
    }
    // Trailing connectors can survive lookahead at sentence edges.
    while words
        .last()
        .is_some_and(|w| CONNECTORS.contains(&w.as_str()))
    {
        words.pop();
    }
    if words.is_empty() {
        return;
    }

    let label = classify(&words);
    spans.push(EntitySpan {
        text: words.join(" "),
        label,
    });
}

fn classify(words: &[String]) -> EntityLabel {
    let first = words[0].as_str();
    let last = words[words.len() - 1].as_str();
    let joined = words.join(" ");

    if joined.starts_with("Battle of")
        || joined.starts_with("Treaty of")
        || joined.starts_with("Siege of")
        || last == "War"
        || last == "Olympics"
    {
        return EntityLabel::Event;
    }
    if words.len() >= 2 && FAC_SUFFIXES.contains(&last) {
        return EntityLabel::Fac;
    }
    if LOC_PREFIXES.contains(&first) || LOC_SUFFIXES.contains(&last) {
        return EntityLabel::Loc;
    }
    if words.len() >= 2 && ORG_SUFFIXES.contains(&last) {
        return EntityLabel::Org;
    }
    if words.len() == 1 {
        return if is_acronym(first) {
            EntityLabel::Org
        } else {
            EntityLabel::Gpe
        };
    }
    // Runs start and end on capitalized tokens, so any short remaining run
    // is a plausible proper name. Wikipedia lookup filters the misses.
    if words.len() <= 5 {
        return EntityLabel::Person;
    }
    EntityLabel::Other
}

fn starts_uppercase(token: &str) -> bool {
    token
        .chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(|c| c.is_uppercase())
}

fn is_acronym(token: &str) -> bool {
    (2..=6).contains(&token.len()) && token.chars().all(|c| c.is_ascii_uppercase())
}

fn dedup_spans(spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    let mut seen = std::collections::HashSet::new();
    spans
        .into_iter()
        .filter(|span| seen.insert(normalize(&span.text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<EntitySpan> {
        HeuristicNer::new().entities(text)
    }

    fn texts(text: &str) -> Vec<String> {
        spans(text).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn quoted_title_is_work_of_art() {
        let found = spans("This author wrote 'Pride and Prejudice'");
        assert!(found.contains(&EntitySpan {
            text: "Pride and Prejudice".to_string(),
            label: EntityLabel::WorkOfArt,
        }));
    }

    #[test]
    fn sentence_initial_word_is_not_an_entity() {
        assert!(!texts("This author wrote 'Pride and Prejudice'")
            .iter()
            .any(|t| t == "This"));
    }

    #[test]
    fn two_capitalized_words_are_a_person() {
        let found = spans("Jane Austen");
        assert_eq!(
            found,
            vec![EntitySpan {
                text: "Jane Austen".to_string(),
                label: EntityLabel::Person,
            }]
        );
    }

    #[test]
    fn single_word_answer_is_kept() {
        let found = spans("Sweden");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Sweden");
    }

    #[test]
    fn acronym_is_an_org() {
        let found = spans("What country is home to the largest lake in the EU?");
        assert!(found.contains(&EntitySpan {
            text: "EU".to_string(),
            label: EntityLabel::Org,
        }));
    }

    #[test]
    fn connector_words_join_runs() {
        let found = spans("What King was victorious at the Battle of Agincourt in 1415?");
        assert!(found.contains(&EntitySpan {
            text: "Battle of Agincourt".to_string(),
            label: EntityLabel::Event,
        }));
    }

    #[test]
    fn facility_suffix_is_labelled() {
        let found = spans("The mausoleum lies in Riverside Park in Manhattan");
        assert!(found.contains(&EntitySpan {
            text: "Riverside Park".to_string(),
            label: EntityLabel::Fac,
        }));
        assert!(found.contains(&EntitySpan {
            text: "Manhattan".to_string(),
            label: EntityLabel::Gpe,
        }));
    }

    #[test]
    fn lake_prefix_is_a_location() {
        let found = spans("The largest lake is Lake Vänern");
        assert!(found.contains(&EntitySpan {
            text: "Lake Vänern".to_string(),
            label: EntityLabel::Loc,
        }));
    }

    #[test]
    fn interrogative_opener_is_stripped() {
        let found = texts("What King was victorious at the Battle of Agincourt in 1415?");
        assert!(!found.iter().any(|t| t.starts_with("What")));
    }

    #[test]
    fn no_entities_in_plain_text() {
        assert!(texts("the quick brown fox jumps over the lazy dog").is_empty());
    }

    #[test]
    fn duplicate_mentions_collapse() {
        let found = texts("Jane Austen admired Jane Austen");
        assert_eq!(found.iter().filter(|t| *t == "Jane Austen").count(), 1);
    }
}
