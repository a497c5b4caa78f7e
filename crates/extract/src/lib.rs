pub mod mentions;
pub mod ner;
pub mod normalizer;
pub mod schema;

pub use mentions::MentionSet;
pub use ner::{HeuristicNer, NerModel};
pub use normalizer::normalize;
pub use schema::{EntityLabel, EntityMention, EntitySpan, MentionSource};

/// Run a NER model over text and keep only the span texts worth a Wikipedia
/// lookup (kept labels, non-empty after trimming).
pub fn extract_entities(model: &dyn NerModel, text: &str) -> Vec<String> {
    model
        .entities(text)
        .into_iter()
        .filter(|span| span.label.is_kept())
        .map(|span| span.text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_entities() {
        let model = HeuristicNer::new();
        assert!(extract_entities(&model, "").is_empty());
    }
}
