use serde::{Deserialize, Serialize};

/// Where a mention came from: the NER pass over the text itself, or the
/// LLM's guess at the implicit key entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionSource {
    Explicit,
    Implicit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: String,
    pub source: MentionSource,
}

/// A labelled span produced by a NER model.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Org,
    Loc,
    Gpe,
    Fac,
    Product,
    Event,
    WorkOfArt,
    Norp,
    Law,
    Other,
}

impl EntityLabel {
    /// Labels worth looking up on Wikipedia. Everything else (dates, numbers,
    /// unclassifiable spans) is filtered out of the pipeline.
    pub fn is_kept(self) -> bool {
        !matches!(self, EntityLabel::Other)
    }
}
