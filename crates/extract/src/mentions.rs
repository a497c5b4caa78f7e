use std::collections::HashMap;

use crate::normalizer::normalize;
use crate::schema::{EntityMention, MentionSource};

/// Deduplicating container for the mentions of one analysis run.
///
/// Keyed by normalized text; the first surface form seen wins, and an
/// explicit mention upgrades an implicit one with the same key.
#[derive(Default)]
pub struct MentionSet {
    by_key: HashMap<String, EntityMention>,
}

impl MentionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mention: EntityMention) {
        let key = normalize(&mention.text);
        if key.is_empty() {
            return;
        }
        match self.by_key.get_mut(&key) {
            Some(existing) => {
                if existing.source == MentionSource::Implicit
                    && mention.source == MentionSource::Explicit
                {
                    existing.source = MentionSource::Explicit;
                }
            }
            None => {
                self.by_key.insert(key, mention);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Consume the set in case-insensitive alphabetical order.
    pub fn into_sorted(self) -> Vec<EntityMention> {
        let mut mentions: Vec<EntityMention> = self.by_key.into_values().collect();
        mentions.sort_by_key(|m| m.text.to_lowercase());
        mentions
    }
}
