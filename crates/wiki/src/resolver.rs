use anyhow::Result;
use std::collections::HashSet;
use tracing::debug;

use crate::client::WikiClient;
use crate::retry::RetryPolicy;
use crate::text::{overlap_score, significant_words, to_title_case};
use crate::types::PageInfo;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved {
        page: PageInfo,
        /// True when the title went through a disambiguation page.
        is_disambiguated: bool,
    },
    /// No matching article. Terminal for this entity, never fatal for the run.
    Unresolved,
}

/// Maps an entity name to a Wikipedia article.
///
/// Direct hits resolve immediately. Disambiguation pages are resolved by
/// scoring each candidate link for lexical overlap with the question/answer
/// context; the highest score wins, ties go to the first-listed candidate,
/// and when nothing scores the entity stays unresolved rather than guessed.
pub struct Resolver {
    wiki: WikiClient,
    retry: RetryPolicy,
}

impl Resolver {
    pub fn new(wiki: WikiClient) -> Self {
        Self::with_retry(wiki, RetryPolicy::default())
    }

    pub fn with_retry(wiki: WikiClient, retry: RetryPolicy) -> Self {
        Self { wiki, retry }
    }

    pub async fn resolve(&self, name: &str, context: &str) -> Result<Resolution> {
        let wiki = &self.wiki;
        let title = to_title_case(name);

        let page = self
            .retry
            .run("wikipedia_lookup", || wiki.lookup(&title))
            .await?;
        let Some(page) = page else {
            debug!(entity = name, "Page not found on Wikipedia");
            return Ok(Resolution::Unresolved);
        };

        if !page.is_disambiguation {
            return Ok(Resolution::Resolved {
                page,
                is_disambiguated: false,
            });
        }

        let candidates = self
            .retry
            .run("disambiguation_links", || wiki.links(&page.title))
            .await?;
        let context_words = significant_words(context);

        let Some(candidate) = pick_candidate(&candidates, &context_words) else {
            debug!(
                entity = name,
                candidates = candidates.len(),
                "No disambiguation candidate scored above threshold"
            );
            return Ok(Resolution::Unresolved);
        };
        let candidate = candidate.to_string();
        debug!(entity = name, candidate = %candidate, "Disambiguation resolved");

        let resolved = self
            .retry
            .run("candidate_lookup", || wiki.lookup(&candidate))
            .await?;
        match resolved {
            // The selected candidate can itself be missing or (rarely) another
            // disambiguation page; both count as unresolved.
            Some(page) if !page.is_disambiguation => Ok(Resolution::Resolved {
                page,
                is_disambiguated: true,
            }),
            _ => Ok(Resolution::Unresolved),
        }
    }
}

/// Highest lexical-overlap candidate, requiring at least one shared
/// significant word. Strict `>` keeps the first-listed candidate on ties.
pub(crate) fn pick_candidate<'a>(
    candidates: &'a [String],
    context: &HashSet<String>,
) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        if candidate.contains("(disambiguation)") {
            continue;
        }
        let score = overlap_score(candidate, context);
        if score == 0 {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn highest_overlap_wins() {
        let list = candidates(&[
            "Mercury (mythology)",
            "Mercury (planet)",
            "Mercury (element)",
        ]);
        let context = significant_words("Which planet is closest to the Sun? Mercury");
        assert_eq!(pick_candidate(&list, &context), Some("Mercury (planet)"));
    }

    #[test]
    fn tie_goes_to_first_listed() {
        let list = candidates(&["Intermezzo (novel)", "Intermezzo (film)"]);
        // "intermezzo" appears in both titles and in the context; neither
        // parenthetical matches, so the scores are equal.
        let context = significant_words("the 2024 work titled Intermezzo");
        assert_eq!(pick_candidate(&list, &context), Some("Intermezzo (novel)"));
    }

    #[test]
    fn nothing_above_threshold_is_none() {
        let list = candidates(&["Mercury (element)", "Mercury Records"]);
        let context = significant_words("a Roman god of commerce");
        assert_eq!(pick_candidate(&list, &context), None);
    }

    #[test]
    fn disambiguation_links_are_skipped() {
        let list = candidates(&["Mercury (disambiguation)", "Mercury (planet)"]);
        let context = significant_words("the smallest planet");
        assert_eq!(pick_candidate(&list, &context), Some("Mercury (planet)"));
    }

    #[test]
    fn empty_candidate_list_is_none() {
        let context = significant_words("anything at all");
        assert_eq!(pick_candidate(&[], &context), None);
    }
}
