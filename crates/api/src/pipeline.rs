use anyhow::Result;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use extract::{EntityMention, HeuristicNer, MentionSet, MentionSource};
use llm::AnthropicClient;
use structure::{QAPair, Structurer};
use wiki::{EntityStats, PageviewsClient, Resolution, Resolver, RetryPolicy};

use crate::metrics::Metrics;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    /// Also look up entities found in the question text, not just the answer.
    pub include_question_entities: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    /// Resolved to an article; stats may still be absent.
    Found,
    /// No matching article. A valid terminal state, not an error.
    NotFound,
    /// Lookup kept failing after retry.
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub name: String,
    pub source: MentionSource,
    pub status: EntityStatus,
    pub title: Option<String>,
    pub url: Option<String>,
    pub is_disambiguated: bool,
    /// Absent when the stats fetch failed for this entity.
    pub stats: Option<EntityStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PairReport {
    pub question: String,
    pub answer: String,
    pub entities: Vec<EntityReport>,
}

/// The per-run pipeline: structure → extract → implicit entity → resolve →
/// stats. Runs are independent and hold no state between invocations.
pub struct Analyzer {
    structurer: Structurer,
    ner: HeuristicNer,
    llm: AnthropicClient,
    key_entity_model: String,
    resolver: Resolver,
    pageviews: PageviewsClient,
    stats_retry: RetryPolicy,
    metrics: Arc<Metrics>,
}

impl Analyzer {
    pub fn new(
        structurer: Structurer,
        llm: AnthropicClient,
        key_entity_model: String,
        resolver: Resolver,
        pageviews: PageviewsClient,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            structurer,
            ner: HeuristicNer::new(),
            llm,
            key_entity_model,
            resolver,
            pageviews,
            stats_retry: RetryPolicy::default(),
            metrics,
        }
    }

    /// Run the full pipeline over raw input. Only structuring failures
    /// propagate; every downstream failure is folded into the affected
    /// entity's report.
    pub async fn analyze(
        &self,
        raw_text: &str,
        options: AnalyzeOptions,
    ) -> Result<Vec<PairReport>> {
        let pairs = self.structurer.structure(raw_text).await?;

        let mut reports = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            let report = self.analyze_pair(pair, options).await;
            self.metrics.record_pair(report.entities.len());
            reports.push(report);
        }
        Ok(reports)
    }

    async fn analyze_pair(&self, pair: &QAPair, options: AnalyzeOptions) -> PairReport {
        let mut mentions = MentionSet::new();

        // 1. Explicit mentions from the answer; the literal answer always
        //    gets a lookup even when the NER model misses it.
        for name in extract::extract_entities(&self.ner, &pair.answer) {
            mentions.insert(EntityMention {
                text: name,
                source: MentionSource::Explicit,
            });
        }
        mentions.insert(EntityMention {
            text: pair.answer.trim().to_string(),
            source: MentionSource::Explicit,
        });

        if options.include_question_entities {
            for name in extract::extract_entities(&self.ner, &pair.question) {
                mentions.insert(EntityMention {
                    text: name,
                    source: MentionSource::Explicit,
                });
            }
        }

        // 2. Implicit key entity from the LLM.
        for name in self.implicit_entities(pair).await {
            mentions.insert(EntityMention {
                text: name,
                source: MentionSource::Implicit,
            });
        }

        debug!(
            question = %pair.question,
            mentions = mentions.len(),
            "Mentions collected"
        );

        // 3. Resolve and fetch stats, one independent future per entity.
        //    A failure in one never aborts its siblings.
        let context = format!("{} {}", pair.question, pair.answer);
        let entities = join_all(
            mentions
                .into_sorted()
                .into_iter()
                .map(|mention| self.report_entity(mention, &context)),
        )
        .await;

        PairReport {
            question: pair.question.clone(),
            answer: pair.answer.clone(),
            entities,
        }
    }

    /// Single attempt; any failure or unparseable reply degrades to "no
    /// implicit entities" for this run.
    async fn implicit_entities(&self, pair: &QAPair) -> Vec<String> {
        let prompt = llm::prompt::build_key_entity_prompt(&pair.question, &pair.answer);
        match self.llm.complete(&self.key_entity_model, 50, &prompt).await {
            Ok(reply) => llm::parse_entity_names(&reply),
            Err(e) => {
                warn!(error = %e, "Key entity request failed, continuing without implicit entities");
                Vec::new()
            }
        }
    }

    async fn report_entity(&self, mention: EntityMention, context: &str) -> EntityReport {
        let mut report = EntityReport {
            name: mention.text.clone(),
            source: mention.source,
            status: EntityStatus::NotFound,
            title: None,
            url: None,
            is_disambiguated: false,
            stats: None,
            error: None,
        };

        let page = match self.resolver.resolve(&mention.text, context).await {
            Ok(Resolution::Resolved {
                page,
                is_disambiguated,
            }) => {
                report.is_disambiguated = is_disambiguated;
                page
            }
            Ok(Resolution::Unresolved) => {
                self.metrics.record_unresolved();
                return report;
            }
            Err(e) => {
                self.metrics.record_lookup_failure();
                warn!(entity = %mention.text, error = %e, "Wikipedia lookup failed");
                report.status = EntityStatus::Unavailable;
                report.error = Some(format!("lookup failed: {e:#}"));
                return report;
            }
        };

        report.status = EntityStatus::Found;
        report.title = Some(page.title.clone());
        report.url = Some(page.url.clone());

        let pageviews = &self.pageviews;
        let title = &page.title;
        match self
            .stats_retry
            .run("pageviews", || pageviews.views_last_year(title))
            .await
        {
            Ok(views) => {
                report.stats = Some(EntityStats {
                    title: page.title.clone(),
                    views_last_year: views,
                    page_length: page.length,
                });
            }
            Err(e) => {
                self.metrics.record_stats_failure();
                warn!(entity = %page.title, error = %e, "Pageviews fetch failed");
                report.error = Some("stats unavailable".to_string());
            }
        }
        report
    }
}
