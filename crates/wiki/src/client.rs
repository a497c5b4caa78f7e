use anyhow::{Context, Result};
use serde_json::Value;

use crate::types::PageInfo;

const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const DISAMBIGUATION_CATEGORY: &str = "Category:All disambiguation pages";

/// MediaWiki query-API client for en.wikipedia. Wikimedia requires an
/// identifying User-Agent; construction fails without one.
#[derive(Clone)]
pub struct WikiClient {
    api_url: String,
    client: reqwest::Client,
}

impl WikiClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_api_url(DEFAULT_API_URL.to_string(), user_agent)
    }

    pub fn with_api_url(api_url: String, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build Wikipedia HTTP client")?;
        Ok(Self { api_url, client })
    }

    /// Look a title up, following redirects. `Ok(None)` means the page does
    /// not exist, which is a valid terminal outcome, not an error.
    pub async fn lookup(&self, title: &str) -> Result<Option<PageInfo>> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("redirects", "1"),
                ("prop", "info|pageprops|categories"),
                ("inprop", "url"),
                ("ppprop", "disambiguation"),
                ("clcategories", DISAMBIGUATION_CATEGORY),
                ("titles", title),
            ])
            .send()
            .await
            .context("Failed to send Wikipedia query")?;

        if !response.status().is_success() {
            anyhow::bail!("Wikipedia query failed: {}", response.status());
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse Wikipedia response")?;
        parse_lookup(&body)
    }

    /// Candidate links of a disambiguation page, in the order the API lists
    /// them. Only main-namespace links are requested.
    pub async fn links(&self, title: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "links"),
                ("plnamespace", "0"),
                ("pllimit", "max"),
                ("titles", title),
            ])
            .send()
            .await
            .context("Failed to send Wikipedia links query")?;

        if !response.status().is_success() {
            anyhow::bail!("Wikipedia links query failed: {}", response.status());
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse Wikipedia links response")?;
        parse_links(&body)
    }
}

pub(crate) fn parse_lookup(body: &Value) -> Result<Option<PageInfo>> {
    let pages = body["query"]["pages"]
        .as_array()
        .context("Invalid Wikipedia response format")?;
    let Some(page) = pages.first() else {
        return Ok(None);
    };
    if page["missing"].as_bool() == Some(true) || page["invalid"].as_bool() == Some(true) {
        return Ok(None);
    }

    let title = page["title"]
        .as_str()
        .context("Wikipedia page entry has no title")?
        .to_string();
    let length = page["length"].as_u64().unwrap_or(0);
    let url = match page["fullurl"].as_str() {
        Some(url) => url.to_string(),
        None => format!(
            "https://en.wikipedia.org/wiki/{}",
            urlencoding::encode(&title.replace(' ', "_"))
        ),
    };

    let has_disambig_prop = page["pageprops"].get("disambiguation").is_some();
    let has_disambig_category = page["categories"]
        .as_array()
        .map(|cats| {
            cats.iter()
                .any(|cat| cat["title"].as_str() == Some(DISAMBIGUATION_CATEGORY))
        })
        .unwrap_or(false);

    Ok(Some(PageInfo {
        title,
        length,
        url,
        is_disambiguation: has_disambig_prop || has_disambig_category,
    }))
}

pub(crate) fn parse_links(body: &Value) -> Result<Vec<String>> {
    let pages = body["query"]["pages"]
        .as_array()
        .context("Invalid Wikipedia response format")?;
    let Some(page) = pages.first() else {
        return Ok(Vec::new());
    };
    let Some(links) = page["links"].as_array() else {
        return Ok(Vec::new());
    };
    Ok(links
        .iter()
        .filter_map(|link| link["title"].as_str())
        .map(|title| title.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_normal_page() {
        let body = json!({
            "query": {
                "pages": [{
                    "pageid": 15782,
                    "title": "Jane Austen",
                    "length": 128_755,
                    "fullurl": "https://en.wikipedia.org/wiki/Jane_Austen"
                }]
            }
        });
        let page = parse_lookup(&body).unwrap().unwrap();
        assert_eq!(page.title, "Jane Austen");
        assert_eq!(page.length, 128_755);
        assert!(!page.is_disambiguation);
    }

    #[test]
    fn missing_page_is_none() {
        let body = json!({
            "query": {
                "pages": [{"title": "Xyzzyplugh", "missing": true}]
            }
        });
        assert_eq!(parse_lookup(&body).unwrap(), None);
    }

    #[test]
    fn detects_disambiguation_by_pageprop() {
        let body = json!({
            "query": {
                "pages": [{
                    "title": "Mercury",
                    "length": 10_000,
                    "fullurl": "https://en.wikipedia.org/wiki/Mercury",
                    "pageprops": {"disambiguation": ""}
                }]
            }
        });
        assert!(parse_lookup(&body).unwrap().unwrap().is_disambiguation);
    }

    #[test]
    fn detects_disambiguation_by_category() {
        let body = json!({
            "query": {
                "pages": [{
                    "title": "Mercury",
                    "length": 10_000,
                    "fullurl": "https://en.wikipedia.org/wiki/Mercury",
                    "categories": [{"ns": 14, "title": "Category:All disambiguation pages"}]
                }]
            }
        });
        assert!(parse_lookup(&body).unwrap().unwrap().is_disambiguation);
    }

    #[test]
    fn builds_url_when_absent() {
        let body = json!({
            "query": {"pages": [{"title": "Grant's Tomb", "length": 1}]}
        });
        let page = parse_lookup(&body).unwrap().unwrap();
        assert_eq!(page.url, "https://en.wikipedia.org/wiki/Grant%27s_Tomb");
    }

    #[test]
    fn links_preserve_listing_order() {
        let body = json!({
            "query": {
                "pages": [{
                    "title": "Mercury",
                    "links": [
                        {"ns": 0, "title": "Mercury (planet)"},
                        {"ns": 0, "title": "Mercury (element)"},
                        {"ns": 0, "title": "Mercury (mythology)"}
                    ]
                }]
            }
        });
        assert_eq!(
            parse_links(&body).unwrap(),
            vec![
                "Mercury (planet)",
                "Mercury (element)",
                "Mercury (mythology)"
            ]
        );
    }

    #[test]
    fn page_without_links_is_empty() {
        let body = json!({"query": {"pages": [{"title": "Mercury"}]}});
        assert!(parse_links(&body).unwrap().is_empty());
    }
}
