use anyhow::{Result, anyhow};
use std::env;

/// Application configuration, loaded once at startup. Missing credentials
/// are fatal here so no stage ever runs half-configured.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub anthropic_api_key: String,
    /// Identifying User-Agent the Wikimedia APIs require.
    pub wiki_user_agent: String,
    pub server_addr: String,

    pub structure_model: String,
    pub key_entity_model: String,

    /// Overrides for the public Wikimedia endpoints, mainly so tests and
    /// local mirrors can point the clients elsewhere.
    pub wiki_api_url: Option<String>,
    pub pageviews_api_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .map_err(|_| anyhow!("ANTHROPIC_API_KEY is not set"))?;
        let wiki_user_agent =
            env::var("WIKI_USER_AGENT").map_err(|_| anyhow!("WIKI_USER_AGENT is not set"))?;

        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let structure_model = env::var("LLM_STRUCTURE_MODEL")
            .unwrap_or_else(|_| "claude-3-haiku-20240307".to_string());
        // Key-entity detection is the subtler task, so it defaults to a
        // stronger model than structuring does.
        let key_entity_model = env::var("LLM_KEY_ENTITY_MODEL")
            .unwrap_or_else(|_| "claude-3-7-sonnet-20250219".to_string());

        let wiki_api_url = env::var("WIKI_API_URL").ok();
        let pageviews_api_url = env::var("PAGEVIEWS_API_URL").ok();

        Ok(Self {
            anthropic_api_key,
            wiki_user_agent,
            server_addr,
            structure_model,
            key_entity_model,
            wiki_api_url,
            pageviews_api_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_required_keys_and_endpoint_overrides() {
        unsafe {
            env::set_var("ANTHROPIC_API_KEY", "test-key");
            env::set_var("WIKI_USER_AGENT", "test-agent");
            env::set_var("WIKI_API_URL", "http://127.0.0.1:1/w/api.php");
            env::set_var("PAGEVIEWS_API_URL", "http://127.0.0.1:1/metrics");
        }
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.anthropic_api_key, "test-key");
        assert_eq!(
            config.wiki_api_url.as_deref(),
            Some("http://127.0.0.1:1/w/api.php")
        );
        assert_eq!(
            config.pageviews_api_url.as_deref(),
            Some("http://127.0.0.1:1/metrics")
        );

        unsafe {
            env::remove_var("WIKI_API_URL");
            env::remove_var("PAGEVIEWS_API_URL");
        }
        let config = AppConfig::from_env().unwrap();
        assert!(config.wiki_api_url.is_none());
        assert!(config.pageviews_api_url.is_none());
    }
}
