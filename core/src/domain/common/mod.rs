use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o";
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 1000;

#[derive(Clone, Debug, Default)]
pub struct NutriScanConfig {
    /// `None` selects the offline analyzer.
    pub llm: Option<LLMConfig>,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub max_tokens: u32,
    pub timeout_secs: Option<u64>,
}

impl LLMConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_LLM_MODEL.to_string(),
            endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            max_tokens: DEFAULT_LLM_MAX_TOKENS,
            timeout_secs: None,
        }
    }
}

impl NutriScanConfig {
    /// Builds a config from an optional credential. Blank keys count as absent.
    pub fn from_api_key(api_key: Option<String>) -> Self {
        let llm = api_key
            .filter(|key| !key.trim().is_empty())
            .map(LLMConfig::new);

        Self { llm }
    }
}

pub fn generate_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Time-ordered v7 id; ids generated within one process never repeat and
/// sort in creation order.
pub fn generate_uuid_v7() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_means_offline() {
        assert!(NutriScanConfig::from_api_key(None).llm.is_none());
        assert!(NutriScanConfig::from_api_key(Some(String::new())).llm.is_none());
        assert!(NutriScanConfig::from_api_key(Some("   ".into())).llm.is_none());
    }

    #[test]
    fn api_key_fills_llm_defaults() {
        let config = NutriScanConfig::from_api_key(Some("sk-test".into()));
        let llm = config.llm.expect("llm config");
        assert_eq!(llm.api_key, "sk-test");
        assert_eq!(llm.model, DEFAULT_LLM_MODEL);
        assert_eq!(llm.endpoint, DEFAULT_LLM_ENDPOINT);
        assert_eq!(llm.max_tokens, 1000);
        assert_eq!(llm.timeout_secs, None);
    }

    #[test]
    fn uuid_v7_is_monotonic() {
        let ids: Vec<Uuid> = (0..64).map(|_| generate_uuid_v7()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
