//! Service configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded by the binaries). Every field has a default so the service can
//! start with no configuration at all, using the offline mock engine.

use crate::classifier::ClassifierRules;
use crate::error::AdvisorError;
use crate::Result;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineProvider {
    Groq,
    Gemini,
    Mock,
}

impl FromStr for EngineProvider {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(EngineProvider::Groq),
            "gemini" => Ok(EngineProvider::Gemini),
            "mock" | "offline" => Ok(EngineProvider::Mock),
            other => Err(AdvisorError::Config(format!(
                "unknown ADVISOR_ENGINE {:?} (expected groq, gemini or mock)",
                other
            ))),
        }
    }
}

impl fmt::Display for EngineProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngineProvider::Groq => "groq",
            EngineProvider::Gemini => "gemini",
            EngineProvider::Mock => "mock",
        };
        write!(f, "{}", s)
    }
}

/// Settings for the downstream advisory engine
#[derive(Clone)]
pub struct EngineConfig {
    pub provider: EngineProvider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Upper bound on a single engine call
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Gemini only: attach the Google Search tool
    pub web_search: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: EngineProvider::Mock,
            api_key: String::new(),
            model: String::new(),
            base_url: String::new(),
            timeout_secs: 120,
            temperature: 0.3,
            max_output_tokens: 4096,
            web_search: true,
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("provider", &self.provider)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("web_search", &self.web_search)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub host: String,
    pub port: u16,
    pub engine: EngineConfig,
    pub classifier: ClassifierRules,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            engine: EngineConfig::default(),
            classifier: ClassifierRules::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = AdvisorConfig::default();

        let port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => parse_value("PORT", &raw)?,
            None => defaults.port,
        };
        let host = get("HOST").unwrap_or(defaults.host);

        let groq_key = get("GROQ_API_KEY");
        let gemini_key = get("GEMINI_API_KEY");

        let provider = match get("ADVISOR_ENGINE") {
            Some(raw) => raw.parse()?,
            None if groq_key.is_some() => EngineProvider::Groq,
            None if gemini_key.is_some() => EngineProvider::Gemini,
            None => EngineProvider::Mock,
        };

        let mut engine = EngineConfig {
            provider,
            ..EngineConfig::default()
        };

        match provider {
            EngineProvider::Groq => {
                engine.api_key = groq_key.ok_or_else(|| {
                    AdvisorError::Config("GROQ_API_KEY is required for the groq engine".into())
                })?;
                engine.model = get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.into());
                engine.base_url =
                    get("GROQ_BASE_URL").unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.into());
            }
            EngineProvider::Gemini => {
                engine.api_key = gemini_key.ok_or_else(|| {
                    AdvisorError::Config("GEMINI_API_KEY is required for the gemini engine".into())
                })?;
                engine.model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());
                engine.base_url =
                    get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into());
                if let Some(raw) = get("GEMINI_WEB_SEARCH") {
                    engine.web_search = parse_bool("GEMINI_WEB_SEARCH", &raw)?;
                }
            }
            EngineProvider::Mock => {}
        }
        engine.base_url = engine.base_url.trim_end_matches('/').to_string();

        if let Some(raw) = get("ADVISOR_ENGINE_TIMEOUT_SECS") {
            engine.timeout_secs = parse_value("ADVISOR_ENGINE_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = get("ADVISOR_TEMPERATURE") {
            engine.temperature = parse_value("ADVISOR_TEMPERATURE", &raw)?;
        }
        if let Some(raw) = get("ADVISOR_MAX_OUTPUT_TOKENS") {
            engine.max_output_tokens = parse_value("ADVISOR_MAX_OUTPUT_TOKENS", &raw)?;
        }

        let mut classifier = defaults.classifier;
        if let Some(raw) = get("ADVISOR_SYMBOL_MAX_WORDS") {
            classifier.max_symbol_words = parse_value("ADVISOR_SYMBOL_MAX_WORDS", &raw)?;
        }
        if let Some(raw) = get("ADVISOR_QUESTION_KEYWORDS") {
            let keywords: Vec<String> = raw
                .split(',')
                .map(|kw| kw.trim().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(AdvisorError::Config(
                    "ADVISOR_QUESTION_KEYWORDS must list at least one keyword".into(),
                ));
            }
            classifier.question_keywords = keywords;
        }

        Ok(Self {
            host,
            port,
            engine,
            classifier,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AdvisorError::Config(format!("invalid value for {}: {:?}", key, raw)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AdvisorError::Config(format!(
            "invalid value for {}: {:?}",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AdvisorConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AdvisorConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_use_mock_engine() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.engine.provider, EngineProvider::Mock);
        assert_eq!(config.classifier, ClassifierRules::default());
    }

    #[test]
    fn test_provider_inferred_from_keys() {
        let config = config_from(&[("GROQ_API_KEY", "gsk_test")]).unwrap();
        assert_eq!(config.engine.provider, EngineProvider::Groq);
        assert_eq!(config.engine.model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.engine.base_url, DEFAULT_GROQ_BASE_URL);

        let config = config_from(&[("GEMINI_API_KEY", "g-test")]).unwrap();
        assert_eq!(config.engine.provider, EngineProvider::Gemini);
        assert_eq!(config.engine.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_explicit_provider_requires_key() {
        let err = config_from(&[("ADVISOR_ENGINE", "gemini")]).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let err = config_from(&[("ADVISOR_ENGINE", "openai")]).unwrap_err();
        assert!(err.to_string().contains("unknown ADVISOR_ENGINE"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_PORT", "9090"),
            ("ADVISOR_ENGINE", "groq"),
            ("GROQ_API_KEY", "gsk_test"),
            ("GROQ_BASE_URL", "http://localhost:1234/v1/"),
            ("ADVISOR_ENGINE_TIMEOUT_SECS", "15"),
            ("ADVISOR_SYMBOL_MAX_WORDS", "2"),
            ("ADVISOR_QUESTION_KEYWORDS", "What, price ,,"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.engine.base_url, "http://localhost:1234/v1");
        assert_eq!(config.engine.timeout_secs, 15);
        assert_eq!(config.classifier.max_symbol_words, 2);
        assert_eq!(config.classifier.question_keywords, vec!["what", "price"]);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(AdvisorError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("GEMINI_API_KEY", "k"), ("GEMINI_WEB_SEARCH", "maybe")]),
            Err(AdvisorError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("ADVISOR_QUESTION_KEYWORDS", " , ")]),
            Err(AdvisorError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = config_from(&[("GROQ_API_KEY", "gsk_secret")]).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
