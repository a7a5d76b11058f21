use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub google_api_key: String,
    pub openai_api_key: String,
    pub openrouter_api_key: String,
    pub default_provider: String,
    pub default_model: String,
}

impl LLMConfig {
    /// API key for the configured default provider, if one is set.
    pub fn active_api_key(&self) -> Option<String> {
        let key = match self.default_provider.as_str() {
            "google" => &self.google_api_key,
            "openai" => &self.openai_api_key,
            "openrouter" => &self.openrouter_api_key,
            _ => return None,
        };
        if key.is_empty() {
            None
        } else {
            Some(key.clone())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub serpapi_key: String,
    pub wiki_max_results: usize,
    pub arxiv_max_results: usize,
    pub web_max_results: usize,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            llm: LLMConfig {
                google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
                openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                openrouter_api_key: env::var("OPENROUTER_API_KEY").unwrap_or_default(),
                default_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "google".to_string()),
                default_model: env::var("LLM_MODEL")
                    .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            },
            search: SearchConfig {
                serpapi_key: env::var("SERPAPI_KEY").unwrap_or_default(),
                wiki_max_results: env::var("WIKI_MAX_RESULTS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()?,
                arxiv_max_results: env::var("ARXIV_MAX_RESULTS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
                web_max_results: env::var("WEB_MAX_RESULTS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
                http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()?,
            },
        })
    }
}
