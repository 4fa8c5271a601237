use anyhow::{Context, Result};
use dotenvy::dotenv;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_summarizer_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_file_size: usize,
    /// Shared secret expected in the `X-Service-Key` header.
    pub service_key: Option<String>,
    pub openai_key: Option<String>,
    pub summarizer_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: default_host(),
            port: default_port(),
            max_file_size: default_max_file_size(),
            service_key: None,
            openai_key: None,
            summarizer_model: default_summarizer_model(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", raw))?,
            None => default_port(),
        };

        let max_file_size = match non_empty("MAX_FILE_SIZE") {
            Some(raw) => raw.parse::<usize>()
                .with_context(|| format!("Invalid MAX_FILE_SIZE value: {}", raw))?,
            None => default_max_file_size(),
        };

        let service_key = non_empty("SERVICE_KEY");
        if service_key.is_none() {
            tracing::warn!("SERVICE_KEY is not set; all analysis requests will be rejected");
        }

        Ok(Config {
            host: non_empty("HOST").unwrap_or_else(default_host),
            port,
            max_file_size,
            service_key,
            openai_key: non_empty("OPENAI_API_KEY"),
            summarizer_model: non_empty("SUMMARIZER_MODEL").unwrap_or_else(default_summarizer_model),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
