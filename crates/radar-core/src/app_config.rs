use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub brands_path: PathBuf,
    pub openrouter_api_key: Option<String>,
    pub llm_url: String,
    pub llm_model: String,
    pub llm_request_timeout_secs: u64,
    /// Pause between consecutive classification calls.
    pub llm_inter_request_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("brands_path", &self.brands_path)
            .field(
                "openrouter_api_key",
                &self.openrouter_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("llm_url", &self.llm_url)
            .field("llm_model", &self.llm_model)
            .field("llm_request_timeout_secs", &self.llm_request_timeout_secs)
            .field(
                "llm_inter_request_delay_ms",
                &self.llm_inter_request_delay_ms,
            )
            .finish()
    }
}
