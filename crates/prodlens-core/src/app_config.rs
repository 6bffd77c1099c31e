use std::net::SocketAddr;

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
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Public base URL of this server, used to build image proxy links.
    pub server_base_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub brightdata_api_key: String,
    pub brightdata_base_url: String,
    pub brightdata_dataset_id: String,
    /// Upper bound on model calls during tool-augmented extraction.
    pub max_steps: u32,
    pub upstream_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("server_base_url", &self.server_base_url)
            .field("openai_api_key", &"[redacted]")
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("brightdata_api_key", &"[redacted]")
            .field("brightdata_base_url", &self.brightdata_base_url)
            .field("brightdata_dataset_id", &self.brightdata_dataset_id)
            .field("max_steps", &self.max_steps)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}
