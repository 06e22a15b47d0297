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
    /// Gourmet API credential. Absence is reported on the first fetch, not at startup.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub locate_timeout_secs: u64,
    pub bookmarks_dir: PathBuf,
    pub amenity_keywords_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("locate_timeout_secs", &self.locate_timeout_secs)
            .field("bookmarks_dir", &self.bookmarks_dir)
            .field("amenity_keywords_path", &self.amenity_keywords_path)
            .finish()
    }
}
