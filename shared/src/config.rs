/// Backend used when nothing is configured at build time
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// How long a toast stays on screen
pub const DEFAULT_TOAST_DURATION_MS: u32 = 3000;

/// Where the REST API lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Read `EXPENSE_API_BASE_URL` baked in at compile time, or fall back to the default
    pub fn from_env() -> Self {
        let base_url = option_env!("EXPENSE_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Absolute URL for an endpoint path such as `/api/transactions`
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
