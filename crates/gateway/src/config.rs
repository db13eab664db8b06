/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Public project API key, attached to every request as `apikey`.
    pub api_key: String,
}

impl GatewayConfig {
    /// Build a config from explicit values. A trailing slash on the base
    /// URL is stripped so path joining stays uniform.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Load the config from environment variables.
    ///
    /// | Env Var             | Meaning                       |
    /// |---------------------|-------------------------------|
    /// | `SUPABASE_URL`      | backend base URL              |
    /// | `SUPABASE_ANON_KEY` | public project API key        |
    pub fn from_env() -> Self {
        let base_url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        let api_key = std::env::var("SUPABASE_ANON_KEY").expect("SUPABASE_ANON_KEY must be set");
        Self::new(base_url, api_key)
    }
}
