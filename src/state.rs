use crate::config::ProviderConfig;

// app's shared state, read-only at request time
pub struct AppState {
    pub client: reqwest::Client,
    pub config: ProviderConfig,
}

impl AppState {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}
