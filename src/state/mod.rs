pub(crate) mod autosave;

use crate::api::ApiClient;
use crate::config::AppConfig;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
}

impl AppState {
    /// Everything downstream reads configuration through the client built here.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::new(config.api_base_url.clone())),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
