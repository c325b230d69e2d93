use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration, read once at startup and injected from there on.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct AppConfig {
    /// Backend origin, e.g. `http://localhost:8000`. Required for any API call.
    pub api_base_url: Option<String>,
    /// `tracing` filter directive.
    pub log_level: String,
}

impl AppConfig {
    /// Resolve from `window.ENV`, then from the build environment.
    ///
    /// We accept both `API_BASE_URL` (deploy docs) and `api_base_url` on
    /// `window.ENV`, matching how the hosting page injects settings.
    pub fn load() -> Self {
        let from_window = |keys: &[&str]| keys.iter().find_map(|k| window_env_string(k));

        Self::resolve(
            from_window(&["API_BASE_URL", "api_base_url"]),
            option_env!("API_BASE_URL").map(str::to_string),
            from_window(&["LOG_LEVEL", "log_level"]),
        )
    }

    pub(crate) fn resolve(
        window_base_url: Option<String>,
        build_base_url: Option<String>,
        log_level: Option<String>,
    ) -> Self {
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        Self {
            api_base_url: non_blank(window_base_url).or_else(|| non_blank(build_base_url)),
            log_level: non_blank(log_level).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

fn window_env_string(key: &str) -> Option<String> {
    if !cfg!(target_arch = "wasm32") {
        return None;
    }

    let env = web_sys::window()?.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }
    js_sys::Reflect::get(&env, &key.into()).ok()?.as_string()
}
