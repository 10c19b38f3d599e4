use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub token_path: String,
    pub account_email: String,
    pub account_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://jsonplaceholder.typicode.com".into(),
            token_path: "./data/session.json".into(),
            account_email: "test@mail.com".into(),
            account_password: "changeme".into(),
        }
    }
}

/// Defaults, overridden by `postdash.toml` when present, overridden in turn
/// by `APP__*` environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("postdash.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("token_path") {
                settings.token_path = v.clone();
            }
            if let Some(v) = file_cfg.get("account_email") {
                settings.account_email = v.clone();
            }
            if let Some(v) = file_cfg.get("account_password") {
                settings.account_password = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__TOKEN_PATH") {
        settings.token_path = v;
    }
    if let Ok(v) = std::env::var("APP__ACCOUNT_EMAIL") {
        settings.account_email = v;
    }
    if let Ok(v) = std::env::var("APP__ACCOUNT_PASSWORD") {
        settings.account_password = v;
    }

    settings
}
