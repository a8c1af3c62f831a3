use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
        }
    }
}

/// Defaults, overridden by `docchat.toml` in the working directory, overridden
/// by the `DOCCHAT_SERVER_URL` environment variable.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("docchat.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("DOCCHAT_SERVER_URL") {
        settings.server_url = v;
    }

    settings.server_url = normalize_server_url(&settings.server_url);
    settings
}

fn normalize_server_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().server_url;
    }
    // Endpoint paths are appended as "/upload/" and "/ask/".
    raw.trim_end_matches('/').to_string()
}
