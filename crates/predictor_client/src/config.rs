//! Client settings: where the prediction service lives.

use std::{collections::HashMap, fs};

use anyhow::Context;
use url::Url;

/// The base URL is externally supplied configuration with a
/// local-development fallback; endpoint paths are appended to it and it is
/// never hardcoded at call sites.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
        }
    }
}

/// Defaults, then `predictor.toml` in the working directory, then
/// environment variables, in increasing precedence.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("predictor.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("PREDICTOR_API_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    settings
}

/// Validates the configured base URL and strips trailing slashes so the
/// endpoint path can be appended. An empty value falls back to the default.
pub fn prepare_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(Settings::default().api_base_url);
    }

    let url =
        Url::parse(raw).with_context(|| format!("invalid prediction service url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!(
            "unsupported scheme '{}' in prediction service url '{raw}'",
            url.scheme()
        );
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_targets_local_development() {
        assert_eq!(Settings::default().api_base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn prepare_strips_trailing_slashes() {
        assert_eq!(
            prepare_base_url("http://api.example.com/").expect("url"),
            "http://api.example.com"
        );
    }

    #[test]
    fn prepare_falls_back_on_empty_value() {
        assert_eq!(
            prepare_base_url("  ").expect("url"),
            Settings::default().api_base_url
        );
    }

    #[test]
    fn prepare_rejects_non_http_schemes() {
        assert!(prepare_base_url("ftp://api.example.com").is_err());
        assert!(prepare_base_url("not a url").is_err());
    }

    #[test]
    fn environment_overrides_default_base_url() {
        std::env::set_var("APP__API_BASE_URL", "http://10.0.0.5:9000");
        let settings = load_settings();
        std::env::remove_var("APP__API_BASE_URL");
        assert_eq!(settings.api_base_url, "http://10.0.0.5:9000");
    }
}
