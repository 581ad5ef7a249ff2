use crate::app::{ApiConfig, AppConfig};
use crate::error::Result;
use crate::ui::UiConfig;
use anyhow::anyhow;
use config::{AppStrategy, constants as config_constants, create_strategy, resolve_dir};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub ui: UiConfig,
    pub api: ApiConfig,

    // === System state ===
    pub config_path: PathBuf,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
struct RawConfig {
    app: AppConfig,
    ui: UiConfig,
    api: ApiConfig,
}

impl Config {
    /// `api_url` comes from the environment and wins over the file
    fn from_raw(raw: RawConfig, api_url: Option<String>, config_path: PathBuf) -> Self {
        let mut api = raw.api;
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            api.base_url = url;
        }

        Self {
            app: raw.app,
            ui: raw.ui,
            api,
            config_path,
        }
    }

    fn config_path() -> Result<PathBuf> {
        let strategy = create_strategy().map_err(|_| anyhow!("Home dir not found"))?;

        Ok(
            resolve_dir("CONFIG_DIRECTORY", &strategy, |s| Some(s.config_dir()))
                .join(config_constants::GUI_CONFIG_FILE_NAME),
        )
    }

    fn api_url_from_env() -> Option<String> {
        std::env::var(config_constants::API_URL_ENV).ok()
    }

    pub fn load() -> Result<Config> {
        let config_path = Self::config_path()?;

        let raw_config: RawConfig = match std::fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => RawConfig::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self::from_raw(
            raw_config,
            Self::api_url_from_env(),
            config_path,
        ))
    }

    #[cfg(test)]
    pub fn load_str(config_str: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(config_str)?;
        Ok(Self::from_raw(raw, Self::api_url_from_env(), Self::config_path()?))
    }
}
