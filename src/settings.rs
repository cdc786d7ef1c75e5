use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "run_mode", rename_all = "snake_case")]
pub enum RunMode {
    Download { out_file: String },
    Watch,
}

#[derive(Debug, Deserialize)]
pub struct AppSettings {
    #[serde(flatten)]
    pub run_mode: RunMode,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "https://api.binance.com".into()
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut s = Config::new();
        s.merge(Environment::new().separator("__"))?;
        s.try_into()
    }
}
