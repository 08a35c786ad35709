use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/admin.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            log: "info".to_string(),
        }
    }
}

/// Layered load: defaults, then the TOML file, then `REMIT_ADMIN_*`
/// environment variables.
pub fn load(config_path: &str) -> Result<Settings, config::ConfigError> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("REMIT_ADMIN"));
    builder.build()?.try_deserialize()
}
