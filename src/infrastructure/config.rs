use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub graphite: GraphiteSettings,
    #[serde(default)]
    pub templates: TemplatesSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphiteSettings {
    pub url: String,
    /// Base URL used in image links, if browsers reach graphite-web elsewhere
    #[serde(default)]
    pub render_url: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GraphiteSettings {
    pub fn render_base(&self) -> &str {
        self.render_url.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplatesSettings {
    #[serde(default = "default_templates_path")]
    pub path: PathBuf,
}

impl Default for TemplatesSettings {
    fn default() -> Self {
        Self {
            path: default_templates_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_templates_path() -> PathBuf {
    PathBuf::from("config/templates")
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/graphs")
}

/// Load `<name>.toml` (or any format the config crate recognises), overlaid by
/// `GRAPHS__SECTION__KEY` environment variables
pub fn load_app_config_from(name: &str) -> anyhow::Result<AppConfig> {
    load_app_config_with(name, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("GRAPHS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_app_config_with(name: &str, environment: config::Environment) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name))
        .add_source(environment)
        .build()?;

    Ok(settings.try_deserialize()?)
}
