use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub shuffle: ShuffleConfig,
}

/// Location of the JSON files shared with the web backend.
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_meals_file")]
    pub meals_file: String,
    #[serde(default = "default_recipes_file")]
    pub recipes_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            meals_file: default_meals_file(),
            recipes_file: default_recipes_file(),
        }
    }
}

impl DataConfig {
    pub fn meals_path(&self) -> PathBuf {
        self.dir.join(&self.meals_file)
    }

    pub fn recipes_path(&self) -> PathBuf {
        self.dir.join(&self.recipes_file)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_meals_file() -> String {
    "meals_data.json".to_string()
}

fn default_recipes_file() -> String {
    "recipes.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Structured JSON logs instead of the console format
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShuffleConfig {
    /// Fixed seed for reproducible shuffles, random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALBOARD__DATA__DIR, etc.)
    /// 2. Config file specified by path, CONFIG_PATH, or config/default.toml
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("data.dir", "data")?
            .set_default("data.meals_file", default_meals_file())?
            .set_default("data.recipes_file", default_recipes_file())?
            .set_default("observability.log_level", default_log_level())?
            .set_default("observability.json", false)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALBOARD")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.data.meals_file.trim().is_empty() {
            return Err("data.meals_file must not be empty".to_string());
        }
        if self.data.recipes_file.trim().is_empty() {
            return Err("data.recipes_file must not be empty".to_string());
        }
        if self.data.meals_file == self.data.recipes_file {
            return Err("data.meals_file and data.recipes_file must differ".to_string());
        }
        if self.observability.log_level.trim().is_empty() {
            return Err("observability.log_level must not be empty".to_string());
        }
        Ok(())
    }
}
