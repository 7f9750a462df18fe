use crate::models::GeneratorConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Name of the configuration file looked up in the config directory
pub const CONFIG_FILE_NAME: &str = "bulkgen.yaml";

/// Configuration manager for loading and saving the YAML generator settings.
///
/// The file is optional: when it is absent every setting takes its default.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    generator_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for `config_dir`.
    ///
    /// Unlike the output directory, the config directory is never created here; a
    /// missing directory just means no configuration file.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();

        Self {
            generator_config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        }
    }

    /// Load the generator configuration.
    ///
    /// # Returns
    /// The loaded GeneratorConfig, or defaults if the file doesn't exist
    pub fn load_generator_config(&self) -> Result<GeneratorConfig> {
        if !self.generator_config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.generator_config_path
            );
            return Ok(GeneratorConfig::default());
        }

        let file_contents = fs::read_to_string(&self.generator_config_path).with_context(|| {
            format!("Failed to read config: {}", self.generator_config_path)
        })?;

        let config: GeneratorConfig = serde_yaml_ng::from_str(&file_contents).with_context(|| {
            format!("Failed to parse config: {}", self.generator_config_path)
        })?;

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", self.generator_config_path))?;

        tracing::info!("Loaded config from {}", self.generator_config_path);
        Ok(config)
    }

    /// Save the generator configuration, creating the config directory if needed.
    pub fn save_generator_config(&self, config: &GeneratorConfig) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).with_context(|| {
                format!("Failed to create config directory: {}", self.config_dir)
            })?;
        }

        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.generator_config_path, yaml_string).with_context(|| {
            format!("Failed to write config: {}", self.generator_config_path)
        })?;

        tracing::info!("Saved config to {}", self.generator_config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.generator_config_path
    }
}
