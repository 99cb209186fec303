use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MinipressConfig {
    /// Build configuration
    pub build: BuildConfig,
    /// Site configuration (from minipress-core)
    #[serde(flatten)]
    pub site: minipress_core::Config,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Directory containing markdown posts
    pub content: String,
    /// Directory the generated site is written to
    pub output: String,
    /// Configuration file path
    pub config: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "./content".to_string(),
            output: ".".to_string(),
            config: "./minipress.toml".to_string(),
        }
    }
}

impl Default for MinipressConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            site: minipress_core::Config::default(),
        }
    }
}

impl MinipressConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (MINIPRESS_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .get_one::<String>("config")
            .cloned()
            .unwrap_or_else(|| "./minipress.toml".to_string());

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(File::with_name(&config_file.replace(".toml", "")));
        }

        // 3. Add environment variables with MINIPRESS_ prefix
        builder = builder.add_source(
            Environment::with_prefix("MINIPRESS")
                .prefix_separator("_")
                .separator("__"), // Double underscore for nested keys
        );

        // 4. Override with CLI arguments (highest priority)
        let mut cli_overrides = std::collections::HashMap::new();

        // Only override with args that are actually defined for this command
        if let Some(content) = args.try_get_one::<String>("content").unwrap_or(None) {
            cli_overrides.insert("build.content".to_string(), content.clone());
        }
        if let Some(output) = args.get_one::<String>("output") {
            cli_overrides.insert("build.output".to_string(), output.clone());
        }
        if let Some(config_path) = args.get_one::<String>("config") {
            cli_overrides.insert("build.config".to_string(), config_path.clone());
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
        }

        // Build and deserialize
        let merged = builder.build()?;
        let config: MinipressConfig = merged.try_deserialize()?;

        Ok(config)
    }

    /// Get the site settings for passing to minipress-core
    pub fn site_config(&self) -> minipress_core::SiteConfig {
        self.site.site.clone().unwrap_or_default()
    }

    /// Get the build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

/// Load configuration specifically for build commands
pub fn load_build_config(args: &ArgMatches) -> Result<MinipressConfig> {
    MinipressConfig::load(args)
}
