use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parsing(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parsing(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct Config {
    pub site: Option<SiteConfig>,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }
}

/// Site-level settings shown on the generated pages.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            tagline: "Notes and essays, pressed from plain markdown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: Config = toml::from_str("[site]\ntitle = \"Field Notes\"\n").unwrap();
        let site = config.site.unwrap();
        assert_eq!(site.title, "Field Notes");
        assert_eq!(site.tagline, SiteConfig::default().tagline);
    }

    #[test]
    fn empty_file_has_no_site_table() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.site.is_none());
    }

    #[test]
    fn read_reports_missing_file_as_io_error() {
        let err = Config::read("/no/such/minipress.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
