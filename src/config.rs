use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    pub page: PageConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Optional attractions CSV (same columns as the export). When absent
    /// the compiled-in sample dataset is used.
    pub attractions_csv: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageConfig {
    pub title: String,
    pub intro: String,
    #[serde(default = "default_map_width")]
    pub map_width: u32,
    #[serde(default = "default_map_height")]
    pub map_height: u32,
}

fn default_map_width() -> u32 {
    700
}

fn default_map_height() -> u32 {
    500
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory `generate` writes the CSV and HTML artifacts into.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml_str = r#"
            [input]
            attractions_csv = "data/attractions.csv"

            [page]
            title = "Malaysia Tourist Attractions Map"
            intro = "Explore the tourist attractions across Malaysia."
            map_width = 800
            map_height = 600

            [output]
            dir = "dist"

            [server]
            port = 8080
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.input.attractions_csv,
            Some(PathBuf::from("data/attractions.csv"))
        );
        assert_eq!(config.page.map_width, 800);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn embed_size_defaults_to_700_by_500() {
        let toml_str = r#"
            [input]

            [page]
            title = "Map"
            intro = "Intro line."

            [output]
            dir = "dist"

            [server]
            port = 8080
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.input.attractions_csv, None);
        assert_eq!(config.page.map_width, 700);
        assert_eq!(config.page.map_height, 500);
    }
}
