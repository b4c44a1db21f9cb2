use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default configuration file looked for in the working directory.
const DEFAULT_CONFIG_PATH: &str = "clearview.toml";

/// Top-level ClearView configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ClearviewConfig {
    /// Load settings.
    #[serde(default)]
    pub load: LoadToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LoadToml {
    /// Simulation start year (day 1.0 falls on January 1st of this year).
    pub start_year: Option<i32>,

    /// Skip malformed rows instead of aborting.
    #[serde(default)]
    pub lenient: bool,

    /// Zero-based index of the label row, skipping discovery.
    pub header_row: Option<usize>,

    /// Field width for fixed-width files.
    pub field_width: Option<usize>,

    /// Header discovery window.
    pub header_lookahead: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    /// Table or group name in the destination container.
    pub key: Option<String>,
}

/// Load the configuration.
///
/// An explicitly given path must exist; otherwise `clearview.toml` is
/// read when present and defaults apply when it is not.
pub fn load(path: Option<&Path>) -> Result<ClearviewConfig> {
    let path = match path {
        Some(p) => p,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok(ClearviewConfig::default());
            }
            default
        }
    };

    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg: ClearviewConfig = toml::from_str(
            r#"
            [load]
            start_year = 2006
            lenient = true
            header_row = 2

            [output]
            key = "tsr_1_seg37"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.load.start_year, Some(2006));
        assert!(cfg.load.lenient);
        assert_eq!(cfg.load.header_row, Some(2));
        assert_eq!(cfg.output.key.as_deref(), Some("tsr_1_seg37"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: ClearviewConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.load.start_year, None);
        assert!(!cfg.load.lenient);
        assert!(cfg.output.key.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ClearviewConfig, _> = toml::from_str("[load]\nstartyear = 2006\n");
        assert!(result.is_err());
    }
}
