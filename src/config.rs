//! Configuration loading for the fraclus CLI.

use crate::core::{FraclusError, Result};
use crate::metric::MetricKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = ".fraclus.toml";

/// Tunable parameters, loadable from `.fraclus.toml` and overridable from
/// the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraclusConfig {
    /// Number of supporters for the fractal dimension estimate (>= 2)
    #[serde(default = "default_supporters")]
    pub supporters: usize,

    /// Linkage metric driving merge selection
    #[serde(default)]
    pub metric: MetricKind,
}

fn default_supporters() -> usize {
    5
}

impl Default for FraclusConfig {
    fn default() -> Self {
        Self {
            supporters: default_supporters(),
            metric: MetricKind::default(),
        }
    }
}

impl FraclusConfig {
    /// Load from an explicit path, or from `.fraclus.toml` in the current
    /// directory when present, or fall back to defaults. Validation runs
    /// once here, before any clustering starts.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| FraclusError::Configuration(format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> Result<()> {
        if self.supporters < 2 {
            return Err(FraclusError::InvalidParameter(self.supporters));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = FraclusConfig::default();
        assert_eq!(config.supporters, 5);
        assert_eq!(config.metric, MetricKind::FractalDimension);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: FraclusConfig = toml::from_str("supporters = 3").unwrap();
        assert_eq!(config.supporters, 3);
        assert_eq!(config.metric, MetricKind::FractalDimension);
    }

    #[test]
    fn full_toml_parses() {
        let contents = indoc! {r#"
            supporters = 8
            metric = "centroid"
        "#};
        let config: FraclusConfig = toml::from_str(contents).unwrap();
        assert_eq!(
            config,
            FraclusConfig {
                supporters: 8,
                metric: MetricKind::Centroid,
            }
        );
    }

    #[test]
    fn supporter_count_below_two_fails_validation() {
        let config = FraclusConfig {
            supporters: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FraclusError::InvalidParameter(1))
        ));
    }

    #[test]
    fn load_reads_an_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "supporters = 4").unwrap();
        let config = FraclusConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.supporters, 4);
    }

    #[test]
    fn load_rejects_invalid_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "supporters = \"many\"").unwrap();
        let err = FraclusConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, FraclusError::Configuration(_)));
    }
}
