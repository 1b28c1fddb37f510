//! Optional TOML configuration.
//!
//! Mirrors the shape of a typical config-file loader: a small `serde`
//! struct, a dedicated error type, and a `load_config_file` entry point.
//! Every field has a sensible default so an absent or partial config file
//! is always usable.

use std::fs;
use std::path::Path;

use crate::render::ueb::DEFAULT_LINE_LENGTH;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file \"{path}\": {source}")]
    Read { path: String, #[source] source: std::io::Error },

    #[error("could not parse config file \"{path}\": {source}")]
    Parse { path: String, #[source] source: toml::de::Error },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct MathTextConfig {
    /// UEB line-wrap width, in braille cells. `0` disables wrapping.
    pub ueb_line_length: usize,
    /// Surround UEB operators with spaces (`SpaceUEBOperators`'s default).
    pub spaced_operators: bool,
    /// `\left`/`\right` auto-sizing for LaTeX groups.
    pub bracket_sizing: bool,
}

impl Default for MathTextConfig {
    fn default() -> Self {
        Self { ueb_line_length: DEFAULT_LINE_LENGTH, spaced_operators: false, bracket_sizing: true }
    }
}

/// Load a `MathTextConfig` from a TOML file. Every field is optional in
/// the file itself; anything not present keeps its default.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<MathTextConfig, ConfigError> {
    let path = path.as_ref();
    let display_path = path.to_string_lossy().into_owned();
    let text =
        fs::read_to_string(path).map_err(|source| ConfigError::Read { path: display_path.clone(), source })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse { path: display_path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = MathTextConfig::default();
        assert_eq!(cfg.ueb_line_length, DEFAULT_LINE_LENGTH);
        assert!(!cfg.spaced_operators);
        assert!(cfg.bracket_sizing);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg: MathTextConfig = toml::from_str("spaced_operators = true\n").unwrap();
        assert!(cfg.spaced_operators);
        assert_eq!(cfg.ueb_line_length, DEFAULT_LINE_LENGTH);
        assert!(cfg.bracket_sizing);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result: Result<MathTextConfig, _> = toml::from_str("ueb_line_length = \"not a number\"");
        assert!(result.is_err());
    }
}
