use std::path::PathBuf;

/// Errors that can occur when parsing pieces, cells or actions from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid piece '{0}' (expected an id 0-15 or a glyph like 'TfDR')")]
    Piece(String),

    #[error("invalid cell '{0}' (expected 'row,col' or an index 0-15)")]
    Cell(String),

    #[error("invalid action '{0}' (expected '<cell> [piece]')")]
    Action(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::Cell("9,9".to_string());
        assert_eq!(
            err.to_string(),
            "invalid cell '9,9' (expected 'row,col' or an index 0-15)"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("rewards.win must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: rewards.win must be > 0"
        );
    }
}
