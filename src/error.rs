use thiserror::Error;

/// Recoverable conditions reported by the simulation engine.
/// The engine stays usable after any of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("unknown pattern id: {0}")]
    UnknownPattern(u32),

    #[error("grid must be {}x{}, got {}x{}", .expected.0, .expected.1, .found.0, .found.1)]
    InvalidDimensions {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
