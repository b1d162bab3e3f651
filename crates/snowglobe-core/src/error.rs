use thiserror::Error;

/// Rejected construction input. Runtime operations never return errors;
/// they degrade to no-ops instead.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("enclosure radius must be finite and positive, got {0}")]
    InvalidRadius(f32),
    #[error("unknown backdrop `{0}` (expected sunset or night)")]
    UnknownBackdrop(String),
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}
