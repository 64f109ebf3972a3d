use thiserror::Error;

pub type Result<T> = std::result::Result<T, PackError>;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Item {id}: amount must be positive")]
    ZeroAmount { id: String },

    #[error("Grid capacity must be between {min} and {max}, got {got}")]
    Capacity { min: usize, max: usize, got: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for PackError {
    fn from(err: toml::de::Error) -> Self {
        PackError::Config(format!("TOML parse error: {}", err))
    }
}
