use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to merge settings from defaults, config file and PARITY_* environment: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid setting `{setting}`: {message}")]
    ValidationError { setting: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            setting: setting.into(),
            message: message.into(),
        }
    }
}
