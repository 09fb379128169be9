use thiserror::Error;

/// Reasons a need reading is rejected by [`crate::need::NeedBar::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NeedError {
    #[error("value must be a finite number")]
    NonFiniteValue,
    #[error("max value must be a finite number")]
    NonFiniteMax,
    #[error("max value must be greater than zero, got {0}")]
    NonPositiveMax(f64),
    #[error("unknown need category `{0}` (expected food, water or sleep)")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid need reading `{label}`: {source}")]
    InvalidNeed {
        label: String,
        #[source]
        source: NeedError,
    },
}

impl From<figment::Error> for SettingsError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}
