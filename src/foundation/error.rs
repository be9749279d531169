pub type SceneloomResult<T> = Result<T, SceneloomError>;

#[derive(thiserror::Error, Debug)]
pub enum SceneloomError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported overlay object type: {0}")]
    UnsupportedObjectType(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("media error: {0}")]
    Media(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneloomError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unsupported_object_type(kind: impl Into<String>) -> Self {
        Self::UnsupportedObjectType(kind.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
