use thiserror::Error;

pub type Result<T> = std::result::Result<T, AspectError>;

/// A type-erased error raised by an intercepted target method.
pub type InvocationError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AspectError {
    #[error("Aspect processor not registered: {type_name}")]
    ProcessorNotRegistered { type_name: String },

    #[error("Aspect processor {type_name} does not produce {expected}")]
    ReturnTypeMismatch { type_name: String, expected: String },

    #[error("{type_name} is an interface or abstract type and cannot be registered")]
    NotConcrete { type_name: String },

    #[error("Invocation of {tag} was vetoed: {reason}")]
    Vetoed { tag: String, reason: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl AspectError {
    /// Create a veto error for the given log tag
    pub fn vetoed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Vetoed {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AspectError {
    fn from(err: serde_json::Error) -> Self {
        AspectError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
