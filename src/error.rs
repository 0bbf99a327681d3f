//! Error taxonomy
//!
//! Nothing here is fatal: callers log these and carry on with the operation
//! degraded to a no-op. Expected absence (level or season not in the catalog)
//! is an `Option`, not an error.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A required collaborator or descriptor was not provided
    ReferenceMissing(&'static str),
    /// A screen state was requested by a name that doesn't exist
    UnknownState(String),
    /// Backing storage rejected a read or write
    Persistence(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ReferenceMissing(what) => write!(f, "missing reference: {what}"),
            GameError::UnknownState(name) => write!(f, "state '{name}' not found"),
            GameError::Persistence(msg) => write!(f, "persistence error: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GameError::UnknownState("Credits".into()).to_string(),
            "state 'Credits' not found"
        );
        assert_eq!(
            GameError::ReferenceMissing("ball").to_string(),
            "missing reference: ball"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(matches!(GameError::from(err), GameError::Persistence(_)));
    }
}
