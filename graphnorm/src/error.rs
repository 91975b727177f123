use std::fmt;

/// The error type for `graphnorm` operations.
///
/// Wraps [`graphnorm_core::Error`] the way the facade is meant to: callers
/// embedding `graphnorm` in a larger application see one error type instead
/// of reaching into `graphnorm-core`'s internals.
#[derive(Debug)]
pub enum Error {
    /// Required configuration was missing at construction time.
    Configuration(String),
    /// Two reference edits disagreed on the same `(holder, path)` in one merge.
    IdentityViolation(String),
    /// An expected edge-removal counterpart was missing.
    EdgeSymmetryCorruption(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(e) => write!(f, "configuration error: {}", e),
            Error::IdentityViolation(e) => write!(f, "identity violation: {}", e),
            Error::EdgeSymmetryCorruption(e) => write!(f, "edge symmetry corruption: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<graphnorm_core::Error> for Error {
    fn from(e: graphnorm_core::Error) -> Self {
        match e {
            graphnorm_core::Error::MissingEntityId => Error::Configuration(e.to_string()),
            graphnorm_core::Error::IdentityViolation { .. } => {
                Error::IdentityViolation(e.to_string())
            }
            graphnorm_core::Error::EdgeSymmetryCorruption { .. } => {
                Error::EdgeSymmetryCorruption(e.to_string())
            }
        }
    }
}

/// A specialized `Result` type for `graphnorm` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn map_missing_entity_id_to_configuration_error() {
        let err: Error = graphnorm_core::Error::MissingEntityId.into();
        match err {
            Error::Configuration(msg) => assert!(msg.contains("entity_id_for_node")),
            other => panic!("expected configuration error, got: {other:?}"),
        }
    }
}
