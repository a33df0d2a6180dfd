use thiserror::Error;

/// Errors returned when constructing a sketch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A constructor was called with an out-of-range parameter.
    #[error("invalid parameter `{name}` (expected {expected}, found: {found})")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable description of the accepted range.
        expected: &'static str,
        /// The rejected value.
        found: String,
    },
}

impl Error {
    pub(crate) fn invalid_parameter(
        name: &'static str,
        expected: &'static str,
        found: impl ToString,
    ) -> Self {
        Error::InvalidParameter {
            name,
            expected,
            found: found.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
