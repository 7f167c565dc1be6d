use thiserror::Error;

/// Error types
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Malformed parameters or a bad particle-count precondition at attach
    /// time. Fatal to the offending call only.
    #[error("invalid force configuration: {0}")]
    Configuration(String),

    /// An operation that requires an attached backend was called on a
    /// detached component. Carries the name of the offending operation.
    #[error("{0}: operation on detached force component")]
    InvalidState(&'static str),
}
