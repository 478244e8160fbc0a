use thiserror::Error;

use crate::category::HandlerName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("Unexpected request type: '{0}'")]
    UnexpectedRequestType(String),
    #[error("Intent request '{0}' does not contain an intent")]
    MissingIntent(String),
}

/// Everything that can go wrong while routing a request to a handler.
///
/// All of these are recovered from by passing them to the processing error handler of the skill.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid application id: expected '{expected}', found {found:?}")]
    Unauthorized {
        expected: String,
        found: Option<String>,
    },
    #[error("No handler implemented for '{0}'")]
    Unimplemented(HandlerName),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error("Handler '{handler}' failed")]
    Handler {
        handler: HandlerName,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Error)]
pub enum FulfillmentError {
    #[error("Processing error handler failed while recovering from: {cause}")]
    ProcessingError {
        cause: DispatchError,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("Attribute path '{0}' is not valid")]
    InvalidPath(String),
    #[error("Attribute '{segment}' in path '{path}' is not an object")]
    NotAnObject { path: String, segment: String },
}
