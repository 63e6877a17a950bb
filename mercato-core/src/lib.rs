pub mod channel;
pub mod directory;

/// Shared failure taxonomy for the fulfillment engine.
///
/// The first five variants are the caller-facing contract: the HTTP layer maps
/// each to a distinct status code and clients are expected to branch on them
/// (wait on `NotReady`, reload and retry once on `Conflict`, give up on the
/// permanent ones).
#[derive(Debug, thiserror::Error)]
pub enum FulfillmentError {
    #[error("Order or item not found: {0}")]
    NotFound(String),

    #[error("Acting party may not modify this item: {0}")]
    Forbidden(String),

    #[error("Invalid state transition from {from} to {requested}")]
    InvalidTransition { from: String, requested: String },

    #[error("Order is not ready to advance: {0}")]
    NotReady(String),

    #[error("Status changed concurrently: expected {expected}, found {actual}")]
    Conflict { expected: String, actual: String },

    #[error("Store operation failed: {0}")]
    Store(String),
}

pub type CoreResult<T> = Result<T, FulfillmentError>;
