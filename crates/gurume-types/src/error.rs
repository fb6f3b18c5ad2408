use thiserror::Error;

/// Errors from encoding or decoding postback data.
#[derive(Debug, Error)]
pub enum PostbackError {
    /// The postback string is not a valid envelope for its action.
    #[error("malformed postback: {0}")]
    Malformed(String),

    #[error("postback data is {len} characters, limit is {limit}")]
    TooLarge { len: usize, limit: usize },
}

/// Errors from the places search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("places request failed: {0}")]
    Http(String),

    #[error("places API returned status {status}: {message}")]
    Status { status: String, message: String },

    #[error("invalid places response: {0}")]
    Parse(String),
}

/// Errors from repository operations (used by trait definitions in gurume-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from delivering a reply to the messaging platform.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("reply request failed: {0}")]
    Http(String),

    #[error("messaging platform rejected reply with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
