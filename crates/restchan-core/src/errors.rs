use std::time::Duration;

/// Error type shared by the client façade and every `ChannelService`.
///
/// Services map their transport/backend failures into this type. The façade
/// itself never produces one; it hands back whatever the service returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("api error: {status} {message}")]
    Api {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
