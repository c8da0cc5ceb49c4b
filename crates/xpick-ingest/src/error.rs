use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} fetching {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("unsupported image URL scheme: {url}")]
    UnsupportedScheme { url: String },

    #[error("image store I/O error at {path}: {source}")]
    Store {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Db(#[from] xpick_db::DbError),
}
