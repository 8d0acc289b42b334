use thiserror::Error;

/// Errors from the Google Sheets mirror.
///
/// These never reach end users: reads degrade to "no information" and writes are
/// retried by the reconciliation task. Callers log them and move on.
#[derive(Error, Debug)]
pub enum SheetsError {
    /// HTTP transport failure talking to the Google APIs.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Service-account key could not be parsed or the assertion could not be signed.
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Request URL could not be constructed.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// The Sheets or token API answered with a non-success status.
    #[error("Sheets API returned status {status}: {message}")]
    Api { status: u16, message: String },
}
