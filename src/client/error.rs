use std::fmt;

/// Non-success HTTP status returned by the API.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl ApiError {
    /// Rate limiting and server-side failures. Reported only; the scan
    /// still stops on the first error of any kind.
    pub fn is_transient(&self) -> bool {
        self.status == 429 || (500..600).contains(&self.status)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed with status {}: {}",
            self.method, self.url, self.status, self.body
        )
    }
}

impl std::error::Error for ApiError {}
