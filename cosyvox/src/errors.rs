/// Errors that can occur while talking to the DashScope service.
///
/// The taxonomy is deliberately flat: every remote operation either produces
/// exactly one result or exactly one of these errors. There is no retry state
/// and no partial success.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum VoxError {
    /// No API key was provided and none could be resolved from the
    /// environment.
    #[error("DASHSCOPE_API_KEY not found in environment")]
    MissingApiKey,

    /// The HTTP request could not be completed (DNS, connect, TLS, or
    /// mid-transfer failure).
    #[error("{operation} request failed: {message}")]
    Http {
        /// Which remote operation was being performed.
        operation: &'static str,
        /// The underlying transport error, stringified.
        message: String,
    },

    /// The service answered with a non-success status code.
    #[error("{operation} rejected by service (status {status}): {message}")]
    Api {
        /// Which remote operation was being performed.
        operation: &'static str,
        /// HTTP status code of the response.
        status: u16,
        /// Error description extracted from the response body.
        message: String,
    },

    /// The service answered with a success status but the body did not match
    /// the documented response shape.
    #[error("{operation} returned an unexpected response: {detail}")]
    UnexpectedResponse {
        /// Which remote operation was being performed.
        operation: &'static str,
        /// What was wrong with the body.
        detail: String,
    },

    /// The service reported success but returned no audio bytes at all.
    ///
    /// Kept distinct from [`VoxError::Api`] so callers can tell "the service
    /// refused" apart from "the service claimed success and delivered
    /// nothing".
    #[error("service returned no audio data")]
    EmptyAudio,
}
