/// Errors from the payment processor HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The processor returned a non-2xx status code.
    #[error("Payment processor error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The processor accepted the request but the response was unusable.
    #[error("Unexpected payment processor response: {0}")]
    InvalidResponse(String),
}
