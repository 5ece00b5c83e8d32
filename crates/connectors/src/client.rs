//! Shared plumbing for the provider HTTP clients.

use serde::de::DeserializeOwned;

/// Errors from the provider API layer.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code with an unstructured
    /// body.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        /// Human-readable provider name for log and error messages.
        provider: &'static str,
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider rejected the call with a structured error payload.
    #[error("{provider} rejected the call: {message}")]
    Platform {
        provider: &'static str,
        message: String,
    },

    /// A 2xx body did not match the expected shape.
    #[error("{provider} response could not be decoded: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`ConnectorError::Api`] containing the
/// status and body text on failure.
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ConnectorError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ConnectorError::Api {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_json<T: DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T, ConnectorError> {
    let response = ensure_success(provider, response).await?;
    Ok(response.json::<T>().await?)
}
