//! Command implementations for schoolbook CLI

pub mod add;
pub mod list;
pub mod migrate;
pub mod serve;

pub use add::run_add;
pub use list::run_list;
pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// Default API endpoint for the client commands
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Join the endpoint and the schools path, tolerating a trailing slash.
pub(crate) fn schools_url(endpoint: &str) -> String {
    format!("{}/api/schools", endpoint.trim_end_matches('/'))
}

/// Parse a success body, or turn the server's `{message}` into an error.
pub(crate) async fn handle_response<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&error_text) {
            Err(anyhow!("{}: {}", status, error_resp.message))
        } else {
            Err(anyhow!("{}: {}", status, error_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schools_url_trims_trailing_slash() {
        assert_eq!(
            schools_url("http://127.0.0.1:3000/"),
            "http://127.0.0.1:3000/api/schools"
        );
        assert_eq!(
            schools_url(DEFAULT_ENDPOINT),
            "http://127.0.0.1:3000/api/schools"
        );
    }
}
