//! HTTP access for downloading the feed archive.

mod basic;
mod client;
#[cfg(test)]
mod stub;

pub use basic::BasicClient;
pub use client::HttpClient;
#[cfg(test)]
pub(crate) use stub::StubClient;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::debug;

/// Issues a GET for `url` and returns the response body.
///
/// Any non-2xx status is treated as an error.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid feed url '{url}'"))?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    let body = resp.bytes().await?;
    debug!(bytes = body.len(), "Response body received");

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_bytes_rejects_invalid_url() {
        let client = BasicClient::new();
        let result = fetch_bytes(&client, "not a url").await;

        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("invalid feed url"));
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let client = StubClient::ok(b"PK\x03\x04".to_vec());
        let body = fetch_bytes(&client, "https://example.com/gtfs.zip").await.unwrap();

        assert_eq!(&body[..], b"PK\x03\x04");
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_error_status() {
        for status in [404, 500] {
            let client = StubClient::status(status);
            let result = fetch_bytes(&client, "https://example.com/gtfs.zip").await;

            assert!(result.is_err(), "status {status} should fail");
        }
    }
}
