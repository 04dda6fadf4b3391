use super::client::HttpClient;
use async_trait::async_trait;

/// Answers every request with a canned status and body.
pub struct StubClient {
    pub status: u16,
    pub body: Vec<u8>,
}

impl StubClient {
    pub fn ok(body: Vec<u8>) -> Self {
        Self { status: 200, body }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

#[async_trait]
impl HttpClient for StubClient {
    async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let resp = http::Response::builder()
            .status(self.status)
            .body(self.body.clone())
            .expect("stub response must be valid");
        Ok(reqwest::Response::from(resp))
    }
}
