use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam between the downloader and the HTTP stack.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
