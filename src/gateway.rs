// SPDX-License-Identifier: MPL-2.0
//! Network gateway for the gallery backend.
//!
//! The read and write halves are separate traits so the pagination cache and
//! the upload mutator can each be stubbed independently in tests:
//!
//! - [`PageSource`]: fetch one page of the collection for a cursor.
//! - [`ImageSink`]: create one image from validated multipart fields.
//!
//! [`HttpGateway`] implements both over a single `reqwest` client. Neither
//! trait retries internally; the caller decides what a failure means.

use crate::error::{Error, Result};
use crate::model::{Image, Page};
use crate::upload::ImageUpload;
use async_trait::async_trait;
use serde::Deserialize;

/// Default user agent sent with every request.
const USER_AGENT: &str = concat!("imagewall/", env!("CARGO_PKG_VERSION"));

/// Maximum redirects the client will follow before treating the chain as a failure.
const MAX_REDIRECTS: usize = 10;

/// Read half of the gateway: fetches one page of the paginated collection.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page at `cursor`, or the first page when `cursor` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] on transport failure and [`Error::Server`]
    /// when the backend answers with status >= 400. Never retried internally.
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page>;
}

/// Write half of the gateway: submits one new image.
#[async_trait]
pub trait ImageSink: Send + Sync {
    /// Creates a new image from already-validated upload fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] on transport failure and [`Error::Server`]
    /// when the backend rejects the upload.
    async fn create_image(&self, upload: &ImageUpload) -> Result<Image>;
}

/// Error body shape the backend uses for 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP gateway against the gallery backend.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway rooted at `base_url` (scheme + host, no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn images_endpoint(&self) -> String {
        format!("{}/api/images", self.base_url)
    }
}

/// Converts an HTTP error response into [`Error::Server`], pulling the detail
/// out of an `{"error": ...}` body when the backend sent one.
async fn server_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    };
    Error::Server { status, detail }
}

#[async_trait]
impl PageSource for HttpGateway {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page> {
        let mut request = self.client.get(self.images_endpoint());
        if let Some(after) = cursor {
            request = request.query(&[("after", after)]);
        }

        tracing::debug!(cursor, "fetching gallery page");

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        response
            .json::<Page>()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }
}

#[async_trait]
impl ImageSink for HttpGateway {
    async fn create_image(&self, upload: &ImageUpload) -> Result<Image> {
        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| Error::Network(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("title", upload.title.clone())
            .text("description", upload.description.clone());

        tracing::debug!(title = %upload.title, bytes = upload.bytes.len(), "posting new image");

        let response = self
            .client
            .post(self.images_endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        response
            .json::<Image>()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_base_url() {
        let gateway = HttpGateway::new("https://gallery.example//").expect("client builds");
        assert_eq!(gateway.base_url(), "https://gallery.example");
        assert_eq!(gateway.images_endpoint(), "https://gallery.example/api/images");
    }

    #[test]
    fn error_body_parses_backend_shape() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "title already taken"}"#).expect("valid error body");
        assert_eq!(body.error, "title already taken");
    }
}
