//! HTTP saver for the page-content endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::cancel::CancellationToken;
use crate::error::{SaveError, SaveResult};
use crate::saver::Saver;

#[derive(Serialize)]
struct PageContent<'a, T> {
    content: &'a T,
}

/// Saves snapshots with `PUT {base}/api/pages/{page_id}/content` and a
/// `{"content": ...}` JSON body.
#[derive(Debug, Clone)]
pub struct HttpPageSaver {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpPageSaver {
    /// Build a saver for one page.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::InvalidUrl`] if `base_url` does not parse or
    /// cannot carry a path, and [`SaveError::Http`] if the client cannot be
    /// built.
    pub fn new(base_url: &str, page_id: &str) -> Result<Self, SaveError> {
        let mut endpoint =
            Url::parse(base_url).map_err(|e| SaveError::InvalidUrl(format!("{base_url}: {e}")))?;
        endpoint
            .path_segments_mut()
            .map_err(|()| SaveError::InvalidUrl(format!("{base_url}: cannot be a base URL")))?
            .pop_if_empty()
            .extend(["api", "pages", page_id, "content"]);

        let client = Client::builder()
            .user_agent(concat!("pagebuilder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl<T> Saver<T> for HttpPageSaver
where
    T: Serialize + Send + Sync + 'static,
{
    async fn save(&self, snapshot: T, cancel: CancellationToken) -> SaveResult {
        let mut request = self
            .client
            .put(self.endpoint.clone())
            .json(&PageContent { content: &snapshot });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = tokio::select! {
            response = request.send() => response?,
            () = cancel.cancelled() => return Err(SaveError::Cancelled),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint = %self.endpoint, status = status.as_u16(), "Save rejected");
            return Err(SaveError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(endpoint = %self.endpoint, "Page content stored");
        Ok(())
    }
}
