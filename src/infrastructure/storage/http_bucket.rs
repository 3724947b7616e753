use async_trait::async_trait;
use reqwest::Client;

use crate::domain::invoice::{ArtifactStore, InvoiceError, RenderedDocument};

/// Artifact store targeting an HTTP object bucket.
///
/// Objects are PUT to `{endpoint}/{path_hint}`; keys are stable per invoice
/// number, so a re-dispatch overwrites the previous object. The returned
/// link points at the public read endpoint for the same key.
pub struct HttpBucketArtifactStore {
  client: Client,
  endpoint: String,
  public_base_url: String,
}

impl HttpBucketArtifactStore {
  pub fn new(endpoint: impl Into<String>, public_base_url: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      endpoint: endpoint.into(),
      public_base_url: public_base_url.into(),
    }
  }

  fn object_url(&self, path_hint: &str) -> String {
    format!("{}/{}", self.endpoint.trim_end_matches('/'), path_hint)
  }

  fn public_url(&self, path_hint: &str) -> String {
    format!(
      "{}/{}",
      self.public_base_url.trim_end_matches('/'),
      path_hint
    )
  }
}

#[async_trait]
impl ArtifactStore for HttpBucketArtifactStore {
  async fn upload(
    &self,
    document: &RenderedDocument,
    path_hint: &str,
  ) -> Result<String, InvoiceError> {
    let url = self.object_url(path_hint);
    let response = self
      .client
      .put(&url)
      .header("content-type", "application/pdf")
      .body(document.bytes.clone())
      .send()
      .await
      .map_err(|e| InvoiceError::Upload(format!("PUT {} failed: {}", url, e)))?;

    if !response.status().is_success() {
      return Err(InvoiceError::Upload(format!(
        "PUT {} returned {}",
        url,
        response.status()
      )));
    }

    tracing::info!(%url, bytes = document.bytes.len(), "artifact uploaded");
    Ok(self.public_url(path_hint))
  }
}
