use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::invoice::{ArtifactStore, InvoiceError, RenderedDocument};

/// Artifact store writing to a local directory.
///
/// Useful for development and single-machine installs. The durable link is
/// either a `file://` path or, when a public base URL is configured, the
/// path joined onto that base (a reverse proxy serving the directory).
pub struct LocalDirArtifactStore {
  root: PathBuf,
  public_base_url: Option<String>,
}

impl LocalDirArtifactStore {
  pub fn new(root: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
    Self {
      root: root.into(),
      public_base_url,
    }
  }
}

#[async_trait]
impl ArtifactStore for LocalDirArtifactStore {
  async fn upload(
    &self,
    document: &RenderedDocument,
    path_hint: &str,
  ) -> Result<String, InvoiceError> {
    let target = self.root.join(path_hint);
    if let Some(parent) = target.parent() {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| InvoiceError::Upload(format!("cannot create {}: {}", parent.display(), e)))?;
    }

    // Writing the same path again overwrites: one artifact per invoice number.
    tokio::fs::write(&target, &document.bytes)
      .await
      .map_err(|e| InvoiceError::Upload(format!("cannot write {}: {}", target.display(), e)))?;

    tracing::debug!(path = %target.display(), bytes = document.bytes.len(), "artifact stored locally");

    let link = match &self.public_base_url {
      Some(base) => format!("{}/{}", base.trim_end_matches('/'), path_hint),
      None => format!("file://{}", target.display()),
    };
    Ok(link)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn document() -> RenderedDocument {
    RenderedDocument {
      filename: "invoice_1.pdf".to_string(),
      bytes: b"%PDF-stub".to_vec(),
    }
  }

  #[tokio::test]
  async fn test_upload_writes_file_and_returns_link() {
    let root = std::env::temp_dir().join(format!("billbuddy-store-{}", uuid::Uuid::new_v4()));
    let store = LocalDirArtifactStore::new(&root, None);

    let link = store
      .upload(&document(), "invoices/invoice_1.pdf")
      .await
      .unwrap();

    assert!(link.starts_with("file://"));
    let written = tokio::fs::read(root.join("invoices/invoice_1.pdf")).await.unwrap();
    assert_eq!(written, b"%PDF-stub");
  }

  #[tokio::test]
  async fn test_reupload_overwrites_the_same_path() {
    let root = std::env::temp_dir().join(format!("billbuddy-store-{}", uuid::Uuid::new_v4()));
    let store = LocalDirArtifactStore::new(&root, None);

    store.upload(&document(), "invoices/invoice_1.pdf").await.unwrap();
    let replacement = RenderedDocument {
      filename: "invoice_1.pdf".to_string(),
      bytes: b"%PDF-replacement".to_vec(),
    };
    store
      .upload(&replacement, "invoices/invoice_1.pdf")
      .await
      .unwrap();

    let written = tokio::fs::read(root.join("invoices/invoice_1.pdf")).await.unwrap();
    assert_eq!(written, b"%PDF-replacement");
  }

  #[tokio::test]
  async fn test_public_base_url_shapes_the_link() {
    let root = std::env::temp_dir().join(format!("billbuddy-store-{}", uuid::Uuid::new_v4()));
    let store =
      LocalDirArtifactStore::new(&root, Some("https://files.example.com/".to_string()));

    let link = store
      .upload(&document(), "invoices/invoice_1.pdf")
      .await
      .unwrap();

    assert_eq!(link, "https://files.example.com/invoices/invoice_1.pdf");
  }
}
