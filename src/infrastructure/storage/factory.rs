use std::sync::Arc;

use super::{HttpBucketArtifactStore, LocalDirArtifactStore};
use crate::domain::invoice::{ArtifactStore, InvoiceError};
use crate::infrastructure::config::StorageConfig;

/// Builds the artifact store selected by configuration.
pub fn create_artifact_store(
  config: &StorageConfig,
) -> Result<Arc<dyn ArtifactStore>, InvoiceError> {
  match config {
    StorageConfig::LocalDir {
      root_dir,
      public_base_url,
    } => Ok(Arc::new(LocalDirArtifactStore::new(
      root_dir,
      public_base_url.clone(),
    ))),
    StorageConfig::HttpBucket {
      endpoint,
      public_base_url,
    } => {
      if endpoint.trim().is_empty() {
        return Err(InvoiceError::Config(
          "storage.endpoint must be set for the http_bucket provider".to_string(),
        ));
      }
      Ok(Arc::new(HttpBucketArtifactStore::new(
        endpoint.clone(),
        public_base_url.clone(),
      )))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_blank_bucket_endpoint_is_rejected() {
    let config = StorageConfig::HttpBucket {
      endpoint: "  ".to_string(),
      public_base_url: "https://files.example.com".to_string(),
    };
    assert!(matches!(
      create_artifact_store(&config),
      Err(InvoiceError::Config(_))
    ));
  }

  #[test]
  fn test_local_dir_store_is_built() {
    let config = StorageConfig::LocalDir {
      root_dir: "./data/artifacts".to_string(),
      public_base_url: None,
    };
    assert!(create_artifact_store(&config).is_ok());
  }
}
