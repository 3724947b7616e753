use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceArchive, InvoiceError};

/// In-memory append-only archive.
///
/// Backs tests and database-free embeddings. Every append stores a new
/// record under a fresh snapshot id, mirroring the durable adapter.
pub struct InMemoryInvoiceArchive {
  snapshots: RwLock<Vec<(Uuid, Invoice)>>,
}

impl InMemoryInvoiceArchive {
  pub fn new() -> Self {
    Self {
      snapshots: RwLock::new(Vec::new()),
    }
  }

  pub async fn snapshot_count(&self) -> usize {
    self.snapshots.read().await.len()
  }
}

impl Default for InMemoryInvoiceArchive {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl InvoiceArchive for InMemoryInvoiceArchive {
  async fn append(&self, snapshot: Invoice) -> Result<Uuid, InvoiceError> {
    let snapshot_id = Uuid::new_v4();
    self.snapshots.write().await.push((snapshot_id, snapshot));
    Ok(snapshot_id)
  }

  async fn latest_for_account(&self, account_id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let snapshots = self.snapshots.read().await;
    let latest = snapshots
      .iter()
      .filter(|(_, invoice)| invoice.account_id == account_id)
      .max_by_key(|(_, invoice)| invoice.number)
      .map(|(_, invoice)| invoice.clone());
    Ok(latest)
  }
}
