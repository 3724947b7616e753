use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceArchive, InvoiceError};

#[derive(Debug, FromRow)]
struct SnapshotRow {
  payload: String,
}

/// Append-only snapshot archive backed by Postgres.
///
/// Each commit inserts one row; the full invoice state travels as a JSON
/// payload, with the account id and invoice number lifted into columns for
/// the latest-number query. Rows are never updated or deleted.
pub struct PostgresInvoiceArchive {
  pool: PgPool,
}

impl PostgresInvoiceArchive {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceArchive for PostgresInvoiceArchive {
  async fn append(&self, snapshot: Invoice) -> Result<Uuid, InvoiceError> {
    let snapshot_id = Uuid::new_v4();
    let payload = serde_json::to_string(&snapshot)
      .map_err(|e| InvoiceError::Persistence(format!("snapshot serialization failed: {}", e)))?;

    sqlx::query(
      r#"
            INSERT INTO invoice_snapshots (id, account_id, invoice_number, payload, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
    )
    .bind(snapshot_id)
    .bind(snapshot.account_id)
    .bind(i64::from(snapshot.number.value()))
    .bind(payload)
    .bind(Utc::now())
    .execute(&self.pool)
    .await?;

    Ok(snapshot_id)
  }

  async fn latest_for_account(&self, account_id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, SnapshotRow>(
      r#"
            SELECT payload
            FROM invoice_snapshots
            WHERE account_id = $1
            ORDER BY invoice_number DESC, created_at DESC
            LIMIT 1
            "#,
    )
    .bind(account_id)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => {
        let invoice = serde_json::from_str(&row.payload)
          .map_err(|e| InvoiceError::Persistence(format!("corrupt snapshot payload: {}", e)))?;
        Ok(Some(invoice))
      }
      None => Ok(None),
    }
  }
}
