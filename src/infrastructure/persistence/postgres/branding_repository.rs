use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::invoice::{BrandingProfile, BrandingRepository, InvoiceError, LogoImage};

#[derive(Debug, FromRow)]
struct BrandingRow {
  business_name: String,
  logo_reference: Option<String>,
  logo_data: Option<Vec<u8>>,
}

impl From<BrandingRow> for BrandingProfile {
  fn from(row: BrandingRow) -> Self {
    let logo = match (row.logo_reference, row.logo_data) {
      (Some(reference), Some(data)) => Some(LogoImage { reference, data }),
      _ => None,
    };
    BrandingProfile {
      business_name: row.business_name,
      logo,
    }
  }
}

pub struct PostgresBrandingRepository {
  pool: PgPool,
}

impl PostgresBrandingRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl BrandingRepository for PostgresBrandingRepository {
  async fn load(&self, account_id: Uuid) -> Result<Option<BrandingProfile>, InvoiceError> {
    let row = sqlx::query_as::<_, BrandingRow>(
      r#"
            SELECT business_name, logo_reference, logo_data
            FROM account_profiles
            WHERE account_id = $1
            "#,
    )
    .bind(account_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(BrandingProfile::from))
  }
}
