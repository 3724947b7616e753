pub mod memory;
pub mod postgres;

pub use memory::InMemoryInvoiceArchive;
pub use postgres::{PostgresBrandingRepository, PostgresInvoiceArchive};
