pub mod branding_repository;
pub mod invoice_archive;

pub use branding_repository::PostgresBrandingRepository;
pub use invoice_archive::PostgresInvoiceArchive;
