pub mod whatsapp;

pub use whatsapp::WhatsAppChannel;
