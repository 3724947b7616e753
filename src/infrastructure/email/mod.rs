pub mod smtp;

pub use smtp::SmtpEmailChannel;
